#[cfg(test)]
mod tests {
    use crate::accounts::{Account, AccountRepositoryTrait, AccountResolver, NewAccount};
    use crate::balances::{AccountBalance, BalanceDelta, BalanceRepositoryTrait, BalanceStore};
    use crate::errors::{DatabaseError, Error, ErrorKind, Result};
    use crate::ledger::{LedgerScope, LedgerService, LedgerServiceTrait, LedgerTransactionExecutor};
    use crate::movements::{
        CashKind, CashMovement, ExchangeMovement, Movement, MovementDetails, MovementError,
        MovementRepositoryTrait, MovementStore, NewMovement, TradeKind, TradeMovement,
    };
    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveDateTime};
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::{Arc, Mutex};

    // --- In-memory ledger ---

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum FailPoint {
        Never,
        OnCreate,
        OnReplace,
        OnDelete,
    }

    #[derive(Clone, Default)]
    struct LedgerState {
        accounts: HashMap<String, Account>,
        balances: BTreeMap<(String, String), Decimal>,
        movements: Vec<Movement>,
        next_id: u64,
    }

    struct InMemoryScope {
        state: LedgerState,
        fail_point: FailPoint,
    }

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn injected_failure(step: &str) -> Error {
        Error::Database(DatabaseError::QueryFailed(format!("injected failure on {}", step)))
    }

    impl AccountResolver for InMemoryScope {
        fn resolve_account(&mut self, account_id: &str) -> Result<Account> {
            self.state
                .accounts
                .get(account_id)
                .cloned()
                .ok_or_else(|| Error::AccountNotFound(account_id.to_string()))
        }
    }

    impl BalanceStore for InMemoryScope {
        fn apply_delta(&mut self, delta: &BalanceDelta) -> Result<()> {
            self.resolve_account(&delta.account_id)?;
            let balance = self
                .state
                .balances
                .entry((delta.account_id.clone(), delta.currency.clone()))
                .or_insert(Decimal::ZERO);
            *balance = balance.checked_add(delta.amount).ok_or_else(|| {
                Error::ArithmeticOverflow(format!(
                    "balance of {}/{}",
                    delta.account_id, delta.currency
                ))
            })?;
            Ok(())
        }
    }

    impl MovementStore for InMemoryScope {
        fn find_movement(&mut self, movement_id: &str) -> Result<Movement> {
            self.state
                .movements
                .iter()
                .find(|m| m.id == movement_id)
                .cloned()
                .ok_or_else(|| MovementError::NotFound(movement_id.to_string()).into())
        }

        fn create_movement(&mut self, new_movement: NewMovement) -> Result<Movement> {
            if self.fail_point == FailPoint::OnCreate {
                return Err(injected_failure("create"));
            }
            self.state.next_id += 1;
            let id = format!("mov-{}", self.state.next_id);
            let movement = Movement::from_new(id, new_movement, timestamp(), timestamp());
            self.state.movements.push(movement.clone());
            Ok(movement)
        }

        fn replace_movement(
            &mut self,
            movement_id: &str,
            new_movement: NewMovement,
        ) -> Result<Movement> {
            if self.fail_point == FailPoint::OnReplace {
                return Err(injected_failure("replace"));
            }
            let stored = self
                .state
                .movements
                .iter_mut()
                .find(|m| m.id == movement_id)
                .ok_or_else(|| Error::from(MovementError::NotFound(movement_id.to_string())))?;
            *stored = Movement::from_new(movement_id, new_movement, stored.created_at, timestamp());
            Ok(stored.clone())
        }

        fn delete_movement(&mut self, movement_id: &str) -> Result<()> {
            if self.fail_point == FailPoint::OnDelete {
                return Err(injected_failure("delete"));
            }
            self.state.movements.retain(|m| m.id != movement_id);
            Ok(())
        }
    }

    /// Runs jobs against a copy of the state and swaps it in on success.
    #[derive(Clone)]
    struct InMemoryLedger {
        state: Arc<Mutex<LedgerState>>,
        fail_point: Arc<Mutex<FailPoint>>,
    }

    impl InMemoryLedger {
        fn with_accounts(ids: &[&str]) -> Self {
            let mut state = LedgerState::default();
            for id in ids {
                state.accounts.insert(
                    id.to_string(),
                    Account {
                        id: id.to_string(),
                        name: format!("Account {}", id),
                        account_type: "BANK".to_string(),
                        currency: "KRW".to_string(),
                        is_active: true,
                        ..Default::default()
                    },
                );
            }
            Self {
                state: Arc::new(Mutex::new(state)),
                fail_point: Arc::new(Mutex::new(FailPoint::Never)),
            }
        }

        fn fail_on(&self, fail_point: FailPoint) {
            *self.fail_point.lock().unwrap() = fail_point;
        }

        fn balance(&self, account_id: &str, currency: &str) -> Decimal {
            self.state
                .lock()
                .unwrap()
                .balances
                .get(&(account_id.to_string(), currency.to_string()))
                .copied()
                .unwrap_or(Decimal::ZERO)
        }

        /// Non-zero balances only, so zero entries left behind by reversals compare equal.
        fn non_zero_balances(&self) -> BTreeMap<(String, String), Decimal> {
            self.state
                .lock()
                .unwrap()
                .balances
                .iter()
                .filter(|(_, amount)| !amount.is_zero())
                .map(|(key, amount)| (key.clone(), *amount))
                .collect()
        }

        fn movements(&self) -> Vec<Movement> {
            self.state.lock().unwrap().movements.clone()
        }

        fn tamper_balance(&self, account_id: &str, currency: &str, amount: Decimal) {
            self.state
                .lock()
                .unwrap()
                .balances
                .insert((account_id.to_string(), currency.to_string()), amount);
        }
    }

    #[async_trait]
    impl LedgerTransactionExecutor for InMemoryLedger {
        async fn execute<F, T>(&self, job: F) -> Result<T>
        where
            F: FnOnce(&mut dyn LedgerScope) -> Result<T> + Send + 'static,
            T: Send + 'static,
        {
            let fail_point = *self.fail_point.lock().unwrap();
            let state = self.state.lock().unwrap().clone();
            let mut scope = InMemoryScope { state, fail_point };
            let result = job(&mut scope);
            if result.is_ok() {
                *self.state.lock().unwrap() = scope.state;
            }
            result
        }
    }

    impl BalanceRepositoryTrait for InMemoryLedger {
        fn get_balance(&self, account_id: &str, currency: &str) -> Result<Option<AccountBalance>> {
            Ok(self
                .state
                .lock()
                .unwrap()
                .balances
                .get(&(account_id.to_string(), currency.to_string()))
                .map(|amount| AccountBalance {
                    account_id: account_id.to_string(),
                    currency: currency.to_string(),
                    amount: *amount,
                    updated_at: timestamp(),
                }))
        }

        fn get_account_balances(&self, account_id: &str) -> Result<Vec<AccountBalance>> {
            Ok(self
                .get_all_balances()?
                .into_iter()
                .filter(|b| b.account_id == account_id)
                .collect())
        }

        fn get_all_balances(&self) -> Result<Vec<AccountBalance>> {
            Ok(self
                .state
                .lock()
                .unwrap()
                .balances
                .iter()
                .map(|((account_id, currency), amount)| AccountBalance {
                    account_id: account_id.clone(),
                    currency: currency.clone(),
                    amount: *amount,
                    updated_at: timestamp(),
                })
                .collect())
        }
    }

    impl MovementRepositoryTrait for InMemoryLedger {
        fn get_movement(&self, movement_id: &str) -> Result<Movement> {
            self.movements()
                .into_iter()
                .find(|m| m.id == movement_id)
                .ok_or_else(|| MovementError::NotFound(movement_id.to_string()).into())
        }

        fn list_movements(&self, account_id: Option<&str>) -> Result<Vec<Movement>> {
            Ok(self
                .movements()
                .into_iter()
                .filter(|m| account_id.map_or(true, |id| m.details.account_ids().contains(&id)))
                .collect())
        }
    }

    #[async_trait]
    impl AccountRepositoryTrait for InMemoryLedger {
        async fn create(&self, new_account: NewAccount) -> Result<Account> {
            let account = Account {
                id: new_account.id.unwrap_or_else(|| "generated".to_string()),
                name: new_account.name,
                account_type: new_account.account_type,
                currency: new_account.currency,
                is_active: new_account.is_active,
                ..Default::default()
            };
            self.state
                .lock()
                .unwrap()
                .accounts
                .insert(account.id.clone(), account.clone());
            Ok(account)
        }

        async fn delete(&self, account_id: &str) -> Result<usize> {
            Ok(self
                .state
                .lock()
                .unwrap()
                .accounts
                .remove(account_id)
                .map_or(0, |_| 1))
        }

        fn get_by_id(&self, account_id: &str) -> Result<Account> {
            self.state
                .lock()
                .unwrap()
                .accounts
                .get(account_id)
                .cloned()
                .ok_or_else(|| Error::AccountNotFound(account_id.to_string()))
        }

        fn list(&self, _is_active_filter: Option<bool>) -> Result<Vec<Account>> {
            Ok(self.state.lock().unwrap().accounts.values().cloned().collect())
        }
    }

    fn service(ledger: &InMemoryLedger) -> LedgerService<InMemoryLedger> {
        LedgerService::new(
            ledger.clone(),
            Arc::new(ledger.clone()),
            Arc::new(ledger.clone()),
            Arc::new(ledger.clone()),
            "KRW",
        )
    }

    // --- Fixtures ---

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn exchange(
        account: &str,
        sell: (&str, Decimal),
        buy: (&str, Decimal),
        fee: Decimal,
    ) -> NewMovement {
        NewMovement::new(
            date(),
            MovementDetails::Exchange(ExchangeMovement {
                account_id: account.to_string(),
                sell_currency: sell.0.to_string(),
                sell_amount: sell.1,
                buy_currency: buy.0.to_string(),
                buy_amount: buy.1,
                fee,
            }),
        )
    }

    fn transfer(pay: &str, receive: &str, amount: Decimal, fee: Decimal) -> NewMovement {
        NewMovement::new(
            date(),
            MovementDetails::Cash(CashMovement {
                kind: CashKind::Transfer,
                currency: "KRW".to_string(),
                amount,
                fee,
                pay_account_id: Some(pay.to_string()),
                receive_account_id: Some(receive.to_string()),
            }),
        )
    }

    // --- Scenarios ---

    #[tokio::test]
    async fn test_exchange_insert_update_delete_scenarios() {
        let ledger = InMemoryLedger::with_accounts(&["A"]);
        let service = service(&ledger);

        // Insert
        let movement = service
            .insert_movement(exchange("A", ("KRW", dec!(10000)), ("USD", dec!(8.55)), dec!(5)))
            .await
            .unwrap();
        assert_eq!(ledger.balance("A", "KRW"), dec!(-10005));
        assert_eq!(ledger.balance("A", "USD"), dec!(8.55));

        // Update
        let updated = service
            .update_movement(
                &movement.id,
                exchange("A", ("KRW", dec!(20000)), ("USD", dec!(17.10)), dec!(5)),
            )
            .await
            .unwrap();
        assert_eq!(updated.id, movement.id);
        assert_eq!(updated.created_at, movement.created_at);
        assert_eq!(ledger.balance("A", "KRW"), dec!(-20005));
        assert_eq!(ledger.balance("A", "USD"), dec!(17.10));

        // Delete
        service.delete_movement(&movement.id).await.unwrap();
        assert_eq!(ledger.balance("A", "KRW"), Decimal::ZERO);
        assert_eq!(ledger.balance("A", "USD"), Decimal::ZERO);
        assert!(ledger.movements().is_empty());
        assert!(service.reconcile_balances().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_trade_buy_decreases_settlement_currency() {
        let ledger = InMemoryLedger::with_accounts(&["A"]);
        let service = service(&ledger);
        ledger.tamper_balance("A", "USD", dec!(5000));

        service
            .insert_movement(NewMovement::new(
                date(),
                MovementDetails::Trade(TradeMovement {
                    account_id: "A".to_string(),
                    kind: TradeKind::Buy,
                    instrument_id: "AAPL".to_string(),
                    quantity: dec!(10),
                    price: dec!(100),
                    tax: dec!(1),
                    fee: dec!(1),
                    currency: "USD".to_string(),
                }),
            ))
            .await
            .unwrap();

        assert_eq!(ledger.balance("A", "USD"), dec!(3998));
    }

    #[tokio::test]
    async fn test_update_moving_movement_to_other_account_and_currency() {
        let ledger = InMemoryLedger::with_accounts(&["A", "B"]);
        let service = service(&ledger);

        let movement = service
            .insert_movement(exchange("A", ("KRW", dec!(10000)), ("USD", dec!(8.55)), dec!(5)))
            .await
            .unwrap();
        service
            .update_movement(
                &movement.id,
                exchange("B", ("KRW", dec!(3000)), ("JPY", dec!(330)), dec!(0)),
            )
            .await
            .unwrap();

        assert_eq!(ledger.balance("A", "KRW"), Decimal::ZERO);
        assert_eq!(ledger.balance("A", "USD"), Decimal::ZERO);
        assert_eq!(ledger.balance("B", "KRW"), dec!(-3000));
        assert_eq!(ledger.balance("B", "JPY"), dec!(330));
    }

    #[tokio::test]
    async fn test_transfer_moves_amount_and_charges_fee_to_payer() {
        let ledger = InMemoryLedger::with_accounts(&["A", "B"]);
        let service = service(&ledger);

        service
            .insert_movement(transfer("A", "B", dec!(50000), dec!(500)))
            .await
            .unwrap();

        assert_eq!(ledger.balance("A", "KRW"), dec!(-50500));
        assert_eq!(ledger.balance("B", "KRW"), dec!(50000));
    }

    #[tokio::test]
    async fn test_inputs_are_normalized_before_booking() {
        let ledger = InMemoryLedger::with_accounts(&["A"]);
        let service = service(&ledger);

        let movement = service
            .insert_movement(exchange(" A ", ("krw", dec!(100)), ("usd", dec!(1)), dec!(0)))
            .await
            .unwrap();

        assert_eq!(ledger.balance("A", "KRW"), dec!(-100));
        assert_eq!(ledger.balance("A", "USD"), dec!(1));
        assert_eq!(movement.details.owner_account_id(), Some("A"));
    }

    // --- Failures leave state untouched ---

    #[tokio::test]
    async fn test_validation_fails_before_any_mutation() {
        let ledger = InMemoryLedger::with_accounts(&["A"]);
        let service = service(&ledger);

        let err = service
            .insert_movement(exchange("A", ("KRW", dec!(100)), ("KRW", dec!(100)), dec!(0)))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(ledger.movements().is_empty());
        assert!(ledger.non_zero_balances().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_account_is_rejected_before_mutation() {
        let ledger = InMemoryLedger::with_accounts(&["A"]);
        let service = service(&ledger);

        let err = service
            .insert_movement(transfer("A", "ghost", dec!(100), dec!(0)))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::AccountNotFound);
        assert!(ledger.movements().is_empty());
        assert_eq!(ledger.balance("A", "KRW"), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_movement() {
        let ledger = InMemoryLedger::with_accounts(&["A"]);
        let service = service(&ledger);

        let err = service
            .update_movement(
                "missing",
                exchange("A", ("KRW", dec!(100)), ("USD", dec!(1)), dec!(0)),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MovementNotFound);

        let err = service.delete_movement("missing").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MovementNotFound);
    }

    #[tokio::test]
    async fn test_failure_after_reversal_rolls_back_update() {
        let ledger = InMemoryLedger::with_accounts(&["A"]);
        let service = service(&ledger);
        let movement = service
            .insert_movement(exchange("A", ("KRW", dec!(10000)), ("USD", dec!(8.55)), dec!(5)))
            .await
            .unwrap();
        let before = ledger.non_zero_balances();

        ledger.fail_on(FailPoint::OnReplace);
        let err = service
            .update_movement(
                &movement.id,
                exchange("A", ("KRW", dec!(20000)), ("USD", dec!(17.10)), dec!(5)),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::PersistenceFailure);
        assert_eq!(ledger.non_zero_balances(), before);
        assert_eq!(ledger.movements(), vec![movement]);
    }

    #[tokio::test]
    async fn test_failed_create_and_delete_leave_balances_unchanged() {
        let ledger = InMemoryLedger::with_accounts(&["A", "B"]);
        let service = service(&ledger);
        let movement = service
            .insert_movement(transfer("A", "B", dec!(700), dec!(7)))
            .await
            .unwrap();
        let before = ledger.non_zero_balances();

        ledger.fail_on(FailPoint::OnCreate);
        assert!(service
            .insert_movement(transfer("B", "A", dec!(100), dec!(0)))
            .await
            .is_err());
        assert_eq!(ledger.non_zero_balances(), before);

        ledger.fail_on(FailPoint::OnDelete);
        assert!(service.delete_movement(&movement.id).await.is_err());
        assert_eq!(ledger.non_zero_balances(), before);
        assert_eq!(ledger.movements().len(), 1);
    }

    // --- Reads ---

    #[tokio::test]
    async fn test_get_account_balance() {
        let ledger = InMemoryLedger::with_accounts(&["A"]);
        let service = service(&ledger);
        service
            .insert_movement(exchange("A", ("KRW", dec!(10000)), ("USD", dec!(8.55)), dec!(5)))
            .await
            .unwrap();

        assert_eq!(service.get_account_balance("A", "usd").unwrap(), dec!(8.55));
        assert_eq!(service.get_account_balance("A", "EUR").unwrap(), Decimal::ZERO);
        assert_eq!(
            service.get_account_balance("ghost", "KRW").unwrap_err().kind(),
            ErrorKind::AccountNotFound
        );
        assert_eq!(
            service.get_account_balance("A", "euro").unwrap_err().kind(),
            ErrorKind::Validation
        );
        assert_eq!(service.get_account_balances("A").unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_reconcile_reports_tampered_balance() {
        let ledger = InMemoryLedger::with_accounts(&["A"]);
        let service = service(&ledger);
        service
            .insert_movement(exchange("A", ("KRW", dec!(10000)), ("USD", dec!(8.55)), dec!(5)))
            .await
            .unwrap();
        ledger.tamper_balance("A", "USD", dec!(10));

        let discrepancies = service.reconcile_balances().unwrap();
        assert_eq!(discrepancies.len(), 1);
        assert_eq!(discrepancies[0].account_id, "A");
        assert_eq!(discrepancies[0].currency, "USD");
        assert_eq!(discrepancies[0].cached, dec!(10));
        assert_eq!(discrepancies[0].expected, dec!(8.55));
    }

    // --- Properties ---

    const ACCOUNTS: [&str; 3] = ["A", "B", "C"];
    const CURRENCIES: [&str; 3] = ["KRW", "USD", "JPY"];

    fn arb_amount() -> impl Strategy<Value = Decimal> {
        (1i64..100_000_000).prop_map(|cents| Decimal::new(cents, 2))
    }

    fn arb_fee() -> impl Strategy<Value = Decimal> {
        (0i64..100_000).prop_map(|cents| Decimal::new(cents, 2))
    }

    fn arb_details() -> impl Strategy<Value = MovementDetails> {
        let exchange = (0usize..3, 0usize..3, 1usize..3, arb_amount(), arb_amount(), arb_fee())
            .prop_map(|(account, sell, offset, sell_amount, buy_amount, fee)| {
                MovementDetails::Exchange(ExchangeMovement {
                    account_id: ACCOUNTS[account].to_string(),
                    sell_currency: CURRENCIES[sell].to_string(),
                    sell_amount,
                    buy_currency: CURRENCIES[(sell + offset) % 3].to_string(),
                    buy_amount,
                    fee,
                })
            });
        let trade = (
            0usize..3,
            any::<bool>(),
            1i64..1000,
            arb_amount(),
            arb_fee(),
            arb_fee(),
            0usize..3,
        )
            .prop_map(|(account, buy, quantity, price, tax, fee, currency)| {
                MovementDetails::Trade(TradeMovement {
                    account_id: ACCOUNTS[account].to_string(),
                    kind: if buy { TradeKind::Buy } else { TradeKind::Sell },
                    instrument_id: "INST".to_string(),
                    quantity: Decimal::from(quantity),
                    price,
                    tax,
                    fee,
                    currency: CURRENCIES[currency].to_string(),
                })
            });
        let cash = (0usize..3, 0usize..3, 1usize..3, 0usize..3, arb_amount(), arb_fee())
            .prop_map(|(kind, pay, offset, currency, amount, fee)| {
                let (kind, pay_account_id, receive_account_id) = match kind {
                    0 => (CashKind::Income, None, Some(ACCOUNTS[pay].to_string())),
                    1 => (CashKind::Spending, Some(ACCOUNTS[pay].to_string()), None),
                    _ => (
                        CashKind::Transfer,
                        Some(ACCOUNTS[pay].to_string()),
                        Some(ACCOUNTS[(pay + offset) % 3].to_string()),
                    ),
                };
                MovementDetails::Cash(CashMovement {
                    kind,
                    currency: CURRENCIES[currency].to_string(),
                    amount,
                    fee,
                    pay_account_id,
                    receive_account_id,
                })
            });
        prop_oneof![exchange, trade, cash]
    }

    #[derive(Debug, Clone)]
    enum Op {
        Insert(MovementDetails),
        Update(usize, MovementDetails),
        Delete(usize),
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => arb_details().prop_map(Op::Insert),
            2 => (any::<usize>(), arb_details()).prop_map(|(i, d)| Op::Update(i, d)),
            1 => any::<usize>().prop_map(Op::Delete),
        ]
    }

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(future)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Cached balances equal the sum of effects after any operation sequence.
        #[test]
        fn prop_balances_match_ledger_after_any_sequence(ops in proptest::collection::vec(arb_op(), 1..25)) {
            let ledger = InMemoryLedger::with_accounts(&ACCOUNTS);
            let service = service(&ledger);

            block_on(async {
                for op in ops {
                    let ids: Vec<String> = ledger.movements().into_iter().map(|m| m.id).collect();
                    match op {
                        Op::Insert(details) => {
                            service.insert_movement(NewMovement::new(date(), details)).await.unwrap();
                        }
                        Op::Update(i, details) if !ids.is_empty() => {
                            let id = &ids[i % ids.len()];
                            service.update_movement(id, NewMovement::new(date(), details)).await.unwrap();
                        }
                        Op::Delete(i) if !ids.is_empty() => {
                            service.delete_movement(&ids[i % ids.len()]).await.unwrap();
                        }
                        _ => {}
                    }
                    assert!(service.reconcile_balances().unwrap().is_empty());
                }
            });
        }

        /// Inserting then deleting a movement restores every balance.
        #[test]
        fn prop_insert_then_delete_is_a_no_op(seed in arb_details(), details in arb_details()) {
            let ledger = InMemoryLedger::with_accounts(&ACCOUNTS);
            let service = service(&ledger);

            let (before, after) = block_on(async {
                service.insert_movement(NewMovement::new(date(), seed)).await.unwrap();
                let before = ledger.non_zero_balances();
                let movement = service.insert_movement(NewMovement::new(date(), details)).await.unwrap();
                service.delete_movement(&movement.id).await.unwrap();
                (before, ledger.non_zero_balances())
            });
            prop_assert_eq!(before, after);
        }

        /// Update(id, m2) ends in the same balances as Delete(id) then Insert(m2).
        #[test]
        fn prop_update_equals_delete_then_insert(first in arb_details(), second in arb_details()) {
            let updated = InMemoryLedger::with_accounts(&ACCOUNTS);
            let replaced = InMemoryLedger::with_accounts(&ACCOUNTS);
            let update_service = service(&updated);
            let replace_service = service(&replaced);

            block_on(async {
                let m = update_service.insert_movement(NewMovement::new(date(), first.clone())).await.unwrap();
                update_service.update_movement(&m.id, NewMovement::new(date(), second.clone())).await.unwrap();

                let m = replace_service.insert_movement(NewMovement::new(date(), first)).await.unwrap();
                replace_service.delete_movement(&m.id).await.unwrap();
                replace_service.insert_movement(NewMovement::new(date(), second)).await.unwrap();
            });
            prop_assert_eq!(updated.non_zero_balances(), replaced.non_zero_balances());
        }

        /// A failure between reversal and re-application leaves the ledger as it was.
        #[test]
        fn prop_failed_update_is_rolled_back(first in arb_details(), second in arb_details()) {
            let ledger = InMemoryLedger::with_accounts(&ACCOUNTS);
            let service = service(&ledger);

            let (before, movements_before, result) = block_on(async {
                let m = service.insert_movement(NewMovement::new(date(), first)).await.unwrap();
                let before = ledger.non_zero_balances();
                let movements_before = ledger.movements();
                ledger.fail_on(FailPoint::OnReplace);
                let result = service.update_movement(&m.id, NewMovement::new(date(), second)).await;
                (before, movements_before, result)
            });
            prop_assert!(result.is_err());
            prop_assert_eq!(ledger.non_zero_balances(), before);
            prop_assert_eq!(ledger.movements(), movements_before);
        }
    }
}
