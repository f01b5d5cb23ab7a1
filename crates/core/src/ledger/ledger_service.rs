use async_trait::async_trait;
use log::{debug, error};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::ledger_model::{LedgerOperationKind, OperationState};
use super::ledger_traits::{LedgerScope, LedgerServiceTrait, LedgerTransactionExecutor};
use crate::accounts::AccountRepositoryTrait;
use crate::balances::{AccountBalance, BalanceDelta, BalanceDiscrepancy, BalanceRepositoryTrait};
use crate::errors::Result;
use crate::movements::{
    aggregate_effects, compute_effects, reverse_effects, Movement, MovementRepositoryTrait,
    NewMovement,
};
use crate::utils::currency_utils::{normalize_currency, validate_currency};

const UNASSIGNED_ID: &str = "<new>";

fn log_transition(kind: LedgerOperationKind, movement_id: &str, state: OperationState) {
    debug!("ledger {} [{}] -> {}", kind, movement_id, state);
}

fn apply_all(scope: &mut dyn LedgerScope, deltas: &[BalanceDelta]) -> Result<()> {
    for delta in deltas {
        scope.apply_delta(delta)?;
    }
    Ok(())
}

fn resolve_accounts(scope: &mut dyn LedgerScope, new_movement: &NewMovement) -> Result<()> {
    for account_id in new_movement.details.account_ids() {
        scope.resolve_account(account_id)?;
    }
    Ok(())
}

/// Coordinates movement changes and the balance updates they imply.
///
/// Every mutating call runs as a single job on the executor, so the movement
/// record and all balance deltas commit or roll back together.
pub struct LedgerService<E: LedgerTransactionExecutor> {
    executor: E,
    balance_repository: Arc<dyn BalanceRepositoryTrait>,
    movement_repository: Arc<dyn MovementRepositoryTrait>,
    account_repository: Arc<dyn AccountRepositoryTrait>,
    base_currency: String,
}

impl<E: LedgerTransactionExecutor> LedgerService<E> {
    pub fn new(
        executor: E,
        balance_repository: Arc<dyn BalanceRepositoryTrait>,
        movement_repository: Arc<dyn MovementRepositoryTrait>,
        account_repository: Arc<dyn AccountRepositoryTrait>,
        base_currency: impl Into<String>,
    ) -> Self {
        Self {
            executor,
            balance_repository,
            movement_repository,
            account_repository,
            base_currency: base_currency.into(),
        }
    }

    fn finish<T>(
        kind: LedgerOperationKind,
        movement_id: &str,
        result: Result<T>,
    ) -> Result<T> {
        match result {
            Ok(value) => {
                log_transition(kind, movement_id, OperationState::Committed);
                Ok(value)
            }
            Err(e) => {
                error!("ledger {} [{}] failed: {}", kind, movement_id, e);
                log_transition(kind, movement_id, OperationState::RolledBack);
                Err(e)
            }
        }
    }

    fn prepare(new_movement: NewMovement) -> Result<NewMovement> {
        let new_movement = new_movement.normalized();
        new_movement.validate()?;
        Ok(new_movement)
    }

    async fn run_insert(&self, new_movement: NewMovement) -> Result<Movement> {
        let new_movement = Self::prepare(new_movement)?;
        let base_currency = self.base_currency.clone();
        let kind = LedgerOperationKind::Insert;

        self.executor
            .execute(move |scope| {
                resolve_accounts(scope, &new_movement)?;

                let effects = compute_effects(&new_movement.details, &base_currency);
                log_transition(kind, UNASSIGNED_ID, OperationState::EffectsComputed);

                apply_all(scope, &effects)?;
                log_transition(kind, UNASSIGNED_ID, OperationState::BalancesApplied);

                let movement = scope.create_movement(new_movement)?;
                log_transition(kind, &movement.id, OperationState::RecordPersisted);
                Ok(movement)
            })
            .await
    }

    async fn run_update(&self, movement_id: &str, new_movement: NewMovement) -> Result<Movement> {
        let new_movement = Self::prepare(new_movement)?;
        let base_currency = self.base_currency.clone();
        let movement_id = movement_id.to_string();
        let kind = LedgerOperationKind::Update;

        self.executor
            .execute(move |scope| {
                let stored = scope.find_movement(&movement_id)?;
                resolve_accounts(scope, &new_movement)?;

                let reversal = reverse_effects(&compute_effects(&stored.details, &base_currency));
                let effects = compute_effects(&new_movement.details, &base_currency);
                log_transition(kind, &movement_id, OperationState::EffectsComputed);

                apply_all(scope, &reversal)?;
                log_transition(kind, &movement_id, OperationState::BalancesReversed);

                let movement = scope.replace_movement(&movement_id, new_movement)?;
                log_transition(kind, &movement_id, OperationState::RecordPersisted);

                apply_all(scope, &effects)?;
                log_transition(kind, &movement_id, OperationState::BalancesApplied);
                Ok(movement)
            })
            .await
    }

    async fn run_delete(&self, movement_id: &str) -> Result<()> {
        let base_currency = self.base_currency.clone();
        let movement_id = movement_id.to_string();
        let kind = LedgerOperationKind::Delete;

        self.executor
            .execute(move |scope| {
                let stored = scope.find_movement(&movement_id)?;

                let reversal = reverse_effects(&compute_effects(&stored.details, &base_currency));
                log_transition(kind, &movement_id, OperationState::EffectsComputed);

                apply_all(scope, &reversal)?;
                log_transition(kind, &movement_id, OperationState::BalancesReversed);

                scope.delete_movement(&movement_id)?;
                log_transition(kind, &movement_id, OperationState::RecordPersisted);
                Ok(())
            })
            .await
    }
}

#[async_trait]
impl<E: LedgerTransactionExecutor> LedgerServiceTrait for LedgerService<E> {
    async fn insert_movement(&self, new_movement: NewMovement) -> Result<Movement> {
        let kind = LedgerOperationKind::Insert;
        log_transition(kind, UNASSIGNED_ID, OperationState::Started);
        let result = self.run_insert(new_movement).await;
        let movement_id = result
            .as_ref()
            .map(|m| m.id.clone())
            .unwrap_or_else(|_| UNASSIGNED_ID.to_string());
        Self::finish(kind, &movement_id, result)
    }

    async fn update_movement(
        &self,
        movement_id: &str,
        new_movement: NewMovement,
    ) -> Result<Movement> {
        let kind = LedgerOperationKind::Update;
        log_transition(kind, movement_id, OperationState::Started);
        let result = self.run_update(movement_id, new_movement).await;
        Self::finish(kind, movement_id, result)
    }

    async fn delete_movement(&self, movement_id: &str) -> Result<()> {
        let kind = LedgerOperationKind::Delete;
        log_transition(kind, movement_id, OperationState::Started);
        let result = self.run_delete(movement_id).await;
        Self::finish(kind, movement_id, result)
    }

    fn get_account_balance(&self, account_id: &str, currency: &str) -> Result<Decimal> {
        let currency = normalize_currency(currency);
        validate_currency(&currency, "currency")?;
        self.account_repository.get_by_id(account_id)?;
        Ok(self
            .balance_repository
            .get_balance(account_id, &currency)?
            .map(|balance| balance.amount)
            .unwrap_or(Decimal::ZERO))
    }

    fn get_account_balances(&self, account_id: &str) -> Result<Vec<AccountBalance>> {
        self.account_repository.get_by_id(account_id)?;
        self.balance_repository.get_account_balances(account_id)
    }

    fn get_movement(&self, movement_id: &str) -> Result<Movement> {
        self.movement_repository.get_movement(movement_id)
    }

    fn list_movements(&self, account_id: Option<&str>) -> Result<Vec<Movement>> {
        self.movement_repository.list_movements(account_id)
    }

    fn reconcile_balances(&self) -> Result<Vec<BalanceDiscrepancy>> {
        let movements = self.movement_repository.list_movements(None)?;
        let expected = aggregate_effects(
            movements.iter().map(|movement| &movement.details),
            &self.base_currency,
        )?;

        let mut pairs: BTreeMap<(String, String), (Decimal, Decimal)> = expected
            .into_iter()
            .map(|(key, amount)| (key, (Decimal::ZERO, amount)))
            .collect();
        for balance in self.balance_repository.get_all_balances()? {
            pairs
                .entry((balance.account_id, balance.currency))
                .or_insert((Decimal::ZERO, Decimal::ZERO))
                .0 = balance.amount;
        }

        let discrepancies: Vec<BalanceDiscrepancy> = pairs
            .into_iter()
            .filter(|(_, (cached, expected))| cached != expected)
            .map(|((account_id, currency), (cached, expected))| BalanceDiscrepancy {
                account_id,
                currency,
                cached,
                expected,
            })
            .collect();

        if discrepancies.is_empty() {
            debug!("Reconciled {} movements, balances consistent", movements.len());
        } else {
            for discrepancy in &discrepancies {
                error!(
                    "Balance {}/{} is {} but movements sum to {} (off by {})",
                    discrepancy.account_id,
                    discrepancy.currency,
                    discrepancy.cached,
                    discrepancy.expected,
                    discrepancy.difference()
                );
            }
        }
        Ok(discrepancies)
    }

    fn base_currency(&self) -> &str {
        &self.base_currency
    }
}
