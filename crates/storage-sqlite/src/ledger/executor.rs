use async_trait::async_trait;

use super::scope::SqliteLedgerScope;
use crate::db::WriteHandle;
use moneybook_core::errors::Result;
use moneybook_core::ledger::{LedgerScope, LedgerTransactionExecutor};

/// Runs ledger jobs on the writer actor, one `BEGIN IMMEDIATE` transaction each.
#[derive(Clone)]
pub struct SqliteLedgerExecutor {
    writer: WriteHandle,
}

impl SqliteLedgerExecutor {
    pub fn new(writer: WriteHandle) -> Self {
        Self { writer }
    }
}

#[async_trait]
impl LedgerTransactionExecutor for SqliteLedgerExecutor {
    async fn execute<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut dyn LedgerScope) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        self.writer
            .exec(move |conn| {
                let mut scope = SqliteLedgerScope::new(conn);
                job(&mut scope)
            })
            .await
    }
}
