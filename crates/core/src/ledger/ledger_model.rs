use std::fmt;

/// Mutating ledger operation being coordinated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerOperationKind {
    Insert,
    Update,
    Delete,
}

impl LedgerOperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerOperationKind::Insert => "insert",
            LedgerOperationKind::Update => "update",
            LedgerOperationKind::Delete => "delete",
        }
    }
}

impl fmt::Display for LedgerOperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress of one ledger operation.
///
/// Insert: Started, EffectsComputed, BalancesApplied, RecordPersisted, Committed.
/// Update: Started, EffectsComputed, BalancesReversed, RecordPersisted,
/// BalancesApplied, Committed.
/// Delete: Started, EffectsComputed, BalancesReversed, RecordPersisted, Committed.
/// Any failure ends in RolledBack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationState {
    Started,
    EffectsComputed,
    BalancesReversed,
    RecordPersisted,
    BalancesApplied,
    Committed,
    RolledBack,
}

impl OperationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationState::Started => "STARTED",
            OperationState::EffectsComputed => "EFFECTS_COMPUTED",
            OperationState::BalancesReversed => "BALANCES_REVERSED",
            OperationState::RecordPersisted => "RECORD_PERSISTED",
            OperationState::BalancesApplied => "BALANCES_APPLIED",
            OperationState::Committed => "COMMITTED",
            OperationState::RolledBack => "ROLLED_BACK",
        }
    }
}

impl fmt::Display for OperationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
