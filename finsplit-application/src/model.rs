use finsplit_domain::{
    BalanceRow, Money, PoolLedger, PoolSummary, SettlementTransaction, Transfer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Balances,
    Settle,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ScriptCommand {
    pub line: usize,
    pub command: Command,
}

/// A parsed ledger file: the pool it describes plus the commands that
/// follow the expense lines.
#[derive(Debug, PartialEq, Eq)]
pub struct LedgerScript {
    pub ledger: PoolLedger,
    pub commands: Vec<ScriptCommand>,
}

/// The full output of settling one pool.
///
/// `unmatched` is the signed residual the transfer list leaves behind;
/// zero whenever the balances sum to zero.
pub struct SettlementPlan {
    pub pool: PoolSummary,
    pub balances: Vec<BalanceRow>,
    pub transfers: Vec<Transfer>,
    pub transactions: Vec<SettlementTransaction>,
    pub unmatched: Money,
}
