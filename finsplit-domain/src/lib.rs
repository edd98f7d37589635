#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{
    BalanceRow, Expense, ExpenseSplit, LedgerError, MemberBalances, MemberId, MemberProfile,
    Money, MoneyConversionError, PoolLedger, PoolSummary, Roster, Transfer, PAISE_PER_RUPEE,
};
pub use services::{
    search_pools, PaymentMethod, PaymentStatistics, SettlementCalculator, SettlementTransaction,
    SplitError, SplitPolicy, TransactionError, TransactionStatus,
};
