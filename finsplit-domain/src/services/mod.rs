pub mod pool_search;
pub mod settlement_calculator;
pub mod split_policy;
pub mod transaction_policy;

pub use pool_search::search_pools;
pub use settlement_calculator::SettlementCalculator;
pub use split_policy::{SplitError, SplitPolicy, FULL_SHARE_BP, MANUAL_TOLERANCE};
pub use transaction_policy::{
    PaymentMethod, PaymentStatistics, SettlementTransaction, TransactionError, TransactionStatus,
};
