#![warn(clippy::uninlined_format_args)]

pub mod parser;
pub mod planner;

pub use parser::FinSplitLedgerParser;
pub use planner::GreedySettlementPlanner;
