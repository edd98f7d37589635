#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod model;
pub mod ports;
pub mod settlement_workflow;

pub use error::LedgerParseError;
pub use model::{Command, LedgerScript, ScriptCommand, SettlementPlan};
pub use ports::{LedgerParser, MemberDirectory, SettlementPlanner};
pub use settlement_workflow::{ProcessingOutcome, SettlementWorkflow};
