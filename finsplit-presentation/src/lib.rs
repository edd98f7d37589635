#![warn(clippy::uninlined_format_args)]

pub mod currency;
pub mod settlement_presenter;
pub mod text_table;

pub use currency::{format_inr, format_inr_signed};
pub use settlement_presenter::{PaymentOptions, SettlementPresenter, SettlementView};
