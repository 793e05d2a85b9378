#![warn(clippy::uninlined_format_args)]

pub mod balance_presenter;
pub mod labels;
mod member_label;
pub mod settlement_presenter;
pub mod text_table;
pub mod trace_presenter;

pub use balance_presenter::BalancePresenter;
pub use settlement_presenter::SettlementPresenter;
pub use trace_presenter::TracePresenter;
