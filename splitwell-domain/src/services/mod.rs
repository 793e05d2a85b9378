pub mod balance_calculator;
pub(crate) mod debt_graph;
pub mod expense_assembler;
pub mod netting;
pub mod settlement_calculator;
pub mod simplification_tracer;

pub use balance_calculator::BalanceCalculator;
pub use expense_assembler::{ExpenseAssembler, ExpenseDraft, Split};
pub use netting::PairwiseNetting;
pub use settlement_calculator::SettlementCalculator;
pub use simplification_tracer::SimplificationTracer;
