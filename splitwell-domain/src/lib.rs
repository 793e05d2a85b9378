#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod model;
pub mod services;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use error::{LedgerError, LedgerErrorKind};
pub use model::{
    Expense, ExpenseId, ExpenseShare, GroupId, Member, MemberBalances, MemberId, Settlement,
    SimplificationRule, SimplificationStep, StepIndices,
};
pub use services::{
    BalanceCalculator, ExpenseAssembler, ExpenseDraft, PairwiseNetting, SettlementCalculator,
    SimplificationTracer, Split,
};
pub use validation::ValidatedLedger;

use services::debt_graph::DebtGraphBuilder;

/// Net position of every member, in member input order. Sums to zero.
pub fn compute_balances(
    expenses: &[Expense],
    members: &[Member],
) -> Result<MemberBalances, LedgerError> {
    let ledger = ValidatedLedger::new(expenses, members)?;
    Ok(BalanceCalculator.calculate(&ledger))
}

/// Itemized settlements: raw debts with only direct opposites cancelled.
pub fn compute_settlements_no_simplify<'m>(
    expenses: &[Expense],
    members: &'m [Member],
) -> Result<Vec<Settlement<'m>>, LedgerError> {
    let ledger = ValidatedLedger::new(expenses, members)?;
    let raw = DebtGraphBuilder.build(&ledger);
    let edges = PairwiseNetting.net(&raw);
    Ok(ledger.settlements(&edges))
}

/// Greedy minimal settlement set over net balances.
pub fn compute_settlements_simplified<'m>(
    expenses: &[Expense],
    members: &'m [Member],
) -> Result<Vec<Settlement<'m>>, LedgerError> {
    let ledger = ValidatedLedger::new(expenses, members)?;
    let positions = BalanceCalculator.net_positions(&ledger);
    let edges = SettlementCalculator.calculate(&positions);
    Ok(ledger.settlements(&edges))
}

/// Snapshots from the raw debt graph down to the simplified plan.
///
/// Yields a single snapshot with no rule when the raw graph is already
/// minimal.
pub fn compute_simplification_steps<'m>(
    expenses: &[Expense],
    members: &'m [Member],
) -> Result<Vec<SimplificationStep<'m>>, LedgerError> {
    let ledger = ValidatedLedger::new(expenses, members)?;
    let raw = DebtGraphBuilder.build(&ledger);
    Ok(SimplificationTracer.trace(&ledger, raw.edges()))
}
