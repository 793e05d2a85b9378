//! Eager input checks shared by every ledger operation.
//!
//! [`ValidatedLedger::new`] either rejects the whole input or resolves every
//! member reference to a position in the member list, so the services below
//! never look an id up again and never see a dangling reference.
//!
//! Each member's running credits (totals paid) and debits (shares owed) must
//! fit in an `i64`. Every later sum is bounded by one of them.

use crate::{
    error::{LedgerError, LedgerErrorKind},
    model::{Expense, Member, Settlement},
};
use fxhash::{FxHashMap, FxHashSet};
use splitwell_money::Money;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct DebtEdge {
    pub from: usize,
    pub to: usize,
    pub amount: Money,
}

#[derive(Debug)]
pub(crate) struct ResolvedShare {
    pub member: usize,
    pub share_in_main: Money,
}

#[derive(Debug)]
pub(crate) struct ResolvedExpense {
    pub payer: usize,
    pub total_in_main: Money,
    pub shares: Vec<ResolvedShare>,
}

/// Members plus expenses whose references have all been checked.
#[derive(Debug)]
pub struct ValidatedLedger<'m> {
    members: &'m [Member],
    expenses: Vec<ResolvedExpense>,
}

impl<'m> ValidatedLedger<'m> {
    pub fn new(expenses: &[Expense], members: &'m [Member]) -> Result<Self, LedgerError> {
        let positions = index_members(members).map_err(reject)?;
        let expenses = resolve_expenses(expenses, members, &positions).map_err(reject)?;

        tracing::debug!(
            member_count = members.len(),
            expense_count = expenses.len(),
            "Ledger input validated"
        );

        Ok(Self { members, expenses })
    }

    pub fn members(&self) -> &'m [Member] {
        self.members
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub(crate) fn expenses(&self) -> &[ResolvedExpense] {
        &self.expenses
    }

    pub(crate) fn settlement(&self, edge: DebtEdge) -> Settlement<'m> {
        Settlement {
            from: &self.members[edge.from],
            to: &self.members[edge.to],
            amount: edge.amount,
        }
    }

    pub(crate) fn settlements(&self, edges: &[DebtEdge]) -> Vec<Settlement<'m>> {
        edges.iter().map(|&edge| self.settlement(edge)).collect()
    }
}

fn reject(err: LedgerError) -> LedgerError {
    tracing::warn!(
        reject_reason = err.kind().as_str(),
        field = err.field().unwrap_or(""),
        message = err.message(),
        "Ledger input rejected"
    );
    err
}

fn index_members(members: &[Member]) -> Result<FxHashMap<&str, usize>, LedgerError> {
    let mut positions = FxHashMap::default();
    positions.reserve(members.len());

    for (position, member) in members.iter().enumerate() {
        let id = member.id.as_str();
        if id.is_empty() {
            return Err(LedgerError::empty_string("id"));
        }
        if positions.insert(id, position).is_some() {
            return Err(LedgerError::duplicate_id("id", id));
        }
    }

    Ok(positions)
}

fn resolve_expenses(
    expenses: &[Expense],
    members: &[Member],
    positions: &FxHashMap<&str, usize>,
) -> Result<Vec<ResolvedExpense>, LedgerError> {
    let mut seen_ids = FxHashSet::default();
    let mut credits = vec![Money::ZERO; members.len()];
    let mut debits = vec![Money::ZERO; members.len()];
    let lookup = |field: &'static str, id: &str| {
        positions
            .get(id)
            .copied()
            .ok_or_else(|| LedgerError::reference_not_found(field, id))
    };

    expenses
        .iter()
        .map(|expense| {
            let id = expense.id.as_str();
            if id.is_empty() {
                return Err(LedgerError::empty_string("id"));
            }
            if !seen_ids.insert(id) {
                return Err(LedgerError::duplicate_id("id", id));
            }
            if expense.currency_code.is_empty() {
                return Err(LedgerError::empty_string("currency_code"));
            }
            let payer = lookup("payer_member_id", expense.payer_member_id.as_str())?;

            ensure_non_negative(expense.total_amount, "total_amount")?;
            ensure_non_negative(expense.total_in_main, "total_in_main")?;
            let rate = expense.exchange_rate_to_main.scaled();
            if rate == 0 {
                return Err(LedgerError::zero_not_allowed("exchange_rate_to_main"));
            }
            if rate < 0 {
                return Err(LedgerError::negative_not_allowed("exchange_rate_to_main"));
            }
            accumulate(&mut credits, members, payer, expense.total_in_main, "total_in_main")?;

            let shares = expense
                .shares
                .iter()
                .map(|share| {
                    let member = lookup("member_id", share.member_id.as_str())?;
                    ensure_non_negative(share.share_amount, "share_amount")?;
                    ensure_non_negative(share.share_in_main, "share_in_main")?;
                    accumulate(&mut debits, members, member, share.share_in_main, "share_in_main")?;
                    Ok(ResolvedShare {
                        member,
                        share_in_main: share.share_in_main,
                    })
                })
                .collect::<Result<Vec<_>, LedgerError>>()?;

            Ok(ResolvedExpense {
                payer,
                total_in_main: expense.total_in_main,
                shares,
            })
        })
        .collect()
}

fn accumulate(
    totals: &mut [Money],
    members: &[Member],
    position: usize,
    amount: Money,
    field: &'static str,
) -> Result<(), LedgerError> {
    totals[position] = totals[position].checked_add(amount).ok_or_else(|| {
        LedgerError::new(
            LedgerErrorKind::Overflow,
            format!("running `{field}` total of member `{}` overflows", members[position].id),
        )
        .with_field(field)
    })?;
    Ok(())
}

fn ensure_non_negative(value: Money, field: &'static str) -> Result<(), LedgerError> {
    if value.is_negative() {
        return Err(LedgerError::negative_not_allowed(field));
    }
    Ok(())
}
