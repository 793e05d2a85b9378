use crate::validation::{DebtEdge, ValidatedLedger};
use indexmap::IndexMap;
use splitwell_money::Money;

/// Raw pairwise debts keyed by `(debtor, creditor)` member positions,
/// summed across expenses but not netted. Iterates in first-seen order.
#[derive(Debug)]
pub(crate) struct RawDebts {
    debts: IndexMap<(usize, usize), Money>,
}

impl RawDebts {
    pub fn get(&self, from: usize, to: usize) -> Money {
        self.debts.get(&(from, to)).copied().unwrap_or(Money::ZERO)
    }

    pub fn iter(&self) -> impl Iterator<Item = DebtEdge> + '_ {
        self.debts
            .iter()
            .map(|(&(from, to), &amount)| DebtEdge { from, to, amount })
    }

    /// Non-zero edges in first-seen order.
    pub fn edges(&self) -> Vec<DebtEdge> {
        self.iter().filter(|edge| !edge.amount.is_zero()).collect()
    }
}

pub(crate) struct DebtGraphBuilder;

impl DebtGraphBuilder {
    pub fn build(&self, ledger: &ValidatedLedger<'_>) -> RawDebts {
        let mut debts: IndexMap<(usize, usize), Money> = IndexMap::new();
        for expense in ledger.expenses() {
            for share in &expense.shares {
                if share.member == expense.payer {
                    continue;
                }
                *debts
                    .entry((share.member, expense.payer))
                    .or_insert(Money::ZERO) += share.share_in_main;
            }
        }

        tracing::debug!(pair_count = debts.len(), "Raw debt graph built");

        RawDebts { debts }
    }
}
