use crate::{services::debt_graph::RawDebts, validation::DebtEdge};
use fxhash::FxHashSet;

/// Itemized settlement: cancels only directly opposing debts between the same pair.
pub struct PairwiseNetting;

impl PairwiseNetting {
    pub(crate) fn net(&self, debts: &RawDebts) -> Vec<DebtEdge> {
        let mut visited: FxHashSet<(usize, usize)> = FxHashSet::default();
        let mut settled = Vec::new();

        for edge in debts.iter() {
            if !visited.insert((edge.from, edge.to)) {
                continue;
            }
            visited.insert((edge.to, edge.from));

            let net = edge.amount - debts.get(edge.to, edge.from);
            if net.is_positive() {
                settled.push(DebtEdge {
                    from: edge.from,
                    to: edge.to,
                    amount: net,
                });
            } else if net.is_negative() {
                settled.push(DebtEdge {
                    from: edge.to,
                    to: edge.from,
                    amount: net.abs(),
                });
            }
        }

        tracing::debug!(
            raw_pair_count = visited.len(),
            settlement_count = settled.len(),
            "Pairwise netting complete"
        );

        settled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::Expense,
        services::debt_graph::DebtGraphBuilder,
        test_support::{debt, members},
        validation::ValidatedLedger,
    };
    use rstest::rstest;
    use splitwell_money::Money;

    #[rstest]
    #[case::full_cancel(
        vec![debt("a", "m2", "m1", 100_000), debt("b", "m1", "m2", 100_000)],
        vec![]
    )]
    #[case::first_direction_wins(
        vec![debt("a", "m2", "m1", 70), debt("b", "m1", "m2", 30)],
        vec![(1, 0, 40)]
    )]
    #[case::reverse_direction_wins(
        vec![debt("a", "m2", "m1", 30), debt("b", "m1", "m2", 70)],
        vec![(0, 1, 40)]
    )]
    #[case::chain_is_not_simplified(
        vec![debt("a", "m1", "m2", 100), debt("b", "m2", "m3", 100)],
        vec![(0, 1, 100), (1, 2, 100)]
    )]
    #[case::aggregated_before_netting(
        vec![
            debt("a", "m3", "m1", 10),
            debt("b", "m1", "m3", 4),
            debt("c", "m3", "m1", 5),
        ],
        vec![(2, 0, 11)]
    )]
    fn netting_cases(
        #[case] expenses: Vec<Expense>,
        #[case] expected: Vec<(usize, usize, i64)>,
    ) {
        let roster = members(&["m1", "m2", "m3"]);
        let ledger = ValidatedLedger::new(&expenses, &roster).expect("validation failed");
        let raw = DebtGraphBuilder.build(&ledger);

        let settled = PairwiseNetting.net(&raw);

        let expected: Vec<DebtEdge> = expected
            .into_iter()
            .map(|(from, to, amount)| DebtEdge {
                from,
                to,
                amount: Money::from_scaled(amount),
            })
            .collect();
        assert_eq!(settled, expected);
    }
}
