use crate::validation::DebtEdge;
use splitwell_money::Money;

/// Minimum-transaction settlement service
pub struct SettlementCalculator;

impl SettlementCalculator {
    /// Greedy debtor/creditor matching over net positions.
    ///
    /// Debtors and creditors keep member input order. Each step moves
    /// `min(owed, due)` and advances whichever side reached zero, so
    /// at most `non-zero members - 1` transfers are produced.
    pub(crate) fn calculate(&self, positions: &[Money]) -> Vec<DebtEdge> {
        let mut debtors: Vec<(usize, Money)> = Vec::new();
        let mut creditors: Vec<(usize, Money)> = Vec::new();
        for (member, &balance) in positions.iter().enumerate() {
            if balance.is_negative() {
                debtors.push((member, balance.abs()));
            } else if balance.is_positive() {
                creditors.push((member, balance));
            }
        }

        let mut transfers = Vec::with_capacity(debtors.len() + creditors.len());
        let (mut debtor_idx, mut creditor_idx) = (0, 0);

        while debtor_idx < debtors.len() && creditor_idx < creditors.len() {
            let (debtor, owed) = &mut debtors[debtor_idx];
            let (creditor, due) = &mut creditors[creditor_idx];

            let amount = (*owed).min(*due);
            transfers.push(DebtEdge {
                from: *debtor,
                to: *creditor,
                amount,
            });
            *owed -= amount;
            *due -= amount;

            if owed.is_zero() {
                debtor_idx += 1;
            }
            if due.is_zero() {
                creditor_idx += 1;
            }
        }

        if debtor_idx < debtors.len() || creditor_idx < creditors.len() {
            tracing::warn!(
                unmatched_debtors = debtors.len() - debtor_idx,
                unmatched_creditors = creditors.len() - creditor_idx,
                "Net positions do not sum to zero; expense shares may not match their totals"
            );
        }

        transfers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn calculator() -> SettlementCalculator {
        SettlementCalculator
    }

    #[rstest]
    #[case::one_creditor(&[60_000, -30_000, -30_000], vec![(1, 0, 30_000), (2, 0, 30_000)])]
    #[case::one_debtor(&[-100, 40, 60], vec![(0, 1, 40), (0, 2, 60)])]
    #[case::input_order_not_magnitude(
        &[-10, -90, 50, 50],
        vec![(0, 2, 10), (1, 2, 40), (1, 3, 50)]
    )]
    #[case::both_cursors_advance(&[-50, 50, -30, 30], vec![(0, 1, 50), (2, 3, 30)])]
    #[case::all_zero(&[0, 0, 0], vec![])]
    #[case::empty(&[], vec![])]
    fn settlement_calculator_cases(
        calculator: SettlementCalculator,
        #[case] positions: &[i64],
        #[case] expected: Vec<(usize, usize, i64)>,
    ) {
        let positions: Vec<Money> = positions.iter().copied().map(Money::from_scaled).collect();

        let transfers = calculator.calculate(&positions);

        let expected: Vec<DebtEdge> = expected
            .into_iter()
            .map(|(from, to, amount)| DebtEdge {
                from,
                to,
                amount: Money::from_scaled(amount),
            })
            .collect();
        assert_eq!(transfers, expected);
    }

    #[test]
    fn stops_when_one_side_is_exhausted() {
        let positions = [Money::from_scaled(-100), Money::from_scaled(40)];

        let transfers = SettlementCalculator.calculate(&positions);

        assert_eq!(
            transfers,
            vec![DebtEdge {
                from: 0,
                to: 1,
                amount: Money::from_scaled(40),
            }]
        );
    }
}
