use crate::{model::MemberBalances, validation::ValidatedLedger};
use splitwell_money::Money;

/// Net balance service
pub struct BalanceCalculator;

impl BalanceCalculator {
    /// Net position per member position: the payer is credited with the
    /// expense total and every share member is debited with their share.
    pub(crate) fn net_positions(&self, ledger: &ValidatedLedger<'_>) -> Vec<Money> {
        let mut positions = vec![Money::ZERO; ledger.member_count()];
        for expense in ledger.expenses() {
            positions[expense.payer] += expense.total_in_main;
            for share in &expense.shares {
                positions[share.member] -= share.share_in_main;
            }
        }
        positions
    }

    pub fn calculate(&self, ledger: &ValidatedLedger<'_>) -> MemberBalances {
        ledger
            .members()
            .iter()
            .zip(self.net_positions(ledger))
            .map(|(member, balance)| (member.id.clone(), balance))
            .collect()
    }
}
