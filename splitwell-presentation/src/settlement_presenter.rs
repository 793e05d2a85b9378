use crate::{
    labels,
    member_label::member_label,
    text_table::{Column, TextTableBuilder},
};
use splitwell_domain::Settlement;
use std::borrow::Cow;

const COLUMNS: &[Column<'static>] = &[
    Column::left(labels::FROM),
    Column::left(labels::TO),
    Column::right(labels::AMOUNT),
];

pub struct SettlementPresenter;

impl SettlementPresenter {
    pub fn render(settlements: &[Settlement<'_>]) -> String {
        if settlements.is_empty() {
            return format!("{}\n", labels::NO_PAYMENTS);
        }

        TextTableBuilder::new(COLUMNS)
            .rows(settlements.iter().map(|settlement| {
                [
                    member_label(settlement.from),
                    member_label(settlement.to),
                    Cow::Owned(settlement.amount.to_string()),
                ]
            }))
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use splitwell_domain::Member;
    use splitwell_money::Money;

    #[test]
    fn lists_payments_in_order() {
        let alice = Member::new("m1", "g1", "Alice", DateTime::<Utc>::UNIX_EPOCH);
        let bob = Member::new("m2", "g1", "Bob", DateTime::<Utc>::UNIX_EPOCH);
        let settlements = [
            Settlement {
                from: &bob,
                to: &alice,
                amount: Money::from_scaled(30_000),
            },
            Settlement {
                from: &alice,
                to: &bob,
                amount: Money::from_scaled(125),
            },
        ];

        let rendered = SettlementPresenter::render(&settlements);

        assert_eq!(
            rendered,
            "From   To     Amount\n\
             --------------------\n\
             Bob    Alice    3.00\n\
             Alice  Bob      0.01\n"
        );
    }

    #[test]
    fn empty_plan_says_so() {
        assert_eq!(SettlementPresenter::render(&[]), "No payments needed.\n");
    }
}
