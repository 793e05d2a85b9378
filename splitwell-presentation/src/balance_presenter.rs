use crate::{
    labels,
    member_label::member_label,
    text_table::{Column, TextTableBuilder},
};
use splitwell_domain::{Member, MemberBalances};
use std::borrow::Cow;

const COLUMNS: &[Column<'static>] = &[
    Column::left(labels::MEMBER),
    Column::right(labels::BALANCE),
];

pub struct BalancePresenter;

impl BalancePresenter {
    /// One row per member in member order. Members missing from `balances`
    /// are shown at zero.
    pub fn render(balances: &MemberBalances, members: &[Member]) -> String {
        let mut builder = TextTableBuilder::new(COLUMNS);

        for member in members {
            let balance = balances.get(&member.id).copied().unwrap_or_default();
            let sign = if balance.is_negative() { "" } else { "+" };
            builder = builder.row([member_label(member), Cow::Owned(format!("{sign}{balance}"))]);
        }

        builder.build()
    }
}
