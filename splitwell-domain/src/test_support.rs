//! Ledger builders for unit tests

use crate::model::{Expense, ExpenseId, ExpenseShare, Member, MemberId};
use chrono::{DateTime, Utc};
use splitwell_money::{Money, Rate};

pub fn member(id: &str) -> Member {
    Member::new(id, "g1", id.to_uppercase(), DateTime::<Utc>::UNIX_EPOCH)
}

pub fn members(ids: &[&str]) -> Vec<Member> {
    ids.iter().map(|id| member(id)).collect()
}

/// Main-currency expense whose total is the sum of the given shares.
pub fn expense(id: &str, payer: &str, shares: &[(&str, i64)]) -> Expense {
    let shares: Vec<ExpenseShare> = shares
        .iter()
        .map(|&(member_id, amount)| ExpenseShare {
            member_id: MemberId::new(member_id),
            share_amount: Money::from_scaled(amount),
            share_in_main: Money::from_scaled(amount),
        })
        .collect();
    let total: Money = shares.iter().map(|share| share.share_in_main).sum();

    Expense {
        id: ExpenseId::new(id),
        payer_member_id: MemberId::new(payer),
        currency_code: "EUR".into(),
        total_amount: total,
        exchange_rate_to_main: Rate::IDENTITY,
        total_in_main: total,
        shares,
        date_time: DateTime::<Utc>::UNIX_EPOCH,
    }
}

/// Expense where `debtor` owes the whole `amount` to `payer`.
pub fn debt(id: &str, debtor: &str, payer: &str, amount: i64) -> Expense {
    expense(id, payer, &[(debtor, amount)])
}
