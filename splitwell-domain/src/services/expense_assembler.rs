use crate::{
    error::{LedgerError, LedgerErrorKind},
    model::{Expense, ExpenseId, ExpenseShare, MemberId},
};
use chrono::{DateTime, Utc};
use fxhash::FxHashSet;
use smol_str::SmolStr;
use splitwell_money::{
    Money, MoneyError, Rate, SCALE, multiply_rate, split_by_percentage, split_equal, to_scaled,
};

const FULL_PERCENT: i64 = 100 * SCALE;

/// How an expense is divided among its participants.
#[derive(Clone, Debug, PartialEq)]
pub enum Split {
    Equal(Vec<MemberId>),
    /// Percentages in human units (`12.5` == 12.5%); must add up to 100.
    Percentage(Vec<(MemberId, f64)>),
    /// Amounts in the expense currency; must add up to the expense amount.
    Exact(Vec<(MemberId, Money)>),
}

impl Split {
    fn participants(&self) -> Vec<&MemberId> {
        match self {
            Self::Equal(ids) => ids.iter().collect(),
            Self::Percentage(entries) => entries.iter().map(|(id, _)| id).collect(),
            Self::Exact(entries) => entries.iter().map(|(id, _)| id).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseDraft {
    pub id: ExpenseId,
    pub payer_member_id: MemberId,
    pub currency_code: SmolStr,
    /// Amount in the expense currency.
    pub amount: Money,
    pub exchange_rate_to_main: Rate,
    pub split: Split,
    pub date_time: DateTime<Utc>,
}

/// Builds [`Expense`] values whose shares sum to their totals in both currencies.
pub struct ExpenseAssembler;

impl ExpenseAssembler {
    pub fn assemble(&self, draft: ExpenseDraft) -> Result<Expense, LedgerError> {
        if draft.amount.is_negative() {
            return Err(LedgerError::negative_not_allowed("total_amount"));
        }
        let rate = draft.exchange_rate_to_main;
        if rate.scaled() == 0 {
            return Err(LedgerError::zero_not_allowed("exchange_rate_to_main"));
        }
        if rate.scaled() < 0 {
            return Err(LedgerError::negative_not_allowed("exchange_rate_to_main"));
        }

        let participants = draft.split.participants();
        if participants.is_empty() {
            return Err(LedgerError::zero_not_allowed("shares"));
        }
        let mut seen = FxHashSet::default();
        for id in &participants {
            if !seen.insert(id.as_str()) {
                return Err(LedgerError::duplicate_id("member_id", id.as_str()));
            }
        }

        let total_in_main = multiply_rate(draft.amount, rate)
            .map_err(|err| LedgerError::from_money(err, "total_in_main"))?;

        let (amounts, amounts_in_main) = match &draft.split {
            Split::Equal(ids) => (
                split_equal(draft.amount, ids.len())?,
                split_equal(total_in_main, ids.len())?,
            ),
            Split::Percentage(entries) => {
                let percentages: Vec<f64> = entries.iter().map(|&(_, pct)| pct).collect();
                let amounts = split_by_percentage(draft.amount, &percentages)
                    .map_err(|err| LedgerError::from_money(err, "shares"))?;
                ensure_full_percentage(&percentages)?;
                (amounts, split_by_percentage(total_in_main, &percentages)?)
            }
            Split::Exact(entries) => {
                let amounts: Vec<Money> = entries.iter().map(|&(_, amount)| amount).collect();
                (amounts.clone(), exact_in_main(&amounts, draft.amount, rate, total_in_main)?)
            }
        };

        let shares = participants
            .into_iter()
            .zip(amounts.into_iter().zip(amounts_in_main))
            .map(|(member_id, (share_amount, share_in_main))| ExpenseShare {
                member_id: member_id.clone(),
                share_amount,
                share_in_main,
            })
            .collect();

        tracing::debug!(
            expense_id = %draft.id,
            total_in_main = %total_in_main,
            "Expense assembled"
        );

        Ok(Expense {
            id: draft.id,
            payer_member_id: draft.payer_member_id,
            currency_code: draft.currency_code,
            total_amount: draft.amount,
            exchange_rate_to_main: rate,
            total_in_main,
            shares,
            date_time: draft.date_time,
        })
    }
}

/// Only called once every percentage passed the range checks.
fn ensure_full_percentage(percentages: &[f64]) -> Result<(), LedgerError> {
    let mut sum = 0_i64;
    for &percentage in percentages {
        sum += to_scaled(percentage)
            .map_err(|err| LedgerError::from_money(err, "shares"))?
            .scaled();
    }
    if sum != FULL_PERCENT {
        return Err(LedgerError::new(
            LedgerErrorKind::InvalidNumber,
            format!("percentages must add up to 100, got {}", Money::from_scaled(sum)),
        )
        .with_field("shares"));
    }
    Ok(())
}

/// Converts exact shares through `rate`; the truncation residual goes one
/// unit at a time to the first shares.
fn exact_in_main(
    amounts: &[Money],
    amount: Money,
    rate: Rate,
    total_in_main: Money,
) -> Result<Vec<Money>, LedgerError> {
    if amounts.iter().any(|share| share.is_negative()) {
        return Err(LedgerError::negative_not_allowed("share_amount"));
    }
    let sum = amounts
        .iter()
        .try_fold(Money::ZERO, |acc, &share| acc.checked_add(share))
        .ok_or_else(|| LedgerError::from_money(MoneyError::Overflow, "shares"))?;
    if sum != amount {
        return Err(LedgerError::new(
            LedgerErrorKind::InvalidNumber,
            format!("exact shares add up to {sum}, expected {amount}"),
        )
        .with_field("shares"));
    }

    let mut in_main = amounts
        .iter()
        .map(|&share| multiply_rate(share, rate))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| LedgerError::from_money(err, "share_in_main"))?;

    let converted: Money = in_main.iter().sum();
    let residual = usize::try_from((total_in_main - converted).scaled()).unwrap_or(0);
    for share in in_main.iter_mut().take(residual) {
        *share += Money::from_scaled(1);
    }

    Ok(in_main)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn assembler() -> ExpenseAssembler {
        ExpenseAssembler
    }

    fn ids(raw: &[&str]) -> Vec<MemberId> {
        raw.iter().map(|&id| MemberId::new(id)).collect()
    }

    fn draft(amount: i64, rate: i64, split: Split) -> ExpenseDraft {
        ExpenseDraft {
            id: ExpenseId::new("e1"),
            payer_member_id: MemberId::new("m1"),
            currency_code: "USD".into(),
            amount: Money::from_scaled(amount),
            exchange_rate_to_main: Rate::from_scaled(rate),
            split,
            date_time: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    fn share_pairs(expense: &Expense) -> Vec<(i64, i64)> {
        expense
            .shares
            .iter()
            .map(|share| (share.share_amount.scaled(), share.share_in_main.scaled()))
            .collect()
    }

    #[rstest]
    fn equal_split_in_both_currencies(assembler: ExpenseAssembler) {
        let expense = assembler
            .assemble(draft(100_000, 15_000, Split::Equal(ids(&["m1", "m2", "m3"]))))
            .expect("assembly failed");

        assert_eq!(expense.total_in_main, Money::from_scaled(150_000));
        assert_eq!(
            share_pairs(&expense),
            vec![(33_334, 50_000), (33_333, 50_000), (33_333, 50_000)]
        );
        assert_eq!(expense.shares[2].member_id, MemberId::new("m3"));
    }

    #[rstest]
    fn percentage_split(assembler: ExpenseAssembler) {
        let split = Split::Percentage(vec![
            (MemberId::new("m1"), 50.0),
            (MemberId::new("m2"), 25.0),
            (MemberId::new("m3"), 25.0),
        ]);

        let expense = assembler
            .assemble(draft(10_001, 10_000, split))
            .expect("assembly failed");

        assert_eq!(
            share_pairs(&expense),
            vec![(5_001, 5_001), (2_500, 2_500), (2_500, 2_500)]
        );
    }

    #[rstest]
    fn exact_split_hands_conversion_residual_to_first_shares(assembler: ExpenseAssembler) {
        // 1 + 1 + 1 at rate 0.5: each truncates to 0, total 1.5 truncates to 1
        let split = Split::Exact(vec![
            (MemberId::new("m1"), Money::from_scaled(1)),
            (MemberId::new("m2"), Money::from_scaled(1)),
            (MemberId::new("m3"), Money::from_scaled(1)),
        ]);

        let expense = assembler.assemble(draft(3, 5_000, split)).expect("assembly failed");

        assert_eq!(expense.total_in_main, Money::from_scaled(1));
        assert_eq!(share_pairs(&expense), vec![(1, 1), (1, 0), (1, 0)]);
    }

    #[rstest]
    #[case::no_participants(
        Split::Equal(vec![]),
        LedgerErrorKind::ZeroNotAllowed,
        "shares"
    )]
    #[case::duplicate_participant(
        Split::Equal(ids(&["m1", "m2", "m1"])),
        LedgerErrorKind::DuplicateId,
        "member_id"
    )]
    #[case::percent_below_hundred(
        Split::Percentage(vec![(MemberId::new("m1"), 50.0), (MemberId::new("m2"), 49.0)]),
        LedgerErrorKind::InvalidNumber,
        "shares"
    )]
    #[case::percent_above_hundred(
        Split::Percentage(vec![(MemberId::new("m1"), 60.0), (MemberId::new("m2"), 50.0)]),
        LedgerErrorKind::PercentageSumExceeds100,
        "shares"
    )]
    #[case::percent_out_of_range(
        Split::Percentage(vec![(MemberId::new("m1"), 120.0)]),
        LedgerErrorKind::PercentageOutOfRange,
        "shares"
    )]
    #[case::exact_mismatch(
        Split::Exact(vec![(MemberId::new("m1"), Money::from_scaled(40_000))]),
        LedgerErrorKind::InvalidNumber,
        "shares"
    )]
    fn rejects_inconsistent_splits(
        assembler: ExpenseAssembler,
        #[case] split: Split,
        #[case] kind: LedgerErrorKind,
        #[case] field: &str,
    ) {
        let err = assembler
            .assemble(draft(50_000, 10_000, split))
            .expect_err("assembly should fail");

        assert_eq!(err.kind(), kind);
        assert_eq!(err.field(), Some(field));
    }

    #[rstest]
    #[case::zero_rate(0, LedgerErrorKind::ZeroNotAllowed)]
    #[case::negative_rate(-10_000, LedgerErrorKind::NegativeNotAllowed)]
    fn rejects_non_positive_rate(
        assembler: ExpenseAssembler,
        #[case] rate: i64,
        #[case] kind: LedgerErrorKind,
    ) {
        let err = assembler
            .assemble(draft(10_000, rate, Split::Equal(ids(&["m1"]))))
            .expect_err("assembly should fail");

        assert_eq!(err.kind(), kind);
        assert_eq!(err.field(), Some("exchange_rate_to_main"));
    }
}
