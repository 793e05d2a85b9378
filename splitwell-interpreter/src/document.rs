//! JSON ledger documents.
//!
//! Every field is decoded as optional so that a missing or `null` value is
//! reported as a [`NullInput`](splitwell_domain::LedgerErrorKind::NullInput)
//! naming the field, rather than as a generic decode failure. Decimal amounts
//! and rates are converted to scaled units here; expenses are then built by
//! the [`ExpenseAssembler`].

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Deserialize;
use splitwell_domain::{
    Expense, ExpenseAssembler, ExpenseDraft, ExpenseId, LedgerError, Member, MemberId, Split,
};
use splitwell_money::{Rate, to_scaled};

#[derive(Debug, Deserialize)]
pub struct LedgerDocument {
    members: Option<Vec<MemberDto>>,
    expenses: Option<Vec<ExpenseDto>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MemberDto {
    id: Option<String>,
    name: Option<String>,
    group_id: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpenseDto {
    id: Option<String>,
    payer_member_id: Option<String>,
    currency_code: Option<String>,
    amount: Option<f64>,
    exchange_rate: Option<f64>,
    date_time: Option<DateTime<Utc>>,
    split: Option<SplitDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
enum SplitDto {
    Equal(Vec<String>),
    Percentage(IndexMap<String, f64>),
    Exact(IndexMap<String, f64>),
}

/// Members and assembled expenses, ready for the ledger operations.
#[derive(Debug)]
pub struct Ledger {
    pub members: Vec<Member>,
    pub expenses: Vec<Expense>,
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, LedgerError> {
    value.ok_or_else(|| LedgerError::null_input(field))
}

impl LedgerDocument {
    pub fn into_ledger(self) -> Result<Ledger, LedgerError> {
        let members = required(self.members, "members")?
            .into_iter()
            .map(MemberDto::into_member)
            .collect::<Result<Vec<_>, _>>()?;

        let assembler = ExpenseAssembler;
        let expenses = required(self.expenses, "expenses")?
            .into_iter()
            .map(|dto| dto.into_draft().and_then(|draft| assembler.assemble(draft)))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            member_count = members.len(),
            expense_count = expenses.len(),
            "Ledger document decoded"
        );

        Ok(Ledger { members, expenses })
    }
}

impl MemberDto {
    fn into_member(self) -> Result<Member, LedgerError> {
        Ok(Member::new(
            required(self.id, "id")?.as_str(),
            required(self.group_id, "group_id")?.as_str(),
            required(self.name, "name")?,
            self.created_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        ))
    }
}

impl ExpenseDto {
    fn into_draft(self) -> Result<ExpenseDraft, LedgerError> {
        let amount = to_scaled(required(self.amount, "total_amount")?)
            .map_err(|err| LedgerError::from_money(err, "total_amount"))?;
        let rate = Rate::from_f64(required(self.exchange_rate, "exchange_rate_to_main")?)
            .map_err(|err| LedgerError::from_money(err, "exchange_rate_to_main"))?;

        Ok(ExpenseDraft {
            id: ExpenseId::new(required(self.id, "id")?),
            payer_member_id: MemberId::new(required(self.payer_member_id, "payer_member_id")?),
            currency_code: required(self.currency_code, "currency_code")?.into(),
            amount,
            exchange_rate_to_main: rate,
            split: required(self.split, "shares")?.into_split()?,
            date_time: self.date_time.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        })
    }
}

impl SplitDto {
    fn into_split(self) -> Result<Split, LedgerError> {
        Ok(match self {
            Self::Equal(ids) => Split::Equal(ids.into_iter().map(MemberId::new).collect()),
            Self::Percentage(entries) => Split::Percentage(
                entries
                    .into_iter()
                    .map(|(id, pct)| (MemberId::new(id), pct))
                    .collect(),
            ),
            Self::Exact(entries) => Split::Exact(
                entries
                    .into_iter()
                    .map(|(id, amount)| {
                        to_scaled(amount)
                            .map(|amount| (MemberId::new(id), amount))
                            .map_err(|err| LedgerError::from_money(err, "share_amount"))
                    })
                    .collect::<Result<_, _>>()?,
            ),
        })
    }
}
