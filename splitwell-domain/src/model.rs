use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use smallvec::SmallVec;
use smol_str::SmolStr;
use splitwell_money::{Money, Rate};
use std::fmt;

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub SmolStr);

        impl $name {
            pub fn new(id: impl Into<SmolStr>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }
    };
}

string_id!(MemberId);
string_id!(GroupId);
string_id!(ExpenseId);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub group_id: GroupId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Member {
    pub fn new(
        id: impl Into<MemberId>,
        group_id: impl Into<GroupId>,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            group_id: group_id.into(),
            name: name.into(),
            created_at,
        }
    }
}

/// One member's part of an expense, in the expense currency and in the main currency.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseShare {
    pub member_id: MemberId,
    pub share_amount: Money,
    pub share_in_main: Money,
}

/// A paid expense. The engine assumes `shares` sum to `total_in_main`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: ExpenseId,
    pub payer_member_id: MemberId,
    pub currency_code: SmolStr,
    pub total_amount: Money,
    pub exchange_rate_to_main: Rate,
    pub total_in_main: Money,
    pub shares: Vec<ExpenseShare>,
    pub date_time: DateTime<Utc>,
}

/// Net position per member in member input order (positive: is owed).
pub type MemberBalances = IndexMap<MemberId, Money>;

/// "`from` owes `to` this much."
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settlement<'a> {
    pub from: &'a Member,
    pub to: &'a Member,
    pub amount: Money,
}

impl<'a> Settlement<'a> {
    pub fn key(&self) -> (&'a MemberId, &'a MemberId, Money) {
        (&self.from.id, &self.to.id, self.amount)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SimplificationRule {
    Merge,
    Opposite,
    Chain,
    Swap,
}

impl SimplificationRule {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Merge => "merge",
            Self::Opposite => "opposite",
            Self::Chain => "chain",
            Self::Swap => "swap",
        }
    }
}

impl fmt::Display for SimplificationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type StepIndices = SmallVec<[usize; 3]>;

/// Full snapshot of the debt graph at one point of the simplification trace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimplificationStep<'a> {
    pub settlements: Vec<Settlement<'a>>,
    /// Edges about to be rewritten (set on the snapshot before a rewrite).
    pub highlighted_indices: StepIndices,
    /// Edges the rewrite inserted (set on the snapshot after a rewrite).
    pub result_indices: StepIndices,
    /// Rule being applied; `None` when no rule applied at all.
    pub rule: Option<SimplificationRule>,
}
