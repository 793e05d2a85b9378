use splitwell_money::MoneyError;
use std::fmt;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LedgerErrorKind {
    NullInput,
    DuplicateId,
    InvalidNumber,
    NegativeNotAllowed,
    ZeroNotAllowed,
    PercentageOutOfRange,
    PercentageSumExceeds100,
    EmptyString,
    ReferenceNotFound,
    DivisionByZero,
    Overflow,
}

impl LedgerErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NullInput => "null_input",
            Self::DuplicateId => "duplicate_id",
            Self::InvalidNumber => "invalid_number",
            Self::NegativeNotAllowed => "negative_not_allowed",
            Self::ZeroNotAllowed => "zero_not_allowed",
            Self::PercentageOutOfRange => "percentage_out_of_range",
            Self::PercentageSumExceeds100 => "percentage_sum_exceeds_100",
            Self::EmptyString => "empty_string",
            Self::ReferenceNotFound => "reference_not_found",
            Self::DivisionByZero => "division_by_zero",
            Self::Overflow => "overflow",
        }
    }
}

impl fmt::Display for LedgerErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single error raised by every ledger operation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct LedgerError {
    kind: LedgerErrorKind,
    message: String,
    field: Option<&'static str>,
}

impl LedgerError {
    pub fn new(kind: LedgerErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field: None,
        }
    }

    pub fn with_field(mut self, field: &'static str) -> Self {
        self.field = Some(field);
        self
    }

    pub fn kind(&self) -> LedgerErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Name of the offending input field, when one applies.
    pub fn field(&self) -> Option<&'static str> {
        self.field
    }

    pub fn null_input(field: &'static str) -> Self {
        Self::new(
            LedgerErrorKind::NullInput,
            format!("required field `{field}` is missing"),
        )
        .with_field(field)
    }

    pub fn duplicate_id(field: &'static str, id: &str) -> Self {
        Self::new(LedgerErrorKind::DuplicateId, format!("duplicate id `{id}`")).with_field(field)
    }

    pub fn empty_string(field: &'static str) -> Self {
        Self::new(
            LedgerErrorKind::EmptyString,
            format!("`{field}` must not be empty"),
        )
        .with_field(field)
    }

    pub fn reference_not_found(field: &'static str, id: &str) -> Self {
        Self::new(
            LedgerErrorKind::ReferenceNotFound,
            format!("`{field}` references unknown member `{id}`"),
        )
        .with_field(field)
    }

    pub fn negative_not_allowed(field: &'static str) -> Self {
        Self::new(
            LedgerErrorKind::NegativeNotAllowed,
            format!("`{field}` must not be negative"),
        )
        .with_field(field)
    }

    pub fn zero_not_allowed(field: &'static str) -> Self {
        Self::new(
            LedgerErrorKind::ZeroNotAllowed,
            format!("`{field}` must not be zero"),
        )
        .with_field(field)
    }

    /// Like `From<MoneyError>`, but names the field the value came from.
    pub fn from_money(err: MoneyError, field: &'static str) -> Self {
        Self::from(err).with_field(field)
    }
}

impl From<MoneyError> for LedgerError {
    fn from(err: MoneyError) -> Self {
        let kind = match err {
            MoneyError::InvalidNumber => LedgerErrorKind::InvalidNumber,
            MoneyError::NegativeNotAllowed => LedgerErrorKind::NegativeNotAllowed,
            MoneyError::DivisionByZero => LedgerErrorKind::DivisionByZero,
            MoneyError::ZeroShares => LedgerErrorKind::ZeroNotAllowed,
            MoneyError::PercentageOutOfRange { .. } => LedgerErrorKind::PercentageOutOfRange,
            MoneyError::PercentageSumExceeds100 => LedgerErrorKind::PercentageSumExceeds100,
            MoneyError::Overflow => LedgerErrorKind::Overflow,
        };
        Self::new(kind, err.to_string())
    }
}
