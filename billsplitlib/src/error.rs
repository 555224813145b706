//! Типы ошибок: валидация разбиения, валидация формы и единая ошибка API.

use rust_decimal::Decimal;
use thiserror::Error;

/// Отказ построителя разбиения. Всё исправимо пользователем.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select at least one participant for equal split")]
    EmptyParticipantSet,

    #[error("Exact amounts must add up to the total expense amount ({actual} of {expected})")]
    ExactAmountMismatch { expected: Decimal, actual: Decimal },

    #[error("Percentages must add up to 100% (got {total}%)")]
    PercentageMismatch { total: Decimal },

    #[error("Amount for {participant} cannot be negative ({amount})")]
    NegativeAmount { participant: String, amount: Decimal },

    #[error("Percentage for {participant} must be between 0 and 100 ({percentage})")]
    PercentageOutOfRange { participant: String, percentage: Decimal },

    #[error("Duplicate participant: {0}")]
    DuplicateParticipant(String),

    #[error("Value given for {0}, who is not a participant")]
    UnknownParticipant(String),
}

/// Ошибки формы создания расхода.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please select a group")]
    MissingGroup,

    #[error("Draft is for group {draft}, but group {group} was supplied")]
    GroupMismatch { draft: u64, group: u64 },

    #[error("Description must be at least {min} characters")]
    DescriptionTooShort { min: usize },

    #[error("Amount is required")]
    MissingAmount,

    #[error("Amount must be at least {min}")]
    AmountTooSmall { min: Decimal },

    #[error("Invalid number in {field}: {value:?}")]
    InvalidNumber { field: String, value: String },

    #[error("Payer is required")]
    MissingPayer,

    #[error("{0} is not a member of the group")]
    NotAGroupMember(String),

    #[error(transparent)]
    Split(#[from] ValidationError),
}

#[derive(Debug, Error)]
pub enum BillsplitError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error(transparent)]
    Form(#[from] FormError),
}

impl From<ValidationError> for BillsplitError {
    fn from(e: ValidationError) -> Self {
        BillsplitError::Form(FormError::Split(e))
    }
}

pub type Result<T> = std::result::Result<T, BillsplitError>;
