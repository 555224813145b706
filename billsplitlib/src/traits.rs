//! Единый трэйт правила разбиения: одна реализация на стратегию.

use crate::{error::ValidationError, model::{ParticipantId, SplitPayload}};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Вход построителя. Участники уже отфильтрованы по составу группы.
#[derive(Debug, Clone, Copy)]
pub struct SplitInput<'a> {
    pub amount: Decimal,
    pub participants: &'a [ParticipantId],
    pub values: &'a BTreeMap<ParticipantId, Decimal>,
}

pub trait SplitRule {
    fn build(input: &SplitInput<'_>, tolerance: Decimal) -> Result<SplitPayload, ValidationError>;
}
