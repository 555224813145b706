//! Построитель разбиения: проверяет вход и отдаёт нормализованный payload.

use crate::{
    config::SplitPolicy,
    error::ValidationError,
    model::{ParticipantId, SplitPayload, SplitType},
    strategies::{equal::Equal, exact::Exact, percentage::Percentage},
    traits::{SplitInput, SplitRule},
};
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::{BTreeMap, HashSet};

/// Знаков после запятой у денежных сумм и процентов.
pub const MINOR_UNITS: u32 = 2;

/// Разбиение с политикой по умолчанию (допуск 0.01).
pub fn build_split(
    amount: Decimal,
    strategy: SplitType,
    participants: &[ParticipantId],
    values: &BTreeMap<ParticipantId, Decimal>,
) -> Result<SplitPayload, ValidationError> {
    SplitBuilder::default().build(amount, strategy, participants, values)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitBuilder {
    tolerance: Decimal,
}

impl Default for SplitBuilder {
    fn default() -> Self {
        Self::new(&SplitPolicy::default())
    }
}

impl SplitBuilder {
    pub fn new(policy: &SplitPolicy) -> Self {
        Self { tolerance: policy.tolerance }
    }

    pub fn tolerance(&self) -> Decimal {
        self.tolerance
    }

    pub fn build(
        &self,
        amount: Decimal,
        strategy: SplitType,
        participants: &[ParticipantId],
        values: &BTreeMap<ParticipantId, Decimal>,
    ) -> Result<SplitPayload, ValidationError> {
        check_participants(strategy, participants, values)?;

        let input = SplitInput { amount, participants, values };
        match strategy {
            SplitType::Equal => Equal::build(&input, self.tolerance),
            SplitType::Exact => Exact::build(&input, self.tolerance),
            SplitType::Percentage => Percentage::build(&input, self.tolerance),
        }
    }
}

fn check_participants(
    strategy: SplitType,
    participants: &[ParticipantId],
    values: &BTreeMap<ParticipantId, Decimal>,
) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(participants.len());
    for id in participants {
        if !seen.insert(id.as_str()) {
            return Err(ValidationError::DuplicateParticipant(id.clone()));
        }
    }
    if strategy != SplitType::Equal {
        if let Some(id) = values.keys().find(|id| !seen.contains(id.as_str())) {
            return Err(ValidationError::UnknownParticipant(id.clone()));
        }
    }
    Ok(())
}

/// Значение каждого участника; не указанное считается нулём.
pub(crate) fn per_participant(input: &SplitInput<'_>) -> BTreeMap<ParticipantId, Decimal> {
    input
        .participants
        .iter()
        .map(|id| (id.clone(), input.values.get(id).copied().unwrap_or(Decimal::ZERO)))
        .collect()
}

pub(crate) fn checked_total<'a, I>(values: I) -> Option<Decimal>
where
    I: IntoIterator<Item = &'a Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))
}

/// `|actual - target| < tolerance`
pub(crate) fn within(actual: Decimal, target: Decimal, tolerance: Decimal) -> bool {
    actual
        .checked_sub(target)
        .is_some_and(|diff| diff.abs() < tolerance)
}

fn round_minor(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MINOR_UNITS, RoundingStrategy::MidpointAwayFromZero)
}

/// Доля одного участника при равном разбиении, для показа пользователю.
pub fn equal_share(amount: Decimal, participants: usize) -> Decimal {
    if participants == 0 {
        return Decimal::ZERO;
    }
    amount
        .checked_div(Decimal::from(participants))
        .map(round_minor)
        .unwrap_or(Decimal::ZERO)
}

/// Начальные проценты для формы: 100/n с точностью до сотых. Остаток
/// раздаётся по одной сотой первым участникам, сумма всегда ровно 100.
pub fn even_percentages(participants: &[ParticipantId]) -> BTreeMap<ParticipantId, Decimal> {
    if participants.is_empty() {
        return BTreeMap::new();
    }
    const HUNDREDTHS: u64 = 100 * 100;
    let n = participants.len() as u64;
    let (base, remainder) = (HUNDREDTHS / n, HUNDREDTHS % n);

    participants
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let hundredths = base + u64::from((i as u64) < remainder);
            (id.clone(), Decimal::new(hundredths as i64, MINOR_UNITS))
        })
        .collect()
}

impl SplitPayload {
    /// Сколько приходится на каждого участника при итоге `amount`.
    pub fn shares(&self, amount: Decimal) -> BTreeMap<ParticipantId, Decimal> {
        match self {
            SplitPayload::Equal { participant_ids } => {
                let share = equal_share(amount, participant_ids.len());
                participant_ids.iter().map(|id| (id.clone(), share)).collect()
            }
            SplitPayload::Exact { exact_amounts } => exact_amounts.clone(),
            SplitPayload::Percentage { percentages } => percentages
                .iter()
                .map(|(id, pct)| {
                    let owed = amount
                        .checked_mul(*pct)
                        .map(|v| round_minor(v / Decimal::ONE_HUNDRED))
                        .unwrap_or(Decimal::ZERO);
                    (id.clone(), owed)
                })
                .collect(),
        }
    }
}
