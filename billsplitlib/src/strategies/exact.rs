//! Точные суммы: каждая неотрицательна, в сумме — итог расхода с допуском.

use crate::{
    error::ValidationError,
    model::SplitPayload,
    split::{checked_total, per_participant, within},
    traits::{SplitInput, SplitRule},
};
use rust_decimal::Decimal;

pub struct Exact;

impl SplitRule for Exact {
    fn build(input: &SplitInput<'_>, tolerance: Decimal) -> Result<SplitPayload, ValidationError> {
        let amounts = per_participant(input);

        // отрицательные — раньше сверки суммы
        for id in input.participants {
            let amount = amounts[id];
            if amount < Decimal::ZERO {
                return Err(ValidationError::NegativeAmount {
                    participant: id.clone(),
                    amount,
                });
            }
        }

        let total = checked_total(amounts.values());
        match total {
            Some(actual) if within(actual, input.amount, tolerance) => {
                Ok(SplitPayload::Exact { exact_amounts: amounts })
            }
            actual => Err(ValidationError::ExactAmountMismatch {
                expected: input.amount,
                actual: actual.unwrap_or(Decimal::MAX),
            }),
        }
    }
}
