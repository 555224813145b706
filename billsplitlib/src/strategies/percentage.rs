//! Проценты: каждый в [0, 100], в сумме 100 с допуском.

use crate::{
    error::ValidationError,
    model::SplitPayload,
    split::{checked_total, per_participant, within},
    traits::{SplitInput, SplitRule},
};
use rust_decimal::Decimal;

pub struct Percentage;

impl SplitRule for Percentage {
    fn build(input: &SplitInput<'_>, tolerance: Decimal) -> Result<SplitPayload, ValidationError> {
        let percentages = per_participant(input);

        for id in input.participants {
            let percentage = percentages[id];
            if percentage < Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
                return Err(ValidationError::PercentageOutOfRange {
                    participant: id.clone(),
                    percentage,
                });
            }
        }

        let total = checked_total(percentages.values()).unwrap_or(Decimal::MAX);
        if !within(total, Decimal::ONE_HUNDRED, tolerance) {
            return Err(ValidationError::PercentageMismatch { total });
        }
        Ok(SplitPayload::Percentage { percentages })
    }
}
