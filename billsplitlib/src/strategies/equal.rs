//! Поровну: достаточно непустого списка участников.

use crate::{error::ValidationError, model::SplitPayload, traits::{SplitInput, SplitRule}};
use rust_decimal::Decimal;

pub struct Equal;

impl SplitRule for Equal {
    fn build(input: &SplitInput<'_>, _tolerance: Decimal) -> Result<SplitPayload, ValidationError> {
        if input.participants.is_empty() {
            return Err(ValidationError::EmptyParticipantSet);
        }
        Ok(SplitPayload::Equal {
            participant_ids: input.participants.to_vec(),
        })
    }
}
