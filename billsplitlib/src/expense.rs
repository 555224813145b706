//! Форма создания расхода: сырые значения полей -> проверенный
//! `CreateExpenseRequest`. Разбиение делегируется `SplitBuilder`.

use crate::{
    config::SplitPolicy,
    error::FormError,
    model::{CreateExpenseRequest, ExpenseCategory, Group, ParticipantId, SplitType},
    split::SplitBuilder,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, str::FromStr};
use tracing::debug;

/// Числовое поле формы: пользователь мог ввести и строку, и число.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Number(serde_json::Number),
    Text(String),
}

impl FormValue {
    /// `Ok(None)` для пустого поля.
    pub fn parse(&self, field: &str) -> Result<Option<Decimal>, FormError> {
        let raw = match self {
            FormValue::Number(n) => n.to_string(),
            FormValue::Text(s) => s.trim().to_string(),
        };
        if raw.is_empty() {
            return Ok(None);
        }
        Decimal::from_str(&raw)
            .or_else(|_| Decimal::from_scientific(&raw))
            .map(Some)
            .map_err(|_| FormError::InvalidNumber {
                field: field.to_string(),
                value: raw,
            })
    }
}

impl From<Decimal> for FormValue {
    fn from(d: Decimal) -> Self {
        FormValue::Text(d.to_string())
    }
}

impl From<&str> for FormValue {
    fn from(s: &str) -> Self {
        FormValue::Text(s.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpenseDraft {
    pub group_id: Option<u64>,
    pub description: String,
    pub amount: Option<FormValue>,
    pub currency: Option<String>,
    pub category: ExpenseCategory,
    pub paid_by: Option<ParticipantId>,
    pub split_type: SplitType,
    pub notes: Option<String>,
    pub receipt_url: Option<String>,
    pub participants: Vec<ParticipantId>,
    pub exact_amounts: BTreeMap<ParticipantId, FormValue>,
    pub percentages: BTreeMap<ParticipantId, FormValue>,
}

impl ExpenseDraft {
    /// Проверяет форму и собирает тело запроса.
    ///
    /// Если передана группа, плательщик и все участники обязаны в ней
    /// состоять; валюта группы подставляется, когда в форме она не задана.
    pub fn to_request(
        &self,
        group: Option<&Group>,
        policy: &SplitPolicy,
    ) -> Result<CreateExpenseRequest, FormError> {
        let result = self.assemble(group, policy);
        match &result {
            Ok(req) => debug!(
                group_id = req.group_id,
                split_type = ?req.split_type,
                "expense request assembled"
            ),
            Err(e) => debug!(error = %e, "expense draft rejected"),
        }
        result
    }

    fn assemble(
        &self,
        group: Option<&Group>,
        policy: &SplitPolicy,
    ) -> Result<CreateExpenseRequest, FormError> {
        let group_id = match (self.group_id, group) {
            (Some(draft), Some(g)) if draft != g.id => {
                return Err(FormError::GroupMismatch { draft, group: g.id })
            }
            (Some(id), _) => id,
            (None, Some(g)) => g.id,
            (None, None) => return Err(FormError::MissingGroup),
        };

        let description = self.description.trim();
        if description.chars().count() < policy.min_description_len {
            return Err(FormError::DescriptionTooShort {
                min: policy.min_description_len,
            });
        }

        let amount = self
            .amount
            .as_ref()
            .map(|v| v.parse("amount"))
            .transpose()?
            .flatten()
            .ok_or(FormError::MissingAmount)?;
        if amount <= Decimal::ZERO || amount < policy.min_amount {
            return Err(FormError::AmountTooSmall { min: policy.min_amount });
        }

        let currency = filled(&self.currency)
            .or_else(|| group.and_then(|g| filled(&g.currency)))
            .unwrap_or(policy.default_currency.as_str())
            .to_string();

        let paid_by = filled(&self.paid_by).ok_or(FormError::MissingPayer)?;

        let values = match self.split_type {
            SplitType::Equal => BTreeMap::new(),
            SplitType::Exact => parse_values("exactAmounts", &self.exact_amounts)?,
            SplitType::Percentage => parse_values("percentages", &self.percentages)?,
        };

        if let Some(g) = group {
            let referenced = std::iter::once(paid_by)
                .chain(self.participants.iter().map(String::as_str))
                .chain(values.keys().map(String::as_str));
            for id in referenced {
                if !g.is_member(id) {
                    return Err(FormError::NotAGroupMember(id.to_string()));
                }
            }
        }

        let split = SplitBuilder::new(policy).build(
            amount,
            self.split_type,
            &self.participants,
            &values,
        )?;

        Ok(CreateExpenseRequest {
            description: description.to_string(),
            amount,
            currency,
            group_id,
            paid_by: paid_by.to_string(),
            category: self.category,
            split_type: self.split_type,
            split,
            notes: filled(&self.notes).map(str::to_string),
            receipt_url: filled(&self.receipt_url).map(str::to_string),
        })
    }
}

fn filled(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_values(
    field: &str,
    raw: &BTreeMap<ParticipantId, FormValue>,
) -> Result<BTreeMap<ParticipantId, Decimal>, FormError> {
    let mut out = BTreeMap::new();
    for (id, value) in raw {
        if let Some(v) = value.parse(&format!("{field}.{id}"))? {
            out.insert(id.clone(), v);
        }
    }
    Ok(out)
}
