//! Доменные модели: стратегии разбиения, категории, группы и тело запроса.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type ParticipantId = String;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SplitType {
    #[default]
    Equal,
    Exact,
    Percentage,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseCategory {
    #[default]
    Food,
    Travel,
    Transport,
    Accommodation,
    Entertainment,
    Shopping,
    Housing,
    Utilities,
    Other,
}

/// Нормализованное разбиение в том виде, в каком его ждёт бэкенд.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum SplitPayload {
    Equal {
        #[serde(rename = "participantIds")]
        participant_ids: Vec<ParticipantId>,
    },
    Exact {
        #[serde(rename = "exactAmounts", serialize_with = "decimal_map::serialize")]
        exact_amounts: BTreeMap<ParticipantId, Decimal>,
    },
    Percentage {
        #[serde(serialize_with = "decimal_map::serialize")]
        percentages: BTreeMap<ParticipantId, Decimal>,
    },
}

impl SplitPayload {
    pub fn split_type(&self) -> SplitType {
        match self {
            SplitPayload::Equal { .. } => SplitType::Equal,
            SplitPayload::Exact { .. } => SplitType::Exact,
            SplitPayload::Percentage { .. } => SplitType::Percentage,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GroupMember {
    pub user_id: ParticipantId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Участник группы приходит либо строкой-идентификатором, либо объектом.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum MemberRef {
    Id(ParticipantId),
    Member(GroupMember),
}

impl MemberRef {
    pub fn user_id(&self) -> &str {
        match self {
            MemberRef::Id(id) => id,
            MemberRef::Member(m) => &m.user_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Group {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub members: Vec<MemberRef>,
}

impl Group {
    pub fn is_member(&self, user_id: &str) -> bool {
        self.members.iter().any(|m| m.user_id() == user_id)
    }
}

/// Тело POST-запроса на создание расхода.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub currency: String,
    pub group_id: u64,
    pub paid_by: ParticipantId,
    pub category: ExpenseCategory,
    pub split_type: SplitType,
    #[serde(flatten)]
    pub split: SplitPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<String>,
}

/// Доли участников; суммы сериализуются числами, как и в запросе.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Shares(#[serde(serialize_with = "decimal_map::serialize")] pub BTreeMap<ParticipantId, Decimal>);

/// Карта `id -> Decimal`, значения пишутся JSON-числами.
pub(crate) mod decimal_map {
    use rust_decimal::Decimal;
    use serde::{Serialize, Serializer};
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct AsNumber(#[serde(with = "rust_decimal::serde::float")] Decimal);

    pub fn serialize<S: Serializer>(
        map: &BTreeMap<String, Decimal>,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        s.collect_map(map.iter().map(|(k, v)| (k, AsNumber(*v))))
    }
}
