// src/models/sales.rs

use std::{fmt, str::FromStr};

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::common::serde_utils::deserialize_option_datetime;
use crate::models::{crm::not_blank, ids::RecordId};

fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut err = ValidationError::new("negative_value");
        err.message = Some("negative_value".into());
        return Err(err);
    }
    Ok(())
}

fn default_probability() -> u8 {
    50
}

// --- NEGÓCIOS (DEALS) ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Deal {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub value: Decimal,
    #[serde(default)]
    pub stage: String,
    pub customer_id: RecordId,
    #[serde(default = "default_probability")]
    pub probability: u8,
    #[serde(default, deserialize_with = "deserialize_option_datetime")]
    pub expected_close_date: Option<NaiveDateTime>,
    // open / won / lost, quando o backend informa
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_datetime")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "deserialize_option_datetime")]
    pub updated_at: Option<NaiveDateTime>,
}

/// O estágio só é escolhido na criação. Depois disso ele muda apenas
/// pelas operações do pipeline (mover, ganhar, perder).
#[derive(Debug, Clone, Serialize, Validate, PartialEq)]
pub struct DealDraft {
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[validate(custom(function = "non_negative"))]
    pub value: Decimal,
    #[validate(custom(function = "not_blank"))]
    pub stage: String,
    pub customer_id: RecordId,
    #[validate(range(max = 100, message = "invalid_probability"))]
    pub probability: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_close_date: Option<NaiveDate>,
}

/// Edição livre de um deal. Sem `stage`: o estágio só muda pelo pipeline.
#[derive(Debug, Clone, Default, Serialize, Validate, PartialEq)]
pub struct DealUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[validate(custom(function = "non_negative"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Decimal>,
    #[validate(range(max = 100, message = "invalid_probability"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_close_date: Option<NaiveDate>,
}

// --- ATIVIDADES ---

// As automações do backend criam tipos próprios (pipeline_move, deal_won,
// reativacao...), que caem em `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Task,
    Call,
    Meeting,
    Email,
    Note,
    #[serde(untagged)]
    Other(String),
}

impl FromStr for ActivityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "task" => Ok(ActivityType::Task),
            "call" => Ok(ActivityType::Call),
            "meeting" => Ok(ActivityType::Meeting),
            "email" => Ok(ActivityType::Email),
            "note" => Ok(ActivityType::Note),
            other => Err(format!("tipo de atividade desconhecido: {other}")),
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityType::Task => f.write_str("task"),
            ActivityType::Call => f.write_str("call"),
            ActivityType::Meeting => f.write_str("meeting"),
            ActivityType::Email => f.write_str("email"),
            ActivityType::Note => f.write_str("note"),
            ActivityType::Other(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl FromStr for ActivityStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(ActivityStatus::Pending),
            "completed" => Ok(ActivityStatus::Completed),
            "cancelled" | "canceled" => Ok(ActivityStatus::Cancelled),
            other => Err(format!("status de atividade desconhecido: {other}")),
        }
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ActivityStatus::Pending => "pending",
            ActivityStatus::Completed => "completed",
            ActivityStatus::Cancelled => "cancelled",
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub activity_type: ActivityType,
    #[serde(default)]
    pub status: ActivityStatus,
    pub customer_id: RecordId,
    #[serde(default)]
    pub deal_id: Option<RecordId>,
    #[serde(default, deserialize_with = "deserialize_option_datetime")]
    pub due_date: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "deserialize_option_datetime")]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Validate, PartialEq)]
pub struct ActivityDraft {
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub activity_type: ActivityType,
    pub status: ActivityStatus,
    pub customer_id: RecordId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Validate, PartialEq)]
pub struct ActivityUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<ActivityType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ActivityStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}
