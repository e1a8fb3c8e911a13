// src/models/crm.rs

use std::{fmt, str::FromStr};

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::common::serde_utils::{deserialize_option_datetime, deserialize_tags};
use crate::models::ids::RecordId;

// --- VALIDAÇÕES COMPARTILHADAS ---

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("required".into());
        return Err(err);
    }
    Ok(())
}

// --- ENUMS ---

// Ciclo de vida do cliente. O backend antigo usa "active"/"inactive".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    #[default]
    Lead,
    Prospect,
    #[serde(alias = "active", alias = "ativo")]
    Cliente,
    #[serde(alias = "inactive")]
    Inativo,
}

impl CustomerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerStatus::Lead => "lead",
            CustomerStatus::Prospect => "prospect",
            CustomerStatus::Cliente => "cliente",
            CustomerStatus::Inativo => "inativo",
        }
    }
}

impl fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CustomerStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lead" => Ok(CustomerStatus::Lead),
            "prospect" => Ok(CustomerStatus::Prospect),
            "cliente" | "active" | "ativo" => Ok(CustomerStatus::Cliente),
            "inativo" | "inactive" => Ok(CustomerStatus::Inativo),
            other => Err(format!("status de cliente desconhecido: {other}")),
        }
    }
}

// --- CLIENTE ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub status: CustomerStatus,

    #[serde(default, deserialize_with = "deserialize_option_datetime")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "deserialize_option_datetime")]
    pub updated_at: Option<NaiveDateTime>,

    // Dados da Receita (CNPJ) e endereço
    #[serde(default)]
    pub cnpj: Option<String>,
    #[serde(default)]
    pub razao_social: Option<String>,
    #[serde(default)]
    pub nome_fantasia: Option<String>,
    #[serde(default)]
    pub porte: Option<String>,
    #[serde(default)]
    pub natureza_juridica: Option<String>,
    #[serde(default)]
    pub capital_social: Option<Decimal>,
    #[serde(default)]
    pub cep: Option<String>,
    #[serde(default)]
    pub logradouro: Option<String>,
    #[serde(default)]
    pub numero: Option<String>,
    #[serde(default)]
    pub complemento: Option<String>,
    #[serde(default)]
    pub bairro: Option<String>,
    #[serde(default)]
    pub municipio: Option<String>,
    #[serde(default)]
    pub uf: Option<String>,
    #[serde(default)]
    pub atividade_principal: Option<String>,
    #[serde(default)]
    pub data_abertura: Option<String>,
    #[serde(default)]
    pub situacao: Option<String>,

    // Segmentação comercial
    #[serde(default)]
    pub categoria: Option<String>,
    #[serde(default)]
    pub segmento: Option<String>,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub origem: Option<String>,
    #[serde(default)]
    pub responsavel: Option<String>,
    #[serde(default)]
    pub observacoes: Option<String>,

    // Preenchidos pelas automações do backend
    #[serde(default)]
    pub valor_contrato: Option<Decimal>,
    #[serde(default)]
    pub score: Option<i64>,
}

/// Corpo de criação/edição. Campos opcionais vazios não vão no JSON.
#[derive(Debug, Clone, Default, Serialize, Validate, PartialEq)]
pub struct CustomerDraft {
    #[validate(custom(function = "not_blank"))]
    pub name: String,

    #[validate(email(message = "invalid_email"))]
    pub email: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    pub status: CustomerStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cnpj: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub razao_social: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome_fantasia: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub porte: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub natureza_juridica: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capital_social: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cep: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logradouro: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numero: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complemento: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bairro: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub municipio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atividade_principal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_abertura: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub situacao: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segmento: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origem: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsavel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
}

// --- CONTATOS ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Contact {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    pub customer_id: RecordId,
    #[serde(default, deserialize_with = "deserialize_option_datetime")]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Validate, PartialEq)]
pub struct ContactDraft {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(email(message = "invalid_email"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    pub customer_id: RecordId,
}

#[derive(Debug, Clone, Default, Serialize, Validate, PartialEq)]
pub struct ContactUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(email(message = "invalid_email"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

// --- FILHOS DO CLIENTE: NOTAS, INTERAÇÕES, ANEXOS ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Note {
    pub id: RecordId,
    pub customer_id: RecordId,
    pub content: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default, deserialize_with = "deserialize_option_datetime")]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Validate, PartialEq)]
pub struct NoteDraft {
    pub customer_id: RecordId,
    #[validate(custom(function = "not_blank"))]
    pub content: String,
    pub author: String,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct PinState {
    pub pinned: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    pub id: RecordId,
    pub customer_id: RecordId,
    #[serde(default)]
    pub tipo: String,
    #[serde(default)]
    pub titulo: String,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_datetime")]
    pub data: Option<NaiveDateTime>,
    #[serde(default)]
    pub responsavel: Option<String>,
    #[serde(default)]
    pub resultado: Option<String>,
}

#[derive(Debug, Clone, Serialize, Validate, PartialEq)]
pub struct InteractionDraft {
    pub customer_id: RecordId,
    pub tipo: String,
    #[validate(custom(function = "not_blank"))]
    pub titulo: String,
    pub descricao: String,
    pub data: NaiveDateTime,
    pub responsavel: String,
    pub resultado: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Attachment {
    pub id: RecordId,
    pub customer_id: RecordId,
    pub filename: String,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_option_datetime")]
    pub created_at: Option<NaiveDateTime>,
}
