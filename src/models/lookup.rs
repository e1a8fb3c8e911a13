// src/models/lookup.rs

use rust_decimal::Decimal;
use serde::Deserialize;

pub const CNPJ_DIGITS: usize = 14;
pub const CEP_DIGITS: usize = 8;

/// Remove pontuação: "12.345.678/0001-90" -> "12345678000190".
pub fn only_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Registro da Receita devolvido por `/cnpj/{cnpj}`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RegistryRecord {
    #[serde(default)]
    pub cnpj: String,
    #[serde(default)]
    pub razao_social: String,
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
    pub email: Option<String>,
    #[serde(default)]
    pub telefone: Option<String>,
    #[serde(default)]
    pub atividade_principal: Option<String>,
    #[serde(default)]
    pub data_abertura: Option<String>,
    #[serde(default)]
    pub situacao: Option<String>,
}

/// Fragmento de endereço devolvido por `/cep/{cep}`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AddressFragment {
    #[serde(default)]
    pub cep: Option<String>,
    #[serde(default)]
    pub logradouro: Option<String>,
    #[serde(default)]
    pub complemento: Option<String>,
    #[serde(default)]
    pub bairro: Option<String>,
    #[serde(default)]
    pub municipio: Option<String>,
    #[serde(default)]
    pub uf: Option<String>,
}
