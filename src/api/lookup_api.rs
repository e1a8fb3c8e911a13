// src/api/lookup_api.rs
//
// Consultas externas (Receita/ViaCEP) repassadas pelo backend.

use crate::{
    api::http::ApiClient,
    common::error::AppError,
    models::lookup::{AddressFragment, RegistryRecord},
};

#[derive(Clone)]
pub struct LookupApi {
    client: ApiClient,
}

impl LookupApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `digits` já deve vir só com os 14 dígitos.
    pub async fn cnpj(&self, digits: &str) -> Result<RegistryRecord, AppError> {
        self.client
            .get(&format!("/cnpj/{digits}"))
            .await
            .map_err(|e| miss_or(e, "CNPJ não encontrado"))
    }

    pub async fn cep(&self, digits: &str) -> Result<AddressFragment, AppError> {
        self.client
            .get(&format!("/cep/{digits}"))
            .await
            .map_err(|e| miss_or(e, "CEP não encontrado"))
    }
}

// Qualquer resposta do backend que não seja o registro significa "sem registro
// para essa chave": o backend embrulha o próprio 404 num 500 genérico.
// Só falhas de transporte (timeout, rede) passam adiante.
fn miss_or(e: AppError, message: &str) -> AppError {
    match e {
        AppError::NotFound(_) | AppError::Rejected { .. } | AppError::Decode(_) => {
            tracing::debug!("Consulta sem registro: {}", e);
            AppError::LookupMiss(message.to_string())
        }
        other => other,
    }
}
