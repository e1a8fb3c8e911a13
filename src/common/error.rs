// src/common/error.rs

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

// Taxonomia de falhas do cliente. Tudo é capturado no fluxo que iniciou a ação,
// logado e mostrado ao usuário como alerta; nada é repetido automaticamente.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Tempo limite excedido ao falar com a API")]
    Timeout,

    #[error("Erro de rede: {0}")]
    Network(reqwest::Error),

    #[error("Transição de estágio inválida: {0}")]
    InvalidTransition(String),

    #[error("Não encontrado: {0}")]
    NotFound(String),

    #[error("Requisição rejeitada ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("{0}")]
    LookupMiss(String),

    #[error("Resposta inesperada da API: {0}")]
    Decode(String),

    #[error("Aguarde a consulta de CNPJ/CEP terminar")]
    FormBusy,

    #[error("Configuração inválida: {0}")]
    Config(String),

    #[error("Erro de E/S: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AppError::Timeout
        } else if e.is_decode() {
            AppError::Decode(e.to_string())
        } else {
            AppError::Network(e)
        }
    }
}

impl AppError {
    /// Converte uma resposta de erro do backend.
    /// O FastAPI manda `{"detail": "..."}`; 422 manda uma lista em `detail`.
    pub(crate) fn from_response(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| {
                v.get("detail")
                    .or_else(|| v.get("error"))
                    .map(|d| match d {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
            })
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("erro desconhecido")
                    .to_string()
            });

        if status == StatusCode::NOT_FOUND {
            AppError::NotFound(message)
        } else {
            AppError::Rejected {
                status: status.as_u16(),
                message,
            }
        }
    }

    /// Rejeições de regra de negócio (400/422), não falhas de transporte.
    pub fn is_rejection(&self) -> bool {
        matches!(self, AppError::Rejected { status: 400 | 422, .. })
    }

    /// Texto curto para o alerta bloqueante.
    pub fn user_message(&self) -> String {
        match self {
            AppError::ValidationError(errors) => {
                let mut fields: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .map(|(field, field_errors)| {
                        let codes: Vec<String> = field_errors
                            .iter()
                            .map(|e| {
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            })
                            .collect();
                        format!("{}: {}", field, codes.join(", "))
                    })
                    .collect();
                fields.sort();
                format!("Um ou mais campos são inválidos ({})", fields.join("; "))
            }
            AppError::Network(_) => "Erro de rede ao falar com a API".to_string(),
            AppError::NotFound(message)
            | AppError::InvalidTransition(message)
            | AppError::LookupMiss(message) => message.clone(),
            AppError::Rejected { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
