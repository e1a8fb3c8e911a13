// src/config.rs

use std::{env, time::Duration};

use crate::{
    api::{
        ActivitiesApi, ApiClient, ContactsApi, CustomerExtrasApi, CustomersApi, DashboardApi, DealsApi, LookupApi,
        PipelineApi,
    },
    common::error::AppError,
    models::crm::CustomerStatus,
    services::{
        CustomerService, DashboardService, EnrichmentService, PipelineService, RecordService,
    },
};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_url: String,
    pub timeout: Duration,
    pub default_customer_status: CustomerStatus,
}

impl ClientConfig {
    /// Configuração com os padrões e a URL informada.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_customer_status: CustomerStatus::Lead,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Lê o `.env` (se existir) e as variáveis de ambiente.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("CRM_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(AppError::Config(format!("CRM_API_URL deve começar com http(s)://: {api_url}")));
        }

        let timeout_secs = match lookup("CRM_API_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| AppError::Config(format!("CRM_API_TIMEOUT_SECS inválido: {raw}")))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let default_customer_status = match lookup("CRM_DEFAULT_CUSTOMER_STATUS") {
            Some(raw) => raw.parse::<CustomerStatus>().map_err(AppError::Config)?,
            None => CustomerStatus::Lead,
        };

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
            default_customer_status,
        })
    }
}

// O estado compartilhado pelos comandos: o gráfico de dependências montado uma vez.
#[derive(Clone)]
pub struct AppState {
    pub config: ClientConfig,
    pub pipeline_service: PipelineService,
    pub dashboard_service: DashboardService,
    pub customer_service: CustomerService,
    pub enrichment_service: EnrichmentService,
    pub deal_service: RecordService<crate::models::sales::Deal>,
    pub activity_service: RecordService<crate::models::sales::Activity>,
    pub contact_service: RecordService<crate::models::crm::Contact>,
}

impl AppState {
    pub fn new(config: ClientConfig) -> Result<Self, AppError> {
        let client = ApiClient::new(&config)?;

        // --- Monta o gráfico de dependências ---
        let pipeline_service = PipelineService::new(PipelineApi::new(client.clone()));
        let dashboard_service = DashboardService::new(DashboardApi::new(client.clone()));
        let customer_service = CustomerService::new(
            CustomersApi::new(client.clone()),
            CustomerExtrasApi::new(client.clone()),
        );
        let enrichment_service = EnrichmentService::new(LookupApi::new(client.clone()));

        Ok(Self {
            pipeline_service,
            dashboard_service,
            customer_service,
            enrichment_service,
            deal_service: RecordService::new(DealsApi::new(client.clone())),
            activity_service: RecordService::new(ActivitiesApi::new(client.clone())),
            contact_service: RecordService::new(ContactsApi::new(client)),
            config,
        })
    }
}
