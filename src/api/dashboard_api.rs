// src/api/dashboard_api.rs

use crate::{
    api::http::ApiClient,
    common::error::AppError,
    models::dashboard::{AlertsResponse, AutomationKind, AutomationResult, DashboardStats},
};

#[derive(Clone)]
pub struct DashboardApi {
    client: ApiClient,
}

impl DashboardApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn stats(&self) -> Result<DashboardStats, AppError> {
        self.client.get("/dashboard/stats").await
    }

    pub async fn alerts(&self) -> Result<AlertsResponse, AppError> {
        self.client.get("/dashboard/alerts").await
    }

    /// Dispara a automação e espera a resposta.
    pub async fn trigger(&self, kind: AutomationKind) -> Result<AutomationResult, AppError> {
        self.client.post_empty(kind.endpoint()).await
    }
}
