// src/api/pipeline_api.rs

use crate::{
    api::http::ApiClient,
    common::error::AppError,
    models::{
        RecordId,
        pipeline::{
            DealMove, LoseResult, MoveResult, PipelineBoard, PipelineForecast, PipelineMetrics,
            StagesResponse, WinResult,
        },
    },
};

#[derive(Clone)]
pub struct PipelineApi {
    client: ApiClient,
}

impl PipelineApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    // 1. Leitura (agrupamento e agregados vêm prontos do backend)

    pub async fn board(&self) -> Result<PipelineBoard, AppError> {
        self.client.get("/pipeline/board").await
    }

    pub async fn metrics(&self) -> Result<PipelineMetrics, AppError> {
        self.client.get("/pipeline/metrics").await
    }

    pub async fn stages(&self) -> Result<StagesResponse, AppError> {
        self.client.get("/pipeline/stages").await
    }

    pub async fn forecast(&self) -> Result<PipelineForecast, AppError> {
        self.client.get("/pipeline/forecast").await
    }

    // 2. Transições

    pub async fn move_deal(&self, deal_id: &RecordId, new_stage: &str) -> Result<MoveResult, AppError> {
        let body = DealMove {
            deal_id: deal_id.clone(),
            new_stage: new_stage.to_string(),
        };
        self.client.post("/pipeline/move", &body).await
    }

    pub async fn win_deal(&self, deal_id: &RecordId) -> Result<WinResult, AppError> {
        self.client.post_empty(&format!("/pipeline/deal/{deal_id}/win")).await
    }

    pub async fn lose_deal(&self, deal_id: &RecordId, reason: &str) -> Result<LoseResult, AppError> {
        self.client
            .post_query(&format!("/pipeline/deal/{deal_id}/lose"), &[("reason", reason)])
            .await
    }
}
