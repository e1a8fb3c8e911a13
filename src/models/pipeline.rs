// src/models/pipeline.rs

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::serde_utils::deserialize_option_datetime;
use crate::models::ids::RecordId;

// 1. Board (agrupado e agregado pelo backend a cada busca)

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BoardDeal {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub value: Decimal,
    #[serde(default)]
    pub customer_name: String,
    pub customer_id: RecordId,
    #[serde(default = "default_probability")]
    pub probability: u8,
    #[serde(default, deserialize_with = "deserialize_option_datetime")]
    pub expected_close_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_datetime")]
    pub created_at: Option<NaiveDateTime>,
}

fn default_probability() -> u8 {
    50
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PipelineStage {
    pub stage: String,
    pub order: i32,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub deals: Vec<BoardDeal>,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub total_value: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct BoardSummary {
    #[serde(default)]
    pub total_deals: u32,
    #[serde(default)]
    pub total_value: Decimal,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PipelineBoard {
    pub stages: Vec<PipelineStage>,
    #[serde(default)]
    pub summary: BoardSummary,
}

impl PipelineBoard {
    /// Estágios em que o deal aparece. Num board coerente, no máximo um.
    pub fn stages_with_deal<'a>(&'a self, deal_id: &RecordId) -> impl Iterator<Item = &'a PipelineStage> + use<'a> {
        let deal_id = deal_id.clone();
        self.stages
            .iter()
            .filter(move |s| s.deals.iter().any(|d| d.id == deal_id))
    }

    pub fn stage_of(&self, deal_id: &RecordId) -> Option<&str> {
        self.stages_with_deal(deal_id).next().map(|s| s.stage.as_str())
    }

    pub fn find_deal(&self, deal_id: &RecordId) -> Option<&BoardDeal> {
        self.stages
            .iter()
            .flat_map(|s| s.deals.iter())
            .find(|d| &d.id == deal_id)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StageDefinition {
    pub name: String,
    pub order: i32,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StagesResponse {
    pub stages: Vec<StageDefinition>,
}

// 2. Métricas (somente leitura, calculadas no backend)

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ConversionRate {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub conversion_rate: Decimal,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StageDuration {
    pub stage: String,
    #[serde(default)]
    pub avg_days: Decimal,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PipelineMetrics {
    #[serde(default)]
    pub conversion_rates: Vec<ConversionRate>,
    #[serde(default)]
    pub avg_time_by_stage: Vec<StageDuration>,
    #[serde(default)]
    pub win_rate: Decimal,
    #[serde(default)]
    pub avg_deal_value: Decimal,
    #[serde(default)]
    pub total_won_value: Decimal,
    #[serde(default)]
    pub total_closed_deals: u32,
    #[serde(default)]
    pub total_won_deals: u32,
}

// 3. Previsão de faturamento

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StageForecast {
    pub stage: String,
    #[serde(default)]
    pub total_value: Decimal,
    #[serde(default)]
    pub weighted_value: Decimal,
    #[serde(default)]
    pub deals_count: u32,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PipelineForecast {
    #[serde(default)]
    pub forecast_by_stage: Vec<StageForecast>,
    #[serde(default)]
    pub total_weighted_forecast: Decimal,
}

// 4. Transições

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DealMove {
    pub deal_id: RecordId,
    pub new_stage: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MoveResult {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub new_stage: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct WinResult {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub value: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoseResult {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub reason: Option<String>,
}
