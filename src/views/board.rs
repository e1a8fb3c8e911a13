// src/views/board.rs
//
// Estado exibido do pipeline. É sempre o último snapshot vindo do backend;
// nada aqui recalcula contagens ou totais.

use std::fmt::Write;

use crate::{
    common::format::{format_brl, format_date, format_number, format_percent},
    models::{
        ids::RecordId,
        pipeline::{PipelineBoard, PipelineForecast, PipelineMetrics},
    },
};

/// Requisição de transição em andamento.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction {
    Moving { deal_id: RecordId, to_stage: String },
    Winning(RecordId),
    Losing(RecordId),
}

#[derive(Debug, Clone, Default)]
pub struct BoardView {
    pub board: Option<PipelineBoard>,
    pub metrics: Option<PipelineMetrics>,
    pub pending: Option<PendingAction>,
    pub dragged: Option<RecordId>,
}

impl BoardView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.board.is_none()
    }

    pub fn render(&self) -> String {
        let Some(board) = &self.board else {
            return "Carregando pipeline...\n".to_string();
        };

        let mut out = String::new();
        for stage in &board.stages {
            let _ = writeln!(
                out,
                "■ {} ({}) · {}",
                stage.stage,
                stage.count,
                format_brl(stage.total_value)
            );
            if stage.deals.is_empty() {
                let _ = writeln!(out, "    (vazio)");
            }
            for deal in &stage.deals {
                let marker = if self.dragged.as_ref() == Some(&deal.id) { "»" } else { "-" };
                let _ = write!(
                    out,
                    "  {} [{}] {} · {} · {} · {}%",
                    marker,
                    deal.id,
                    deal.title,
                    deal.customer_name,
                    format_brl(deal.value),
                    deal.probability
                );
                if let Some(close) = &deal.expected_close_date {
                    let _ = write!(out, " · previsão {}", format_date(close));
                }
                out.push('\n');
            }
        }
        let _ = writeln!(
            out,
            "Total: {} deals · {}",
            board.summary.total_deals,
            format_brl(board.summary.total_value)
        );

        if let Some(metrics) = &self.metrics {
            out.push('\n');
            out.push_str(&render_metrics(metrics));
        }

        if let Some(pending) = &self.pending {
            let label = match pending {
                PendingAction::Moving { deal_id, to_stage } => format!("movendo {deal_id} para {to_stage}"),
                PendingAction::Winning(id) => format!("marcando {id} como ganho"),
                PendingAction::Losing(id) => format!("marcando {id} como perdido"),
            };
            let _ = writeln!(out, "⏳ {label}...");
        }

        out
    }
}

pub fn render_metrics(metrics: &PipelineMetrics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Taxa de vitória: {}", format_percent(metrics.win_rate));
    let _ = writeln!(out, "Ticket médio: {}", format_brl(metrics.avg_deal_value));
    let _ = writeln!(
        out,
        "Ganhos: {} de {} fechados · {}",
        metrics.total_won_deals,
        metrics.total_closed_deals,
        format_brl(metrics.total_won_value)
    );
    for rate in &metrics.conversion_rates {
        let _ = writeln!(out, "  {} → {}: {}", rate.from, rate.to, format_percent(rate.conversion_rate));
    }
    for duration in &metrics.avg_time_by_stage {
        let _ = writeln!(out, "  {}: {} dias em média", duration.stage, format_number(duration.avg_days));
    }
    out
}

pub fn render_forecast(forecast: &PipelineForecast) -> String {
    let mut out = String::new();
    for stage in &forecast.forecast_by_stage {
        let _ = writeln!(
            out,
            "{} ({}): {} · ponderado {}",
            stage.stage,
            stage.deals_count,
            format_brl(stage.total_value),
            format_brl(stage.weighted_value)
        );
    }
    let _ = writeln!(out, "Previsão ponderada: {}", format_brl(forecast.total_weighted_forecast));
    out
}
