// src/services/pipeline_service.rs

use tracing::{error, info, warn};

use crate::{
    api::PipelineApi,
    common::error::AppError,
    models::{
        ids::RecordId,
        pipeline::{PipelineBoard, PipelineForecast, PipelineMetrics, StagesResponse},
    },
    services::Outcome,
    ui::Interaction,
    views::board::{BoardView, PendingAction},
};

#[derive(Clone)]
pub struct PipelineService {
    api: PipelineApi,
}

impl PipelineService {
    pub fn new(api: PipelineApi) -> Self {
        Self { api }
    }

    // =========================================================================
    //  1. LEITURAS
    // =========================================================================

    pub async fn fetch_board(&self) -> Result<PipelineBoard, AppError> {
        self.api.board().await
    }

    pub async fn fetch_metrics(&self) -> Result<PipelineMetrics, AppError> {
        self.api.metrics().await
    }

    pub async fn fetch_stages(&self) -> Result<StagesResponse, AppError> {
        self.api.stages().await
    }

    pub async fn fetch_forecast(&self) -> Result<PipelineForecast, AppError> {
        self.api.forecast().await
    }

    /// Substitui o snapshot do board. Em caso de falha o snapshot anterior fica.
    pub async fn refresh(&self, view: &mut BoardView, ui: &dyn Interaction) -> Result<(), AppError> {
        match self.api.board().await {
            Ok(board) => {
                view.board = Some(board);
                Ok(())
            }
            Err(e) => {
                error!("Erro ao carregar pipeline: {}", e);
                ui.alert(&format!("Erro ao carregar pipeline: {}", e.user_message()));
                Err(e)
            }
        }
    }

    pub async fn refresh_metrics(&self, view: &mut BoardView, ui: &dyn Interaction) -> Result<(), AppError> {
        match self.api.metrics().await {
            Ok(metrics) => {
                view.metrics = Some(metrics);
                Ok(())
            }
            Err(e) => {
                error!("Erro ao carregar métricas: {}", e);
                ui.alert(&format!("Erro ao carregar métricas: {}", e.user_message()));
                Err(e)
            }
        }
    }

    // Falhas de recarga já foram alertadas dentro de refresh/refresh_metrics.
    async fn resync(&self, view: &mut BoardView, ui: &dyn Interaction, with_metrics: bool) {
        if self.refresh(view, ui).await.is_err() {
            return;
        }
        if with_metrics {
            let _ = self.refresh_metrics(view, ui).await;
        }
    }

    // =========================================================================
    //  2. TRANSIÇÕES
    // =========================================================================

    /// Move o deal e recarrega o board inteiro. Nada é alterado localmente antes da resposta.
    pub async fn move_deal(
        &self,
        view: &mut BoardView,
        deal_id: &RecordId,
        new_stage: &str,
        ui: &dyn Interaction,
    ) -> Result<Outcome, AppError> {
        view.pending = Some(PendingAction::Moving {
            deal_id: deal_id.clone(),
            to_stage: new_stage.to_string(),
        });
        let result = self.api.move_deal(deal_id, new_stage).await;
        view.pending = None;

        match result {
            Ok(_) => {
                info!("🔀 Deal {} movido para {}", deal_id, new_stage);
                self.resync(view, ui, false).await;
                Ok(Outcome::Applied)
            }
            Err(e) => {
                let e = match e {
                    rejected if rejected.is_rejection() => AppError::InvalidTransition(rejected.user_message()),
                    other => other,
                };
                error!("Erro ao mover deal {}: {}", deal_id, e);
                ui.alert(&format!("Erro ao mover deal: {}", e.user_message()));
                Err(e)
            }
        }
    }

    pub fn begin_drag(&self, view: &mut BoardView, deal_id: RecordId) {
        view.dragged = Some(deal_id);
    }

    /// Soltar sem arrasto em andamento não faz nada.
    pub async fn drop_on(&self, view: &mut BoardView, stage: &str, ui: &dyn Interaction) -> Result<Outcome, AppError> {
        let Some(deal_id) = view.dragged.take() else {
            return Ok(Outcome::Cancelled);
        };
        self.move_deal(view, &deal_id, stage, ui).await
    }

    pub async fn win_deal(&self, view: &mut BoardView, deal_id: &RecordId, ui: &dyn Interaction) -> Result<Outcome, AppError> {
        if !ui.confirm("Marcar este deal como ganho?") {
            return Ok(Outcome::Cancelled);
        }

        view.pending = Some(PendingAction::Winning(deal_id.clone()));
        let result = self.api.win_deal(deal_id).await;
        view.pending = None;

        match result {
            Ok(won) => {
                info!("🎉 Deal {} ganho", deal_id);
                ui.alert(if won.message.is_empty() { "Deal ganho! 🎉" } else { &won.message });
                self.resync(view, ui, true).await;
                Ok(Outcome::Applied)
            }
            Err(e) => {
                error!("Erro ao marcar deal {} como ganho: {}", deal_id, e);
                ui.alert(&format!("Erro ao marcar deal como ganho: {}", e.user_message()));
                Err(e)
            }
        }
    }

    /// Sem motivo (cancelado ou em branco) nenhuma requisição é feita.
    pub async fn lose_deal(&self, view: &mut BoardView, deal_id: &RecordId, ui: &dyn Interaction) -> Result<Outcome, AppError> {
        let reason = match ui.prompt("Motivo da perda?") {
            Some(reason) if !reason.trim().is_empty() => reason.trim().to_string(),
            _ => {
                warn!("Perda do deal {} cancelada: sem motivo", deal_id);
                return Ok(Outcome::Cancelled);
            }
        };

        view.pending = Some(PendingAction::Losing(deal_id.clone()));
        let result = self.api.lose_deal(deal_id, &reason).await;
        view.pending = None;

        match result {
            Ok(lost) => {
                info!("Deal {} perdido: {}", deal_id, reason);
                ui.alert(if lost.message.is_empty() { "Deal marcado como perdido" } else { &lost.message });
                self.resync(view, ui, true).await;
                Ok(Outcome::Applied)
            }
            Err(e) => {
                error!("Erro ao marcar deal {} como perdido: {}", deal_id, e);
                ui.alert(&format!("Erro ao marcar deal como perdido: {}", e.user_message()));
                Err(e)
            }
        }
    }
}
