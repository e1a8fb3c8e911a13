// src/services/dashboard_service.rs

use tracing::{error, info};

use crate::{
    api::DashboardApi,
    common::error::AppError,
    models::dashboard::{AutomationKind, AutomationResult},
    ui::Interaction,
    views::dashboard::DashboardView,
};

#[derive(Clone)]
pub struct DashboardService {
    api: DashboardApi,
}

impl DashboardService {
    pub fn new(api: DashboardApi) -> Self {
        Self { api }
    }

    /// Estatísticas e alertas em paralelo. Se qualquer um falhar a tela fica em `Loading`.
    pub async fn load(&self, view: &mut DashboardView) -> Result<(), AppError> {
        *view = DashboardView::Loading;

        let (stats, alerts) = tokio::join!(self.api.stats(), self.api.alerts());
        match (stats, alerts) {
            (Ok(stats), Ok(alerts)) => {
                *view = DashboardView::Ready { stats, alerts };
                Ok(())
            }
            (Err(e), _) | (_, Err(e)) => {
                error!("Erro ao carregar dashboard: {}", e);
                Err(e)
            }
        }
    }

    pub async fn run_automation(
        &self,
        view: &mut DashboardView,
        kind: AutomationKind,
        ui: &dyn Interaction,
    ) -> Result<AutomationResult, AppError> {
        match self.api.trigger(kind).await {
            Ok(result) => {
                info!("🤖 Automação {} executada: {}", kind, result.message);
                ui.alert(&result.message);
                // A falha da recarga já foi logada e a tela fica em Loading.
                let _ = self.load(view).await;
                Ok(result)
            }
            Err(e) => {
                error!("Erro ao executar automação {}: {}", kind, e);
                ui.alert(&format!("Erro ao executar automação: {}", e.user_message()));
                Err(e)
            }
        }
    }
}
