// src/services/records_service.rs
//
// CRUD de deals, atividades e contatos. Validação local antes de qualquer envio.

use tracing::{error, info};
use validator::Validate;

use crate::{
    api::crud::{CrudApi, Resource},
    common::error::AppError,
    models::ids::RecordId,
    services::Outcome,
    ui::Interaction,
};

pub struct RecordService<R> {
    api: CrudApi<R>,
}

impl<R> Clone for RecordService<R> {
    fn clone(&self) -> Self {
        Self { api: self.api.clone() }
    }
}

impl<R> RecordService<R>
where
    R: Resource,
    R::Draft: Validate,
    R::Update: Validate,
{
    pub fn new(api: CrudApi<R>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<R>, AppError> {
        self.api.list().await
    }

    pub async fn get(&self, id: &RecordId) -> Result<R, AppError> {
        self.api.get(id).await
    }

    pub async fn create(&self, draft: &R::Draft) -> Result<R, AppError> {
        draft.validate()?;
        let record = self.api.create(draft).await.inspect_err(|e| {
            error!("Erro ao criar {}: {}", R::LABEL, e);
        })?;
        info!("✅ {} criado(a)", R::LABEL);
        Ok(record)
    }

    pub async fn update(&self, id: &RecordId, update: &R::Update) -> Result<R, AppError> {
        update.validate()?;
        let record = self.api.update(id, update).await.inspect_err(|e| {
            error!("Erro ao atualizar {} {}: {}", R::LABEL, id, e);
        })?;
        info!("✅ {} {} atualizado(a)", R::LABEL, id);
        Ok(record)
    }

    pub async fn delete(&self, id: &RecordId, ui: &dyn Interaction) -> Result<Outcome, AppError> {
        if !ui.confirm(R::DELETE_PROMPT) {
            return Ok(Outcome::Cancelled);
        }
        self.api.delete(id).await.inspect_err(|e| {
            error!("Erro ao deletar {} {}: {}", R::LABEL, id, e);
        })?;
        info!("🗑️ {} {} removido(a)", R::LABEL, id);
        Ok(Outcome::Applied)
    }
}
