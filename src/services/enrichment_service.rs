// src/services/enrichment_service.rs
//
// Autopreenchimento do formulário de cliente a partir do CNPJ e do CEP.

use tracing::{debug, error, info};

use crate::{
    api::LookupApi,
    common::error::AppError,
    models::customer_form::{CustomerEditor, CustomerPatch, LookupField, LookupTicket},
    ui::Interaction,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// A edição não completou os dígitos; nenhuma consulta.
    Skipped,
    Applied,
    /// Uma edição mais nova superou esta consulta.
    Stale,
    Failed,
}

#[derive(Clone)]
pub struct EnrichmentService {
    api: LookupApi,
}

impl EnrichmentService {
    pub fn new(api: LookupApi) -> Self {
        Self { api }
    }

    pub async fn cnpj_changed(&self, editor: &mut CustomerEditor, raw: &str, ui: &dyn Interaction) -> LookupOutcome {
        self.field_changed(editor, LookupField::Cnpj, raw, ui).await
    }

    pub async fn cep_changed(&self, editor: &mut CustomerEditor, raw: &str, ui: &dyn Interaction) -> LookupOutcome {
        self.field_changed(editor, LookupField::Cep, raw, ui).await
    }

    async fn field_changed(
        &self,
        editor: &mut CustomerEditor,
        field: LookupField,
        raw: &str,
        ui: &dyn Interaction,
    ) -> LookupOutcome {
        let Some(ticket) = editor.edit(field, raw) else {
            return LookupOutcome::Skipped;
        };
        let result = self.lookup(&ticket).await;
        self.apply_lookup(editor, &ticket, result, ui)
    }

    /// Busca o registro da chave do ticket e o converte em patch.
    pub async fn lookup(&self, ticket: &LookupTicket) -> Result<CustomerPatch, AppError> {
        debug!("🔎 Consultando {} {}", ticket.field.label(), ticket.key);
        match ticket.field {
            LookupField::Cnpj => self
                .api
                .cnpj(&ticket.key)
                .await
                .map(|record| CustomerPatch::from_registry(&record)),
            LookupField::Cep => self
                .api
                .cep(&ticket.key)
                .await
                .map(|address| CustomerPatch::from_address(&address)),
        }
    }

    /// Aplica o resultado se o ticket ainda for o mais recente do campo.
    /// Em falha o formulário fica como está, inclusive os merges anteriores.
    pub fn apply_lookup(
        &self,
        editor: &mut CustomerEditor,
        ticket: &LookupTicket,
        result: Result<CustomerPatch, AppError>,
        ui: &dyn Interaction,
    ) -> LookupOutcome {
        if !editor.settle(ticket) {
            debug!("Resultado de {} {} descartado: consulta superada", ticket.field.label(), ticket.key);
            return LookupOutcome::Stale;
        }

        match result {
            Ok(patch) => {
                patch.apply(&mut editor.form);
                info!("✅ {} {} aplicado ao formulário", ticket.field.label(), ticket.key);
                LookupOutcome::Applied
            }
            Err(e) => {
                error!("Erro ao consultar {} {}: {}", ticket.field.label(), ticket.key, e);
                ui.alert(&e.user_message());
                LookupOutcome::Failed
            }
        }
    }
}
