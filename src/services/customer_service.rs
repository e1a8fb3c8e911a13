// src/services/customer_service.rs

use std::path::Path;

use chrono::Local;
use tracing::{error, info, warn};
use validator::Validate;

use crate::{
    api::{CustomerExtrasApi, CustomersApi, crud::Resource},
    common::error::AppError,
    models::{
        crm::{Attachment, Customer, Interaction, InteractionDraft, Note, NoteDraft, PinState},
        customer_form::CustomerEditor,
        ids::RecordId,
    },
    services::Outcome,
    ui::Interaction as Dialogs,
    views::customers::CustomerDetails,
};

pub const DEFAULT_NOTE_AUTHOR: &str = "Sistema";

#[derive(Clone)]
pub struct CustomerService {
    customers: CustomersApi,
    extras: CustomerExtrasApi,
}

impl CustomerService {
    pub fn new(customers: CustomersApi, extras: CustomerExtrasApi) -> Self {
        Self { customers, extras }
    }

    // =========================================================================
    //  1. CLIENTES
    // =========================================================================

    pub async fn list(&self) -> Result<Vec<Customer>, AppError> {
        self.customers.list().await
    }

    pub async fn get(&self, id: &RecordId) -> Result<Customer, AppError> {
        self.customers.get(id).await
    }

    /// Cria (`editing = None`) ou atualiza o cliente a partir do formulário.
    /// Nada é enviado com consulta CNPJ/CEP em andamento ou com campos inválidos.
    pub async fn save(
        &self,
        editing: Option<&RecordId>,
        editor: &CustomerEditor,
        ui: &dyn Dialogs,
    ) -> Result<Customer, AppError> {
        if !editor.can_submit() {
            let e = AppError::FormBusy;
            ui.alert(&e.user_message());
            return Err(e);
        }

        let draft = editor.form.to_draft();
        if let Err(errors) = draft.validate() {
            let e = AppError::from(errors);
            warn!("Cliente não enviado: {}", e.user_message());
            ui.alert(&e.user_message());
            return Err(e);
        }

        let result = match editing {
            Some(id) => self.customers.update(id, &draft).await,
            None => self.customers.create(&draft).await,
        };

        match result {
            Ok(customer) => {
                info!("✅ Cliente {} salvo: {}", customer.id, customer.name);
                Ok(customer)
            }
            Err(e) => {
                error!("Erro ao salvar cliente: {}", e);
                ui.alert(&format!("Erro ao salvar cliente: {}", e.user_message()));
                Err(e)
            }
        }
    }

    pub async fn delete(&self, id: &RecordId, ui: &dyn Dialogs) -> Result<Outcome, AppError> {
        if !ui.confirm(Customer::DELETE_PROMPT) {
            return Ok(Outcome::Cancelled);
        }
        match self.customers.delete(id).await {
            Ok(()) => {
                info!("🗑️ Cliente {} removido", id);
                Ok(Outcome::Applied)
            }
            Err(e) => {
                error!("Erro ao deletar cliente {}: {}", id, e);
                ui.alert(&format!("Erro ao deletar cliente: {}", e.user_message()));
                Err(e)
            }
        }
    }

    // =========================================================================
    //  2. DETALHE (NOTAS, INTERAÇÕES, ANEXOS)
    // =========================================================================

    /// As três listas em paralelo; qualquer falha derruba o carregamento.
    pub async fn load_details(&self, customer_id: &RecordId) -> Result<CustomerDetails, AppError> {
        let (notes, interactions, attachments) = tokio::join!(
            self.extras.list_notes(customer_id),
            self.extras.list_interactions(customer_id),
            self.extras.list_attachments(customer_id),
        );

        Ok(CustomerDetails::new(notes?, interactions?, attachments?))
    }

    /// Conteúdo em branco é ignorado sem requisição.
    pub async fn add_note(
        &self,
        customer_id: &RecordId,
        content: &str,
        author: Option<&str>,
    ) -> Result<Option<Note>, AppError> {
        if content.trim().is_empty() {
            return Ok(None);
        }

        let draft = NoteDraft {
            customer_id: customer_id.clone(),
            content: content.trim().to_string(),
            author: author
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .unwrap_or(DEFAULT_NOTE_AUTHOR)
                .to_string(),
        };
        draft.validate()?;

        let note = self.extras.create_note(&draft).await?;
        info!("📝 Nota {} criada para o cliente {}", note.id, customer_id);
        Ok(Some(note))
    }

    pub async fn delete_note(&self, note_id: &RecordId) -> Result<(), AppError> {
        self.extras.delete_note(note_id).await
    }

    pub async fn toggle_pin(&self, note_id: &RecordId) -> Result<PinState, AppError> {
        self.extras.toggle_pin(note_id).await
    }

    /// Título em branco é ignorado sem requisição.
    pub async fn add_interaction(&self, mut draft: InteractionDraft) -> Result<Option<Interaction>, AppError> {
        if draft.titulo.trim().is_empty() {
            return Ok(None);
        }
        draft.titulo = draft.titulo.trim().to_string();
        draft.validate()?;

        let interaction = self.extras.create_interaction(&draft).await?;
        info!("Interação {} registrada para o cliente {}", interaction.id, draft.customer_id);
        Ok(Some(interaction))
    }

    /// Rascunho datado de agora.
    pub fn interaction_draft(customer_id: &RecordId, tipo: &str, titulo: &str) -> InteractionDraft {
        InteractionDraft {
            customer_id: customer_id.clone(),
            tipo: tipo.to_string(),
            titulo: titulo.to_string(),
            descricao: String::new(),
            data: Local::now().naive_local(),
            responsavel: String::new(),
            resultado: String::new(),
        }
    }

    pub async fn delete_interaction(&self, interaction_id: &RecordId) -> Result<(), AppError> {
        self.extras.delete_interaction(interaction_id).await
    }

    pub async fn list_attachments(&self, customer_id: &RecordId) -> Result<Vec<Attachment>, AppError> {
        self.extras.list_attachments(customer_id).await
    }

    /// Lê o arquivo do disco e envia como multipart.
    pub async fn upload_attachment(
        &self,
        customer_id: &RecordId,
        path: &Path,
        ui: &dyn Dialogs,
    ) -> Result<Attachment, AppError> {
        let result = self.read_and_upload(customer_id, path).await;
        match &result {
            Ok(attachment) => {
                info!("📎 Anexo {} enviado para o cliente {}", attachment.filename, customer_id);
                ui.alert("Arquivo enviado com sucesso!");
            }
            Err(e) => {
                error!("Erro ao enviar arquivo {}: {}", path.display(), e);
                ui.alert(&format!("Erro ao enviar arquivo: {}", e.user_message()));
            }
        }
        result
    }

    async fn read_and_upload(&self, customer_id: &RecordId, path: &Path) -> Result<Attachment, AppError> {
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("arquivo")
            .to_string();

        self.extras
            .upload_attachment(customer_id, &filename, content_type_for(path), bytes)
            .await
    }

    pub async fn delete_attachment(&self, attachment_id: &RecordId) -> Result<(), AppError> {
        self.extras.delete_attachment(attachment_id).await
    }
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => "application/octet-stream",
    }
}
