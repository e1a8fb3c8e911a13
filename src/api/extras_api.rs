// src/api/extras_api.rs
//
// Registros filhos do cliente: notas, interações e anexos.

use reqwest::multipart::{Form, Part};

use crate::{
    api::http::ApiClient,
    common::error::AppError,
    models::{
        RecordId,
        crm::{Attachment, Interaction, InteractionDraft, Note, NoteDraft, PinState},
    },
};

#[derive(Clone)]
pub struct CustomerExtrasApi {
    client: ApiClient,
}

impl CustomerExtrasApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    // =========================================================================
    //  NOTAS
    // =========================================================================

    pub async fn list_notes(&self, customer_id: &RecordId) -> Result<Vec<Note>, AppError> {
        self.client.get(&format!("/notes/customer/{customer_id}")).await
    }

    pub async fn create_note(&self, draft: &NoteDraft) -> Result<Note, AppError> {
        self.client.post("/notes", draft).await
    }

    pub async fn delete_note(&self, note_id: &RecordId) -> Result<(), AppError> {
        self.client.delete(&format!("/notes/{note_id}")).await
    }

    pub async fn toggle_pin(&self, note_id: &RecordId) -> Result<PinState, AppError> {
        self.client.put_empty(&format!("/notes/{note_id}/pin")).await
    }

    // =========================================================================
    //  INTERAÇÕES
    // =========================================================================

    pub async fn list_interactions(&self, customer_id: &RecordId) -> Result<Vec<Interaction>, AppError> {
        self.client.get(&format!("/interactions/customer/{customer_id}")).await
    }

    pub async fn create_interaction(&self, draft: &InteractionDraft) -> Result<Interaction, AppError> {
        self.client.post("/interactions", draft).await
    }

    pub async fn delete_interaction(&self, interaction_id: &RecordId) -> Result<(), AppError> {
        self.client.delete(&format!("/interactions/{interaction_id}")).await
    }

    // =========================================================================
    //  ANEXOS
    // =========================================================================

    pub async fn list_attachments(&self, customer_id: &RecordId) -> Result<Vec<Attachment>, AppError> {
        self.client.get(&format!("/attachments/customer/{customer_id}")).await
    }

    /// Upload multipart no campo `file`.
    pub async fn upload_attachment(
        &self,
        customer_id: &RecordId,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Attachment, AppError> {
        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(content_type)?;
        let form = Form::new().part("file", part);

        self.client
            .post_multipart(&format!("/attachments/upload/{customer_id}"), form)
            .await
    }

    pub async fn delete_attachment(&self, attachment_id: &RecordId) -> Result<(), AppError> {
        self.client.delete(&format!("/attachments/{attachment_id}")).await
    }
}
