// src/api/crud.rs

use std::marker::PhantomData;

use serde::{Serialize, de::DeserializeOwned};

use crate::{
    api::http::ApiClient,
    common::error::AppError,
    models::{
        RecordId,
        crm::{Contact, ContactDraft, ContactUpdate, Customer, CustomerDraft},
        sales::{Activity, ActivityDraft, ActivityUpdate, Deal, DealDraft, DealUpdate},
    },
};

/// Uma coleção REST com list/get/create/update/delete.
pub trait Resource: DeserializeOwned + Send + 'static {
    /// Caminho da coleção, relativo à URL base.
    const PATH: &'static str;
    /// Nome para mensagens ao usuário.
    const LABEL: &'static str;
    /// Pergunta feita antes de excluir.
    const DELETE_PROMPT: &'static str;

    type Draft: Serialize + Send + Sync;
    type Update: Serialize + Send + Sync;
}

impl Resource for Customer {
    const PATH: &'static str = "/customers";
    const LABEL: &'static str = "cliente";
    const DELETE_PROMPT: &'static str = "Deseja realmente deletar este cliente?";
    type Draft = CustomerDraft;
    type Update = CustomerDraft;
}

impl Resource for Deal {
    const PATH: &'static str = "/deals";
    const LABEL: &'static str = "deal";
    const DELETE_PROMPT: &'static str = "Deseja realmente deletar este negócio?";
    type Draft = DealDraft;
    type Update = DealUpdate;
}

impl Resource for Activity {
    const PATH: &'static str = "/activities";
    const LABEL: &'static str = "atividade";
    const DELETE_PROMPT: &'static str = "Deseja realmente deletar esta atividade?";
    type Draft = ActivityDraft;
    type Update = ActivityUpdate;
}

impl Resource for Contact {
    const PATH: &'static str = "/contacts";
    const LABEL: &'static str = "contato";
    const DELETE_PROMPT: &'static str = "Deseja realmente deletar este contato?";
    type Draft = ContactDraft;
    type Update = ContactUpdate;
}

pub struct CrudApi<R> {
    client: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for CrudApi<R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> CrudApi<R> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    fn item_path(id: &RecordId) -> String {
        format!("{}/{}", R::PATH, id)
    }

    pub async fn list(&self) -> Result<Vec<R>, AppError> {
        self.client.get(R::PATH).await
    }

    pub async fn get(&self, id: &RecordId) -> Result<R, AppError> {
        self.client.get(&Self::item_path(id)).await
    }

    pub async fn create(&self, draft: &R::Draft) -> Result<R, AppError> {
        self.client.post(R::PATH, draft).await
    }

    pub async fn update(&self, id: &RecordId, update: &R::Update) -> Result<R, AppError> {
        self.client.put(&Self::item_path(id), update).await
    }

    pub async fn delete(&self, id: &RecordId) -> Result<(), AppError> {
        self.client.delete(&Self::item_path(id)).await
    }
}

pub type CustomersApi = CrudApi<Customer>;
pub type DealsApi = CrudApi<Deal>;
pub type ActivitiesApi = CrudApi<Activity>;
pub type ContactsApi = CrudApi<Contact>;
