// src/api/http.rs

use reqwest::{Client, Method, RequestBuilder, multipart::Form};
use serde::{Serialize, de::DeserializeOwned};

use crate::{common::error::AppError, config::ClientConfig};

/// Cliente HTTP da API do CRM: URL base, timeout fixo por requisição e log
/// de cada requisição/resposta.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, AppError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        tracing::info!(
            "⚡ Cliente da API configurado: {} (timeout de {}s)",
            config.api_url,
            config.timeout.as_secs_f32()
        );

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let request = self.http.get(self.url(path));
        self.send(request, Method::GET, path).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.post(self.url(path)).json(body);
        self.send(request, Method::POST, path).await
    }

    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let request = self.http.post(self.url(path));
        self.send(request, Method::POST, path).await
    }

    /// POST sem corpo, com parâmetros opcionais na query string.
    pub async fn post_query<Q, T>(&self, path: &str, query: &Q) -> Result<T, AppError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.post(self.url(path)).query(query);
        self.send(request, Method::POST, path).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.put(self.url(path)).json(body);
        self.send(request, Method::PUT, path).await
    }

    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let request = self.http.put(self.url(path));
        self.send(request, Method::PUT, path).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T, AppError> {
        let request = self.http.post(self.url(path)).multipart(form);
        self.send(request, Method::POST, path).await
    }

    /// DELETE; o corpo da resposta (se houver) é ignorado.
    pub async fn delete(&self, path: &str) -> Result<(), AppError> {
        let request = self.http.delete(self.url(path));
        self.execute(request, Method::DELETE, path).await.map(|_| ())
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        method: Method,
        path: &str,
    ) -> Result<T, AppError> {
        let body = self.execute(request, method, path).await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("❌ Resposta inválida em {}: {}", path, e);
            AppError::Decode(format!("{path}: {e}"))
        })
    }

    async fn execute(&self, request: RequestBuilder, method: Method, path: &str) -> Result<String, AppError> {
        tracing::debug!("📡 API Request: {} {}", method, path);

        let response = request.send().await.map_err(|e| {
            tracing::error!("❌ Request Error: {} {}: {}", method, path, e);
            AppError::from(e)
        })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!("❌ Response Error: {} {} -> {}", method, path, status);
            return Err(AppError::from_response(status, &body));
        }

        tracing::debug!("✅ API Response: {} {} -> {}", method, path, status);
        Ok(body)
    }
}
