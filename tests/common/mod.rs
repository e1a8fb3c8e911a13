// Backend falso em memória com as rotas que o cliente usa, servido com axum
// numa porta efêmera. Cada requisição é contada por "MÉTODO /caminho".
#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
};
use serde_json::{Value, json};

use crm_client::{
    config::{AppState, ClientConfig},
    ui::Interaction,
};

pub const STAGES: [(&str, &str); 5] = [
    ("Prospecção", "#6B7280"),
    ("Qualificação", "#3B82F6"),
    ("Proposta", "#F59E0B"),
    ("Negociação", "#8B5CF6"),
    ("Fechamento", "#10B981"),
];

#[derive(Debug, Clone)]
pub struct FakeDeal {
    pub id: i64,
    pub title: String,
    pub value: f64,
    pub stage: String,
    pub status: String,
    pub customer_id: i64,
}

impl FakeDeal {
    pub fn open(id: i64, title: &str, value: f64, stage: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            value,
            stage: stage.to_string(),
            status: "open".to_string(),
            customer_id: 1,
        }
    }

    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "title": self.title,
            "value": self.value,
            "stage": self.stage,
            "status": self.status,
            "customer_id": self.customer_id,
            "customer_name": "ACME",
            "probability": 50,
        })
    }
}

#[derive(Default)]
pub struct FakeState {
    pub deals: Vec<FakeDeal>,
    pub customers: Vec<Value>,
    pub created: Vec<Value>,
    pub notes: Vec<Value>,
    pub interactions: Vec<Value>,
    pub attachments: Vec<Value>,
    pub registry: HashMap<String, Value>,
    pub addresses: HashMap<String, Value>,
    pub uploads: Vec<String>,
    pub last_lose_reason: Option<String>,
    pub fail_stats: bool,
    pub fail_alerts: bool,
    pub fail_automation: bool,
    pub hits: HashMap<String, usize>,
    pub next_id: i64,
}

impl FakeState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        1000 + self.next_id
    }
}

pub type Shared = Arc<Mutex<FakeState>>;

type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

fn detail(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "detail": message })))
}

pub struct Backend {
    pub state: Shared,
    pub base_url: String,
}

impl Backend {
    pub async fn start(seed: FakeState) -> Self {
        let state: Shared = Arc::new(Mutex::new(seed));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake backend");
        let addr = listener.local_addr().expect("local addr");

        let app = router(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve fake backend");
        });

        Self {
            state,
            base_url: format!("http://{addr}/api"),
        }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(self.base_url.clone())
    }

    pub fn app_state(&self) -> AppState {
        AppState::new(self.config()).expect("app state")
    }

    /// Quantas vezes a rota foi chamada, ex.: `hits("POST /pipeline/move")`.
    pub fn hits(&self, route: &str) -> usize {
        self.state.lock().unwrap().hits.get(route).copied().unwrap_or(0)
    }

    pub fn total_hits(&self) -> usize {
        self.state.lock().unwrap().hits.values().sum()
    }

    pub fn with<T>(&self, f: impl FnOnce(&mut FakeState) -> T) -> T {
        f(&mut self.state.lock().unwrap())
    }
}

async fn count_hits(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let path = request.uri().path().trim_start_matches("/api").to_string();
    let key = format!("{} {}", request.method(), path);
    *state.lock().unwrap().hits.entry(key).or_default() += 1;
    next.run(request).await
}

fn router(state: Shared) -> Router {
    let api = Router::new()
        // pipeline
        .route("/pipeline/board", get(board))
        .route("/pipeline/metrics", get(metrics))
        .route("/pipeline/stages", get(stages))
        .route("/pipeline/move", post(move_deal))
        .route("/pipeline/deal/{id}/win", post(win_deal))
        .route("/pipeline/deal/{id}/lose", post(lose_deal))
        // dashboard
        .route("/dashboard/stats", get(dashboard_stats))
        .route("/dashboard/alerts", get(dashboard_alerts))
        .route("/automation/score-leads", post(score_leads))
        .route("/automation/convert-hot-leads", post(score_leads))
        .route("/automation/inactive-customer-alert", post(score_leads))
        .route("/automation/contract-renewal-reminder", post(score_leads))
        // consultas
        .route("/cnpj/{digits}", get(cnpj))
        .route("/cep/{digits}", get(cep))
        // clientes
        .route("/customers", get(list_customers).post(create_customer))
        .route(
            "/customers/{id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        .route("/notes/customer/{id}", get(list_notes))
        .route("/notes", post(create_note))
        .route("/notes/{id}", axum::routing::delete(delete_note))
        .route("/notes/{id}/pin", put(pin_note))
        .route("/interactions/customer/{id}", get(list_interactions))
        .route("/interactions", post(create_interaction))
        .route("/attachments/customer/{id}", get(list_attachments))
        .route("/attachments/upload/{id}", post(upload_attachment))
        // deals e contatos
        .route("/deals", get(list_deals))
        .route("/deals/{id}", axum::routing::delete(delete_deal))
        .route("/contacts", post(create_contact))
        // lenta, para o timeout
        .route("/slow", get(slow));

    Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(state.clone(), count_hits))
        .with_state(state)
}

// --- pipeline ---

async fn board(State(state): State<Shared>) -> Json<Value> {
    let st = state.lock().unwrap();
    let stages: Vec<Value> = STAGES
        .iter()
        .enumerate()
        .map(|(i, (name, color))| {
            let deals: Vec<&FakeDeal> = st
                .deals
                .iter()
                .filter(|d| d.status == "open" && d.stage == *name)
                .collect();
            let total: f64 = deals.iter().map(|d| d.value).sum();
            json!({
                "stage": name,
                "order": i + 1,
                "color": color,
                "count": deals.len(),
                "total_value": total,
                "deals": deals.iter().map(|d| d.to_json()).collect::<Vec<_>>(),
            })
        })
        .collect();

    let open: Vec<&FakeDeal> = st.deals.iter().filter(|d| d.status == "open").collect();
    Json(json!({
        "stages": stages,
        "summary": {
            "total_deals": open.len(),
            "total_value": open.iter().map(|d| d.value).sum::<f64>(),
        }
    }))
}

async fn metrics(State(state): State<Shared>) -> Json<Value> {
    let st = state.lock().unwrap();
    let won: Vec<&FakeDeal> = st.deals.iter().filter(|d| d.status == "won").collect();
    let lost = st.deals.iter().filter(|d| d.status == "lost").count();
    let closed = won.len() + lost;
    let win_rate = if closed > 0 { won.len() as f64 / closed as f64 * 100.0 } else { 0.0 };
    Json(json!({
        "conversion_rates": [],
        "avg_time_by_stage": [],
        "win_rate": win_rate,
        "avg_deal_value": 0,
        "total_won_value": won.iter().map(|d| d.value).sum::<f64>(),
        "total_closed_deals": closed,
        "total_won_deals": won.len(),
    }))
}

async fn stages() -> Json<Value> {
    let stages: Vec<Value> = STAGES
        .iter()
        .enumerate()
        .map(|(i, (name, color))| json!({ "name": name, "order": i + 1, "color": color }))
        .collect();
    Json(json!({ "stages": stages }))
}

async fn move_deal(State(state): State<Shared>, Json(body): Json<Value>) -> ApiResult {
    let mut st = state.lock().unwrap();
    let new_stage = body["new_stage"].as_str().unwrap_or_default().to_string();
    if !STAGES.iter().any(|(name, _)| *name == new_stage) {
        return Err(detail(StatusCode::BAD_REQUEST, "Estágio inválido"));
    }
    let id = body["deal_id"].as_i64().unwrap_or_default();
    let deal = st
        .deals
        .iter_mut()
        .find(|d| d.id == id)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Deal não encontrado"))?;
    deal.stage = new_stage.clone();
    Ok(Json(json!({ "message": "Deal movido com sucesso", "new_stage": new_stage })))
}

async fn win_deal(State(state): State<Shared>, Path(id): Path<i64>) -> ApiResult {
    let mut st = state.lock().unwrap();
    let deal = st
        .deals
        .iter_mut()
        .find(|d| d.id == id)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Deal não encontrado"))?;
    deal.status = "won".to_string();
    deal.stage = "Fechamento".to_string();
    Ok(Json(json!({ "message": "Deal marcado como ganho!", "value": deal.value })))
}

async fn lose_deal(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult {
    let mut st = state.lock().unwrap();
    let reason = query.get("reason").cloned().unwrap_or_default();
    let deal = st
        .deals
        .iter_mut()
        .find(|d| d.id == id)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Deal não encontrado"))?;
    deal.status = "lost".to_string();
    st.last_lose_reason = Some(reason.clone());
    Ok(Json(json!({ "message": "Deal marcado como perdido", "reason": reason })))
}

// --- dashboard ---

async fn dashboard_stats(State(state): State<Shared>) -> ApiResult {
    let st = state.lock().unwrap();
    if st.fail_stats {
        return Err(detail(StatusCode::INTERNAL_SERVER_ERROR, "Falha ao calcular estatísticas"));
    }
    let count = |status: &str| st.deals.iter().filter(|d| d.status == status).count();
    let open_value: f64 = st.deals.iter().filter(|d| d.status == "open").map(|d| d.value).sum();
    Ok(Json(json!({
        "customers": { "total": st.customers.len(), "leads": st.customers.len() },
        "deals": {
            "total": st.deals.len(),
            "open": count("open"),
            "won": count("won"),
            "lost": count("lost"),
            "total_open_value": open_value,
            "won_this_month": 0,
        },
        "activities": { "pending": 2 },
        "interactions": { "this_week": 1 },
        "top_customers": [],
    })))
}

async fn dashboard_alerts(State(state): State<Shared>) -> ApiResult {
    if state.lock().unwrap().fail_alerts {
        return Err(detail(StatusCode::INTERNAL_SERVER_ERROR, "Falha ao gerar alertas"));
    }
    Ok(Json(json!({
        "total": 1,
        "alerts": [{ "type": "overdue_activity", "priority": "high", "message": "Atividade atrasada: Ligar para ACME" }],
    })))
}

async fn score_leads(State(state): State<Shared>) -> ApiResult {
    if state.lock().unwrap().fail_automation {
        return Err(detail(StatusCode::INTERNAL_SERVER_ERROR, "Automação indisponível"));
    }
    Ok(Json(json!({ "message": "Score calculado para 2 leads", "total_leads": 2 })))
}

// --- consultas ---

async fn cnpj(State(state): State<Shared>, Path(digits): Path<String>) -> ApiResult {
    let st = state.lock().unwrap();
    st.registry
        .get(&digits)
        .cloned()
        .map(Json)
        // o backend real embrulha o próprio 404 num 500
        .ok_or_else(|| {
            detail(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro ao processar dados: 404: CNPJ não encontrado",
            )
        })
}

async fn cep(State(state): State<Shared>, Path(digits): Path<String>) -> ApiResult {
    let st = state.lock().unwrap();
    st.addresses
        .get(&digits)
        .cloned()
        .map(Json)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "CEP não encontrado"))
}

// --- clientes ---

fn same_id(value: &Value, id: &str) -> bool {
    match &value["id"] {
        Value::Number(n) => n.to_string() == id,
        Value::String(s) => s == id,
        _ => false,
    }
}

async fn list_customers(State(state): State<Shared>) -> Json<Value> {
    Json(Value::Array(state.lock().unwrap().customers.clone()))
}

async fn create_customer(State(state): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    let mut st = state.lock().unwrap();
    st.created.push(body.clone());
    let mut customer = body;
    customer["id"] = json!(st.next_id());
    st.customers.push(customer.clone());
    Json(customer)
}

async fn get_customer(State(state): State<Shared>, Path(id): Path<String>) -> ApiResult {
    let st = state.lock().unwrap();
    st.customers
        .iter()
        .find(|c| same_id(c, &id))
        .cloned()
        .map(Json)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Cliente não encontrado"))
}

async fn update_customer(State(state): State<Shared>, Path(id): Path<String>, Json(body): Json<Value>) -> ApiResult {
    let mut st = state.lock().unwrap();
    let customer = st
        .customers
        .iter_mut()
        .find(|c| same_id(c, &id))
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Cliente não encontrado"))?;
    if let (Some(target), Some(fields)) = (customer.as_object_mut(), body.as_object()) {
        for (k, v) in fields {
            target.insert(k.clone(), v.clone());
        }
    }
    Ok(Json(customer.clone()))
}

async fn delete_customer(State(state): State<Shared>, Path(id): Path<String>) -> Json<Value> {
    state.lock().unwrap().customers.retain(|c| !same_id(c, &id));
    Json(json!({ "message": "Cliente deletado com sucesso" }))
}

fn children_of(items: &[Value], customer_id: &str) -> Value {
    Value::Array(
        items
            .iter()
            .filter(|v| v["customer_id"].to_string().trim_matches('"') == customer_id)
            .cloned()
            .collect(),
    )
}

async fn list_notes(State(state): State<Shared>, Path(id): Path<String>) -> Json<Value> {
    Json(children_of(&state.lock().unwrap().notes, &id))
}

async fn create_note(State(state): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    let mut st = state.lock().unwrap();
    let mut note = body;
    note["id"] = json!(st.next_id());
    note["pinned"] = json!(false);
    st.notes.push(note.clone());
    Json(note)
}

async fn delete_note(State(state): State<Shared>, Path(id): Path<String>) -> Json<Value> {
    state.lock().unwrap().notes.retain(|n| !same_id(n, &id));
    Json(json!({ "message": "Nota deletada" }))
}

async fn pin_note(State(state): State<Shared>, Path(id): Path<String>) -> ApiResult {
    let mut st = state.lock().unwrap();
    let note = st
        .notes
        .iter_mut()
        .find(|n| same_id(n, &id))
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Nota não encontrada"))?;
    let pinned = !note["pinned"].as_bool().unwrap_or(false);
    note["pinned"] = json!(pinned);
    Ok(Json(json!({ "pinned": pinned })))
}

async fn list_interactions(State(state): State<Shared>, Path(id): Path<String>) -> Json<Value> {
    Json(children_of(&state.lock().unwrap().interactions, &id))
}

async fn create_interaction(State(state): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    let mut st = state.lock().unwrap();
    let mut interaction = body;
    interaction["id"] = json!(st.next_id());
    st.interactions.push(interaction.clone());
    Json(interaction)
}

async fn list_attachments(State(state): State<Shared>, Path(id): Path<String>) -> Json<Value> {
    Json(children_of(&state.lock().unwrap().attachments, &id))
}

// Sem extrator multipart: basta conferir o content-type e o campo `file`.
async fn upload_attachment(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if !content_type.starts_with("multipart/form-data") {
        return Err(detail(StatusCode::UNPROCESSABLE_ENTITY, "Esperado multipart"));
    }
    let text = String::from_utf8_lossy(&body).to_string();
    if !text.contains("name=\"file\"") {
        return Err(detail(StatusCode::UNPROCESSABLE_ENTITY, "Campo file ausente"));
    }

    let mut st = state.lock().unwrap();
    st.uploads.push(text);
    let attachment = json!({
        "id": st.next_id(),
        "customer_id": id,
        "filename": "contrato.txt",
        "file_type": "text/plain",
        "file_size": body.len(),
    });
    st.attachments.push(attachment.clone());
    Ok(Json(attachment))
}

// --- deals e contatos ---

async fn list_deals(State(state): State<Shared>) -> Json<Value> {
    Json(Value::Array(state.lock().unwrap().deals.iter().map(FakeDeal::to_json).collect()))
}

async fn delete_deal(State(state): State<Shared>, Path(id): Path<i64>) -> Json<Value> {
    state.lock().unwrap().deals.retain(|d| d.id != id);
    Json(json!({ "message": "Deal deletado" }))
}

async fn create_contact(State(state): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    let mut st = state.lock().unwrap();
    let mut contact = body;
    contact["id"] = json!(st.next_id());
    Json(contact)
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(2)).await;
    Json(json!({ "ok": true }))
}

// --- diálogos roteirizados ---

/// Responde confirmações com `confirm_answer` e perguntas na ordem de `answers`.
/// Tudo que foi exibido fica registrado.
#[derive(Default)]
pub struct ScriptedInteraction {
    pub confirm_answer: bool,
    answers: Mutex<VecDeque<Option<String>>>,
    alerts: Mutex<Vec<String>>,
    questions: Mutex<Vec<String>>,
}

impl ScriptedInteraction {
    pub fn accepting() -> Self {
        Self {
            confirm_answer: true,
            ..Default::default()
        }
    }

    pub fn declining() -> Self {
        Self::default()
    }

    pub fn answering(answers: &[Option<&str>]) -> Self {
        Self {
            confirm_answer: true,
            answers: Mutex::new(answers.iter().map(|&a| a.map(str::to_string)).collect()),
            ..Default::default()
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }
}

impl Interaction for ScriptedInteraction {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    fn confirm(&self, question: &str) -> bool {
        self.questions.lock().unwrap().push(question.to_string());
        self.confirm_answer
    }

    fn prompt(&self, question: &str) -> Option<String> {
        self.questions.lock().unwrap().push(question.to_string());
        self.answers.lock().unwrap().pop_front().flatten()
    }
}
