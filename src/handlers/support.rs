// src/handlers/support.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;

use crate::{
    config::AppState,
    middleware::{auth::SessaoAtual, scope::SelecaoLojaQuery},
    models::support::{AbrirTicketPayload, Ticket},
    services::scope::{aplicar_escopo, resolver_escopo},
};

// GET /api/suporte/tickets
#[utoipa::path(
    get,
    path = "/api/suporte/tickets",
    tag = "Suporte",
    params(("loja" = Option<String>, Query, description = "Id da loja ou 'todas'")),
    responses((status = 200, description = "Tickets no escopo", body = Vec<Ticket>)),
    security(("api_jwt" = []))
)]
pub async fn listar(
    State(app_state): State<AppState>,
    SessaoAtual(sessao): SessaoAtual,
    selecao: SelecaoLojaQuery,
) -> Json<Vec<Ticket>> {
    let escopo = resolver_escopo(sessao.papel, &selecao.0, sessao.loja_atual_id.as_deref());
    let tickets = aplicar_escopo(&app_state.support_repo.listar(), &escopo, |t| {
        t.loja_id.as_deref()
    });
    Json(tickets)
}

// POST /api/suporte/tickets
#[utoipa::path(
    post,
    path = "/api/suporte/tickets",
    tag = "Suporte",
    request_body = AbrirTicketPayload,
    responses((status = 201, description = "Ticket aberto", body = Ticket)),
    security(("api_jwt" = []))
)]
pub async fn abrir(
    State(app_state): State<AppState>,
    SessaoAtual(sessao): SessaoAtual,
    Json(payload): Json<AbrirTicketPayload>,
) -> impl IntoResponse {
    let loja_id = payload.loja_id.or_else(|| sessao.loja_atual_id.clone());
    let hoje = Utc::now().format("%Y-%m-%d").to_string();
    let ticket = app_state.support_repo.abrir(payload.kind, loja_id, hoje);
    (StatusCode::CREATED, Json(ticket))
}
