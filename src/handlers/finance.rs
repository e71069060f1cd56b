// src/handlers/finance.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::SessaoAtual,
        rbac::{CapVerFaturas, RequireCapacidade},
        scope::SelecaoLojaQuery,
    },
    models::finance::{
        AtualizarPixPayload, CriarRecargaPayload, Invoice, PixData, ReconciliationItem, Topup,
        Transaction,
    },
    services::scope::resolver_escopo,
};

// GET /api/financeiro/recargas
#[utoipa::path(
    get,
    path = "/api/financeiro/recargas",
    tag = "Financeiro",
    params(("loja" = Option<String>, Query, description = "Id da loja ou 'todas'")),
    responses((status = 200, description = "Recargas PIX no escopo", body = Vec<Topup>)),
    security(("api_jwt" = []))
)]
pub async fn recargas(
    State(app_state): State<AppState>,
    SessaoAtual(sessao): SessaoAtual,
    selecao: SelecaoLojaQuery,
) -> Json<Vec<Topup>> {
    let escopo = resolver_escopo(sessao.papel, &selecao.0, sessao.loja_atual_id.as_deref());
    Json(app_state.finance_service.recargas(&escopo))
}

// POST /api/financeiro/recargas
// A capacidade é checada no serviço: sem ela, notificação de permissão
// e nenhum estado muda.
#[utoipa::path(
    post,
    path = "/api/financeiro/recargas",
    tag = "Financeiro",
    request_body = CriarRecargaPayload,
    responses(
        (status = 201, description = "Recarga pendente criada", body = Topup),
        (status = 403, description = "Sem permissão")
    ),
    security(("api_jwt" = []))
)]
pub async fn criar_recarga(
    State(app_state): State<AppState>,
    SessaoAtual(sessao): SessaoAtual,
    Json(payload): Json<CriarRecargaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let hoje = Utc::now().format("%Y-%m-%d").to_string();
    let topup = app_state
        .finance_service
        .criar_recarga(&sessao, &payload, hoje)?;
    Ok((StatusCode::CREATED, Json(topup)))
}

// GET /api/financeiro/pix
#[utoipa::path(
    get,
    path = "/api/financeiro/pix",
    tag = "Financeiro",
    responses((status = 200, description = "Payload PIX atual", body = PixData)),
    security(("api_jwt" = []))
)]
pub async fn pix(
    State(app_state): State<AppState>,
    SessaoAtual(_sessao): SessaoAtual,
) -> Json<PixData> {
    Json(app_state.finance_service.pix())
}

// PUT /api/financeiro/pix — regenera o QR a partir do copia-e-cola
#[utoipa::path(
    put,
    path = "/api/financeiro/pix",
    tag = "Financeiro",
    request_body = AtualizarPixPayload,
    responses((status = 200, description = "Payload PIX atualizado", body = PixData)),
    security(("api_jwt" = []))
)]
pub async fn atualizar_pix(
    State(app_state): State<AppState>,
    SessaoAtual(_sessao): SessaoAtual,
    Json(payload): Json<AtualizarPixPayload>,
) -> Result<Json<PixData>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    Ok(Json(app_state.finance_service.atualizar_pix(&payload)?))
}

// GET /api/financeiro/transacoes
#[utoipa::path(
    get,
    path = "/api/financeiro/transacoes",
    tag = "Financeiro",
    params(("loja" = Option<String>, Query, description = "Id da loja ou 'todas'")),
    responses((status = 200, description = "Transações no escopo", body = Vec<Transaction>)),
    security(("api_jwt" = []))
)]
pub async fn transacoes(
    State(app_state): State<AppState>,
    SessaoAtual(sessao): SessaoAtual,
    selecao: SelecaoLojaQuery,
) -> Json<Vec<Transaction>> {
    let escopo = resolver_escopo(sessao.papel, &selecao.0, sessao.loja_atual_id.as_deref());
    Json(app_state.finance_service.transacoes(&escopo))
}

// GET /api/financeiro/faturas — aba invisível para FUNCIONARIO
#[utoipa::path(
    get,
    path = "/api/financeiro/faturas",
    tag = "Financeiro",
    responses(
        (status = 200, description = "Faturas de transportadoras", body = Vec<Invoice>),
        (status = 403, description = "Sem permissão")
    ),
    security(("api_jwt" = []))
)]
pub async fn faturas(
    State(app_state): State<AppState>,
    _guarda: RequireCapacidade<CapVerFaturas>,
) -> Json<Vec<Invoice>> {
    Json(app_state.finance_service.faturas())
}

// GET /api/financeiro/conciliacao
#[utoipa::path(
    get,
    path = "/api/financeiro/conciliacao",
    tag = "Financeiro",
    responses(
        (status = 200, description = "Itens de conciliação", body = Vec<ReconciliationItem>),
        (status = 403, description = "Sem permissão")
    ),
    security(("api_jwt" = []))
)]
pub async fn conciliacao(
    State(app_state): State<AppState>,
    _guarda: RequireCapacidade<CapVerFaturas>,
) -> Json<Vec<ReconciliationItem>> {
    Json(app_state.finance_service.conciliacao())
}
