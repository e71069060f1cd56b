// src/handlers/recipients.rs

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::SessaoAtual,
    models::recipient::{AtualizarRecipientPayload, RecipientPayload, SavedRecipient},
};

#[derive(Debug, Serialize, ToSchema)]
pub struct ImportacaoResponse {
    pub importados: usize,
}

// GET /api/destinatarios
#[utoipa::path(
    get,
    path = "/api/destinatarios",
    tag = "Destinatários",
    responses((status = 200, description = "Destinatários salvos", body = Vec<SavedRecipient>)),
    security(("api_jwt" = []))
)]
pub async fn listar(
    State(app_state): State<AppState>,
    SessaoAtual(_sessao): SessaoAtual,
) -> Json<Vec<SavedRecipient>> {
    Json(app_state.recipient_service.listar())
}

// POST /api/destinatarios
#[utoipa::path(
    post,
    path = "/api/destinatarios",
    tag = "Destinatários",
    request_body = RecipientPayload,
    responses((status = 201, description = "Destinatário adicionado", body = SavedRecipient)),
    security(("api_jwt" = []))
)]
pub async fn criar(
    State(app_state): State<AppState>,
    SessaoAtual(_sessao): SessaoAtual,
    Json(payload): Json<RecipientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let registro = app_state.recipient_service.adicionar(payload);
    Ok((StatusCode::CREATED, Json(registro)))
}

// PUT /api/destinatarios/{id}
#[utoipa::path(
    put,
    path = "/api/destinatarios/{id}",
    tag = "Destinatários",
    params(("id" = String, Path, description = "Id do destinatário")),
    request_body = AtualizarRecipientPayload,
    responses(
        (status = 200, description = "Destinatário atualizado", body = SavedRecipient),
        (status = 404, description = "Id desconhecido")
    ),
    security(("api_jwt" = []))
)]
pub async fn atualizar(
    State(app_state): State<AppState>,
    SessaoAtual(_sessao): SessaoAtual,
    Path(id): Path<String>,
    Json(payload): Json<AtualizarRecipientPayload>,
) -> Result<Json<SavedRecipient>, AppError> {
    Ok(Json(app_state.recipient_service.atualizar(&id, payload)?))
}

// DELETE /api/destinatarios/{id}
#[utoipa::path(
    delete,
    path = "/api/destinatarios/{id}",
    tag = "Destinatários",
    params(("id" = String, Path, description = "Id do destinatário")),
    responses(
        (status = 204, description = "Destinatário removido"),
        (status = 404, description = "Id desconhecido")
    ),
    security(("api_jwt" = []))
)]
pub async fn remover(
    State(app_state): State<AppState>,
    SessaoAtual(_sessao): SessaoAtual,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    app_state.recipient_service.remover(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/destinatarios/importar — corpo é o CSV inteiro
#[utoipa::path(
    post,
    path = "/api/destinatarios/importar",
    tag = "Destinatários",
    request_body(content = String, content_type = "text/csv"),
    responses(
        (status = 200, description = "Quantidade importada", body = ImportacaoResponse),
        (status = 400, description = "CSV inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn importar(
    State(app_state): State<AppState>,
    SessaoAtual(_sessao): SessaoAtual,
    corpo: String,
) -> Result<Json<ImportacaoResponse>, AppError> {
    let importados = app_state.recipient_service.importar_csv(&corpo)?;
    Ok(Json(ImportacaoResponse { importados }))
}

// GET /api/destinatarios/exportar
#[utoipa::path(
    get,
    path = "/api/destinatarios/exportar",
    tag = "Destinatários",
    responses((status = 200, description = "CSV dos destinatários", body = String, content_type = "text/csv")),
    security(("api_jwt" = []))
)]
pub async fn exportar(
    State(app_state): State<AppState>,
    SessaoAtual(_sessao): SessaoAtual,
) -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"destinatarios.csv\"",
            ),
        ],
        app_state.recipient_service.exportar_csv(None),
    )
}
