// src/handlers/admin.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::SessaoAtual,
    models::admin::{
        AtualizarFuncionarioPayload, CriarDonoPayload, CriarFuncionarioPayload, CriarLojaPayload,
        Dono, Funcionario, LojaAdmin,
    },
};

fn hoje() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

// GET /api/admin/lojas
#[utoipa::path(
    get,
    path = "/api/admin/lojas",
    tag = "Administração",
    responses(
        (status = 200, description = "Todas as lojas da conta", body = Vec<LojaAdmin>),
        (status = 403, description = "Sem permissão")
    ),
    security(("api_jwt" = []))
)]
pub async fn listar_lojas(
    State(app_state): State<AppState>,
    SessaoAtual(sessao): SessaoAtual,
) -> Result<Json<Vec<LojaAdmin>>, AppError> {
    Ok(Json(app_state.admin_service.listar_lojas(&sessao)?))
}

// POST /api/admin/lojas
#[utoipa::path(
    post,
    path = "/api/admin/lojas",
    tag = "Administração",
    request_body = CriarLojaPayload,
    responses(
        (status = 201, description = "Loja criada", body = LojaAdmin),
        (status = 403, description = "Sem permissão")
    ),
    security(("api_jwt" = []))
)]
pub async fn criar_loja(
    State(app_state): State<AppState>,
    SessaoAtual(sessao): SessaoAtual,
    Json(payload): Json<CriarLojaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let loja = app_state.admin_service.criar_loja(&sessao, &payload, hoje())?;
    Ok((StatusCode::CREATED, Json(loja)))
}

// PUT /api/admin/lojas/{id}/ativo — alterna ativação
#[utoipa::path(
    put,
    path = "/api/admin/lojas/{id}/ativo",
    tag = "Administração",
    params(("id" = String, Path, description = "Id da loja")),
    responses(
        (status = 200, description = "Loja atualizada", body = LojaAdmin),
        (status = 404, description = "Loja desconhecida")
    ),
    security(("api_jwt" = []))
)]
pub async fn alternar_loja(
    State(app_state): State<AppState>,
    SessaoAtual(sessao): SessaoAtual,
    Path(id): Path<String>,
) -> Result<Json<LojaAdmin>, AppError> {
    Ok(Json(app_state.admin_service.alternar_loja_ativa(&sessao, &id)?))
}

// GET /api/admin/donos
#[utoipa::path(
    get,
    path = "/api/admin/donos",
    tag = "Administração",
    responses(
        (status = 200, description = "Donos cadastrados", body = Vec<Dono>),
        (status = 403, description = "Sem permissão")
    ),
    security(("api_jwt" = []))
)]
pub async fn listar_donos(
    State(app_state): State<AppState>,
    SessaoAtual(sessao): SessaoAtual,
) -> Result<Json<Vec<Dono>>, AppError> {
    Ok(Json(app_state.admin_service.listar_donos(&sessao)?))
}

// POST /api/admin/donos
#[utoipa::path(
    post,
    path = "/api/admin/donos",
    tag = "Administração",
    request_body = CriarDonoPayload,
    responses(
        (status = 201, description = "Dono criado", body = Dono),
        (status = 403, description = "Sem permissão")
    ),
    security(("api_jwt" = []))
)]
pub async fn criar_dono(
    State(app_state): State<AppState>,
    SessaoAtual(sessao): SessaoAtual,
    Json(payload): Json<CriarDonoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let dono = app_state.admin_service.criar_dono(&sessao, &payload, hoje())?;
    Ok((StatusCode::CREATED, Json(dono)))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FuncionariosQuery {
    /// Loja cujos funcionários serão listados
    pub loja: String,
}

// GET /api/admin/funcionarios?loja=
#[utoipa::path(
    get,
    path = "/api/admin/funcionarios",
    tag = "Administração",
    params(FuncionariosQuery),
    responses(
        (status = 200, description = "Funcionários da loja", body = Vec<Funcionario>),
        (status = 403, description = "Sem permissão")
    ),
    security(("api_jwt" = []))
)]
pub async fn listar_funcionarios(
    State(app_state): State<AppState>,
    SessaoAtual(sessao): SessaoAtual,
    Query(query): Query<FuncionariosQuery>,
) -> Result<Json<Vec<Funcionario>>, AppError> {
    Ok(Json(app_state.admin_service.funcionarios(&sessao, &query.loja)?))
}

// POST /api/admin/funcionarios
#[utoipa::path(
    post,
    path = "/api/admin/funcionarios",
    tag = "Administração",
    request_body = CriarFuncionarioPayload,
    responses(
        (status = 201, description = "Funcionário criado", body = Funcionario),
        (status = 403, description = "Sem permissão")
    ),
    security(("api_jwt" = []))
)]
pub async fn criar_funcionario(
    State(app_state): State<AppState>,
    SessaoAtual(sessao): SessaoAtual,
    Json(payload): Json<CriarFuncionarioPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let funcionario = app_state.admin_service.criar_funcionario(&sessao, &payload)?;
    Ok((StatusCode::CREATED, Json(funcionario)))
}

// PUT /api/admin/funcionarios/{id} — ativação e flags de permissão
#[utoipa::path(
    put,
    path = "/api/admin/funcionarios/{id}",
    tag = "Administração",
    params(("id" = String, Path, description = "Id do funcionário")),
    request_body = AtualizarFuncionarioPayload,
    responses(
        (status = 200, description = "Funcionário atualizado", body = Funcionario),
        (status = 404, description = "Funcionário desconhecido")
    ),
    security(("api_jwt" = []))
)]
pub async fn atualizar_funcionario(
    State(app_state): State<AppState>,
    SessaoAtual(sessao): SessaoAtual,
    Path(id): Path<String>,
    Json(payload): Json<AtualizarFuncionarioPayload>,
) -> Result<Json<Funcionario>, AppError> {
    Ok(Json(app_state.admin_service.atualizar_funcionario(
        &sessao, &id, &payload,
    )?))
}
