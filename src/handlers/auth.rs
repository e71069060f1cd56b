// src/handlers/auth.rs

use axum::{extract::State, Json};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::SessaoAtual,
    models::auth::{AuthResponse, LoginPayload, Sessao, TrocarLojaPayload, ValidateResponse},
};

// Handler de login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Sessão criada", body = AuthResponse),
        (status = 400, description = "Campos inválidos"),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let resposta = app_state
        .auth_service
        .login(&payload.email, &payload.senha)
        .await?;
    Ok(Json(resposta))
}

// Handler de logout: encerra a sessão e remove o token persistido
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    responses((status = 204, description = "Sessão encerrada")),
    security(("api_jwt" = []))
)]
pub async fn logout(
    State(app_state): State<AppState>,
    SessaoAtual(sessao): SessaoAtual,
) -> Result<axum::http::StatusCode, AppError> {
    app_state.auth_service.logout(&sessao.token).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

// Refresh de sessão. Rota pública: sem token a resposta é "sem sessão",
// nunca um erro.
#[utoipa::path(
    get,
    path = "/api/auth/validate",
    tag = "Auth",
    responses((status = 200, description = "Estado da sessão", body = ValidateResponse))
)]
pub async fn validate(
    State(app_state): State<AppState>,
    auth_header: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<Json<ValidateResponse>, AppError> {
    let token = auth_header.as_ref().map(|TypedHeader(a)| a.token());
    let sessao = app_state.auth_service.validate(token).await?;
    Ok(Json(ValidateResponse {
        valida: sessao.is_some(),
        sessao,
    }))
}

// Handler da rota protegida /me
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    responses((status = 200, description = "Sessão atual", body = Sessao)),
    security(("api_jwt" = []))
)]
pub async fn get_me(SessaoAtual(sessao): SessaoAtual) -> Json<Sessao> {
    Json(sessao)
}

// Troca a loja atual (sem validar pertencimento, como no cliente)
#[utoipa::path(
    put,
    path = "/api/auth/loja-atual",
    tag = "Auth",
    request_body = TrocarLojaPayload,
    responses((status = 200, description = "Sessão atualizada", body = Sessao)),
    security(("api_jwt" = []))
)]
pub async fn trocar_loja(
    State(app_state): State<AppState>,
    SessaoAtual(sessao): SessaoAtual,
    Json(payload): Json<TrocarLojaPayload>,
) -> Result<Json<Sessao>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let atualizada = app_state
        .auth_service
        .set_loja_atual(&sessao.token, &payload.loja_id)
        .await?;
    Ok(Json(atualizada))
}
