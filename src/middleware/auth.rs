// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::{common::error::AppError, config::AppState, models::auth::Sessao};

// O middleware em si: resolve o Bearer token para a sessão registrada e
// a injeta nos "extensions" da requisição.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    auth_header: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(TypedHeader(auth)) = auth_header else {
        return Err(AppError::TokenInvalido);
    };

    let sessao = app_state
        .auth_service
        .sessao(auth.token())
        .ok_or(AppError::TokenInvalido)?;

    request.extensions_mut().insert(sessao);
    Ok(next.run(request).await)
}

// Extrator para obter a sessão autenticada diretamente nos handlers
pub struct SessaoAtual(pub Sessao);

impl<S> FromRequestParts<S> for SessaoAtual
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Sessao>()
            .cloned()
            .map(SessaoAtual)
            .ok_or(AppError::TokenInvalido)
    }
}
