// src/middleware/scope.rs

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::services::scope::SelecaoLoja;

// O nome do parâmetro de query enviado pelo seletor de loja
const PARAM_LOJA: &str = "loja";

// Extrator da seleção do seletor de loja: `?loja=<id>` ou a sentinela
// `?loja=todas`. Ausente equivale à sentinela; o resolvedor de escopo é
// quem decide o que ela significa para cada papel.
pub struct SelecaoLojaQuery(pub SelecaoLoja);

impl<S> FromRequestParts<S> for SelecaoLojaQuery
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let selecao = parts
            .uri
            .query()
            .and_then(|query| {
                query.split('&').find_map(|par| {
                    let (chave, valor) = par.split_once('=')?;
                    (chave == PARAM_LOJA && !valor.is_empty()).then(|| valor.to_string())
                })
            })
            .map(|valor| {
                if valor == "todas" {
                    SelecaoLoja::Todas
                } else {
                    SelecaoLoja::Loja(valor)
                }
            })
            .unwrap_or(SelecaoLoja::Todas);

        Ok(SelecaoLojaQuery(selecao))
    }
}
