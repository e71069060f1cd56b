// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{
    common::error::AppError,
    models::auth::{Capacidades, Sessao},
};

/// 1. O trait que define o que é uma Capacidade
pub trait CapacidadeDef: Send + Sync + 'static {
    fn nome() -> &'static str;
    fn habilitada(capacidades: &Capacidades) -> bool;
}

/// 2. O extractor (guardião): lê a sessão injetada pelo auth_guard e
/// verifica a flag resolvida no login — nada de re-derivar papéis aqui.
pub struct RequireCapacidade<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireCapacidade<T>
where
    T: CapacidadeDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let sessao = parts
            .extensions
            .get::<Sessao>()
            .ok_or(AppError::TokenInvalido)?;

        if !T::habilitada(&sessao.capacidades) {
            return Err(AppError::SemPermissao(format!(
                "Você precisa da capacidade '{}' para realizar esta ação.",
                T::nome()
            )));
        }

        Ok(RequireCapacidade(PhantomData))
    }
}

// ---
// DEFINIÇÃO DAS CAPACIDADES (TIPOS)
// ---

pub struct CapVerFaturas;
impl CapacidadeDef for CapVerFaturas {
    fn nome() -> &'static str {
        "financeiro:faturas"
    }
    fn habilitada(capacidades: &Capacidades) -> bool {
        capacidades.ver_faturas
    }
}

pub struct CapImportarEnvios;
impl CapacidadeDef for CapImportarEnvios {
    fn nome() -> &'static str {
        "envios:importar"
    }
    fn habilitada(capacidades: &Capacidades) -> bool {
        capacidades.importar_envios
    }
}

pub struct CapGerenciarIntegracoes;
impl CapacidadeDef for CapGerenciarIntegracoes {
    fn nome() -> &'static str {
        "integracoes:gerenciar"
    }
    fn habilitada(capacidades: &Capacidades) -> bool {
        capacidades.gerenciar_integracoes
    }
}
