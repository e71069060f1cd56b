// src/handlers/simulation.rs

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::SessaoAtual,
    models::simulation::{SimulacaoInput, SimulacaoResultado},
    services::simulation_service::aplicar_selo_melhor_preco,
};

// POST /api/simulacao/calcular
// A validação do formulário (CEPs de 8 dígitos, medidas positivas) roda
// antes de o motor ser acionado.
#[utoipa::path(
    post,
    path = "/api/simulacao/calcular",
    tag = "Simulação",
    request_body = SimulacaoInput,
    responses(
        (status = 200, description = "Opções de frete calculadas", body = SimulacaoResultado),
        (status = 400, description = "Entrada inválida")
    ),
    security(("api_jwt" = []))
)]
pub async fn calcular(
    State(app_state): State<AppState>,
    SessaoAtual(_sessao): SessaoAtual,
    Json(input): Json<SimulacaoInput>,
) -> Result<Json<SimulacaoResultado>, AppError> {
    input.validate().map_err(AppError::ValidationError)?;

    let mut resultado = app_state.simulation_service.calcular(input).await?;
    aplicar_selo_melhor_preco(&mut resultado.opcoes);
    Ok(Json(resultado))
}

// GET /api/simulacao/atual — ausência de resultado é estado vazio
#[utoipa::path(
    get,
    path = "/api/simulacao/atual",
    tag = "Simulação",
    responses((status = 200, description = "Resultado atual, ou null", body = Option<SimulacaoResultado>)),
    security(("api_jwt" = []))
)]
pub async fn atual(
    State(app_state): State<AppState>,
    SessaoAtual(_sessao): SessaoAtual,
) -> Json<Option<SimulacaoResultado>> {
    Json(app_state.simulation_service.atual())
}

// DELETE /api/simulacao/atual — usado ao sair da tela de resultados
#[utoipa::path(
    delete,
    path = "/api/simulacao/atual",
    tag = "Simulação",
    responses((status = 204, description = "Resultado limpo")),
    security(("api_jwt" = []))
)]
pub async fn limpar(
    State(app_state): State<AppState>,
    SessaoAtual(_sessao): SessaoAtual,
) -> StatusCode {
    app_state.simulation_service.limpar();
    StatusCode::NO_CONTENT
}
