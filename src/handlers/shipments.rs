// src/handlers/shipments.rs

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::SessaoAtual,
        rbac::{CapImportarEnvios, RequireCapacidade},
        scope::SelecaoLojaQuery,
    },
    models::shipment::{FiltroEnvios, PipelineEnvios, Shipment, ShipmentDetail, StatusEnvio},
    services::{scope::resolver_escopo, ShipmentService},
};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FiltroEnviosQuery {
    /// Busca por pedido ou código de rastreio
    pub q: Option<String>,
    /// Lista de status separada por vírgula
    pub status: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl FiltroEnviosQuery {
    fn para_filtro(&self) -> FiltroEnvios {
        FiltroEnvios {
            q: self.q.clone().filter(|q| !q.is_empty()),
            status: self
                .status
                .as_deref()
                .map(|lista| {
                    lista
                        .split(',')
                        .filter_map(|s| StatusEnvio::parse(s.trim()))
                        .collect()
                })
                .unwrap_or_default(),
            from: self.from.clone().filter(|v| !v.is_empty()),
            to: self.to.clone().filter(|v| !v.is_empty()),
        }
    }
}

// GET /api/envios
#[utoipa::path(
    get,
    path = "/api/envios",
    tag = "Envios",
    params(FiltroEnviosQuery, ("loja" = Option<String>, Query, description = "Id da loja ou 'todas'")),
    responses((status = 200, description = "Envios no escopo e filtros atuais", body = Vec<Shipment>)),
    security(("api_jwt" = []))
)]
pub async fn listar(
    State(app_state): State<AppState>,
    SessaoAtual(sessao): SessaoAtual,
    selecao: SelecaoLojaQuery,
    Query(filtros): Query<FiltroEnviosQuery>,
) -> Json<Vec<Shipment>> {
    let escopo = resolver_escopo(sessao.papel, &selecao.0, sessao.loja_atual_id.as_deref());
    Json(app_state.shipment_service.listar(&escopo, &filtros.para_filtro()))
}

// GET /api/envios/pipeline
#[utoipa::path(
    get,
    path = "/api/envios/pipeline",
    tag = "Envios",
    params(("loja" = Option<String>, Query, description = "Id da loja ou 'todas'")),
    responses((status = 200, description = "Contadores do pipeline de status", body = PipelineEnvios)),
    security(("api_jwt" = []))
)]
pub async fn pipeline(
    State(app_state): State<AppState>,
    SessaoAtual(sessao): SessaoAtual,
    selecao: SelecaoLojaQuery,
) -> Json<PipelineEnvios> {
    let escopo = resolver_escopo(sessao.papel, &selecao.0, sessao.loja_atual_id.as_deref());
    Json(app_state.shipment_service.pipeline(&escopo))
}

// GET /api/envios/{pedido}/detalhe
// Envio sem registro de detalhe responde `null` (estado vazio, não erro).
#[utoipa::path(
    get,
    path = "/api/envios/{pedido}/detalhe",
    tag = "Envios",
    params(("pedido" = String, Path, description = "Id do pedido")),
    responses((status = 200, description = "Detalhe do envio, ou null", body = Option<ShipmentDetail>)),
    security(("api_jwt" = []))
)]
pub async fn detalhe(
    State(app_state): State<AppState>,
    SessaoAtual(_sessao): SessaoAtual,
    Path(pedido): Path<String>,
) -> Json<Option<ShipmentDetail>> {
    Json(app_state.shipment_service.detalhe(&pedido))
}

// GET /api/envios/exportar
#[utoipa::path(
    get,
    path = "/api/envios/exportar",
    tag = "Envios",
    params(FiltroEnviosQuery, ("loja" = Option<String>, Query, description = "Id da loja ou 'todas'")),
    responses((status = 200, description = "CSV dos envios filtrados", body = String, content_type = "text/csv")),
    security(("api_jwt" = []))
)]
pub async fn exportar(
    State(app_state): State<AppState>,
    SessaoAtual(sessao): SessaoAtual,
    selecao: SelecaoLojaQuery,
    Query(filtros): Query<FiltroEnviosQuery>,
) -> impl IntoResponse {
    let escopo = resolver_escopo(sessao.papel, &selecao.0, sessao.loja_atual_id.as_deref());
    let envios = app_state
        .shipment_service
        .listar(&escopo, &filtros.para_filtro());
    // A coluna de loja só existe para quem enxerga mais de uma loja
    let incluir_loja = sessao.lojas.len() > 1;
    let csv = ShipmentService::exportar_csv(&envios, incluir_loja, &sessao.lojas);

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"envios.csv\"",
            ),
        ],
        csv,
    )
}

// GET /api/envios/modelo — modelo em branco da importação em lote
#[utoipa::path(
    get,
    path = "/api/envios/modelo",
    tag = "Envios",
    responses((status = 200, description = "Modelo CSV em branco", body = String, content_type = "text/csv")),
    security(("api_jwt" = []))
)]
pub async fn modelo(
    _guarda: RequireCapacidade<CapImportarEnvios>,
) -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"modelo_envios.csv\"",
            ),
        ],
        ShipmentService::modelo_importacao_csv(),
    )
}

// GET /api/envios/{pedido}/etiqueta — etiqueta em PDF
#[utoipa::path(
    get,
    path = "/api/envios/{pedido}/etiqueta",
    tag = "Envios",
    params(("pedido" = String, Path, description = "Id do pedido")),
    responses(
        (status = 200, description = "Etiqueta em PDF", body = Vec<u8>, content_type = "application/pdf"),
        (status = 404, description = "Envio não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn etiqueta(
    State(app_state): State<AppState>,
    SessaoAtual(_sessao): SessaoAtual,
    Path(pedido): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let pdf = app_state
        .shipment_service
        .etiqueta_pdf(&pedido, &app_state.config.fonts_dir)?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/pdf")],
        pdf,
    ))
}
