// src/handlers/dashboard.rs

use axum::{extract::State, Json};
use chrono::Utc;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{auth::SessaoAtual, scope::SelecaoLojaQuery},
    models::dashboard::{
        DashboardSummary, EnviosDiaEntry, EventoRecente, FinanceiroDiaEntry, ResumoFinanceiro,
        StatusDistEntry, TopDestinoEntry,
    },
    services::scope::{resolver_escopo, Escopo},
};

fn escopo_da(sessao: &crate::models::auth::Sessao, selecao: &SelecaoLojaQuery) -> Escopo {
    resolver_escopo(sessao.papel, &selecao.0, sessao.loja_atual_id.as_deref())
}

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    params(("loja" = Option<String>, Query, description = "Id da loja ou 'todas'")),
    responses((status = 200, description = "Resumo da visão atual", body = DashboardSummary)),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    SessaoAtual(sessao): SessaoAtual,
    selecao: SelecaoLojaQuery,
) -> Result<Json<DashboardSummary>, AppError> {
    let escopo = escopo_da(&sessao, &selecao);
    let metricas = app_state.dashboard_service.escolher_metricas(
        sessao.papel,
        &escopo,
        sessao.loja_atual_id.as_deref(),
    );
    Ok(Json(metricas))
}

// GET /api/dashboard/envios-por-dia
#[utoipa::path(
    get,
    path = "/api/dashboard/envios-por-dia",
    tag = "Dashboard",
    params(("loja" = Option<String>, Query, description = "Id da loja ou 'todas'")),
    responses((status = 200, description = "Contagem diária de envios", body = Vec<EnviosDiaEntry>)),
    security(("api_jwt" = []))
)]
pub async fn envios_por_dia(
    State(app_state): State<AppState>,
    SessaoAtual(sessao): SessaoAtual,
    selecao: SelecaoLojaQuery,
) -> Json<Vec<EnviosDiaEntry>> {
    let escopo = escopo_da(&sessao, &selecao);
    Json(app_state.dashboard_service.envios_por_dia(&escopo))
}

// GET /api/dashboard/status-distribuicao
#[utoipa::path(
    get,
    path = "/api/dashboard/status-distribuicao",
    tag = "Dashboard",
    params(("loja" = Option<String>, Query, description = "Id da loja ou 'todas'")),
    responses((status = 200, description = "Distribuição por status", body = Vec<StatusDistEntry>)),
    security(("api_jwt" = []))
)]
pub async fn status_distribuicao(
    State(app_state): State<AppState>,
    SessaoAtual(sessao): SessaoAtual,
    selecao: SelecaoLojaQuery,
) -> Json<Vec<StatusDistEntry>> {
    let escopo = escopo_da(&sessao, &selecao);
    Json(app_state.dashboard_service.distribuicao_status(&escopo))
}

// GET /api/dashboard/top-destinos
#[utoipa::path(
    get,
    path = "/api/dashboard/top-destinos",
    tag = "Dashboard",
    params(("loja" = Option<String>, Query, description = "Id da loja ou 'todas'")),
    responses((status = 200, description = "Ranking de destinos (top 5)", body = Vec<TopDestinoEntry>)),
    security(("api_jwt" = []))
)]
pub async fn top_destinos(
    State(app_state): State<AppState>,
    SessaoAtual(sessao): SessaoAtual,
    selecao: SelecaoLojaQuery,
) -> Json<Vec<TopDestinoEntry>> {
    let escopo = escopo_da(&sessao, &selecao);
    Json(app_state.dashboard_service.top_destinos(&escopo))
}

// GET /api/dashboard/eventos-recentes
#[utoipa::path(
    get,
    path = "/api/dashboard/eventos-recentes",
    tag = "Dashboard",
    responses((status = 200, description = "Últimos eventos de rastreio", body = Vec<EventoRecente>)),
    security(("api_jwt" = []))
)]
pub async fn eventos_recentes(
    State(app_state): State<AppState>,
    SessaoAtual(_sessao): SessaoAtual,
) -> Json<Vec<EventoRecente>> {
    Json(app_state.dashboard_service.eventos_recentes())
}

// GET /api/dashboard/financeiro-diario
#[utoipa::path(
    get,
    path = "/api/dashboard/financeiro-diario",
    tag = "Dashboard",
    params(("loja" = Option<String>, Query, description = "Id da loja ou 'todas'")),
    responses((status = 200, description = "Série diária de custos/receitas", body = Vec<FinanceiroDiaEntry>)),
    security(("api_jwt" = []))
)]
pub async fn financeiro_diario(
    State(app_state): State<AppState>,
    SessaoAtual(sessao): SessaoAtual,
    selecao: SelecaoLojaQuery,
) -> Json<Vec<FinanceiroDiaEntry>> {
    let escopo = escopo_da(&sessao, &selecao);
    Json(app_state.dashboard_service.financeiro_diario(&escopo))
}

// GET /api/dashboard/resumo-financeiro
#[utoipa::path(
    get,
    path = "/api/dashboard/resumo-financeiro",
    tag = "Dashboard",
    params(("loja" = Option<String>, Query, description = "Id da loja ou 'todas'")),
    responses((status = 200, description = "Card de resumo financeiro", body = ResumoFinanceiro)),
    security(("api_jwt" = []))
)]
pub async fn resumo_financeiro(
    State(app_state): State<AppState>,
    SessaoAtual(sessao): SessaoAtual,
    selecao: SelecaoLojaQuery,
) -> Json<ResumoFinanceiro> {
    let escopo = escopo_da(&sessao, &selecao);
    let mes_atual = Utc::now().format("%Y-%m").to_string();
    Json(app_state.dashboard_service.resumo_financeiro(
        sessao.papel,
        &escopo,
        sessao.loja_atual_id.as_deref(),
        &mes_atual,
    ))
}
