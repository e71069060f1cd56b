// src/lib.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, services::{ServeDir, ServeFile}, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
pub mod common;
pub mod config;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod store;

pub use config::AppState;

use crate::middleware::auth::auth_guard;

/// Monta o router completo da aplicação: rotas públicas de auth, rotas
/// protegidas por domínio, Swagger em /docs e o bundle do SPA servido
/// com fallback para o index (roteamento do lado do cliente).
pub fn app(app_state: AppState) -> Router {
    // Rotas de sessão (protegidas pelo middleware)
    let sessao_routes = Router::new()
        .route("/logout", post(handlers::auth::logout))
        .route("/me", get(handlers::auth::get_me))
        .route("/loja-atual", put(handlers::auth::trocar_loja))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Rotas de autenticação: login/validate públicas (validate aceita
    // token opcional), o restante herda o guard pelo merge acima
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/validate", get(handlers::auth::validate))
        .merge(sessao_routes);

    let dashboard_routes = Router::new()
        .route("/summary", get(handlers::dashboard::get_summary))
        .route("/envios-por-dia", get(handlers::dashboard::envios_por_dia))
        .route("/status-distribuicao", get(handlers::dashboard::status_distribuicao))
        .route("/top-destinos", get(handlers::dashboard::top_destinos))
        .route("/eventos-recentes", get(handlers::dashboard::eventos_recentes))
        .route("/financeiro-diario", get(handlers::dashboard::financeiro_diario))
        .route("/resumo-financeiro", get(handlers::dashboard::resumo_financeiro))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let envios_routes = Router::new()
        .route("/", get(handlers::shipments::listar))
        .route("/pipeline", get(handlers::shipments::pipeline))
        .route("/exportar", get(handlers::shipments::exportar))
        .route("/modelo", get(handlers::shipments::modelo))
        .route("/{pedido}/detalhe", get(handlers::shipments::detalhe))
        .route("/{pedido}/etiqueta", get(handlers::shipments::etiqueta))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let financeiro_routes = Router::new()
        .route(
            "/recargas",
            get(handlers::finance::recargas).post(handlers::finance::criar_recarga),
        )
        .route(
            "/pix",
            get(handlers::finance::pix).put(handlers::finance::atualizar_pix),
        )
        .route("/transacoes", get(handlers::finance::transacoes))
        .route("/faturas", get(handlers::finance::faturas))
        .route("/conciliacao", get(handlers::finance::conciliacao))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let destinatarios_routes = Router::new()
        .route(
            "/",
            get(handlers::recipients::listar).post(handlers::recipients::criar),
        )
        .route("/importar", post(handlers::recipients::importar))
        .route("/exportar", get(handlers::recipients::exportar))
        .route(
            "/{id}",
            put(handlers::recipients::atualizar).delete(handlers::recipients::remover),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let simulacao_routes = Router::new()
        .route("/calcular", post(handlers::simulation::calcular))
        .route(
            "/atual",
            get(handlers::simulation::atual).delete(handlers::simulation::limpar),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let suporte_routes = Router::new()
        .route(
            "/tickets",
            get(handlers::support::listar).post(handlers::support::abrir),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let admin_routes = Router::new()
        .route(
            "/lojas",
            get(handlers::admin::listar_lojas).post(handlers::admin::criar_loja),
        )
        .route("/lojas/{id}/ativo", put(handlers::admin::alternar_loja))
        .route(
            "/donos",
            get(handlers::admin::listar_donos).post(handlers::admin::criar_dono),
        )
        .route(
            "/funcionarios",
            get(handlers::admin::listar_funcionarios).post(handlers::admin::criar_funcionario),
        )
        .route(
            "/funcionarios/{id}",
            put(handlers::admin::atualizar_funcionario),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // O bundle do SPA: estáticos primeiro, index.html para qualquer rota
    // que não seja /api nem /health (roteamento do cliente)
    let spa_index = app_state.config.spa_dist.join("index.html");
    let spa = ServeDir::new(&app_state.config.spa_dist)
        .not_found_service(ServeFile::new(spa_index));

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/dashboard", dashboard_routes)
        .nest("/api/envios", envios_routes)
        .nest("/api/financeiro", financeiro_routes)
        .nest("/api/destinatarios", destinatarios_routes)
        .nest("/api/simulacao", simulacao_routes)
        .nest("/api/suporte", suporte_routes)
        .nest("/api/admin", admin_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .fallback_service(spa)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
