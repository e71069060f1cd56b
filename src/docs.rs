// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::validate,
        handlers::auth::get_me,
        handlers::auth::trocar_loja,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
        handlers::dashboard::envios_por_dia,
        handlers::dashboard::status_distribuicao,
        handlers::dashboard::top_destinos,
        handlers::dashboard::eventos_recentes,
        handlers::dashboard::financeiro_diario,
        handlers::dashboard::resumo_financeiro,

        // --- Envios ---
        handlers::shipments::listar,
        handlers::shipments::pipeline,
        handlers::shipments::detalhe,
        handlers::shipments::exportar,
        handlers::shipments::modelo,
        handlers::shipments::etiqueta,

        // --- Financeiro ---
        handlers::finance::recargas,
        handlers::finance::criar_recarga,
        handlers::finance::pix,
        handlers::finance::atualizar_pix,
        handlers::finance::transacoes,
        handlers::finance::faturas,
        handlers::finance::conciliacao,

        // --- Destinatários ---
        handlers::recipients::listar,
        handlers::recipients::criar,
        handlers::recipients::atualizar,
        handlers::recipients::remover,
        handlers::recipients::importar,
        handlers::recipients::exportar,

        // --- Simulação ---
        handlers::simulation::calcular,
        handlers::simulation::atual,
        handlers::simulation::limpar,

        // --- Suporte ---
        handlers::support::listar,
        handlers::support::abrir,

        // --- Administração ---
        handlers::admin::listar_lojas,
        handlers::admin::criar_loja,
        handlers::admin::alternar_loja,
        handlers::admin::listar_donos,
        handlers::admin::criar_dono,
        handlers::admin::listar_funcionarios,
        handlers::admin::criar_funcionario,
        handlers::admin::atualizar_funcionario,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Papel,
            models::auth::Loja,
            models::auth::Usuario,
            models::auth::Permissoes,
            models::auth::Capacidades,
            models::auth::Sessao,
            models::auth::LoginPayload,
            models::auth::TrocarLojaPayload,
            models::auth::AuthResponse,
            models::auth::ValidateResponse,

            // --- Dashboard ---
            models::dashboard::DashboardSummary,
            models::dashboard::EnviosDiaEntry,
            models::dashboard::StatusDistEntry,
            models::dashboard::TopDestinoEntry,
            models::dashboard::EventoRecente,
            models::dashboard::FinanceiroDiaEntry,
            models::dashboard::ResumoFinanceiro,

            // --- Envios ---
            models::shipment::StatusEnvio,
            models::shipment::Shipment,
            models::shipment::ShipmentDetail,
            models::shipment::TrackingEvent,
            models::shipment::Dimensoes,
            models::shipment::PipelineEnvios,

            // --- Financeiro ---
            models::finance::TopupStatus,
            models::finance::TransactionKind,
            models::finance::InvoiceStatus,
            models::finance::Topup,
            models::finance::PixData,
            models::finance::AtualizarPixPayload,
            models::finance::CriarRecargaPayload,
            models::finance::Transaction,
            models::finance::Invoice,
            models::finance::ReconciliationItem,

            // --- Destinatários ---
            models::recipient::SavedRecipient,
            models::recipient::RecipientPayload,
            models::recipient::AtualizarRecipientPayload,
            handlers::recipients::ImportacaoResponse,

            // --- Simulação ---
            models::simulation::EnderecoSimulacao,
            models::simulation::DimensoesPacote,
            models::simulation::SimulacaoInput,
            models::simulation::Selo,
            models::simulation::OpcaoServicoSimulacao,
            models::simulation::SimulacaoResultado,

            // --- Suporte ---
            models::support::TicketKind,
            models::support::TicketStatus,
            models::support::Ticket,
            models::support::AbrirTicketPayload,

            // --- Administração ---
            models::admin::Dono,
            models::admin::LojaAdmin,
            models::admin::PermissoesFuncionario,
            models::admin::Funcionario,
            models::admin::CriarLojaPayload,
            models::admin::CriarDonoPayload,
            models::admin::CriarFuncionarioPayload,
            models::admin::AtualizarFuncionarioPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e sessão"),
        (name = "Dashboard", description = "Indicadores e gráficos por escopo de loja"),
        (name = "Envios", description = "Listagem, detalhe, etiquetas e CSV de envios"),
        (name = "Financeiro", description = "Recargas PIX, transações, faturas e conciliação"),
        (name = "Destinatários", description = "Catálogo de destinatários e intercâmbio CSV"),
        (name = "Simulação", description = "Simulação de frete"),
        (name = "Suporte", description = "Tickets de suporte"),
        (name = "Administração", description = "Lojas, donos e funcionários")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
