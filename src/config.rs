// src/config.rs

use std::{env, path::PathBuf, sync::Arc, time::Duration};

use crate::{
    common::storage::{ArmazenamentoArquivo, ArmazenamentoLocal, ArmazenamentoMemoria},
    services::{
        AdminService, AuthService, DashboardService, FinanceService, RecipientService,
        ShipmentService, SimulationService,
    },
    store::{
        AdminRepository, FinanceRepository, MetricsRepository, RecipientRepository,
        ShipmentRepository, SupportRepository,
    },
};

// Latências simuladas das operações mock; os testes zeram tudo.
#[derive(Debug, Clone, Copy)]
pub struct Latencias {
    pub login: Duration,
    pub validate: Duration,
    pub simulacao: Duration,
}

impl Latencias {
    pub fn padrao() -> Self {
        Self {
            login: Duration::from_millis(600),
            validate: Duration::from_millis(500),
            simulacao: Duration::from_millis(700),
        }
    }

    pub fn nenhuma() -> Self {
        Self {
            login: Duration::ZERO,
            validate: Duration::ZERO,
            simulacao: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub porta: u16,
    pub data_dir: PathBuf,
    pub spa_dist: PathBuf,
    pub fonts_dir: PathBuf,
    pub semente_financeira: u64,
    pub latencias: Latencias,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");
        let porta = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);
        let data_dir = PathBuf::from(
            env::var("ENVIOFACIL_DATA_DIR").unwrap_or_else(|_| "./data".to_string()),
        );
        let spa_dist =
            PathBuf::from(env::var("SPA_DIST_PATH").unwrap_or_else(|_| "./dist/spa".to_string()));
        let fonts_dir =
            PathBuf::from(env::var("FONTS_DIR").unwrap_or_else(|_| "./fonts".to_string()));
        let semente_financeira = env::var("ENVIOFACIL_SEMENTE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(42);

        Ok(Self {
            jwt_secret,
            porta,
            data_dir,
            spa_dist,
            fonts_dir,
            semente_financeira,
            latencias: Latencias::padrao(),
        })
    }

    /// Configuração dos testes: sem latência artificial e sem disco.
    pub fn para_testes() -> Self {
        Self {
            jwt_secret: "segredo-de-teste".into(),
            porta: 0,
            data_dir: PathBuf::from("./data"),
            spa_dist: PathBuf::from("./dist/spa"),
            fonts_dir: PathBuf::from("./fonts"),
            semente_financeira: 42,
            latencias: Latencias::nenhuma(),
        }
    }
}

// O estado compartilhado que será acessível em toda a aplicação.
// É a raiz de composição: carrega a configuração, abre o armazenamento
// durável e monta o grafo repositórios -> serviços explicitamente —
// nada de singletons ambientes.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub auth_service: AuthService,
    pub dashboard_service: DashboardService,
    pub shipment_service: ShipmentService,
    pub finance_service: FinanceService,
    pub recipient_service: RecipientService,
    pub simulation_service: SimulationService,
    pub admin_service: AdminService,
    pub support_repo: SupportRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::from_env()?;

        let armazenamento: Arc<dyn ArmazenamentoLocal> = Arc::new(
            ArmazenamentoArquivo::abrir(config.data_dir.join("local_storage.json")).await?,
        );
        tracing::info!("✅ Armazenamento local aberto em {}", config.data_dir.display());

        Ok(Self::montar(config, armazenamento))
    }

    /// Estado de teste: armazenamento em memória, latência zero.
    pub fn para_testes() -> Self {
        Self::montar(
            Config::para_testes(),
            Arc::new(ArmazenamentoMemoria::default()),
        )
    }

    // --- Monta o grafo de dependências ---
    pub fn montar(config: Config, armazenamento: Arc<dyn ArmazenamentoLocal>) -> Self {
        let shipment_repo = ShipmentRepository::new();
        let finance_repo = FinanceRepository::new();
        let metrics_repo = MetricsRepository::new();
        let recipient_repo = RecipientRepository::new();
        let admin_repo = AdminRepository::new();
        let support_repo = SupportRepository::new();

        let auth_service = AuthService::new(
            armazenamento,
            config.jwt_secret.clone(),
            config.latencias.login,
            config.latencias.validate,
        );
        let dashboard_service = DashboardService::new(
            shipment_repo.clone(),
            finance_repo.clone(),
            metrics_repo,
            config.semente_financeira,
        );
        let shipment_service = ShipmentService::new(shipment_repo);
        let finance_service = FinanceService::new(finance_repo);
        let recipient_service = RecipientService::new(recipient_repo);
        let simulation_service = SimulationService::new(config.latencias.simulacao);
        let admin_service = AdminService::new(admin_repo);

        Self {
            config,
            auth_service,
            dashboard_service,
            shipment_service,
            finance_service,
            recipient_service,
            simulation_service,
            admin_service,
            support_repo,
        }
    }
}
