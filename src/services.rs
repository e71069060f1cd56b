pub mod admin_service;
pub mod auth;
pub mod dashboard_service;
pub mod finance_service;
pub mod recipient_service;
pub mod scope;
pub mod shipment_service;
pub mod simulation_service;

pub use admin_service::AdminService;
pub use auth::AuthService;
pub use dashboard_service::DashboardService;
pub use finance_service::FinanceService;
pub use recipient_service::RecipientService;
pub use shipment_service::ShipmentService;
pub use simulation_service::SimulationService;
