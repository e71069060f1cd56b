pub mod admin_repo;
pub mod finance_repo;
pub mod metrics_repo;
pub mod recipient_repo;
pub mod shipment_repo;
pub mod support_repo;

pub use admin_repo::AdminRepository;
pub use finance_repo::FinanceRepository;
pub use metrics_repo::MetricsRepository;
pub use recipient_repo::RecipientRepository;
pub use shipment_repo::ShipmentRepository;
pub use support_repo::SupportRepository;
