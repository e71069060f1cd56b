pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod finance;
pub mod recipient;
pub mod shipment;
pub mod simulation;
pub mod support;
