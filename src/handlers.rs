pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod finance;
pub mod recipients;
pub mod shipments;
pub mod simulation;
pub mod support;
