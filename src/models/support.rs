// src/models/support.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum TicketKind {
    Extravio,
    Avaria,
    Atraso,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Open,
    InReview,
    Approved,
    Rejected,
    Closed,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    #[schema(example = "TCK-1001")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TicketKind,
    pub status: TicketStatus,
    #[schema(example = "2025-09-01")]
    pub updated_at: String,
    pub loja_id: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AbrirTicketPayload {
    #[serde(rename = "type")]
    pub kind: TicketKind,
    /// Quando ausente, usa a loja atual da sessão.
    pub loja_id: Option<String>,
}
