// src/models/finance.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TopupStatus {
    Paid,
    Pending,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Credit,
    Debit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    Open,
    Paid,
    Pending,
}

// --- Structs ---

// Recarga PIX; `txid` é a chave natural.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Topup {
    #[schema(example = "2025-09-01")]
    pub date: String,
    #[schema(example = "$500.00")]
    pub value: String,
    pub status: TopupStatus,
    #[schema(example = "TX-93JSD29")]
    pub txid: String,
    pub loja_id: Option<String>,
}

// O payload PIX é um singleton mutável via `setPix`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PixData {
    /// Imagem do QR como data-URI base64
    pub qr_image: String,
    pub copy_paste: String,
    #[schema(example = "2025-09-30 23:59")]
    pub expires_at: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarPixPayload {
    #[validate(length(min = 1, message = "O código copia-e-cola é obrigatório."))]
    pub copy_paste: String,
    #[validate(length(min = 1, message = "A data de expiração é obrigatória."))]
    pub expires_at: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarRecargaPayload {
    #[validate(custom(function = "crate::models::simulation::validar_positivo"))]
    #[schema(example = "250.00")]
    pub valor: Decimal,
    /// Loja de destino; quando ausente, usa a loja atual da sessão.
    pub loja_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[schema(example = "2025-09-01 12:00")]
    pub date: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[schema(example = "Top-up TX-93JSD29")]
    pub reference: String,
    #[schema(example = "+$500.00")]
    pub value: String,
    pub balance_after: String,
    pub loja_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Invoice {
    #[schema(example = "INV-2025-08")]
    pub id: String,
    #[schema(example = "Aug/2025")]
    pub period: String,
    pub total: String,
    pub status: InvoiceStatus,
}

// Muitos-para-um com Invoice via `invoiceId`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationItem {
    pub invoice_id: String,
    #[serde(rename = "type")]
    #[schema(example = "Peso auditado")]
    pub kind: String,
    #[schema(example = "+$12.00")]
    pub amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
