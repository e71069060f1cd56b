// src/models/shipment.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---
// 1. Status (vocabulário fechado)
// ---
// Os rótulos serializados são os mesmos que o cliente sempre exibiu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum StatusEnvio {
    Draft,
    Ready,
    #[serde(rename = "In transit")]
    InTransit,
    Delivered,
    Exception,
    #[serde(rename = "Label generated")]
    LabelGenerated,
    #[serde(rename = "Pending pickup")]
    PendingPickup,
    Cancelled,
}

impl StatusEnvio {
    /// Rótulo em inglês, como vai no CSV e no JSON.
    pub fn rotulo(&self) -> &'static str {
        match self {
            StatusEnvio::Draft => "Draft",
            StatusEnvio::Ready => "Ready",
            StatusEnvio::InTransit => "In transit",
            StatusEnvio::Delivered => "Delivered",
            StatusEnvio::Exception => "Exception",
            StatusEnvio::LabelGenerated => "Label generated",
            StatusEnvio::PendingPickup => "Pending pickup",
            StatusEnvio::Cancelled => "Cancelled",
        }
    }

    /// Tabela fixa de localização usada na distribuição por status.
    pub fn rotulo_pt(&self) -> &'static str {
        match self {
            StatusEnvio::Draft => "Rascunho",
            StatusEnvio::Ready => "Pronto",
            StatusEnvio::InTransit => "Em trânsito",
            StatusEnvio::Delivered => "Entregue",
            StatusEnvio::Exception => "Exceção",
            StatusEnvio::LabelGenerated => "Etiqueta gerada",
            StatusEnvio::PendingPickup => "Saiu para entrega",
            StatusEnvio::Cancelled => "Cancelado",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Draft" => Some(StatusEnvio::Draft),
            "Ready" => Some(StatusEnvio::Ready),
            "In transit" => Some(StatusEnvio::InTransit),
            "Delivered" => Some(StatusEnvio::Delivered),
            "Exception" => Some(StatusEnvio::Exception),
            "Label generated" => Some(StatusEnvio::LabelGenerated),
            "Pending pickup" => Some(StatusEnvio::PendingPickup),
            "Cancelled" => Some(StatusEnvio::Cancelled),
            _ => None,
        }
    }
}

// ---
// 2. Envio
// ---
// Valores monetários já formatados, como o cliente sempre recebeu.
// Imutável neste mock: não há endpoints de mutação de envio.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    #[schema(example = "#ORD-10293")]
    pub order: String,
    pub status: StatusEnvio,
    #[schema(example = "$89.90")]
    pub value: String,
    pub cost: String,
    pub margin: String,
    #[schema(example = "BR1234567890")]
    pub tracking: String,
    pub label: String,
    #[schema(example = "2025-09-02 10:12")]
    pub created_at: String,
    pub items: u32,
    pub loja_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrackingEvent {
    pub date: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Dimensoes {
    pub w: f64,
    pub h: f64,
    pub l: f64,
}

// Um-para-um com Shipment via `order`; nem todo envio tem detalhe,
// e a ausência é estado vazio, nunca erro.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentDetail {
    pub order: String,
    #[schema(example = "São Paulo/SP")]
    pub origin: String,
    #[schema(example = "Rio de Janeiro/RJ")]
    pub destination: String,
    pub weight_kg: f64,
    pub dimensions_cm: Dimensoes,
    #[schema(example = "R$ 350,00")]
    pub declared_value: String,
    pub extras: Vec<String>,
    pub tracking_events: Vec<TrackingEvent>,
}

// Filtros da listagem de envios (busca, status, período)
#[derive(Debug, Clone, Default)]
pub struct FiltroEnvios {
    pub q: Option<String>,
    pub status: Vec<StatusEnvio>,
    pub from: Option<String>,
    pub to: Option<String>,
}

// Contadores do pipeline de status exibido acima da listagem
#[derive(Debug, Serialize, ToSchema)]
pub struct PipelineEnvios {
    pub etiqueta: usize,
    pub aguardando: usize,
    pub transito: usize,
    pub saiu: usize,
    pub entregue: usize,
    pub problema: usize,
}
