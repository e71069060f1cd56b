// src/models/dashboard.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// 1. Resumo agregado (os cards do topo). Um global mais um por loja.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[schema(example = "R$ 128.420,90")]
    pub total: String,
    #[schema(example = "R$ 4.215,30")]
    pub savings: String,
    #[schema(example = "R$ 12.890,45")]
    pub balance: String,
    #[schema(example = "3")]
    pub discrepancies: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Setembro 2025")]
    pub month_label: Option<String>,
}

// 2. Envios por dia (eixo x = "MM-DD")
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EnviosDiaEntry {
    #[schema(example = "09-02")]
    pub x: String,
    pub envios: usize,
}

// 3. Distribuição por status (rótulos já localizados, ordem de inserção)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StatusDistEntry {
    #[schema(example = "Entregue")]
    pub name: String,
    pub value: usize,
}

// 4. Top destinos (descendente por contagem, top 5)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TopDestinoEntry {
    #[schema(example = "Rio de Janeiro/RJ")]
    pub nome: String,
    pub qty: usize,
}

// 5. Linha do tempo de eventos recentes
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EventoRecente {
    #[schema(example = "#ORD-10293")]
    pub pedido: String,
    pub status: String,
    #[schema(example = "2025-09-02 10:12")]
    pub data: String,
}

// 6. Série financeira sintética por dia (semente fixa, reprodutível)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FinanceiroDiaEntry {
    pub x: String,
    pub custos: u32,
    pub receitas: u32,
}

// 7. Card "Resumo Financeiro"
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumoFinanceiro {
    pub recargas_mes: usize,
    pub saldo: String,
    pub economia: String,
}
