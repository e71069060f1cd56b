// src/store/metrics_repo.rs

use std::collections::HashMap;
use std::sync::Arc;

use crate::models::dashboard::DashboardSummary;

// Snapshots agregados: um resumo global (visão consolidada) mais um por
// loja. Somente leitura neste mock; Arc basta.
#[derive(Clone)]
pub struct MetricsRepository {
    global: Arc<DashboardSummary>,
    por_loja: Arc<HashMap<String, DashboardSummary>>,
}

impl MetricsRepository {
    pub fn new() -> Self {
        Self {
            global: Arc::new(seed_global()),
            por_loja: Arc::new(seed_por_loja()),
        }
    }

    pub fn global(&self) -> DashboardSummary {
        (*self.global).clone()
    }

    pub fn da_loja(&self, loja_id: &str) -> Option<DashboardSummary> {
        self.por_loja.get(loja_id).cloned()
    }
}

fn resumo(total: &str, savings: &str, balance: &str, discrepancies: &str) -> DashboardSummary {
    DashboardSummary {
        total: total.into(),
        savings: savings.into(),
        balance: balance.into(),
        discrepancies: discrepancies.into(),
        month_label: Some("Setembro 2025".into()),
    }
}

fn seed_global() -> DashboardSummary {
    resumo("R$ 128.420,90", "R$ 4.215,30", "R$ 12.890,45", "3")
}

fn seed_por_loja() -> HashMap<String, DashboardSummary> {
    HashMap::from([
        ("loja1".to_string(), resumo("R$ 80.000,00", "R$ 2.000,00", "R$ 8.000,00", "1")),
        ("loja2".to_string(), resumo("R$ 30.000,00", "R$ 1.500,00", "R$ 3.500,00", "2")),
        ("loja3".to_string(), resumo("R$ 18.420,90", "R$ 715,30", "R$ 1.390,45", "0")),
    ])
}
