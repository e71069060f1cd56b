// src/services/dashboard_service.rs

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    models::{
        auth::Papel,
        dashboard::{
            DashboardSummary, EnviosDiaEntry, EventoRecente, FinanceiroDiaEntry, ResumoFinanceiro,
            StatusDistEntry, TopDestinoEntry,
        },
        finance::Topup,
        shipment::{Shipment, ShipmentDetail},
    },
    services::scope::{aplicar_escopo, Escopo},
    store::{FinanceRepository, MetricsRepository, ShipmentRepository},
};

#[derive(Clone)]
pub struct DashboardService {
    shipments: ShipmentRepository,
    finance: FinanceRepository,
    metrics: MetricsRepository,
    // Semente base da série financeira sintética; misturada com cada
    // bucket de data para manter a saída reprodutível
    semente_financeira: u64,
}

impl DashboardService {
    pub fn new(
        shipments: ShipmentRepository,
        finance: FinanceRepository,
        metrics: MetricsRepository,
        semente_financeira: u64,
    ) -> Self {
        Self {
            shipments,
            finance,
            metrics,
            semente_financeira,
        }
    }

    /// Seleciona o resumo: consolidado (global) para ADMIN/DONO sem
    /// filtro de loja; senão o snapshot da loja efetiva, caindo para o
    /// global quando a loja não tem entrada própria.
    pub fn escolher_metricas(
        &self,
        papel: Papel,
        escopo: &Escopo,
        loja_atual_id: Option<&str>,
    ) -> DashboardSummary {
        let gestor = matches!(papel, Papel::Admin | Papel::Dono);
        if gestor && (escopo.consolidado || escopo.loja_id.is_none()) {
            return self.metrics.global();
        }
        escopo
            .loja_id
            .as_deref()
            .or(loja_atual_id)
            .and_then(|id| self.metrics.da_loja(id))
            .unwrap_or_else(|| self.metrics.global())
    }

    pub fn envios_filtrados(&self, escopo: &Escopo) -> Vec<Shipment> {
        aplicar_escopo(&self.shipments.listar(), escopo, |s| s.loja_id.as_deref())
    }

    pub fn recargas_filtradas(&self, escopo: &Escopo) -> Vec<Topup> {
        aplicar_escopo(&self.finance.listar_topups(), escopo, |t| t.loja_id.as_deref())
    }

    pub fn envios_por_dia(&self, escopo: &Escopo) -> Vec<EnviosDiaEntry> {
        contar_por_dia(&self.envios_filtrados(escopo))
    }

    pub fn distribuicao_status(&self, escopo: &Escopo) -> Vec<StatusDistEntry> {
        distribuicao_status(&self.envios_filtrados(escopo))
    }

    pub fn top_destinos(&self, escopo: &Escopo) -> Vec<TopDestinoEntry> {
        top_destinos(&self.envios_filtrados(escopo), &self.shipments.listar_detalhes())
    }

    pub fn eventos_recentes(&self) -> Vec<EventoRecente> {
        eventos_recentes(&self.shipments.listar_detalhes())
    }

    pub fn financeiro_diario(&self, escopo: &Escopo) -> Vec<FinanceiroDiaEntry> {
        serie_financeira(&dias_distintos(&self.envios_filtrados(escopo)), self.semente_financeira)
    }

    pub fn resumo_financeiro(
        &self,
        papel: Papel,
        escopo: &Escopo,
        loja_atual_id: Option<&str>,
        mes_atual: &str,
    ) -> ResumoFinanceiro {
        let metricas = self.escolher_metricas(papel, escopo, loja_atual_id);
        ResumoFinanceiro {
            recargas_mes: recargas_no_mes(&self.recargas_filtradas(escopo), mes_atual),
            saldo: metricas.balance,
            economia: metricas.savings,
        }
    }
}

/// Datas distintas (prefixo `YYYY-MM-DD` de `createdAt`), ordenadas
/// ascendentemente.
pub fn dias_distintos(envios: &[Shipment]) -> Vec<String> {
    let mut dias: Vec<String> = envios
        .iter()
        .map(|s| s.created_at.chars().take(10).collect())
        .collect();
    dias.sort();
    dias.dedup();
    dias
}

/// Contagem de envios por dia; o eixo x usa o sufixo `MM-DD`.
pub fn contar_por_dia(envios: &[Shipment]) -> Vec<EnviosDiaEntry> {
    dias_distintos(envios)
        .into_iter()
        .map(|dia| EnviosDiaEntry {
            x: dia.chars().skip(5).collect(),
            envios: envios.iter().filter(|s| s.created_at.starts_with(&dia)).count(),
        })
        .collect()
}

/// Tally por status com rótulos localizados, na ordem de primeira
/// aparição (ordem de inserção, não alfabética).
pub fn distribuicao_status(envios: &[Shipment]) -> Vec<StatusDistEntry> {
    let mut entradas: Vec<StatusDistEntry> = Vec::new();
    for envio in envios {
        let rotulo = envio.status.rotulo_pt();
        match entradas.iter_mut().find(|e| e.name == rotulo) {
            Some(entrada) => entrada.value += 1,
            None => entradas.push(StatusDistEntry {
                name: rotulo.to_string(),
                value: 1,
            }),
        }
    }
    entradas
}

/// Ranking de destinos dos detalhes cujos envios sobreviveram ao filtro:
/// descendente por contagem, top 5, empate resolvido pela primeira
/// aparição.
pub fn top_destinos(envios: &[Shipment], detalhes: &[ShipmentDetail]) -> Vec<TopDestinoEntry> {
    let mut contagem: Vec<TopDestinoEntry> = Vec::new();
    for detalhe in detalhes {
        if !envios.iter().any(|s| s.order == detalhe.order) {
            continue;
        }
        let nome = if detalhe.destination.is_empty() {
            "—"
        } else {
            detalhe.destination.as_str()
        };
        match contagem.iter_mut().find(|e| e.nome == nome) {
            Some(entrada) => entrada.qty += 1,
            None => contagem.push(TopDestinoEntry {
                nome: nome.to_string(),
                qty: 1,
            }),
        }
    }
    // sort estável: empates mantêm a ordem de primeira aparição
    contagem.sort_by(|a, b| b.qty.cmp(&a.qty));
    contagem.truncate(5);
    contagem
}

/// Último evento de rastreio de cada detalhe, em ordem cronológica,
/// ficando com os 5 mais recentes.
pub fn eventos_recentes(detalhes: &[ShipmentDetail]) -> Vec<EventoRecente> {
    let mut eventos: Vec<EventoRecente> = detalhes
        .iter()
        .filter_map(|detalhe| {
            detalhe.tracking_events.last().map(|ev| EventoRecente {
                pedido: detalhe.order.clone(),
                status: ev.status.clone(),
                data: ev.date.clone(),
            })
        })
        .collect();
    eventos.sort_by(|a, b| a.data.cmp(&b.data));
    if eventos.len() > 5 {
        eventos.drain(..eventos.len() - 5);
    }
    eventos
}

/// Série sintética de custos/receitas por dia. Determinística: cada
/// bucket usa um StdRng semeado pela semente base misturada com a data.
/// Faixas preservadas do original: custos [50,250), receitas [100,400).
pub fn serie_financeira(dias: &[String], semente: u64) -> Vec<FinanceiroDiaEntry> {
    dias.iter()
        .map(|dia| {
            let mut hasher = DefaultHasher::new();
            dia.hash(&mut hasher);
            let mut rng = StdRng::seed_from_u64(semente ^ hasher.finish());
            FinanceiroDiaEntry {
                x: dia.chars().skip(5).collect(),
                custos: rng.gen_range(50..250),
                receitas: rng.gen_range(100..400),
            }
        })
        .collect()
}

/// Recargas cujo `date` cai no mês dado (prefixo `YYYY-MM`).
pub fn recargas_no_mes(topups: &[Topup], mes: &str) -> usize {
    topups.iter().filter(|t| t.date.starts_with(mes)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::finance::TopupStatus;
    use crate::models::shipment::{Dimensoes, StatusEnvio};

    fn envio(order: &str, status: StatusEnvio, created_at: &str, loja: &str) -> Shipment {
        Shipment {
            order: order.into(),
            status,
            value: "$1.00".into(),
            cost: "$0.50".into(),
            margin: "$0.50".into(),
            tracking: format!("BR{order}"),
            label: "/placeholder.svg".into(),
            created_at: created_at.into(),
            items: 1,
            loja_id: Some(loja.into()),
        }
    }

    fn detalhe(order: &str, destino: &str, eventos: &[(&str, &str)]) -> ShipmentDetail {
        ShipmentDetail {
            order: order.into(),
            origin: "São Paulo/SP".into(),
            destination: destino.into(),
            weight_kg: 1.0,
            dimensions_cm: Dimensoes { w: 10.0, h: 10.0, l: 10.0 },
            declared_value: "R$ 10,00".into(),
            extras: vec![],
            tracking_events: eventos
                .iter()
                .map(|(data, status)| crate::models::shipment::TrackingEvent {
                    date: (*data).into(),
                    status: (*status).into(),
                    description: None,
                    location: None,
                })
                .collect(),
        }
    }

    #[test]
    fn conta_envios_por_dia_em_ordem_ascendente() {
        let envios = vec![
            envio("#1", StatusEnvio::Delivered, "2025-09-02 10:12", "loja1"),
            envio("#2", StatusEnvio::InTransit, "2025-09-01 16:30", "loja1"),
            envio("#3", StatusEnvio::Ready, "2025-09-01 09:44", "loja1"),
        ];
        let por_dia = contar_por_dia(&envios);
        assert_eq!(
            por_dia,
            vec![
                EnviosDiaEntry { x: "09-01".into(), envios: 2 },
                EnviosDiaEntry { x: "09-02".into(), envios: 1 },
            ]
        );
    }

    #[test]
    fn distribuicao_localiza_e_preserva_ordem_de_insercao() {
        let envios = vec![
            envio("#1", StatusEnvio::Delivered, "2025-09-02 10:12", "loja1"),
            envio("#2", StatusEnvio::Delivered, "2025-09-02 11:00", "loja1"),
            envio("#3", StatusEnvio::InTransit, "2025-09-01 16:30", "loja1"),
        ];
        let dist = distribuicao_status(&envios);
        assert_eq!(
            dist,
            vec![
                StatusDistEntry { name: "Entregue".into(), value: 2 },
                StatusDistEntry { name: "Em trânsito".into(), value: 1 },
            ]
        );
    }

    #[test]
    fn ranking_de_destinos_desce_por_contagem() {
        let mut envios = Vec::new();
        let mut detalhes = Vec::new();
        let casos = [("A", 3usize), ("B", 5), ("C", 1)];
        let mut n = 0;
        for (destino, qtd) in casos {
            for _ in 0..qtd {
                n += 1;
                let order = format!("#{n}");
                envios.push(envio(&order, StatusEnvio::Delivered, "2025-09-01 10:00", "loja1"));
                detalhes.push(detalhe(&order, destino, &[("2025-09-01 10:00", "Delivered")]));
            }
        }
        let ranking = top_destinos(&envios, &detalhes);
        assert_eq!(
            ranking,
            vec![
                TopDestinoEntry { nome: "B".into(), qty: 5 },
                TopDestinoEntry { nome: "A".into(), qty: 3 },
                TopDestinoEntry { nome: "C".into(), qty: 1 },
            ]
        );
    }

    #[test]
    fn destino_em_branco_vira_travessao() {
        let envios = vec![envio("#1", StatusEnvio::Delivered, "2025-09-01 10:00", "loja1")];
        let detalhes = vec![detalhe("#1", "", &[("2025-09-01 10:00", "Delivered")])];
        assert_eq!(top_destinos(&envios, &detalhes)[0].nome, "—");
    }

    #[test]
    fn detalhe_de_envio_filtrado_fora_nao_conta() {
        let envios = vec![envio("#1", StatusEnvio::Delivered, "2025-09-01 10:00", "loja1")];
        let detalhes = vec![
            detalhe("#1", "A", &[("2025-09-01 10:00", "Delivered")]),
            detalhe("#2", "B", &[("2025-09-01 10:00", "Delivered")]),
        ];
        let ranking = top_destinos(&envios, &detalhes);
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].nome, "A");
    }

    #[test]
    fn eventos_recentes_em_ordem_cronologica_com_no_maximo_cinco() {
        let detalhes: Vec<ShipmentDetail> = (1..=7)
            .map(|n| {
                detalhe(
                    &format!("#{n}"),
                    "X",
                    &[(format!("2025-09-0{n} 10:00").as_str(), "Delivered")],
                )
            })
            .collect();
        let eventos = eventos_recentes(&detalhes);
        assert_eq!(eventos.len(), 5);
        assert_eq!(eventos.first().unwrap().data, "2025-09-03 10:00");
        assert_eq!(eventos.last().unwrap().data, "2025-09-07 10:00");
        assert!(eventos.windows(2).all(|par| par[0].data <= par[1].data));
    }

    #[test]
    fn serie_financeira_e_deterministica_e_dentro_das_faixas() {
        let dias = vec!["2025-09-01".to_string(), "2025-09-02".to_string()];
        let a = serie_financeira(&dias, 42);
        let b = serie_financeira(&dias, 42);
        assert_eq!(a, b);
        for entrada in &a {
            assert!((50..250).contains(&entrada.custos));
            assert!((100..400).contains(&entrada.receitas));
        }
        // semente diferente, série diferente
        let c = serie_financeira(&dias, 43);
        assert_ne!(a, c);
    }

    #[test]
    fn recargas_do_mes_usam_o_prefixo_da_data() {
        let topups = vec![
            Topup {
                date: "2025-09-01".into(),
                value: "$500.00".into(),
                status: TopupStatus::Paid,
                txid: "TX-1".into(),
                loja_id: None,
            },
            Topup {
                date: "2025-08-28".into(),
                value: "$200.00".into(),
                status: TopupStatus::Pending,
                txid: "TX-2".into(),
                loja_id: None,
            },
        ];
        assert_eq!(recargas_no_mes(&topups, "2025-09"), 1);
        assert_eq!(recargas_no_mes(&topups, "2025-07"), 0);
    }

    #[test]
    fn admin_consolidado_recebe_o_resumo_global() {
        let service = DashboardService::new(
            ShipmentRepository::new(),
            FinanceRepository::new(),
            MetricsRepository::new(),
            42,
        );
        let escopo = Escopo { loja_id: None, consolidado: true };
        let metricas = service.escolher_metricas(Papel::Admin, &escopo, Some("loja1"));
        assert_eq!(metricas.total, "R$ 128.420,90");
    }

    #[test]
    fn loja_sem_snapshot_cai_para_o_global() {
        let service = DashboardService::new(
            ShipmentRepository::new(),
            FinanceRepository::new(),
            MetricsRepository::new(),
            42,
        );
        let escopo = Escopo { loja_id: Some("loja99".into()), consolidado: false };
        let metricas = service.escolher_metricas(Papel::Dono, &escopo, None);
        assert_eq!(metricas.total, "R$ 128.420,90");
    }

    #[test]
    fn funcionario_recebe_o_snapshot_da_propria_loja() {
        let service = DashboardService::new(
            ShipmentRepository::new(),
            FinanceRepository::new(),
            MetricsRepository::new(),
            42,
        );
        let escopo = Escopo { loja_id: Some("loja2".into()), consolidado: false };
        let metricas = service.escolher_metricas(Papel::Funcionario, &escopo, Some("loja2"));
        assert_eq!(metricas.total, "R$ 30.000,00");
    }
}
