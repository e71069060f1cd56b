// src/store/shipment_repo.rs

use std::sync::{Arc, RwLock};

use crate::models::shipment::{
    Dimensoes, Shipment, ShipmentDetail, StatusEnvio, TrackingEvent,
};

// O repositório de envios. Estado vive em memória de processo, com
// atualizações serializadas pelo lock (última escrita vence); some no
// reinício, como no mock original.
#[derive(Clone)]
pub struct ShipmentRepository {
    envios: Arc<RwLock<Vec<Shipment>>>,
    // Vec em vez de mapa: a ordem de iteração precisa ser determinística
    detalhes: Arc<RwLock<Vec<ShipmentDetail>>>,
}

impl ShipmentRepository {
    pub fn new() -> Self {
        Self {
            envios: Arc::new(RwLock::new(seed_envios())),
            detalhes: Arc::new(RwLock::new(seed_detalhes())),
        }
    }

    pub fn listar(&self) -> Vec<Shipment> {
        self.envios.read().expect("lock de envios envenenado").clone()
    }

    pub fn detalhe(&self, order: &str) -> Option<ShipmentDetail> {
        self.detalhes
            .read()
            .expect("lock de detalhes envenenado")
            .iter()
            .find(|d| d.order == order)
            .cloned()
    }

    pub fn listar_detalhes(&self) -> Vec<ShipmentDetail> {
        self.detalhes.read().expect("lock de detalhes envenenado").clone()
    }
}

fn seed_envios() -> Vec<Shipment> {
    vec![
        Shipment {
            order: "#ORD-10293".into(),
            status: StatusEnvio::Delivered,
            value: "$89.90".into(),
            cost: "$56.40".into(),
            margin: "$33.50".into(),
            tracking: "BR1234567890".into(),
            label: "/placeholder.svg".into(),
            created_at: "2025-09-02 10:12".into(),
            items: 3,
            loja_id: Some("loja1".into()),
        },
        Shipment {
            order: "#ORD-10292".into(),
            status: StatusEnvio::InTransit,
            value: "$145.00".into(),
            cost: "$98.00".into(),
            margin: "$47.00".into(),
            tracking: "BR1234567881".into(),
            label: "/placeholder.svg".into(),
            created_at: "2025-09-01 16:30".into(),
            items: 2,
            loja_id: Some("loja2".into()),
        },
        Shipment {
            order: "#ORD-10291".into(),
            status: StatusEnvio::LabelGenerated,
            value: "$59.99".into(),
            cost: "$38.20".into(),
            margin: "$21.79".into(),
            tracking: "BR1234567872".into(),
            label: "/placeholder.svg".into(),
            created_at: "2025-09-01 09:44".into(),
            items: 1,
            loja_id: Some("loja1".into()),
        },
        Shipment {
            order: "#ORD-10290".into(),
            status: StatusEnvio::PendingPickup,
            value: "$249.00".into(),
            cost: "$180.00".into(),
            margin: "$69.00".into(),
            tracking: "BR1234567863".into(),
            label: "/placeholder.svg".into(),
            created_at: "2025-08-31 18:02".into(),
            items: 5,
            loja_id: Some("loja3".into()),
        },
    ]
}

fn seed_detalhes() -> Vec<ShipmentDetail> {
    vec![
        ShipmentDetail {
            order: "#ORD-10293".into(),
            origin: "São Paulo/SP".into(),
            destination: "Rio de Janeiro/RJ".into(),
            weight_kg: 2.5,
            dimensions_cm: Dimensoes { w: 20.0, h: 10.0, l: 30.0 },
            declared_value: "R$ 350,00".into(),
            extras: vec!["AR".into()],
            tracking_events: vec![
                TrackingEvent {
                    date: "2025-09-02 10:12".into(),
                    status: "Delivered".into(),
                    description: Some("Objeto entregue ao destinatário".into()),
                    location: Some("Rio de Janeiro/RJ".into()),
                },
                TrackingEvent {
                    date: "2025-09-01 08:00".into(),
                    status: "Out for delivery".into(),
                    description: Some("Saiu para entrega".into()),
                    location: Some("Rio de Janeiro/RJ".into()),
                },
            ],
        },
        ShipmentDetail {
            order: "#ORD-10292".into(),
            origin: "Campinas/SP".into(),
            destination: "Belo Horizonte/MG".into(),
            weight_kg: 1.2,
            dimensions_cm: Dimensoes { w: 15.0, h: 10.0, l: 20.0 },
            declared_value: "R$ 199,90".into(),
            extras: vec!["Mão Própria".into()],
            tracking_events: vec![TrackingEvent {
                date: "2025-09-01 16:30".into(),
                status: "In transit".into(),
                description: Some("Encaminhado para unidade de distribuição".into()),
                location: Some("Campinas/SP".into()),
            }],
        },
    ]
}
