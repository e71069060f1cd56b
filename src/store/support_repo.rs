// src/store/support_repo.rs

use std::sync::{Arc, RwLock};

use crate::models::support::{Ticket, TicketKind, TicketStatus};

#[derive(Clone)]
pub struct SupportRepository {
    tickets: Arc<RwLock<Vec<Ticket>>>,
    proximo_numero: Arc<RwLock<u32>>,
}

impl SupportRepository {
    pub fn new() -> Self {
        Self {
            tickets: Arc::new(RwLock::new(seed_tickets())),
            proximo_numero: Arc::new(RwLock::new(1002)),
        }
    }

    pub fn listar(&self) -> Vec<Ticket> {
        self.tickets.read().expect("lock de tickets envenenado").clone()
    }

    pub fn abrir(&self, kind: TicketKind, loja_id: Option<String>, hoje: String) -> Ticket {
        let numero = {
            let mut guard = self.proximo_numero.write().expect("lock de numerador envenenado");
            let n = *guard;
            *guard += 1;
            n
        };
        let ticket = Ticket {
            id: format!("TCK-{numero}"),
            kind,
            status: TicketStatus::Open,
            updated_at: hoje,
            loja_id,
        };
        self.tickets
            .write()
            .expect("lock de tickets envenenado")
            .insert(0, ticket.clone());
        ticket
    }
}

fn seed_tickets() -> Vec<Ticket> {
    vec![Ticket {
        id: "TCK-1001".into(),
        kind: TicketKind::Atraso,
        status: TicketStatus::Open,
        updated_at: "2025-09-01".into(),
        loja_id: Some("loja1".into()),
    }]
}
