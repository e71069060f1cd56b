// src/store/finance_repo.rs

use std::sync::{Arc, RwLock};

use crate::models::finance::{
    Invoice, InvoiceStatus, PixData, ReconciliationItem, Topup, TopupStatus, Transaction,
    TransactionKind,
};

// Coleções financeiras: recargas PIX, payload PIX (singleton mutável),
// transações, faturas e itens de conciliação.
#[derive(Clone)]
pub struct FinanceRepository {
    topups: Arc<RwLock<Vec<Topup>>>,
    pix: Arc<RwLock<PixData>>,
    transactions: Arc<RwLock<Vec<Transaction>>>,
    invoices: Arc<RwLock<Vec<Invoice>>>,
    reconciliation: Arc<RwLock<Vec<ReconciliationItem>>>,
}

impl FinanceRepository {
    pub fn new() -> Self {
        Self {
            topups: Arc::new(RwLock::new(seed_topups())),
            pix: Arc::new(RwLock::new(seed_pix())),
            transactions: Arc::new(RwLock::new(seed_transactions())),
            invoices: Arc::new(RwLock::new(seed_invoices())),
            reconciliation: Arc::new(RwLock::new(seed_reconciliation())),
        }
    }

    pub fn listar_topups(&self) -> Vec<Topup> {
        self.topups.read().expect("lock de recargas envenenado").clone()
    }

    pub fn inserir_topup(&self, topup: Topup) {
        // Mais recente primeiro, como a listagem do cliente
        self.topups
            .write()
            .expect("lock de recargas envenenado")
            .insert(0, topup);
    }

    pub fn pix(&self) -> PixData {
        self.pix.read().expect("lock de pix envenenado").clone()
    }

    pub fn gravar_pix(&self, dados: PixData) {
        *self.pix.write().expect("lock de pix envenenado") = dados;
    }

    pub fn listar_transactions(&self) -> Vec<Transaction> {
        self.transactions
            .read()
            .expect("lock de transações envenenado")
            .clone()
    }

    pub fn listar_invoices(&self) -> Vec<Invoice> {
        self.invoices.read().expect("lock de faturas envenenado").clone()
    }

    pub fn listar_reconciliation(&self) -> Vec<ReconciliationItem> {
        self.reconciliation
            .read()
            .expect("lock de conciliação envenenado")
            .clone()
    }
}

fn seed_topups() -> Vec<Topup> {
    vec![
        Topup {
            date: "2025-09-01".into(),
            value: "$500.00".into(),
            status: TopupStatus::Paid,
            txid: "TX-93JSD29".into(),
            loja_id: Some("loja1".into()),
        },
        Topup {
            date: "2025-08-28".into(),
            value: "$200.00".into(),
            status: TopupStatus::Pending,
            txid: "TX-92HSD11".into(),
            loja_id: Some("loja2".into()),
        },
        Topup {
            date: "2025-08-21".into(),
            value: "$100.00".into(),
            status: TopupStatus::Expired,
            txid: "TX-88GGD70".into(),
            loja_id: Some("loja3".into()),
        },
    ]
}

fn seed_pix() -> PixData {
    PixData {
        // Placeholder igual ao do cliente; substituído na primeira gravação
        // pelo PNG gerado no servidor.
        qr_image: concat!(
            "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0nMjUwJyBoZWlnaHQ9JzI1MCcgeG1sbnM9J2h0dHA6Ly93d3cudzMub3JnLzIwMDAvc3ZnJz48cmVjdCBmaWxsPSIjRTlFQkZF",
            "IiB3aWR0aD0nMjUwJyBoZWlnaHQ9JzI1MCcgcng9JzIycHgnLz48dGV4dCB4PScxMjUnIHk9JzEyNScgZmlsbD0nI0IyQjZDNScgZm9udC1mYW1pbHk9J0ludGVyJyBmb250LXNpemU9",
            "JzE0JyB0ZXh0LWFuY2hvcj0nY2VudGVyJz5RVjwvdGV4dD48L3N2Zz4=",
        )
        .into(),
        copy_paste: "00020101021226890014br.gov.bcb.pix2563qrcode.pix.example/qr1235204000053039865405100.05802BR5920ACME Logistics Ltd6009Sao Paulo62070503***6304ABCD".into(),
        expires_at: "2025-09-30 23:59".into(),
    }
}

fn seed_transactions() -> Vec<Transaction> {
    vec![
        Transaction {
            date: "2025-09-01 12:00".into(),
            kind: TransactionKind::Credit,
            reference: "Top-up TX-93JSD29".into(),
            value: "+$500.00".into(),
            balance_after: "$12,890.45".into(),
            loja_id: Some("loja1".into()),
        },
        Transaction {
            date: "2025-09-01 10:00".into(),
            kind: TransactionKind::Debit,
            reference: "Shipment #ORD-10292".into(),
            value: "-$98.00".into(),
            balance_after: "$12,390.45".into(),
            loja_id: Some("loja2".into()),
        },
    ]
}

fn seed_invoices() -> Vec<Invoice> {
    vec![
        Invoice {
            id: "INV-2025-08".into(),
            period: "Aug/2025".into(),
            total: "$2,450.00".into(),
            status: InvoiceStatus::Open,
        },
        Invoice {
            id: "INV-2025-07".into(),
            period: "Jul/2025".into(),
            total: "$2,120.00".into(),
            status: InvoiceStatus::Paid,
        },
    ]
}

fn seed_reconciliation() -> Vec<ReconciliationItem> {
    vec![
        ReconciliationItem {
            invoice_id: "INV-2025-08".into(),
            kind: "Peso auditado".into(),
            amount: "+$12.00".into(),
            notes: Some("+200g".into()),
        },
        ReconciliationItem {
            invoice_id: "INV-2025-08".into(),
            kind: "Redespacho".into(),
            amount: "$0.00".into(),
            notes: None,
        },
    ]
}
