// src/store/recipient_repo.rs

use std::sync::{Arc, RwLock};

use uuid::Uuid;

use crate::models::recipient::SavedRecipient;

/// Gera um identificador estável para destinatários.
/// UUID v4 no lugar do antigo timestamp+aleatório: serve como id externo
/// sem risco de colisão em importação em lote.
pub fn gen_id() -> String {
    format!("REC-{}", Uuid::new_v4())
}

// Destinatários salvos. Sem escopo de loja: a coleção é da conta.
#[derive(Clone)]
pub struct RecipientRepository {
    recipients: Arc<RwLock<Vec<SavedRecipient>>>,
}

impl RecipientRepository {
    pub fn new() -> Self {
        Self {
            recipients: Arc::new(RwLock::new(seed_recipients())),
        }
    }

    pub fn listar(&self) -> Vec<SavedRecipient> {
        self.recipients
            .read()
            .expect("lock de destinatários envenenado")
            .clone()
    }

    /// Insere no início da coleção (mais recente primeiro).
    pub fn inserir_no_inicio(&self, recipient: SavedRecipient) {
        self.recipients
            .write()
            .expect("lock de destinatários envenenado")
            .insert(0, recipient);
    }

    /// Importação em lote: as linhas importadas ficam antes das existentes,
    /// preservando a ordem relativa original delas.
    pub fn inserir_lote_no_inicio(&self, novos: Vec<SavedRecipient>) {
        let mut guard = self
            .recipients
            .write()
            .expect("lock de destinatários envenenado");
        let existentes = std::mem::take(&mut *guard);
        *guard = novos.into_iter().chain(existentes).collect();
    }

    /// Mescla os campos presentes no registro com o id dado.
    /// Retorna o registro atualizado, ou None se o id não existe.
    pub fn atualizar<F>(&self, id: &str, aplicar: F) -> Option<SavedRecipient>
    where
        F: FnOnce(&mut SavedRecipient),
    {
        let mut guard = self
            .recipients
            .write()
            .expect("lock de destinatários envenenado");
        let alvo = guard.iter_mut().find(|r| r.id == id)?;
        aplicar(alvo);
        Some(alvo.clone())
    }

    /// Remove o registro; retorna se algo foi removido.
    pub fn remover(&self, id: &str) -> bool {
        let mut guard = self
            .recipients
            .write()
            .expect("lock de destinatários envenenado");
        let antes = guard.len();
        guard.retain(|r| r.id != id);
        guard.len() != antes
    }
}

fn seed_recipients() -> Vec<SavedRecipient> {
    vec![
        SavedRecipient {
            id: gen_id(),
            nome: "Maria Souza".into(),
            cpf_cnpj: "123.456.789-00".into(),
            telefone: "(11) 91234-5678".into(),
            email: Some("maria@example.com".into()),
            cep: "01311000".into(),
            rua: "Av. Paulista".into(),
            numero: "1000".into(),
            complemento: Some("Conj. 1203".into()),
            bairro: "Bela Vista".into(),
            cidade: "São Paulo".into(),
            uf: "SP".into(),
            observacoes: Some("Preferir horário comercial".into()),
            ultimo_envio: Some("2025-08-28".into()),
        },
        SavedRecipient {
            id: gen_id(),
            nome: "Loja ABC Ltda".into(),
            cpf_cnpj: "12.345.678/0001-00".into(),
            telefone: "(21) 99876-5432".into(),
            email: Some("contato@lojabc.com.br".into()),
            cep: "20040002".into(),
            rua: "Rua da Assembleia".into(),
            numero: "200".into(),
            complemento: None,
            bairro: "Centro".into(),
            cidade: "Rio de Janeiro".into(),
            uf: "RJ".into(),
            observacoes: None,
            ultimo_envio: Some("2025-08-15".into()),
        },
    ]
}
