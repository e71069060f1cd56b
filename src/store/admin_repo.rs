// src/store/admin_repo.rs

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use uuid::Uuid;

use crate::models::admin::{Dono, Funcionario, LojaAdmin, PermissoesFuncionario};

// Coleções administrativas: donos, lojas (visão admin) e funcionários por
// loja. Mesmas sementes que a tela de administração sempre exibiu.
#[derive(Clone)]
pub struct AdminRepository {
    donos: Arc<RwLock<Vec<Dono>>>,
    lojas: Arc<RwLock<Vec<LojaAdmin>>>,
    funcionarios_por_loja: Arc<RwLock<HashMap<String, Vec<Funcionario>>>>,
}

impl AdminRepository {
    pub fn new() -> Self {
        Self {
            donos: Arc::new(RwLock::new(seed_donos())),
            lojas: Arc::new(RwLock::new(seed_lojas())),
            funcionarios_por_loja: Arc::new(RwLock::new(seed_funcionarios())),
        }
    }

    pub fn listar_donos(&self) -> Vec<Dono> {
        self.donos.read().expect("lock de donos envenenado").clone()
    }

    pub fn listar_lojas(&self) -> Vec<LojaAdmin> {
        self.lojas.read().expect("lock de lojas envenenado").clone()
    }

    pub fn inserir_dono(&self, dono: Dono) {
        self.donos.write().expect("lock de donos envenenado").push(dono);
    }

    pub fn inserir_loja(&self, loja: LojaAdmin) {
        self.lojas.write().expect("lock de lojas envenenado").push(loja);
    }

    pub fn alternar_loja_ativa(&self, loja_id: &str) -> Option<LojaAdmin> {
        let mut guard = self.lojas.write().expect("lock de lojas envenenado");
        let loja = guard.iter_mut().find(|l| l.id == loja_id)?;
        loja.ativo = !loja.ativo;
        Some(loja.clone())
    }

    pub fn funcionarios_da_loja(&self, loja_id: &str) -> Vec<Funcionario> {
        self.funcionarios_por_loja
            .read()
            .expect("lock de funcionários envenenado")
            .get(loja_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn inserir_funcionario(&self, loja_id: &str, funcionario: Funcionario) {
        self.funcionarios_por_loja
            .write()
            .expect("lock de funcionários envenenado")
            .entry(loja_id.to_string())
            .or_default()
            .push(funcionario);
    }

    pub fn atualizar_funcionario<F>(&self, id: &str, aplicar: F) -> Option<Funcionario>
    where
        F: FnOnce(&mut Funcionario),
    {
        let mut guard = self
            .funcionarios_por_loja
            .write()
            .expect("lock de funcionários envenenado");
        let alvo = guard.values_mut().flatten().find(|f| f.id == id)?;
        aplicar(alvo);
        Some(alvo.clone())
    }
}

pub fn gen_id(prefixo: &str) -> String {
    format!("{prefixo}_{}", Uuid::new_v4())
}

fn seed_donos() -> Vec<Dono> {
    vec![
        Dono {
            id: "d1".into(),
            nome: "Ana Lima".into(),
            email: "ana@ex.com".into(),
            created_at: "2024-05-01".into(),
            ativo: true,
            loja_ids: vec!["loja1".into()],
        },
        Dono {
            id: "d2".into(),
            nome: "Carlos Souza".into(),
            email: "carlos@ex.com".into(),
            created_at: "2024-06-10".into(),
            ativo: true,
            loja_ids: vec!["loja2".into(), "loja3".into()],
        },
    ]
}

fn seed_lojas() -> Vec<LojaAdmin> {
    let nomes = [("loja1", "Loja Centro"), ("loja2", "Loja Sul"), ("loja3", "Loja Norte")];
    nomes
        .iter()
        .enumerate()
        .map(|(idx, (id, nome))| LojaAdmin {
            id: (*id).into(),
            nome: (*nome).into(),
            dono_id: Some(if idx == 0 { "d1" } else { "d2" }.into()),
            created_at: "2024-06-01".into(),
            ativo: true,
        })
        .collect()
}

fn seed_funcionarios() -> HashMap<String, Vec<Funcionario>> {
    let lojas = ["loja1", "loja2", "loja3"];
    lojas
        .iter()
        .enumerate()
        .map(|(idx, loja_id)| {
            let n = idx + 1;
            (
                loja_id.to_string(),
                vec![
                    Funcionario {
                        id: format!("{loja_id}_f1"),
                        nome: format!("Maria {n}"),
                        email: format!("maria{n}@ex.com"),
                        ativo: true,
                        permissoes: PermissoesFuncionario {
                            criar_envios: true,
                            ver_financeiro: false,
                            gerar_pix: true,
                            atender_suporte: true,
                        },
                    },
                    Funcionario {
                        id: format!("{loja_id}_f2"),
                        nome: format!("Pedro {n}"),
                        email: format!("pedro{n}@ex.com"),
                        ativo: true,
                        permissoes: PermissoesFuncionario {
                            criar_envios: true,
                            ver_financeiro: true,
                            gerar_pix: false,
                            atender_suporte: false,
                        },
                    },
                ],
            )
        })
        .collect()
}
