// src/services/admin_service.rs

use crate::{
    common::error::AppError,
    models::{
        admin::{
            AtualizarFuncionarioPayload, CriarDonoPayload, CriarFuncionarioPayload,
            CriarLojaPayload, Dono, Funcionario, LojaAdmin, PermissoesFuncionario,
        },
        auth::Sessao,
    },
    store::{admin_repo, AdminRepository},
};

#[derive(Clone)]
pub struct AdminService {
    repo: AdminRepository,
}

impl AdminService {
    pub fn new(repo: AdminRepository) -> Self {
        Self { repo }
    }

    // --- Lojas e donos (plataforma) ---

    pub fn listar_lojas(&self, sessao: &Sessao) -> Result<Vec<LojaAdmin>, AppError> {
        exigir(sessao.capacidades.gerenciar_lojas, "gerenciar lojas")?;
        Ok(self.repo.listar_lojas())
    }

    pub fn criar_loja(
        &self,
        sessao: &Sessao,
        payload: &CriarLojaPayload,
        hoje: String,
    ) -> Result<LojaAdmin, AppError> {
        exigir(sessao.capacidades.gerenciar_lojas, "gerenciar lojas")?;
        let loja = LojaAdmin {
            id: admin_repo::gen_id("loja"),
            nome: payload.nome.clone(),
            dono_id: payload.dono_id.clone(),
            created_at: hoje,
            ativo: true,
        };
        self.repo.inserir_loja(loja.clone());
        tracing::info!("🏬 Loja criada: {}", loja.nome);
        Ok(loja)
    }

    pub fn alternar_loja_ativa(
        &self,
        sessao: &Sessao,
        loja_id: &str,
    ) -> Result<LojaAdmin, AppError> {
        exigir(sessao.capacidades.gerenciar_lojas, "gerenciar lojas")?;
        self.repo
            .alternar_loja_ativa(loja_id)
            .ok_or_else(|| AppError::NaoEncontrado(format!("Loja {loja_id} não encontrada.")))
    }

    pub fn listar_donos(&self, sessao: &Sessao) -> Result<Vec<Dono>, AppError> {
        exigir(sessao.capacidades.gerenciar_lojas, "gerenciar lojas")?;
        Ok(self.repo.listar_donos())
    }

    pub fn criar_dono(
        &self,
        sessao: &Sessao,
        payload: &CriarDonoPayload,
        hoje: String,
    ) -> Result<Dono, AppError> {
        exigir(sessao.capacidades.gerenciar_lojas, "gerenciar lojas")?;
        let dono = Dono {
            id: admin_repo::gen_id("d"),
            nome: payload.nome.clone(),
            email: payload.email.clone(),
            created_at: hoje,
            ativo: true,
            loja_ids: payload.loja_ids.clone(),
        };
        self.repo.inserir_dono(dono.clone());
        Ok(dono)
    }

    // --- Funcionários (por loja) ---

    pub fn funcionarios(&self, sessao: &Sessao, loja_id: &str) -> Result<Vec<Funcionario>, AppError> {
        exigir(sessao.capacidades.gerenciar_funcionarios, "gerenciar funcionários")?;
        Ok(self.repo.funcionarios_da_loja(loja_id))
    }

    pub fn criar_funcionario(
        &self,
        sessao: &Sessao,
        payload: &CriarFuncionarioPayload,
    ) -> Result<Funcionario, AppError> {
        exigir(sessao.capacidades.gerenciar_funcionarios, "gerenciar funcionários")?;
        let funcionario = Funcionario {
            id: admin_repo::gen_id(&payload.loja_id),
            nome: payload.nome.clone(),
            email: payload.email.clone(),
            ativo: true,
            permissoes: PermissoesFuncionario {
                criar_envios: true,
                ver_financeiro: false,
                gerar_pix: false,
                atender_suporte: false,
            },
        };
        self.repo.inserir_funcionario(&payload.loja_id, funcionario.clone());
        Ok(funcionario)
    }

    pub fn atualizar_funcionario(
        &self,
        sessao: &Sessao,
        id: &str,
        payload: &AtualizarFuncionarioPayload,
    ) -> Result<Funcionario, AppError> {
        exigir(sessao.capacidades.gerenciar_funcionarios, "gerenciar funcionários")?;
        self.repo
            .atualizar_funcionario(id, |f| {
                if let Some(ativo) = payload.ativo {
                    f.ativo = ativo;
                }
                if let Some(permissoes) = payload.permissoes {
                    f.permissoes = permissoes;
                }
            })
            .ok_or_else(|| AppError::NaoEncontrado(format!("Funcionário {id} não encontrado.")))
    }
}

fn exigir(capacidade: bool, acao: &str) -> Result<(), AppError> {
    if capacidade {
        Ok(())
    } else {
        Err(AppError::SemPermissao(format!(
            "Você não tem permissão para {acao}."
        )))
    }
}
