// src/models/admin.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// ---
// 1. Dono (proprietário de uma ou mais lojas)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dono {
    #[schema(example = "d1")]
    pub id: String,
    #[schema(example = "Ana Lima")]
    pub nome: String,
    pub email: String,
    #[schema(example = "2024-05-01")]
    pub created_at: String,
    pub ativo: bool,
    pub loja_ids: Vec<String>,
}

// ---
// 2. Loja na visão administrativa (com vínculo de dono e flag de ativação)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LojaAdmin {
    pub id: String,
    pub nome: String,
    pub dono_id: Option<String>,
    pub created_at: String,
    pub ativo: bool,
}

// ---
// 3. Funcionário de uma loja, com flags individuais de permissão
// ---
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissoesFuncionario {
    pub criar_envios: bool,
    pub ver_financeiro: bool,
    pub gerar_pix: bool,
    pub atender_suporte: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Funcionario {
    pub id: String,
    pub nome: String,
    pub email: String,
    pub ativo: bool,
    pub permissoes: PermissoesFuncionario,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarLojaPayload {
    #[validate(length(min = 1, message = "O nome da loja é obrigatório."))]
    pub nome: String,
    pub dono_id: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarDonoPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub senha: String,
    #[serde(default)]
    pub loja_ids: Vec<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarFuncionarioPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 1, message = "O id da loja é obrigatório."))]
    pub loja_id: String,
}

// Atualização parcial: ativação e/ou flags de permissão.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarFuncionarioPayload {
    pub ativo: Option<bool>,
    pub permissoes: Option<PermissoesFuncionario>,
}
