// src/models/auth.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// ---
// 1. Papel (a hierarquia fixa de três níveis)
// ---
// ADMIN: operador da plataforma, vê todas as lojas.
// DONO: dono de loja, gerencia os funcionários das suas lojas.
// FUNCIONARIO: funcionário, uma única loja, permissões restritas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Papel {
    Admin,
    Dono,
    Funcionario,
}

// ---
// 2. Loja (a unidade de negócio sob uma conta)
// ---
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Loja {
    #[schema(example = "loja1")]
    pub id: String,
    #[schema(example = "Loja Centro")]
    pub nome: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Usuario {
    #[schema(example = "u_1")]
    pub id: String,
    #[schema(example = "João Augusto")]
    pub name: String,
    pub email: String,
    pub papel: Papel,
}

// Flags de permissão expostas ao cliente, com as chaves que ele já conhece.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct Permissoes {
    pub financeiro_criar_recarga: bool,
}

// ---
// 3. Capacidades (resolução única por sessão)
// ---
// Calculadas uma vez no login por `capacidades_para(papel)` e consultadas
// em todo lugar; nenhum handler re-deriva uniões de papéis.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Capacidades {
    pub gerenciar_lojas: bool,
    pub gerenciar_funcionarios: bool,
    pub gerenciar_integracoes: bool,
    pub criar_recarga: bool,
    pub ver_faturas: bool,
    pub importar_envios: bool,
}

// A sessão resolvida que vive no mapa token -> sessão.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sessao {
    #[serde(skip_serializing)] // o token nunca volta no corpo
    pub token: String,
    pub usuario: Usuario,
    pub papel: Papel,
    pub lojas: Vec<Loja>,
    pub loja_atual_id: Option<String>,
    pub permissoes: Permissoes,
    pub capacidades: Capacidades,
    #[schema(example = "acc_123")]
    pub account_id: String,
    #[schema(example = "Conta Principal")]
    pub account_name: String,
}

// Dados para login. O mock aceita qualquer credencial não-vazia;
// o papel sai de palavras-chave no e-mail.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(length(min = 1, message = "O e-mail é obrigatório."))]
    #[schema(example = "dono@empresa.com.br")]
    pub email: String,
    #[validate(length(min = 1, message = "A senha é obrigatória."))]
    pub senha: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrocarLojaPayload {
    #[validate(length(min = 1, message = "O id da loja é obrigatório."))]
    #[schema(example = "loja2")]
    pub loja_id: String,
}

// Resposta de autenticação com o token e a sessão montada
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub sessao: Sessao,
}

// Resposta do refresh de sessão: sem token não há sessão, e isso não é
// um erro.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidateResponse {
    pub valida: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sessao: Option<Sessao>,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // ID do usuário
    pub exp: usize,  // Expiration time (quando o token expira)
    pub iat: usize,  // Issued At (quando o token foi criado)
    pub jti: String, // Identificador único do token (distingue sessões)
}
