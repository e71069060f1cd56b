// src/models/recipient.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// Destinatário salvo. A coleção não tem escopo de loja: é compartilhada
// pela conta inteira, como no cliente.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedRecipient {
    /// `REC-<uuid>`; gerado no servidor, estável como identificador externo
    #[schema(example = "REC-550e8400-e29b-41d4-a716-446655440000")]
    pub id: String,
    #[schema(example = "Maria Souza")]
    pub nome: String,
    #[schema(example = "123.456.789-00")]
    pub cpf_cnpj: String,
    #[schema(example = "(11) 91234-5678")]
    pub telefone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[schema(example = "01311000")]
    pub cep: String,
    pub rua: String,
    pub numero: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complemento: Option<String>,
    pub bairro: String,
    pub cidade: String,
    #[schema(example = "SP")]
    pub uf: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "2025-08-28")]
    pub ultimo_envio: Option<String>,
}

// Campos de criação (id e último envio são atribuídos pelo servidor)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipientPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,
    #[validate(length(min = 1, message = "O CPF/CNPJ é obrigatório."))]
    pub cpf_cnpj: String,
    #[validate(length(min = 1, message = "O telefone é obrigatório."))]
    pub telefone: String,
    pub email: Option<String>,
    #[validate(length(min = 1, message = "O CEP é obrigatório."))]
    pub cep: String,
    #[validate(length(min = 1, message = "A rua é obrigatória."))]
    pub rua: String,
    #[validate(length(min = 1, message = "O número é obrigatório."))]
    pub numero: String,
    pub complemento: Option<String>,
    #[validate(length(min = 1, message = "O bairro é obrigatório."))]
    pub bairro: String,
    #[validate(length(min = 1, message = "A cidade é obrigatória."))]
    pub cidade: String,
    #[validate(length(min = 2, max = 2, message = "A UF deve ter 2 letras."))]
    pub uf: String,
    pub observacoes: Option<String>,
}

// Atualização parcial: somente os campos presentes são mesclados.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarRecipientPayload {
    pub nome: Option<String>,
    pub cpf_cnpj: Option<String>,
    pub telefone: Option<String>,
    pub email: Option<String>,
    pub cep: Option<String>,
    pub rua: Option<String>,
    pub numero: Option<String>,
    pub complemento: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub uf: Option<String>,
    pub observacoes: Option<String>,
    pub ultimo_envio: Option<String>,
}
