// src/models/simulation.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

// Os nomes de campo espelham o contrato que o cliente já fala:
// entrada em camelCase, opções com `preco_original`/`selo` como vieram.

pub fn validar_cep(cep: &str) -> Result<(), ValidationError> {
    if cep.len() == 8 && cep.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("cep").with_message("O CEP deve ter 8 dígitos.".into()))
    }
}

pub fn validar_positivo(valor: &Decimal) -> Result<(), ValidationError> {
    if valor.is_sign_positive() && !valor.is_zero() {
        Ok(())
    } else {
        Err(ValidationError::new("positivo").with_message("O valor deve ser maior que zero.".into()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct EnderecoSimulacao {
    #[validate(custom(function = "validar_cep"))]
    #[schema(example = "01311000")]
    pub cep: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cidade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rua: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bairro: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DimensoesPacote {
    #[validate(custom(function = "validar_positivo"))]
    #[schema(example = "30")]
    pub comprimento_cm: Decimal,
    #[validate(custom(function = "validar_positivo"))]
    pub largura_cm: Decimal,
    #[validate(custom(function = "validar_positivo"))]
    pub altura_cm: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SimulacaoInput {
    #[validate(nested)]
    pub origem: EnderecoSimulacao,
    #[validate(nested)]
    pub destino: EnderecoSimulacao,
    #[validate(custom(function = "validar_positivo"))]
    #[schema(example = "2.5")]
    pub peso_kg: Decimal,
    #[validate(nested)]
    pub dimensoes: DimensoesPacote,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valor_declarado: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Selo {
    MelhorPrazo,
    MelhorPreco,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OpcaoServicoSimulacao {
    #[schema(example = "SEDEX")]
    pub servico: String,
    #[schema(example = "correios")]
    pub transportadora: String,
    #[schema(example = "até 2 dias úteis")]
    pub prazo: String,
    #[schema(example = "34.9")]
    pub preco: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preco_original: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selo: Option<Selo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SimulacaoResultado {
    pub input: SimulacaoInput,
    pub opcoes: Vec<OpcaoServicoSimulacao>,
}
