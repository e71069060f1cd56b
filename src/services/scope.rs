// src/services/scope.rs

use crate::models::auth::Papel;

/// O que o seletor de loja enviou: uma loja concreta ou a sentinela
/// "todas" (disponível apenas para ADMIN).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelecaoLoja {
    Todas,
    Loja(String),
}

/// O filtro de loja resolvido que toda visão aplica sobre as coleções.
/// `loja_id = None` significa visão consolidada (sem filtro).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Escopo {
    pub loja_id: Option<String>,
    pub consolidado: bool,
}

impl Escopo {
    pub fn inclui(&self, loja_id: Option<&str>) -> bool {
        match &self.loja_id {
            None => true,
            Some(escopo) => loja_id == Some(escopo.as_str()),
        }
    }
}

/// Resolve a seleção do seletor de loja para o escopo efetivo.
///
/// - ADMIN + "todas" -> sem filtro, consolidado.
/// - ADMIN + loja concreta -> aquela loja.
/// - Demais papéis -> sempre a loja atual da sessão; a sentinela não
///   existe para eles.
pub fn resolver_escopo(
    papel: Papel,
    selecao: &SelecaoLoja,
    loja_atual_id: Option<&str>,
) -> Escopo {
    match (papel, selecao) {
        (Papel::Admin, SelecaoLoja::Todas) => Escopo {
            loja_id: None,
            consolidado: true,
        },
        (Papel::Admin, SelecaoLoja::Loja(id)) => Escopo {
            loja_id: Some(id.clone()),
            consolidado: false,
        },
        _ => Escopo {
            loja_id: loja_atual_id.map(str::to_string),
            consolidado: false,
        },
    }
}

/// Filtro de escopo sobre qualquer coleção com `lojaId` opcional.
pub fn aplicar_escopo<T, F>(itens: &[T], escopo: &Escopo, loja_de: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> Option<&str>,
{
    itens
        .iter()
        .filter(|item| escopo.inclui(loja_de(item)))
        .cloned()
        .collect()
}
