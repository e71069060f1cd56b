// src/services/simulation_service.rs

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    models::simulation::{OpcaoServicoSimulacao, Selo, SimulacaoInput, SimulacaoResultado},
};

// O motor de simulação de frete. Guarda o "resultado atual" que a tela
// de resultados lê; `limpar` invalida qualquer cálculo ainda em voo via
// contador de geração, então um resultado atrasado nunca sobrescreve uma
// visão que já foi embora.
#[derive(Clone)]
pub struct SimulationService {
    atual: Arc<RwLock<Option<SimulacaoResultado>>>,
    geracao: Arc<AtomicU64>,
    delay: Duration,
}

impl SimulationService {
    pub fn new(delay: Duration) -> Self {
        Self {
            atual: Arc::new(RwLock::new(None)),
            geracao: Arc::new(AtomicU64::new(0)),
            delay,
        }
    }

    pub async fn calcular(&self, input: SimulacaoInput) -> Result<SimulacaoResultado, AppError> {
        let geracao_inicial = self.geracao.load(Ordering::SeqCst);

        tokio::time::sleep(self.delay).await;

        let resultado = SimulacaoResultado {
            input,
            opcoes: opcoes_mock(),
        };

        // Publica só se ninguém limpou no meio do caminho
        if self.geracao.load(Ordering::SeqCst) == geracao_inicial {
            *self.atual.write().expect("lock de simulação envenenado") =
                Some(resultado.clone());
        } else {
            tracing::debug!("Resultado de simulação descartado (geração obsoleta)");
        }

        Ok(resultado)
    }

    /// Resultado atual, já com o selo de melhor preço inferido.
    /// Ausência é estado vazio, não erro.
    pub fn atual(&self) -> Option<SimulacaoResultado> {
        self.atual
            .read()
            .expect("lock de simulação envenenado")
            .clone()
            .map(|mut resultado| {
                aplicar_selo_melhor_preco(&mut resultado.opcoes);
                resultado
            })
    }

    pub fn limpar(&self) {
        self.geracao.fetch_add(1, Ordering::SeqCst);
        *self.atual.write().expect("lock de simulação envenenado") = None;
    }
}

/// As três opções fixas do mock de cotação.
pub fn opcoes_mock() -> Vec<OpcaoServicoSimulacao> {
    vec![
        OpcaoServicoSimulacao {
            servico: "SEDEX".into(),
            transportadora: "correios".into(),
            prazo: "até 2 dias úteis".into(),
            preco: Decimal::new(3490, 2),
            preco_original: None,
            selo: Some(Selo::MelhorPrazo),
        },
        OpcaoServicoSimulacao {
            servico: "PAC".into(),
            transportadora: "correios".into(),
            prazo: "até 6 dias úteis".into(),
            preco: Decimal::new(2250, 2),
            preco_original: Some(Decimal::new(2690, 2)),
            selo: Some(Selo::MelhorPreco),
        },
        OpcaoServicoSimulacao {
            servico: "Jadlog Express".into(),
            transportadora: "jadlog".into(),
            prazo: "até 4 dias úteis".into(),
            preco: Decimal::new(2870, 2),
            preco_original: None,
            selo: None,
        },
    ]
}

/// Inferência de selo da tela de resultados: a opção globalmente mais
/// barata (primeiro índice em caso de empate) recebe `melhor_preco`
/// quando não traz selo explícito.
pub fn aplicar_selo_melhor_preco(opcoes: &mut [OpcaoServicoSimulacao]) {
    let Some(mais_barata) = opcoes
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.preco.cmp(&b.preco))
        .map(|(idx, _)| idx)
    else {
        return;
    };
    if opcoes[mais_barata].selo.is_none() {
        opcoes[mais_barata].selo = Some(Selo::MelhorPreco);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::simulation::{DimensoesPacote, EnderecoSimulacao};

    fn input() -> SimulacaoInput {
        SimulacaoInput {
            origem: EnderecoSimulacao {
                cep: "01311000".into(),
                cidade: Some("São Paulo".into()),
                estado: Some("SP".into()),
                rua: None,
                bairro: None,
            },
            destino: EnderecoSimulacao {
                cep: "20040002".into(),
                cidade: Some("Rio de Janeiro".into()),
                estado: Some("RJ".into()),
                rua: None,
                bairro: None,
            },
            peso_kg: Decimal::new(25, 1),
            dimensoes: DimensoesPacote {
                comprimento_cm: Decimal::new(30, 0),
                largura_cm: Decimal::new(20, 0),
                altura_cm: Decimal::new(10, 0),
            },
            valor_declarado: None,
        }
    }

    fn opcao(servico: &str, preco: Decimal, selo: Option<Selo>) -> OpcaoServicoSimulacao {
        OpcaoServicoSimulacao {
            servico: servico.into(),
            transportadora: "x".into(),
            prazo: "até 1 dia útil".into(),
            preco,
            preco_original: None,
            selo,
        }
    }

    #[tokio::test]
    async fn calcular_publica_as_tres_opcoes_fixas() {
        let service = SimulationService::new(Duration::ZERO);
        let resultado = service.calcular(input()).await.unwrap();
        assert_eq!(resultado.opcoes.len(), 3);

        let atual = service.atual().unwrap();
        assert_eq!(atual.opcoes.len(), 3);
        assert_eq!(atual.input.origem.cep, "01311000");
    }

    #[tokio::test]
    async fn limpar_esvazia_o_resultado() {
        let service = SimulationService::new(Duration::ZERO);
        service.calcular(input()).await.unwrap();
        service.limpar();
        assert!(service.atual().is_none());
    }

    #[tokio::test]
    async fn resultado_obsoleto_nao_sobrescreve_apos_limpar() {
        let service = SimulationService::new(Duration::from_millis(50));
        let pendente = {
            let service = service.clone();
            tokio::spawn(async move { service.calcular(input()).await })
        };
        // deixa o cálculo começar e então limpa com ele ainda em voo
        tokio::task::yield_now().await;
        service.limpar();
        pendente.await.unwrap().unwrap();
        assert!(service.atual().is_none());
    }

    #[test]
    fn mais_barata_sem_selo_recebe_melhor_preco() {
        let mut opcoes = vec![
            opcao("A", Decimal::new(3490, 2), Some(Selo::MelhorPrazo)),
            opcao("B", Decimal::new(2250, 2), None),
            opcao("C", Decimal::new(2870, 2), None),
        ];
        aplicar_selo_melhor_preco(&mut opcoes);
        assert_eq!(opcoes[1].selo, Some(Selo::MelhorPreco));
        assert_eq!(opcoes[2].selo, None);
    }

    #[test]
    fn empate_de_preco_fica_com_o_primeiro_indice() {
        let mut opcoes = vec![
            opcao("A", Decimal::new(2250, 2), None),
            opcao("B", Decimal::new(2250, 2), None),
        ];
        aplicar_selo_melhor_preco(&mut opcoes);
        assert_eq!(opcoes[0].selo, Some(Selo::MelhorPreco));
        assert_eq!(opcoes[1].selo, None);
    }

    #[test]
    fn selo_explicito_na_mais_barata_nao_e_sobrescrito() {
        let mut opcoes = vec![
            opcao("A", Decimal::new(2250, 2), Some(Selo::MelhorPrazo)),
            opcao("B", Decimal::new(2870, 2), None),
        ];
        aplicar_selo_melhor_preco(&mut opcoes);
        assert_eq!(opcoes[0].selo, Some(Selo::MelhorPrazo));
        assert_eq!(opcoes[1].selo, None);
    }
}
