// src/services/recipient_service.rs

use std::collections::HashMap;

use crate::{
    common::{csv, error::AppError},
    models::recipient::{AtualizarRecipientPayload, RecipientPayload, SavedRecipient},
    store::{recipient_repo, RecipientRepository},
};

// Cabeçalho fixo de 13 colunas do intercâmbio de destinatários.
// A exportação é bit-exata: campos entre aspas, aspas dobradas, '\n'.
const COLUNAS: [&str; 13] = [
    "nome",
    "cpf_cnpj",
    "telefone",
    "email",
    "cep",
    "rua",
    "numero",
    "complemento",
    "bairro",
    "cidade",
    "uf",
    "observacoes",
    "ultimo_envio",
];

// Colunas sem as quais uma linha importada não faz sentido.
const OBRIGATORIAS: [&str; 9] = [
    "nome", "cpf_cnpj", "telefone", "cep", "rua", "numero", "bairro", "cidade", "uf",
];

#[derive(Clone)]
pub struct RecipientService {
    repo: RecipientRepository,
}

impl RecipientService {
    pub fn new(repo: RecipientRepository) -> Self {
        Self { repo }
    }

    pub fn listar(&self) -> Vec<SavedRecipient> {
        self.repo.listar()
    }

    pub fn adicionar(&self, payload: RecipientPayload) -> SavedRecipient {
        let registro = de_payload(payload, recipient_repo::gen_id(), None);
        self.repo.inserir_no_inicio(registro.clone());
        registro
    }

    pub fn atualizar(
        &self,
        id: &str,
        payload: AtualizarRecipientPayload,
    ) -> Result<SavedRecipient, AppError> {
        self.repo
            .atualizar(id, |r| mesclar(r, payload))
            .ok_or_else(|| AppError::NaoEncontrado(format!("Destinatário {id} não encontrado.")))
    }

    pub fn remover(&self, id: &str) -> Result<(), AppError> {
        if self.repo.remover(id) {
            Ok(())
        } else {
            Err(AppError::NaoEncontrado(format!(
                "Destinatário {id} não encontrado."
            )))
        }
    }

    /// Importa um CSV completo (com cabeçalho). Devolve quantas linhas
    /// entraram; elas ficam antes das existentes, na ordem original.
    pub fn importar_csv(&self, texto: &str) -> Result<usize, AppError> {
        let registros = interpretar_csv(texto)?;
        let quantidade = registros.len();
        self.repo.inserir_lote_no_inicio(registros);
        tracing::info!("📥 Importação concluída: {} destinatários", quantidade);
        Ok(quantidade)
    }

    /// Exporta as linhas dadas, ou a coleção inteira quando `None`.
    pub fn exportar_csv(&self, linhas: Option<Vec<SavedRecipient>>) -> String {
        let lista = linhas.unwrap_or_else(|| self.repo.listar());
        montar_csv(&lista)
    }
}

fn de_payload(payload: RecipientPayload, id: String, ultimo_envio: Option<String>) -> SavedRecipient {
    SavedRecipient {
        id,
        nome: payload.nome,
        cpf_cnpj: payload.cpf_cnpj,
        telefone: payload.telefone,
        email: payload.email.filter(|v| !v.is_empty()),
        cep: payload.cep,
        rua: payload.rua,
        numero: payload.numero,
        complemento: payload.complemento.filter(|v| !v.is_empty()),
        bairro: payload.bairro,
        cidade: payload.cidade,
        uf: payload.uf,
        observacoes: payload.observacoes.filter(|v| !v.is_empty()),
        ultimo_envio,
    }
}

fn mesclar(registro: &mut SavedRecipient, payload: AtualizarRecipientPayload) {
    if let Some(v) = payload.nome {
        registro.nome = v;
    }
    if let Some(v) = payload.cpf_cnpj {
        registro.cpf_cnpj = v;
    }
    if let Some(v) = payload.telefone {
        registro.telefone = v;
    }
    if let Some(v) = payload.email {
        registro.email = Some(v);
    }
    if let Some(v) = payload.cep {
        registro.cep = v;
    }
    if let Some(v) = payload.rua {
        registro.rua = v;
    }
    if let Some(v) = payload.numero {
        registro.numero = v;
    }
    if let Some(v) = payload.complemento {
        registro.complemento = Some(v);
    }
    if let Some(v) = payload.bairro {
        registro.bairro = v;
    }
    if let Some(v) = payload.cidade {
        registro.cidade = v;
    }
    if let Some(v) = payload.uf {
        registro.uf = v;
    }
    if let Some(v) = payload.observacoes {
        registro.observacoes = Some(v);
    }
    if let Some(v) = payload.ultimo_envio {
        registro.ultimo_envio = Some(v);
    }
}

/// Serialização bit-exata do formato de exportação.
pub fn montar_csv(lista: &[SavedRecipient]) -> String {
    let mut linhas = vec![COLUNAS.join(",")];
    for r in lista {
        let campos = [
            r.nome.as_str(),
            r.cpf_cnpj.as_str(),
            r.telefone.as_str(),
            r.email.as_deref().unwrap_or(""),
            r.cep.as_str(),
            r.rua.as_str(),
            r.numero.as_str(),
            r.complemento.as_deref().unwrap_or(""),
            r.bairro.as_str(),
            r.cidade.as_str(),
            r.uf.as_str(),
            r.observacoes.as_deref().unwrap_or(""),
            r.ultimo_envio.as_deref().unwrap_or(""),
        ];
        linhas.push(csv::montar_linha(&campos));
    }
    linhas.join("\n")
}

/// Interpreta um CSV de destinatários mapeando colunas PELO NOME do
/// cabeçalho. Colunas desconhecidas são ignoradas; a falta de qualquer
/// coluna obrigatória rejeita o arquivo, e linha sem valor obrigatório
/// rejeita a linha com o número dela.
pub fn interpretar_csv(texto: &str) -> Result<Vec<SavedRecipient>, AppError> {
    let mut linhas = texto.lines();
    let cabecalho = linhas
        .next()
        .ok_or_else(|| AppError::CsvInvalido("Arquivo vazio.".into()))?;
    let mapa = csv::mapa_cabecalho(cabecalho);

    for coluna in OBRIGATORIAS {
        if !mapa.contains_key(coluna) {
            return Err(AppError::CsvInvalido(format!(
                "Coluna obrigatória ausente no cabeçalho: {coluna}"
            )));
        }
    }

    let pegar = |mapa: &HashMap<String, usize>, campos: &[String], coluna: &str| -> String {
        mapa.get(coluna)
            .and_then(|&i| campos.get(i))
            .cloned()
            .unwrap_or_default()
    };

    let mut registros = Vec::new();
    for (numero, linha) in linhas.enumerate() {
        if linha.trim().is_empty() {
            continue;
        }
        let campos = csv::dividir_linha(linha);

        for coluna in OBRIGATORIAS {
            if pegar(&mapa, &campos, coluna).is_empty() {
                return Err(AppError::CsvInvalido(format!(
                    "Linha {}: campo obrigatório vazio ({coluna})",
                    numero + 2
                )));
            }
        }

        let opcional = |coluna: &str| {
            let valor = pegar(&mapa, &campos, coluna);
            (!valor.is_empty()).then_some(valor)
        };

        registros.push(SavedRecipient {
            id: recipient_repo::gen_id(),
            nome: pegar(&mapa, &campos, "nome"),
            cpf_cnpj: pegar(&mapa, &campos, "cpf_cnpj"),
            telefone: pegar(&mapa, &campos, "telefone"),
            email: opcional("email"),
            cep: pegar(&mapa, &campos, "cep"),
            rua: pegar(&mapa, &campos, "rua"),
            numero: pegar(&mapa, &campos, "numero"),
            complemento: opcional("complemento"),
            bairro: pegar(&mapa, &campos, "bairro"),
            cidade: pegar(&mapa, &campos, "cidade"),
            uf: pegar(&mapa, &campos, "uf"),
            observacoes: opcional("observacoes"),
            ultimo_envio: opcional("ultimo_envio"),
        });
    }
    Ok(registros)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(nome: &str) -> RecipientPayload {
        RecipientPayload {
            nome: nome.into(),
            cpf_cnpj: "123.456.789-00".into(),
            telefone: "(11) 91234-5678".into(),
            email: Some("a@ex.com".into()),
            cep: "01311000".into(),
            rua: "Av. Paulista".into(),
            numero: "1000".into(),
            complemento: None,
            bairro: "Bela Vista".into(),
            cidade: "São Paulo".into(),
            uf: "SP".into(),
            observacoes: Some(r#"Prefers calls, not texts "urgent""#.into()),
        }
    }

    #[test]
    fn exportar_e_importar_preserva_virgula_e_aspas() {
        let service = RecipientService::new(RecipientRepository::new());
        let registro = service.adicionar(payload("Com Vírgula"));

        let texto = montar_csv(&[registro.clone()]);
        let de_volta = interpretar_csv(&texto).unwrap();

        assert_eq!(de_volta.len(), 1);
        assert_eq!(de_volta[0].observacoes, registro.observacoes);
        assert_eq!(de_volta[0].nome, registro.nome);
        assert_eq!(de_volta[0].ultimo_envio, registro.ultimo_envio);
    }

    #[test]
    fn cabecalho_de_exportacao_e_exato() {
        let texto = montar_csv(&[]);
        assert_eq!(
            texto,
            "nome,cpf_cnpj,telefone,email,cep,rua,numero,complemento,bairro,cidade,uf,observacoes,ultimo_envio"
        );
    }

    #[test]
    fn adicionar_e_remover_restaura_a_colecao() {
        let service = RecipientService::new(RecipientRepository::new());
        let antes = service.listar();

        let registro = service.adicionar(payload("Temporário"));
        assert_eq!(service.listar().len(), antes.len() + 1);
        // o novo registro entra no início
        assert_eq!(service.listar()[0].id, registro.id);

        service.remover(&registro.id).unwrap();
        let depois = service.listar();
        assert_eq!(depois.len(), antes.len());
        assert_eq!(
            depois.iter().map(|r| r.id.clone()).collect::<Vec<_>>(),
            antes.iter().map(|r| r.id.clone()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn atualizar_mescla_somente_os_campos_presentes() {
        let service = RecipientService::new(RecipientRepository::new());
        let registro = service.adicionar(payload("Original"));

        let atualizado = service
            .atualizar(
                &registro.id,
                AtualizarRecipientPayload {
                    telefone: Some("(11) 90000-0000".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(atualizado.telefone, "(11) 90000-0000");
        assert_eq!(atualizado.nome, "Original");
        assert_eq!(atualizado.cep, registro.cep);
    }

    #[test]
    fn atualizar_id_inexistente_e_nao_encontrado() {
        let service = RecipientService::new(RecipientRepository::new());
        let resultado = service.atualizar("REC-nao-existe", AtualizarRecipientPayload::default());
        assert!(matches!(resultado, Err(AppError::NaoEncontrado(_))));
    }

    #[test]
    fn importacao_mapeia_colunas_pelo_nome_mesmo_embaralhadas() {
        let texto = concat!(
            "telefone,uf,nome,cpf_cnpj,cep,rua,numero,bairro,cidade,extra\n",
            "\"(21) 99876-5432\",\"RJ\",\"Loja ABC\",\"12.345.678/0001-00\",\"20040002\",\"Rua A\",\"200\",\"Centro\",\"Rio de Janeiro\",\"ignorada\"\n",
        );
        let registros = interpretar_csv(texto).unwrap();
        assert_eq!(registros.len(), 1);
        assert_eq!(registros[0].nome, "Loja ABC");
        assert_eq!(registros[0].uf, "RJ");
        assert_eq!(registros[0].email, None);
    }

    #[test]
    fn importacao_rejeita_cabecalho_sem_coluna_obrigatoria() {
        let texto = "nome,telefone\n\"X\",\"Y\"\n";
        assert!(matches!(
            interpretar_csv(texto),
            Err(AppError::CsvInvalido(_))
        ));
    }

    #[test]
    fn importacao_rejeita_linha_com_obrigatorio_vazio_apontando_a_linha() {
        let texto = concat!(
            "nome,cpf_cnpj,telefone,cep,rua,numero,bairro,cidade,uf\n",
            "\"A\",\"1\",\"2\",\"3\",\"4\",\"5\",\"6\",\"7\",\"SP\"\n",
            "\"\",\"1\",\"2\",\"3\",\"4\",\"5\",\"6\",\"7\",\"SP\"\n",
        );
        let erro = interpretar_csv(texto).unwrap_err();
        match erro {
            AppError::CsvInvalido(msg) => assert!(msg.contains("Linha 3")),
            outro => panic!("erro inesperado: {outro:?}"),
        }
    }

    #[test]
    fn lote_importado_fica_antes_dos_existentes_na_ordem_original() {
        let service = RecipientService::new(RecipientRepository::new());
        let texto = concat!(
            "nome,cpf_cnpj,telefone,cep,rua,numero,bairro,cidade,uf\n",
            "\"Primeiro\",\"1\",\"2\",\"3\",\"4\",\"5\",\"6\",\"7\",\"SP\"\n",
            "\"Segundo\",\"1\",\"2\",\"3\",\"4\",\"5\",\"6\",\"7\",\"SP\"\n",
        );
        service.importar_csv(texto).unwrap();

        let lista = service.listar();
        assert_eq!(lista[0].nome, "Primeiro");
        assert_eq!(lista[1].nome, "Segundo");
        assert_eq!(lista[2].nome, "Maria Souza");
    }
}
