// src/common/csv.rs

use std::collections::HashMap;

// O dialeto CSV usado em toda a aplicação: todo campo entre aspas duplas,
// aspas internas dobradas (`"` -> `""`), linhas separadas por '\n'.

/// Escapa um campo no formato de exportação.
pub fn escapar_campo(valor: &str) -> String {
    format!("\"{}\"", valor.replace('"', "\"\""))
}

/// Monta uma linha a partir dos campos, todos escapados.
pub fn montar_linha(campos: &[&str]) -> String {
    campos
        .iter()
        .map(|c| escapar_campo(c))
        .collect::<Vec<_>>()
        .join(",")
}

/// Divide uma linha respeitando campos entre aspas e aspas dobradas.
pub fn dividir_linha(linha: &str) -> Vec<String> {
    let mut campos = Vec::new();
    let mut atual = String::new();
    let mut entre_aspas = false;
    let mut chars = linha.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if entre_aspas => {
                if chars.peek() == Some(&'"') {
                    // `""` dentro de aspas vira uma aspa literal
                    chars.next();
                    atual.push('"');
                } else {
                    entre_aspas = false;
                }
            }
            '"' => entre_aspas = true,
            ',' if !entre_aspas => {
                campos.push(std::mem::take(&mut atual));
            }
            _ => atual.push(c),
        }
    }
    campos.push(atual);
    campos
}

/// Mapeia o cabeçalho para índices de coluna, por NOME (não por posição).
/// Colunas desconhecidas são ignoradas pelo chamador.
pub fn mapa_cabecalho(linha: &str) -> HashMap<String, usize> {
    dividir_linha(linha)
        .into_iter()
        .enumerate()
        .map(|(i, nome)| (nome.trim().to_string(), i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapa_aspas_dobrando() {
        assert_eq!(escapar_campo(r#"diz "oi""#), r#""diz ""oi""""#);
    }

    #[test]
    fn linha_com_virgula_e_aspas_roundtrip() {
        let original = r#"Prefers calls, not texts "urgent""#;
        let linha = montar_linha(&["Maria", original, ""]);
        let campos = dividir_linha(&linha);
        assert_eq!(campos, vec!["Maria", original, ""]);
    }

    #[test]
    fn divide_campos_sem_aspas() {
        assert_eq!(dividir_linha("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn campo_vazio_no_final() {
        assert_eq!(dividir_linha("a,"), vec!["a", ""]);
    }

    #[test]
    fn cabecalho_vira_mapa_por_nome() {
        let mapa = mapa_cabecalho("nome,cpf_cnpj,telefone");
        assert_eq!(mapa["nome"], 0);
        assert_eq!(mapa["cpf_cnpj"], 1);
        assert_eq!(mapa["telefone"], 2);
    }
}
