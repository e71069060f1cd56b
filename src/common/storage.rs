// src/common/storage.rs

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::common::error::AppError;

// O equivalente servidor do `localStorage` do cliente: um par de chaves
// string persistidas entre reinícios (`auth.token` e `lojaAtualId`).
// Lido na inicialização, gravado em login/troca de loja, chave de token
// removida no logout.

#[async_trait]
pub trait ArmazenamentoLocal: Send + Sync {
    async fn ler(&self, chave: &str) -> Option<String>;
    async fn gravar(&self, chave: &str, valor: &str) -> Result<(), AppError>;
    async fn remover(&self, chave: &str) -> Result<(), AppError>;
}

/// Implementação durável: um arquivo JSON simples no diretório de dados.
pub struct ArmazenamentoArquivo {
    caminho: PathBuf,
    dados: RwLock<HashMap<String, String>>,
}

impl ArmazenamentoArquivo {
    pub async fn abrir(caminho: PathBuf) -> Result<Self, AppError> {
        let dados = match tokio::fs::read_to_string(&caminho).await {
            Ok(texto) => serde_json::from_str(&texto).unwrap_or_default(),
            // Arquivo ainda não existe na primeira execução
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(AppError::ArmazenamentoError(e)),
        };
        Ok(Self {
            caminho,
            dados: RwLock::new(dados),
        })
    }

    async fn persistir(&self) -> Result<(), AppError> {
        let snapshot = {
            let dados = self.dados.read().expect("lock de armazenamento envenenado");
            serde_json::to_string_pretty(&*dados)
                .map_err(|e| AppError::InternalServerError(e.into()))?
        };
        if let Some(pai) = self.caminho.parent() {
            tokio::fs::create_dir_all(pai).await?;
        }
        tokio::fs::write(&self.caminho, snapshot).await?;
        Ok(())
    }
}

#[async_trait]
impl ArmazenamentoLocal for ArmazenamentoArquivo {
    async fn ler(&self, chave: &str) -> Option<String> {
        self.dados
            .read()
            .expect("lock de armazenamento envenenado")
            .get(chave)
            .cloned()
    }

    async fn gravar(&self, chave: &str, valor: &str) -> Result<(), AppError> {
        self.dados
            .write()
            .expect("lock de armazenamento envenenado")
            .insert(chave.to_string(), valor.to_string());
        self.persistir().await
    }

    async fn remover(&self, chave: &str) -> Result<(), AppError> {
        self.dados
            .write()
            .expect("lock de armazenamento envenenado")
            .remove(chave);
        self.persistir().await
    }
}

/// Implementação volátil, usada nos testes e quando nenhum diretório de
/// dados foi configurado.
#[derive(Default)]
pub struct ArmazenamentoMemoria {
    dados: RwLock<HashMap<String, String>>,
}

#[async_trait]
impl ArmazenamentoLocal for ArmazenamentoMemoria {
    async fn ler(&self, chave: &str) -> Option<String> {
        self.dados.read().expect("lock envenenado").get(chave).cloned()
    }

    async fn gravar(&self, chave: &str, valor: &str) -> Result<(), AppError> {
        self.dados
            .write()
            .expect("lock envenenado")
            .insert(chave.to_string(), valor.to_string());
        Ok(())
    }

    async fn remover(&self, chave: &str) -> Result<(), AppError> {
        self.dados.write().expect("lock envenenado").remove(chave);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memoria_grava_le_remove() {
        let store = ArmazenamentoMemoria::default();
        store.gravar("lojaAtualId", "loja2").await.unwrap();
        assert_eq!(store.ler("lojaAtualId").await.as_deref(), Some("loja2"));
        store.remover("lojaAtualId").await.unwrap();
        assert_eq!(store.ler("lojaAtualId").await, None);
    }
}
