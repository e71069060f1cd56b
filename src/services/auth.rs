// src/services/auth.rs

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use dashmap::DashMap;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    common::{error::AppError, storage::ArmazenamentoLocal},
    models::auth::{
        AuthResponse, Capacidades, Claims, Loja, Papel, Permissoes, Sessao, Usuario,
    },
};

// As duas chaves do armazenamento durável (o espelho do localStorage do
// cliente): o token opaco e a loja selecionada.
const TOKEN_KEY: &str = "auth.token";
const LOJA_ATUAL_KEY: &str = "lojaAtualId";

/// Resolve as capacidades de um papel UMA vez por sessão.
/// Todo o resto da aplicação consulta estas flags; nenhum handler
/// re-deriva uniões de papéis.
pub fn capacidades_para(papel: Papel) -> Capacidades {
    let gestor = papel != Papel::Funcionario;
    Capacidades {
        gerenciar_lojas: papel == Papel::Admin,
        gerenciar_funcionarios: gestor,
        gerenciar_integracoes: gestor,
        criar_recarga: gestor,
        ver_faturas: gestor,
        importar_envios: gestor,
    }
}

/// O papel sai de palavras-chave no e-mail, como no mock original:
/// "func" -> FUNCIONARIO, senão "dono" -> DONO, senão ADMIN.
pub fn papel_do_email(email: &str) -> Papel {
    if email.contains("func") {
        Papel::Funcionario
    } else if email.contains("dono") {
        Papel::Dono
    } else {
        Papel::Admin
    }
}

/// Conjunto fixo de lojas visíveis por papel: FUNCIONARIO enxerga
/// exatamente uma loja; os demais, as três.
pub fn lojas_visiveis(papel: Papel) -> Vec<Loja> {
    match papel {
        Papel::Funcionario => vec![Loja {
            id: "loja2".into(),
            nome: "Loja Sul".into(),
        }],
        _ => vec![
            Loja {
                id: "loja1".into(),
                nome: "Loja Centro".into(),
            },
            Loja {
                id: "loja2".into(),
                nome: "Loja Sul".into(),
            },
            Loja {
                id: "loja3".into(),
                nome: "Loja Norte".into(),
            },
        ],
    }
}

#[derive(Clone)]
pub struct AuthService {
    sessoes: Arc<DashMap<String, Sessao>>,
    armazenamento: Arc<dyn ArmazenamentoLocal>,
    jwt_secret: String,
    // Latências simuladas do mock; zero nos testes
    delay_login: Duration,
    delay_validate: Duration,
}

impl AuthService {
    pub fn new(
        armazenamento: Arc<dyn ArmazenamentoLocal>,
        jwt_secret: String,
        delay_login: Duration,
        delay_validate: Duration,
    ) -> Self {
        Self {
            sessoes: Arc::new(DashMap::new()),
            armazenamento,
            jwt_secret,
            delay_login,
            delay_validate,
        }
    }

    pub async fn login(&self, email: &str, senha: &str) -> Result<AuthResponse, AppError> {
        if email.is_empty() || senha.is_empty() {
            return Err(AppError::CredenciaisInvalidas);
        }

        tokio::time::sleep(self.delay_login).await;

        let papel = papel_do_email(email);
        let lojas = lojas_visiveis(papel);

        // A seleção persistida só vale se ainda pertence ao conjunto
        // visível; ids obsoletos caem para a primeira loja.
        let persistida = self.armazenamento.ler(LOJA_ATUAL_KEY).await;
        let loja_atual_id = persistida
            .filter(|id| lojas.iter().any(|l| &l.id == id))
            .or_else(|| lojas.first().map(|l| l.id.clone()));

        let token = self.create_token("u_1")?;
        self.armazenamento.gravar(TOKEN_KEY, &token).await?;
        if let Some(id) = &loja_atual_id {
            self.armazenamento.gravar(LOJA_ATUAL_KEY, id).await?;
        }

        let sessao = Sessao {
            token: token.clone(),
            usuario: Usuario {
                id: "u_1".into(),
                name: "João Augusto".into(),
                email: email.to_string(),
                papel,
            },
            papel,
            lojas,
            loja_atual_id,
            permissoes: Permissoes {
                financeiro_criar_recarga: papel != Papel::Funcionario,
            },
            capacidades: capacidades_para(papel),
            account_id: "acc_123".into(),
            account_name: "Conta Principal".into(),
        };
        self.sessoes.insert(token.clone(), sessao.clone());

        tracing::info!("🔐 Login realizado ({:?})", papel);
        Ok(AuthResponse { token, sessao })
    }

    /// Encerra a sessão e remove o token persistido. A chave
    /// `lojaAtualId` fica: o próximo login na mesma máquina retoma o
    /// contexto da loja (e o login revalida a seleção contra o conjunto
    /// visível).
    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        self.sessoes.remove(token);
        self.armazenamento.remover(TOKEN_KEY).await?;
        Ok(())
    }

    /// Sem token: "sem sessão" (não é erro). Com token: simula o refresh
    /// da sessão, preenchendo padrões apenas nos campos ausentes —
    /// idempotente, nunca sobrescreve valor já populado.
    pub async fn validate(&self, token: Option<&str>) -> Result<Option<Sessao>, AppError> {
        let Some(token) = token else {
            return Ok(None);
        };

        self.decode_token(token)?;
        tokio::time::sleep(self.delay_validate).await;

        // Lê a seleção persistida antes de tocar no mapa de sessões para
        // não segurar o guard através de um await
        let persistida = self.armazenamento.ler(LOJA_ATUAL_KEY).await;

        if let Some(mut entrada) = self.sessoes.get_mut(token) {
            if entrada.lojas.is_empty() {
                entrada.lojas = vec![
                    Loja {
                        id: "loja1".into(),
                        nome: "Loja Centro".into(),
                    },
                    Loja {
                        id: "loja2".into(),
                        nome: "Loja Sul".into(),
                    },
                ];
            }
            if entrada.loja_atual_id.is_none() {
                entrada.loja_atual_id =
                    Some(persistida.unwrap_or_else(|| "loja1".into()));
            }
            return Ok(Some(entrada.clone()));
        }

        // Token válido sem sessão em memória (ex.: processo reiniciado):
        // reconstrói a sessão padrão do refresh mock.
        let sessao = Sessao {
            token: token.to_string(),
            usuario: Usuario {
                id: "u_1".into(),
                name: "João Augusto".into(),
                email: "user@example.com".into(),
                papel: Papel::Admin,
            },
            papel: Papel::Admin,
            lojas: vec![
                Loja {
                    id: "loja1".into(),
                    nome: "Loja Centro".into(),
                },
                Loja {
                    id: "loja2".into(),
                    nome: "Loja Sul".into(),
                },
            ],
            loja_atual_id: Some(persistida.unwrap_or_else(|| "loja1".into())),
            permissoes: Permissoes {
                financeiro_criar_recarga: true,
            },
            capacidades: capacidades_para(Papel::Admin),
            account_id: "acc_123".into(),
            account_name: "Conta Principal".into(),
        };
        self.sessoes.insert(token.to_string(), sessao.clone());
        Ok(Some(sessao))
    }

    /// Troca a loja atual da sessão, incondicionalmente: memória e
    /// armazenamento durável. Não valida pertencimento ao conjunto
    /// visível — responsabilidade do chamador, como no original.
    pub async fn set_loja_atual(&self, token: &str, loja_id: &str) -> Result<Sessao, AppError> {
        let sessao = {
            let mut entrada = self.sessoes.get_mut(token).ok_or(AppError::TokenInvalido)?;
            entrada.loja_atual_id = Some(loja_id.to_string());
            entrada.clone()
        };
        self.armazenamento.gravar(LOJA_ATUAL_KEY, loja_id).await?;
        Ok(sessao)
    }

    pub fn sessao(&self, token: &str) -> Option<Sessao> {
        self.sessoes.get(token).map(|s| s.clone())
    }

    fn create_token(&self, user_id: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
            jti: uuid::Uuid::new_v4().to_string(),
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }

    fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::TokenInvalido)?;
        Ok(token_data.claims)
    }
}
