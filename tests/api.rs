//! Testes de integração em nível HTTP: sobem o router real (estado de
//! teste, sem latência artificial e sem disco) e dirigem os fluxos com
//! `tower::ServiceExt::oneshot`.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use enviofacil::AppState;

fn app() -> Router {
    enviofacil::app(AppState::para_testes())
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_texto(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn post_json(app: &Router, uri: &str, corpo: Value) -> axum::response::Response {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(corpo.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

async fn post_json_auth(
    app: &Router,
    uri: &str,
    token: &str,
    corpo: Value,
) -> axum::response::Response {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(corpo.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

async fn get_auth(app: &Router, uri: &str, token: &str) -> axum::response::Response {
    let request = Request::get(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Faz login e devolve o token da sessão.
async fn login(app: &Router, email: &str) -> String {
    let response = post_json(
        app,
        "/api/auth/login",
        json!({ "email": email, "senha": "123456" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let corpo = body_json(response).await;
    corpo["token"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_responde_ok() {
    let response = app()
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_devolve_o_conjunto_de_lojas_do_papel() {
    let app = app();

    let response = post_json(
        &app,
        "/api/auth/login",
        json!({ "email": "func@ex.com", "senha": "123456" }),
    )
    .await;
    let corpo = body_json(response).await;
    assert_eq!(corpo["sessao"]["papel"], "FUNCIONARIO");
    assert_eq!(corpo["sessao"]["lojas"].as_array().unwrap().len(), 1);
    assert_eq!(corpo["sessao"]["lojaAtualId"], "loja2");
    assert_eq!(corpo["sessao"]["permissoes"]["financeiro_criar_recarga"], false);

    let response = post_json(
        &app,
        "/api/auth/login",
        json!({ "email": "dono@ex.com", "senha": "123456" }),
    )
    .await;
    let corpo = body_json(response).await;
    assert_eq!(corpo["sessao"]["papel"], "DONO");
    assert_eq!(corpo["sessao"]["lojas"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn login_com_campo_vazio_e_rejeitado_na_validacao() {
    let response = post_json(
        &app(),
        "/api/auth/login",
        json!({ "email": "", "senha": "123456" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rota_protegida_sem_token_e_nao_autorizada() {
    let response = app()
        .oneshot(Request::get("/api/envios").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_encerra_a_sessao_e_validate_reporta_sem_sessao() {
    let app = app();
    let token = login(&app, "admin@ex.com").await;

    let response = post_json_auth(&app, "/api/auth/logout", &token, json!({})).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // sem token: sem sessão, e isso não é um erro
    let response = app
        .clone()
        .oneshot(Request::get("/api/auth/validate").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let corpo = body_json(response).await;
    assert_eq!(corpo["valida"], false);

    // o token encerrado não acessa mais rotas protegidas
    let response = get_auth(&app, "/api/envios", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn trocar_loja_reflete_na_sessao() {
    let app = app();
    let token = login(&app, "admin@ex.com").await;

    let request = Request::put("/api/auth/loja-atual")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(json!({ "lojaId": "loja3" }).to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let corpo = body_json(get_auth(&app, "/api/auth/me", &token).await).await;
    assert_eq!(corpo["lojaAtualId"], "loja3");
}

// ---------------------------------------------------------------------------
// Escopo e dashboard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn admin_com_todas_recebe_o_resumo_consolidado() {
    let app = app();
    let token = login(&app, "admin@ex.com").await;

    let corpo = body_json(get_auth(&app, "/api/dashboard/summary?loja=todas", &token).await).await;
    assert_eq!(corpo["total"], "R$ 128.420,90");
}

#[tokio::test]
async fn admin_com_loja_concreta_recebe_o_snapshot_dela() {
    let app = app();
    let token = login(&app, "admin@ex.com").await;

    let corpo = body_json(get_auth(&app, "/api/dashboard/summary?loja=loja2", &token).await).await;
    assert_eq!(corpo["total"], "R$ 30.000,00");
}

#[tokio::test]
async fn funcionario_ignora_a_sentinela_e_fica_na_propria_loja() {
    let app = app();
    let token = login(&app, "func@ex.com").await;

    // loja atual do FUNCIONARIO é loja2; a sentinela não existe para ele
    let corpo = body_json(get_auth(&app, "/api/envios?loja=todas", &token).await).await;
    let envios = corpo.as_array().unwrap();
    assert_eq!(envios.len(), 1);
    assert_eq!(envios[0]["lojaId"], "loja2");
}

#[tokio::test]
async fn envios_filtrados_por_loja_concreta() {
    let app = app();
    let token = login(&app, "admin@ex.com").await;

    let corpo = body_json(get_auth(&app, "/api/envios?loja=loja1", &token).await).await;
    let envios = corpo.as_array().unwrap();
    assert_eq!(envios.len(), 2);
    assert!(envios.iter().all(|e| e["lojaId"] == "loja1"));

    let corpo = body_json(get_auth(&app, "/api/envios?loja=todas", &token).await).await;
    assert_eq!(corpo.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn distribuicao_de_status_vem_localizada() {
    let app = app();
    let token = login(&app, "admin@ex.com").await;

    let corpo = body_json(
        get_auth(&app, "/api/dashboard/status-distribuicao?loja=todas", &token).await,
    )
    .await;
    let nomes: Vec<&str> = corpo
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert!(nomes.contains(&"Entregue"));
    assert!(nomes.contains(&"Em trânsito"));
}

#[tokio::test]
async fn serie_financeira_e_reprodutivel_entre_chamadas() {
    let app = app();
    let token = login(&app, "admin@ex.com").await;

    let a = body_json(get_auth(&app, "/api/dashboard/financeiro-diario?loja=todas", &token).await)
        .await;
    let b = body_json(get_auth(&app, "/api/dashboard/financeiro-diario?loja=todas", &token).await)
        .await;
    assert_eq!(a, b);
}

// ---------------------------------------------------------------------------
// Financeiro
// ---------------------------------------------------------------------------

#[tokio::test]
async fn funcionario_nao_cria_recarga_e_o_estado_nao_muda() {
    let app = app();
    let token_func = login(&app, "func@ex.com").await;
    let token_admin = login(&app, "admin@ex.com").await;

    let antes = body_json(get_auth(&app, "/api/financeiro/recargas?loja=todas", &token_admin).await)
        .await
        .as_array()
        .unwrap()
        .len();

    let response = post_json_auth(
        &app,
        "/api/financeiro/recargas",
        &token_func,
        json!({ "valor": 250.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let depois = body_json(get_auth(&app, "/api/financeiro/recargas?loja=todas", &token_admin).await)
        .await
        .as_array()
        .unwrap()
        .len();
    assert_eq!(antes, depois);
}

#[tokio::test]
async fn dono_cria_recarga_pendente() {
    let app = app();
    let token = login(&app, "dono@ex.com").await;

    let response = post_json_auth(
        &app,
        "/api/financeiro/recargas",
        &token,
        json!({ "valor": 250.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let corpo = body_json(response).await;
    assert_eq!(corpo["status"], "PENDING");
    assert!(corpo["txid"].as_str().unwrap().starts_with("TX-"));
}

#[tokio::test]
async fn faturas_sao_invisiveis_para_funcionario() {
    let app = app();
    let token = login(&app, "func@ex.com").await;
    let response = get_auth(&app, "/api/financeiro/faturas", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let token = login(&app, "dono@ex.com").await;
    let response = get_auth(&app, "/api/financeiro/faturas", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn atualizar_pix_regenera_o_qr_no_servidor() {
    let app = app();
    let token = login(&app, "admin@ex.com").await;

    let request = Request::put("/api/financeiro/pix")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(
            json!({ "copyPaste": "00020101021226890014br.gov.bcb.pix", "expiresAt": "2025-10-31 23:59" })
                .to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let corpo = body_json(response).await;
    assert!(corpo["qrImage"]
        .as_str()
        .unwrap()
        .starts_with("data:image/png;base64,"));
}

// ---------------------------------------------------------------------------
// Destinatários (CSV)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn exportacao_e_importacao_de_destinatarios_fazem_roundtrip() {
    let app = app();
    let token = login(&app, "admin@ex.com").await;

    // adiciona um registro com vírgula e aspas no campo livre
    let observacoes = r#"Prefers calls, not texts "urgent""#;
    let response = post_json_auth(
        &app,
        "/api/destinatarios",
        &token,
        json!({
            "nome": "Teste Roundtrip",
            "cpfCnpj": "000.000.000-00",
            "telefone": "(11) 90000-0000",
            "cep": "01311000",
            "rua": "Av. Paulista",
            "numero": "1000",
            "bairro": "Bela Vista",
            "cidade": "São Paulo",
            "uf": "SP",
            "observacoes": observacoes
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let csv = body_texto(get_auth(&app, "/api/destinatarios/exportar", &token).await).await;
    assert!(csv.starts_with(
        "nome,cpf_cnpj,telefone,email,cep,rua,numero,complemento,bairro,cidade,uf,observacoes,ultimo_envio"
    ));

    // importa o CSV exportado de volta
    let request = Request::post("/api/destinatarios/importar")
        .header(header::CONTENT_TYPE, "text/csv")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(csv))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let corpo = body_json(get_auth(&app, "/api/destinatarios", &token).await).await;
    let lista = corpo.as_array().unwrap();
    // o campo sobreviveu intacto ao ciclo exportar -> importar
    assert!(lista
        .iter()
        .filter(|r| r["nome"] == "Teste Roundtrip")
        .all(|r| r["observacoes"] == observacoes));
    assert!(lista.iter().filter(|r| r["nome"] == "Teste Roundtrip").count() >= 2);
}

#[tokio::test]
async fn remover_destinatario_inexistente_e_404() {
    let app = app();
    let token = login(&app, "admin@ex.com").await;
    let request = Request::delete("/api/destinatarios/REC-nao-existe")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Envios
// ---------------------------------------------------------------------------

#[tokio::test]
async fn detalhe_ausente_responde_null_e_nao_erro() {
    let app = app();
    let token = login(&app, "admin@ex.com").await;

    // %23 = '#'
    let response = get_auth(&app, "/api/envios/%23ORD-10290/detalhe", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, Value::Null);

    let response = get_auth(&app, "/api/envios/%23ORD-10293/detalhe", &token).await;
    let corpo = body_json(response).await;
    assert_eq!(corpo["destination"], "Rio de Janeiro/RJ");
}

#[tokio::test]
async fn exportacao_de_envios_tem_coluna_de_loja_para_gestores() {
    let app = app();
    let token = login(&app, "admin@ex.com").await;
    let csv = body_texto(get_auth(&app, "/api/envios/exportar?loja=todas", &token).await).await;
    assert!(csv.lines().next().unwrap().ends_with(",loja"));
    assert!(csv.contains("\"Loja Centro\""));

    let token = login(&app, "func@ex.com").await;
    let csv = body_texto(get_auth(&app, "/api/envios/exportar", &token).await).await;
    assert!(!csv.lines().next().unwrap().contains("loja"));
}

#[tokio::test]
async fn modelo_de_importacao_exige_capacidade() {
    let app = app();
    let token = login(&app, "func@ex.com").await;
    let response = get_auth(&app, "/api/envios/modelo", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let token = login(&app, "dono@ex.com").await;
    let response = get_auth(&app, "/api/envios/modelo", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let modelo = body_texto(response).await;
    assert!(modelo.starts_with("remetente_id,destinatario_nome"));
}

// ---------------------------------------------------------------------------
// Simulação
// ---------------------------------------------------------------------------

fn entrada_simulacao() -> Value {
    json!({
        "origem": { "cep": "01311000" },
        "destino": { "cep": "20040002" },
        "pesoKg": 2.5,
        "dimensoes": { "comprimentoCm": 30, "larguraCm": 20, "alturaCm": 10 }
    })
}

#[tokio::test]
async fn simulacao_calcula_e_publica_o_resultado_atual() {
    let app = app();
    let token = login(&app, "admin@ex.com").await;

    let response =
        post_json_auth(&app, "/api/simulacao/calcular", &token, entrada_simulacao()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let corpo = body_json(response).await;
    assert_eq!(corpo["opcoes"].as_array().unwrap().len(), 3);

    let corpo = body_json(get_auth(&app, "/api/simulacao/atual", &token).await).await;
    assert_eq!(corpo["input"]["origem"]["cep"], "01311000");

    // limpar esvazia o resultado
    let request = Request::delete("/api/simulacao/atual")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let corpo = body_json(get_auth(&app, "/api/simulacao/atual", &token).await).await;
    assert_eq!(corpo, Value::Null);
}

#[tokio::test]
async fn simulacao_rejeita_cep_malformado_e_peso_nao_positivo() {
    let app = app();
    let token = login(&app, "admin@ex.com").await;

    let mut entrada = entrada_simulacao();
    entrada["origem"]["cep"] = json!("123");
    let response = post_json_auth(&app, "/api/simulacao/calcular", &token, entrada).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut entrada = entrada_simulacao();
    entrada["pesoKg"] = json!(0);
    let response = post_json_auth(&app, "/api/simulacao/calcular", &token, entrada).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Administração
// ---------------------------------------------------------------------------

#[tokio::test]
async fn somente_admin_lista_lojas_da_plataforma() {
    let app = app();

    let token = login(&app, "admin@ex.com").await;
    let response = get_auth(&app, "/api/admin/lojas", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 3);

    let token = login(&app, "dono@ex.com").await;
    let response = get_auth(&app, "/api/admin/lojas", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn dono_gerencia_funcionarios_por_loja() {
    let app = app();
    let token = login(&app, "dono@ex.com").await;

    let corpo = body_json(get_auth(&app, "/api/admin/funcionarios?loja=loja1", &token).await).await;
    assert_eq!(corpo.as_array().unwrap().len(), 2);

    let request = Request::put("/api/admin/funcionarios/loja1_f1")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(json!({ "ativo": false }).to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["ativo"], false);
}

// ---------------------------------------------------------------------------
// Suporte
// ---------------------------------------------------------------------------

#[tokio::test]
async fn abrir_ticket_usa_a_loja_atual_da_sessao() {
    let app = app();
    let token = login(&app, "func@ex.com").await;

    let response = post_json_auth(
        &app,
        "/api/suporte/tickets",
        &token,
        json!({ "type": "Avaria" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let corpo = body_json(response).await;
    assert_eq!(corpo["status"], "OPEN");
    assert_eq!(corpo["lojaId"], "loja2");
}
