// src/main.rs

use tokio::net::TcpListener;

use enviofacil::AppState;

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não
    // deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    let porta = app_state.config.porta;
    let app = enviofacil::app(app_state);

    let addr = format!("0.0.0.0:{porta}");
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    tracing::info!("📱 SPA: http://localhost:{porta}");
    tracing::info!("🔧 API: http://localhost:{porta}/api");

    axum::serve(listener, app)
        .with_graceful_shutdown(sinal_de_parada())
        .await
        .expect("Erro no servidor Axum");
}

// Desligamento gracioso em SIGINT/SIGTERM
async fn sinal_de_parada() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Falha ao instalar o handler de Ctrl+C");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Falha ao instalar o handler de SIGTERM")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("🛑 Sinal recebido, desligando graciosamente");
}
