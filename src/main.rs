//src/main.rs

use tokio::net::TcpListener;

use gestion_clientes::{api_router, config::AppState};

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new().expect("Falha ao inicializar o estado da aplicação.");

    // Carga inicial da coleção canônica. Se a planilha estiver fora do ar,
    // subimos mesmo assim com a coleção vazia; um refresh manual resolve.
    match app_state.customer_service.refresh().await {
        Ok(count) => tracing::info!("✅ {} clientes carregados da planilha!", count),
        Err(e) => tracing::warn!("⚠️ Falha na carga inicial de clientes: {}", e),
    }

    let app = api_router(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
