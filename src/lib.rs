// src/lib.rs

// Declaração dos nossos módulos
pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod models;
pub mod services;

use axum::{
    Router,
    routing::{get, post},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppState;

/// Monta o router completo da API. Fica aqui (e não no main) para os testes
/// de integração exercitarem exatamente o mesmo roteamento.
pub fn api_router(app_state: AppState) -> Router {
    let crm_routes = Router::new()
        // Gestão de Clientes
        .route(
            "/customers",
            get(handlers::crm::list_customers).post(handlers::crm::create_customer),
        )
        .route("/customers/refresh", post(handlers::crm::refresh_customers))
        // Vistas de segmentação
        .route("/customers/birthdays", get(handlers::crm::list_birthdays))
        .route("/customers/new", get(handlers::crm::list_new_customers))
        .route("/zones", get(handlers::crm::list_zones))
        // WhatsApp
        .route(
            "/customers/{id}/whatsapp-link",
            get(handlers::crm::whatsapp_link),
        )
        // Ações otimistas
        .route("/sales", post(handlers::crm::register_sale))
        .route("/contacts", post(handlers::crm::mark_contacted));

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/crm", crm_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state)
}
