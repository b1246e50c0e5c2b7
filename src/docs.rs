// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Consultas ---
        handlers::crm::list_customers,
        handlers::crm::list_birthdays,
        handlers::crm::list_new_customers,
        handlers::crm::list_zones,

        // --- WhatsApp ---
        handlers::crm::whatsapp_link,

        // --- Ações ---
        handlers::crm::register_sale,
        handlers::crm::mark_contacted,

        // --- Cadastro e recarga ---
        handlers::crm::create_customer,
        handlers::crm::refresh_customers,
    ),
    components(
        schemas(
            models::customer::Customer,
            services::segments::NewCustomerEntry,
            services::whatsapp::MessageTemplate,
            handlers::crm::SalePayload,
            handlers::crm::ContactPayload,
            handlers::crm::CreateCustomerPayload,
        )
    ),
    tags(
        (name = "CRM", description = "Gestión de clientes del restaurante")
    )
)]
pub struct ApiDoc;
