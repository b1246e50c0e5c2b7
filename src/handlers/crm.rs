// src/handlers/crm.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::Customer,
    services::{filter::CustomerFilter, segments::NewCustomerEntry, whatsapp::MessageTemplate},
};

// =============================================================================
//  ÁREA 1: CONSULTAS (vistas derivadas da coleção canônica)
// =============================================================================

// GET /api/crm/customers
#[utoipa::path(
    get,
    path = "/api/crm/customers",
    tag = "CRM",
    params(CustomerFilter),
    responses(
        (status = 200, description = "Lista de clientes (filtrada)", body = Vec<Customer>)
    )
)]
pub async fn list_customers(
    State(app_state): State<AppState>,
    Query(filter): Query<CustomerFilter>,
) -> Result<impl IntoResponse, AppError> {
    let customers = app_state.customer_service.list(&filter).await;
    Ok((StatusCode::OK, Json(customers)))
}

// GET /api/crm/customers/birthdays
#[utoipa::path(
    get,
    path = "/api/crm/customers/birthdays",
    tag = "CRM",
    responses(
        (status = 200, description = "Clientes que cumplen años hoy", body = Vec<Customer>)
    )
)]
pub async fn list_birthdays(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let customers = app_state.customer_service.birthdays().await;
    Ok((StatusCode::OK, Json(customers)))
}

// GET /api/crm/customers/new
#[utoipa::path(
    get,
    path = "/api/crm/customers/new",
    tag = "CRM",
    responses(
        (status = 200, description = "Clientes nuevos sin contactar (máx. 50)", body = Vec<NewCustomerEntry>)
    )
)]
pub async fn list_new_customers(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let entries = app_state.customer_service.new_uncontacted().await;
    Ok((StatusCode::OK, Json(entries)))
}

// GET /api/crm/zones
#[utoipa::path(
    get,
    path = "/api/crm/zones",
    tag = "CRM",
    responses(
        (status = 200, description = "Zonas únicas para el filtro", body = Vec<String>)
    )
)]
pub async fn list_zones(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let zones = app_state.customer_service.zones().await;
    Ok((StatusCode::OK, Json(zones)))
}

// =============================================================================
//  ÁREA 2: WHATSAPP
// =============================================================================

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct WhatsappLinkQuery {
    /// Plantilla del mensaje: `welcome` (default) o `birthday`
    #[serde(default)]
    pub template: MessageTemplate,
}

// GET /api/crm/customers/{id}/whatsapp-link
#[utoipa::path(
    get,
    path = "/api/crm/customers/{id}/whatsapp-link",
    tag = "CRM",
    params(
        ("id" = String, Path, description = "ID del cliente"),
        WhatsappLinkQuery
    ),
    responses(
        (status = 200, description = "Deep link de WhatsApp con mensaje prellenado"),
        (status = 404, description = "Cliente no encontrado"),
        (status = 422, description = "Cliente sin teléfono")
    )
)]
pub async fn whatsapp_link(
    State(app_state): State<AppState>,
    Path(customer_id): Path<String>,
    Query(query): Query<WhatsappLinkQuery>,
) -> Result<impl IntoResponse, AppError> {
    let url = app_state
        .customer_service
        .whatsapp_link(&customer_id, query.template)
        .await?;

    Ok((StatusCode::OK, Json(json!({ "url": url }))))
}

// =============================================================================
//  ÁREA 3: AÇÕES (escritas otimistas na planilha)
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalePayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "42")]
    pub customer_id: String,
}

// POST /api/crm/sales
#[utoipa::path(
    post,
    path = "/api/crm/sales",
    tag = "CRM",
    request_body = SalePayload,
    responses(
        (status = 200, description = "Venta registrada (escritura en background)"),
        (status = 404, description = "Cliente no encontrado")
    )
)]
pub async fn register_sale(
    State(app_state): State<AppState>,
    Json(payload): Json<SalePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    app_state
        .customer_service
        .register_sale(&payload.customer_id)
        .await?;

    Ok((StatusCode::OK, Json(json!({ "success": true }))))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "42")]
    pub customer_id: String,
}

// POST /api/crm/contacts
#[utoipa::path(
    post,
    path = "/api/crm/contacts",
    tag = "CRM",
    request_body = ContactPayload,
    responses(
        (status = 200, description = "Cliente marcado como contactado (escritura en background)"),
        (status = 404, description = "Cliente no encontrado")
    )
)]
pub async fn mark_contacted(
    State(app_state): State<AppState>,
    Json(payload): Json<ContactPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    app_state
        .customer_service
        .mark_contacted(&payload.customer_id)
        .await?;

    Ok((StatusCode::OK, Json(json!({ "success": true }))))
}

// =============================================================================
//  ÁREA 4: CADASTRO E RECARGA
// =============================================================================

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Ana")]
    pub nombre: String,

    #[serde(default)]
    #[schema(example = "García")]
    pub apellido: String,

    #[serde(default)]
    #[schema(example = "Centro")]
    pub zona: String,

    #[serde(default)]
    #[schema(example = "3511234567")]
    pub telefono: String,

    #[serde(default)]
    #[schema(example = "05/03/1990")]
    pub fecha_nacimiento: Option<String>,
}

// POST /api/crm/customers
#[utoipa::path(
    post,
    path = "/api/crm/customers",
    tag = "CRM",
    request_body = CreateCustomerPayload,
    responses(
        (status = 201, description = "Cliente creado en la planilla"),
        (status = 400, description = "Datos inválidos")
    )
)]
pub async fn create_customer(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateCustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // Os nomes de campo seguem o que o Apps Script espera (em espanhol)
    let fields = serde_json::to_value(&payload).map_err(anyhow::Error::from)?;
    let count = app_state.customer_service.create_customer(&fields).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "count": count })),
    ))
}

// POST /api/crm/customers/refresh
#[utoipa::path(
    post,
    path = "/api/crm/customers/refresh",
    tag = "CRM",
    responses(
        (status = 200, description = "Colección recargada desde la planilla"),
        (status = 502, description = "La planilla no respondió")
    )
)]
pub async fn refresh_customers(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let count = app_state.customer_service.refresh().await?;
    Ok((StatusCode::OK, Json(json!({ "count": count }))))
}
