use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Mensagens voltadas ao usuário ficam em espanhol (o idioma do staff do
// restaurante); logs e comentários continuam em português.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Cliente não encontrado")]
    CustomerNotFound,

    #[error("Cliente sem telefone cadastrado")]
    MissingPhone,

    // Falha de transporte ao falar com o Apps Script
    #[error("Falha ao falar com a planilha: {0}")]
    SheetsUnavailable(#[from] reqwest::Error),

    // O Apps Script respondeu, mas com um campo `error` ou status não-2xx
    #[error("O Apps Script retornou erro: {0}")]
    SheetsApi(String),

    // A resposta veio 200, mas num formato que não reconhecemos
    #[error("Resposta da planilha em formato inesperado: {0}")]
    UnexpectedPayload(String),

    // Variante genérica para qualquer outro erro inesperado
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo por campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Uno o más campos son inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::CustomerNotFound => (StatusCode::NOT_FOUND, "Cliente no encontrado."),
            AppError::MissingPhone => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Este cliente no tiene un número de teléfono registrado.",
            ),

            // Problemas com o backend externo viram 502: a culpa não é nossa,
            // mas quem chamou precisa saber que não há dados frescos.
            ref e @ (AppError::SheetsUnavailable(_)
            | AppError::SheetsApi(_)
            | AppError::UnexpectedPayload(_)) => {
                tracing::error!("Erro ao falar com a planilha: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "Error al comunicarse con la planilla de clientes.",
                )
            }

            // Todos os outros erros viram 500.
            // O `tracing` vai logar a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocurrió un error inesperado.",
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
