// src/services/whatsapp.rs

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::Customer;

// =============================================================================
//  LINKS DE WHATSAPP
// =============================================================================
//
// O telefone fica guardado como veio da planilha; a normalização acontece
// só aqui, na hora de montar o link. Números locais argentinos de 10 dígitos
// ganham o prefixo 549 (código do país + 9 de celular).

/// Qual mensagem pré-preenchida mandar.
#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MessageTemplate {
    /// Boas-vindas para clientes recém-registrados
    #[default]
    Welcome,
    /// Felicitação de aniversário com o desconto do dia
    Birthday,
}

/// Deixa só os dígitos e aplica o código de país quando falta.
/// Telefone vazio (ou sem nenhum dígito) vira `None`.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let digits = crate::services::filter::digits_only(raw);
    if digits.is_empty() {
        return None;
    }
    if digits.len() == 10 && !digits.starts_with("549") {
        return Some(format!("549{digits}"));
    }
    Some(digits)
}

/// Monta o deep link com o número normalizado e o texto codificado.
/// `None` quando o cliente não tem telefone utilizável.
pub fn build_link(customer: &Customer, template: MessageTemplate) -> Option<String> {
    let phone = normalize_phone(&customer.phone)?;
    let message = match template {
        MessageTemplate::Welcome => welcome_message(&customer.first_name),
        MessageTemplate::Birthday => birthday_message(&customer.first_name),
    };
    let encoded = utf8_percent_encode(&message, NON_ALPHANUMERIC);

    let url = match template {
        MessageTemplate::Welcome => {
            format!("https://api.whatsapp.com/send?phone={phone}&text={encoded}")
        }
        MessageTemplate::Birthday => format!("https://wa.me/{phone}?text={encoded}"),
    };
    Some(url)
}

// Os textos são do restaurante, em espanhol. Não traduzir.

fn birthday_message(first_name: &str) -> String {
    format!(
        "¡Feliz cumpleaños {first_name}! Queremos darte un regalo especial. \
         Pasá hoy por la tienda y aprovechá tu descuento."
    )
}

fn welcome_message(first_name: &str) -> String {
    format!(
        "✨ ¡Hola {first_name}!\n\n\
         Muchas gracias por registrarte en Caro Righetti Cocina de Autor 💖\n\n\
         Estamos muy felices de que formes parte de nuestra comunidad gastronómica. \
         Queremos que tu experiencia sea inolvidable cada vez que nos visites.\n\n\
         Si tenés alguna consulta o querés hacer una reserva, no dudes en escribirnos. \
         ¡Te esperamos pronto para compartir una experiencia única! 🍷\n\n\
         ¡Saludos!\nEquipo Caro Righetti"
    )
}
