// src/services/normalizer.rs

use serde_json::{Map, Value};

use crate::models::Customer;
use crate::services::dates;

// =============================================================================
//  NORMALIZADOR DE CAMPOS
// =============================================================================
//
// As colunas da planilha mudaram de nome várias vezes (com acento, com emoji,
// camelCase...). Em vez de acesso duck-typed espalhado, cada campo canônico
// tem sua lista ordenada de aliases e um resolvedor genérico aplica
// "primeiro match não-vazio ganha". Nada aqui falha: o pior caso é campo
// vazio com um warning no log.

const ID_ALIASES: &[&str] = &["ID", "id", "ClienteID", "clienteID", "ID Cliente"];
const FIRST_NAME_ALIASES: &[&str] = &["nombre", "Nombre"];
const LAST_NAME_ALIASES: &[&str] = &["apellido", "Apellido"];
const ZONE_ALIASES: &[&str] = &["zona", "Zona"];
const PHONE_ALIASES: &[&str] = &["telefono", "Celular", "Celular 📱"];
const BIRTH_DATE_ALIASES: &[&str] = &[
    "fechaNacimiento",
    "Fecha de cumpleaños 🎂",
    "fechaCumpleanos",
];
const LAST_PURCHASE_ALIASES: &[&str] = &["ultimaCompra", "Última compra", "Marca temporal"];
const CONTACTED_ALIASES: &[&str] = &["contactado", "Contactado"];

/// Normaliza o lote inteiro de linhas cruas vindas da planilha.
/// Não consome nem altera a entrada; devolve a coleção canônica nova.
pub fn normalize_rows(rows: &[Value]) -> Vec<Customer> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| normalize_row(row, index))
        .collect()
}

/// Normaliza uma linha. `index` alimenta o fallback posicional do id.
fn normalize_row(row: &Value, index: usize) -> Customer {
    let empty = Map::new();
    let fields = match row.as_object() {
        Some(obj) => obj,
        None => {
            tracing::warn!("Linha {} da planilha não é um objeto; ignorando campos", index);
            &empty
        }
    };

    // Sem nenhum campo de id reconhecível, usamos a posição na planilha
    // (1-based). Único por lote, estável durante a sessão.
    let id = resolve(fields, ID_ALIASES).unwrap_or_else(|| (index + 1).to_string());

    let birth_date = sanitize_date(
        resolve(fields, BIRTH_DATE_ALIASES),
        true,
        &id,
        "fecha de nacimiento",
    );
    let last_purchase = sanitize_date(
        resolve(fields, LAST_PURCHASE_ALIASES),
        false,
        &id,
        "última compra",
    );

    Customer {
        id,
        first_name: resolve(fields, FIRST_NAME_ALIASES).unwrap_or_default(),
        last_name: resolve(fields, LAST_NAME_ALIASES).unwrap_or_default(),
        zone: resolve(fields, ZONE_ALIASES).unwrap_or_default(),
        phone: resolve(fields, PHONE_ALIASES).unwrap_or_default(),
        birth_date,
        last_purchase,
        contacted: resolve(fields, CONTACTED_ALIASES).unwrap_or_default(),
    }
}

/// Resolvedor genérico: percorre os aliases na ordem e devolve o primeiro
/// valor não-vazio. String vazia NÃO conta como match (o alias seguinte
/// ainda pode ter o dado). Números e booleans viram texto; estruturas
/// aninhadas são ignoradas.
fn resolve(fields: &Map<String, Value>, aliases: &[&str]) -> Option<String> {
    for alias in aliases {
        let Some(value) = fields.get(*alias) else {
            continue;
        };
        match value {
            Value::String(s) if !s.trim().is_empty() => return Some(s.clone()),
            Value::Number(n) => return Some(n.to_string()),
            Value::Bool(b) => return Some(b.to_string()),
            _ => {}
        }
    }
    None
}

/// Valida um campo de data. Se não parseia, e for data de nascimento,
/// ainda aceitamos a forma frouxa `d{1,2}/d{1,2}/d{4}` (a planilha tem
/// datas digitadas à mão; a correção de calendário fica para o
/// classificador). O resto vira vazio, com warning.
fn sanitize_date(raw: Option<String>, is_birth: bool, id: &str, field: &str) -> String {
    let Some(raw) = raw else {
        return String::new();
    };

    if dates::parse_date(&raw).is_some() {
        return raw;
    }
    if is_birth && has_loose_dmy_shape(&raw) {
        return raw;
    }

    tracing::warn!(
        "Cliente {}: valor de {} descartado por não parecer data: {:?}",
        id,
        field,
        raw
    );
    String::new()
}

/// Forma frouxa `d{1,2}/d{1,2}/d{4}`: só o desenho, sem checar calendário.
fn has_loose_dmy_shape(raw: &str) -> bool {
    let parts: Vec<&str> = raw.trim().split('/').collect();
    if parts.len() != 3 {
        return false;
    }
    let digits = |s: &str, min: usize, max: usize| {
        (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
    };
    digits(parts[0], 1, 2) && digits(parts[1], 1, 2) && digits(parts[2], 4, 4)
}
