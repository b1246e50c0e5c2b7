// src/models/customer.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// --- CLIENTE (forma canônica, pós-normalização) ---
//
// Tudo vem da planilha como texto. Mantemos String em todos os campos e
// deixamos a interpretação (datas, "contactado") para as funções puras
// dos services. `id` é a chave dos patches otimistas, única por lote.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[schema(example = "7")]
    pub id: String,

    #[schema(example = "Ana")]
    pub first_name: String,
    #[schema(example = "García")]
    pub last_name: String,

    // Zona usada para segmentação e filtro facetado
    #[schema(example = "Centro")]
    pub zone: String,

    // Guardamos o telefone como veio; só normalizamos na hora de montar
    // o link de WhatsApp
    #[schema(example = "3511234567")]
    pub phone: String,

    // Vazio, ou texto de data já validado pelo normalizador
    #[schema(example = "05/03/1990")]
    pub birth_date: String,

    // Última venda; para clientes novos sem compra, é a data de registro
    #[schema(example = "2024-06-01")]
    pub last_purchase: String,

    // Texto livre da planilha ("Sí", "Yes", vazio...). Ver `parse_bool_like`.
    #[schema(example = "Sí")]
    pub contacted: String,
}

impl Customer {
    /// O cliente já foi contactado? Só `BoolLike::True` conta.
    pub fn is_contacted(&self) -> bool {
        parse_bool_like(&self.contacted) == BoolLike::True
    }
}

// --- FLAG "CONTACTADO" ---

// A planilha não tem boolean de verdade: a coluna traz "Sí", "Yes", "S",
// vazio... Em vez de espalhar checks de string, interpretamos uma vez só
// em tri-estado explícito (vazio não é o mesmo que "No").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolLike {
    True,
    False,
    Unknown,
}

/// Interpreta o texto livre da coluna de contato.
/// Vazio/espaços → `Unknown`; o conjunto de valores verdadeiros
/// (case-insensitive) → `True`; qualquer outro texto → `False`.
pub fn parse_bool_like(raw: &str) -> BoolLike {
    let value = raw.trim();
    if value.is_empty() {
        return BoolLike::Unknown;
    }

    const TRUTHY: &[&str] = &["sí", "si", "yes", "true", "s", "y", "1"];
    if TRUTHY.contains(&value.to_lowercase().as_str()) {
        BoolLike::True
    } else {
        BoolLike::False
    }
}
