// src/services/filter.rs

use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::models::Customer;
use crate::services::dates;

// =============================================================================
//  MOTOR DE FILTRO / BUSCA
// =============================================================================

/// Especificação combinada de filtro. Campo ausente/vazio = sem restrição.
/// As três dimensões se combinam com AND.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CustomerFilter {
    /// Texto livre: nome, sobrenome ou telefone (ver regras de dígitos)
    pub q: Option<String>,
    /// Igualdade exata com a zona do cliente
    pub zone: Option<String>,
    /// Mínimo de dias desde a última compra (clientes sem compra sempre passam)
    pub min_days_since_purchase: Option<i64>,
}

/// Aplica o filtro sobre a coleção canônica, preservando a ordem relativa
/// original. Campo faltando/estragado nunca derruba nada: ausência não exclui.
pub fn apply(customers: &[Customer], filter: &CustomerFilter, today: NaiveDate) -> Vec<Customer> {
    let term = filter
        .q
        .as_deref()
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());
    let zone = filter
        .zone
        .as_deref()
        .map(str::trim)
        .filter(|z| !z.is_empty());

    customers
        .iter()
        .filter(|customer| {
            if let Some(term) = &term {
                if !matches_text(customer, term) {
                    return false;
                }
            }
            if let Some(zone) = zone {
                if customer.zone != zone {
                    return false;
                }
            }
            if let Some(min_days) = filter.min_days_since_purchase {
                // Sem data de compra (ou data ilegível) = elegível, não excluído
                if let Some(days) = dates::days_since(&customer.last_purchase, today) {
                    if days < min_days {
                        return false;
                    }
                }
            }
            true
        })
        .cloned()
        .collect()
}

/// Match de texto: nome contém, OU sobrenome contém, OU o telefone bate
/// pelas regras de dígitos. `term` já chega trimado e em minúsculas.
fn matches_text(customer: &Customer, term: &str) -> bool {
    if customer.first_name.to_lowercase().contains(term)
        || customer.last_name.to_lowercase().contains(term)
    {
        return true;
    }

    // Comparação só-dígitos: "351-123.4567" e "4567" viram dígitos puros.
    // Termo curto (≤ 4 dígitos) também bate pelo final do número, que é
    // como o staff procura: pelos últimos 4 dígitos.
    let term_digits = digits_only(term);
    if term_digits.is_empty() {
        return false;
    }
    let phone_digits = digits_only(&customer.phone);

    if phone_digits.contains(&term_digits) {
        return true;
    }
    term_digits.len() <= 4 && phone_digits.ends_with(&term_digits)
}

pub(crate) fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(id: &str, first: &str, last: &str, zone: &str, phone: &str) -> Customer {
        Customer {
            id: id.into(),
            first_name: first.into(),
            last_name: last.into(),
            zone: zone.into(),
            phone: phone.into(),
            birth_date: String::new(),
            last_purchase: String::new(),
            contacted: String::new(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()
    }

    #[test]
    fn empty_filter_matches_all_preserving_order() {
        let customers = vec![
            customer("1", "Ana", "García", "Centro", ""),
            customer("2", "Berta", "López", "Norte", ""),
        ];
        let result = apply(&customers, &CustomerFilter::default(), today());
        assert_eq!(result, customers);
    }

    #[test]
    fn text_filter_matches_name_case_insensitive() {
        let customers = vec![
            customer("1", "Ana", "García", "", ""),
            customer("2", "Berta", "López", "", ""),
        ];
        let filter = CustomerFilter {
            q: Some("  aNa ".into()),
            ..Default::default()
        };
        let result = apply(&customers, &filter, today());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "1");
    }

    #[test]
    fn text_filter_matches_last_name() {
        let customers = vec![customer("1", "Ana", "García", "", "")];
        let filter = CustomerFilter {
            q: Some("garc".into()),
            ..Default::default()
        };
        assert_eq!(apply(&customers, &filter, today()).len(), 1);
    }

    #[test]
    fn phone_search_by_trailing_four_digits() {
        let customers = vec![customer("1", "Ana", "", "", "3511234567")];
        let filter = CustomerFilter {
            q: Some("4567".into()),
            ..Default::default()
        };
        assert_eq!(apply(&customers, &filter, today()).len(), 1);
    }

    #[test]
    fn phone_search_by_substring_containment() {
        let customers = vec![customer("1", "Ana", "", "", "3511234567")];
        let filter = CustomerFilter {
            q: Some("11234".into()),
            ..Default::default()
        };
        assert_eq!(apply(&customers, &filter, today()).len(), 1);
    }

    #[test]
    fn phone_search_ignores_formatting_noise() {
        let customers = vec![customer("1", "Ana", "", "", "(351) 123-4567")];
        let filter = CustomerFilter {
            q: Some("4567".into()),
            ..Default::default()
        };
        assert_eq!(apply(&customers, &filter, today()).len(), 1);
    }

    #[test]
    fn zone_filter_is_exact_equality() {
        let customers = vec![
            customer("1", "Ana", "", "Centro", ""),
            customer("2", "Berta", "", "Centro Norte", ""),
        ];
        let filter = CustomerFilter {
            zone: Some("Centro".into()),
            ..Default::default()
        };
        let result = apply(&customers, &filter, today());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "1");
    }

    #[test]
    fn recency_filter_keeps_only_old_enough_purchases() {
        // hoy = 2024-06-02: la del 01/01 tiene 153 días, la del 01/06 tiene 1
        let mut a = customer("1", "Ana", "", "", "");
        a.last_purchase = "2024-01-01".into();
        let mut b = customer("2", "Berta", "", "", "");
        b.last_purchase = "2024-06-01".into();

        let filter = CustomerFilter {
            min_days_since_purchase: Some(90),
            ..Default::default()
        };
        let result = apply(&[a, b], &filter, today());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "1");
    }

    #[test]
    fn recency_filter_never_excludes_customers_without_purchase() {
        let no_purchase = customer("1", "Ana", "", "", "");
        let filter = CustomerFilter {
            min_days_since_purchase: Some(365),
            ..Default::default()
        };
        assert_eq!(apply(&[no_purchase], &filter, today()).len(), 1);
    }

    #[test]
    fn dimensions_combine_with_and() {
        let mut a = customer("1", "Ana", "", "Centro", "");
        a.last_purchase = "2024-01-01".into();
        let mut b = customer("2", "Ana", "", "Norte", "");
        b.last_purchase = "2024-01-01".into();

        let filter = CustomerFilter {
            q: Some("ana".into()),
            zone: Some("Centro".into()),
            min_days_since_purchase: Some(90),
        };
        let result = apply(&[a, b], &filter, today());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "1");
    }
}
