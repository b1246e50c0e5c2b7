// src/services/segments.rs

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Customer;
use crate::services::dates;

// =============================================================================
//  VISTAS DE SEGMENTAÇÃO
// =============================================================================
//
// Projeções read-only derivadas da coleção canônica. Nada aqui guarda estado:
// recalculamos a cada chamada, então um patch na coleção aparece em todas as
// vistas na hora.

/// Quantos clientes novos mostramos no máximo na vista de pendentes.
const NEW_CUSTOMERS_CAP: usize = 50;

/// Entrada enriquecida da vista de clientes novos: além do cliente, o texto
/// pronto de "registrado há quanto tempo" e o destaque de recente.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomerEntry {
    #[serde(flatten)]
    pub customer: Customer,

    /// Dias desde o registro; `null` = sem data conhecida (≠ de zero!)
    #[schema(example = 3)]
    pub days_since_registration: Option<i64>,

    /// Rótulo em espanhol pronto para exibir ("Hoy", "Hace 3 días"...)
    #[schema(example = "Hace 3 días")]
    pub registered_label: String,

    /// Registrado há 7 dias ou menos: ganha o selo "Nuevo esta semana"
    pub is_recent: bool,
}

/// Aniversariantes do dia, na ordem original da coleção.
pub fn birthdays_today(customers: &[Customer], today: NaiveDate) -> Vec<Customer> {
    customers
        .iter()
        .filter(|c| dates::is_birthday(&c.birth_date, today))
        .cloned()
        .collect()
}

/// Clientes novos ainda não contactados.
///
/// Regra, nesta ordem: só quem tem data de registro/compra; mais recentes
/// primeiro (data ilegível vai para o fim, sem quebrar); corta nos 50 mais
/// novos; e só então tira os já contactados. Determinístico para uma mesma
/// coleção: a ordenação é estável e não há estado próprio.
pub fn newest_uncontacted(customers: &[Customer], today: NaiveDate) -> Vec<NewCustomerEntry> {
    let mut candidates: Vec<&Customer> = customers
        .iter()
        .filter(|c| !c.last_purchase.trim().is_empty())
        .collect();

    candidates.sort_by(|a, b| {
        match (
            dates::parse_date(&a.last_purchase),
            dates::parse_date(&b.last_purchase),
        ) {
            (Some(da), Some(db)) => db.cmp(&da), // descendente
            (Some(_), None) => Ordering::Less,   // ilegível para o fim
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
    candidates.truncate(NEW_CUSTOMERS_CAP);

    candidates
        .into_iter()
        .filter(|c| !c.is_contacted())
        .map(|c| {
            let days = dates::days_since(&c.last_purchase, today);
            NewCustomerEntry {
                customer: c.clone(),
                days_since_registration: days,
                registered_label: registration_label(days),
                is_recent: matches!(days, Some(d) if d <= 7),
            }
        })
        .collect()
}

/// Zonas únicas, não-vazias, na ordem de primeira aparição. Alimenta o
/// seletor de zona do filtro facetado.
pub fn unique_zones(customers: &[Customer]) -> Vec<String> {
    let mut zones: Vec<String> = Vec::new();
    for customer in customers {
        let zone = customer.zone.trim();
        if !zone.is_empty() && !zones.iter().any(|z| z == zone) {
            zones.push(zone.to_string());
        }
    }
    zones
}

/// Texto de "registrado há quanto tempo", em espanhol.
/// `None` é "Sin registro", nunca confundir com zero dias ("Hoy").
fn registration_label(days: Option<i64>) -> String {
    match days {
        None => "Sin registro".to_string(),
        Some(0) => "Hoy".to_string(),
        Some(1) => "Ayer".to_string(),
        Some(d) if d < 7 => format!("Hace {d} días"),
        Some(d) if d < 14 => "Hace 1 semana".to_string(),
        Some(d) if d < 30 => format!("Hace {} semanas", d / 7),
        Some(_) => "Hace +1 mes".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(id: &str, birth: &str, purchase: &str, contacted: &str) -> Customer {
        Customer {
            id: id.into(),
            first_name: format!("Cliente {id}"),
            last_name: String::new(),
            zone: String::new(),
            phone: String::new(),
            birth_date: birth.into(),
            last_purchase: purchase.into(),
            contacted: contacted.into(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // -------------------------------------------------------------------------
    // birthdays_today
    // -------------------------------------------------------------------------

    #[test]
    fn birthday_view_matches_on_march_5_but_not_march_6() {
        let customers = vec![customer("7", "05/03/1990", "", "")];

        let on_the_day = birthdays_today(&customers, date(2025, 3, 5));
        assert_eq!(on_the_day.len(), 1);
        assert_eq!(on_the_day[0].id, "7");

        assert!(birthdays_today(&customers, date(2025, 3, 6)).is_empty());
    }

    #[test]
    fn birthday_view_skips_customers_without_birth_date() {
        let customers = vec![customer("1", "", "", "")];
        assert!(birthdays_today(&customers, date(2025, 3, 5)).is_empty());
    }

    // -------------------------------------------------------------------------
    // newest_uncontacted
    // -------------------------------------------------------------------------

    #[test]
    fn newest_first_and_contacted_excluded() {
        let customers = vec![
            customer("1", "", "2024-05-01", ""),
            customer("2", "", "2024-06-01", ""),
            customer("3", "", "2024-06-10", "Sí"),
            customer("4", "", "", ""), // sem registro: fora
        ];
        let view = newest_uncontacted(&customers, date(2024, 6, 11));
        let ids: Vec<&str> = view.iter().map(|e| e.customer.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn cap_applies_before_contacted_filter() {
        // 60 clientes: os 50 mais recentes entram no corte; os 10 mais
        // antigos ficam de fora mesmo sem contactar
        let mut customers: Vec<Customer> = (1..=60)
            .map(|i| customer(&i.to_string(), "", "", ""))
            .collect();
        // datas distintas e crescentes (jan → mar)
        for (i, c) in customers.iter_mut().enumerate() {
            c.last_purchase = format!("2024-{:02}-{:02}", (i / 28) + 1, (i % 28) + 1);
        }
        let view = newest_uncontacted(&customers, date(2024, 6, 1));
        assert_eq!(view.len(), 50);
        // o mais novo do lote é o último índice
        assert_eq!(view[0].customer.id, "60");
    }

    #[test]
    fn unparseable_dates_sort_last_without_panicking() {
        let customers = vec![
            customer("1", "", "no es fecha", ""),
            customer("2", "", "2024-06-01", ""),
        ];
        let view = newest_uncontacted(&customers, date(2024, 6, 2));
        let ids: Vec<&str> = view.iter().map(|e| e.customer.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
        assert_eq!(view[1].days_since_registration, None);
        assert_eq!(view[1].registered_label, "Sin registro");
    }

    #[test]
    fn view_is_deterministic_for_the_same_collection() {
        let customers = vec![
            customer("1", "", "2024-06-01", ""),
            customer("2", "", "2024-06-01", ""),
            customer("3", "", "2024-05-20", ""),
        ];
        let first = newest_uncontacted(&customers, date(2024, 6, 2));
        let second = newest_uncontacted(&customers, date(2024, 6, 2));
        let ids =
            |v: &[NewCustomerEntry]| v.iter().map(|e| e.customer.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&first), ids(&second));
        // empate de data mantém a ordem original (sort estável)
        assert_eq!(ids(&first), vec!["1", "2", "3"]);
    }

    #[test]
    fn recent_badge_within_seven_days() {
        let customers = vec![
            customer("1", "", "2024-06-01", ""),
            customer("2", "", "2024-05-01", ""),
        ];
        let view = newest_uncontacted(&customers, date(2024, 6, 5));
        assert!(view[0].is_recent);
        assert!(!view[1].is_recent);
    }

    // -------------------------------------------------------------------------
    // rótulos e zonas
    // -------------------------------------------------------------------------

    #[test]
    fn registration_labels_in_spanish() {
        assert_eq!(registration_label(None), "Sin registro");
        assert_eq!(registration_label(Some(0)), "Hoy");
        assert_eq!(registration_label(Some(1)), "Ayer");
        assert_eq!(registration_label(Some(3)), "Hace 3 días");
        assert_eq!(registration_label(Some(10)), "Hace 1 semana");
        assert_eq!(registration_label(Some(21)), "Hace 3 semanas");
        assert_eq!(registration_label(Some(45)), "Hace +1 mes");
    }

    #[test]
    fn unique_zones_in_first_appearance_order() {
        let mut customers = vec![
            customer("1", "", "", ""),
            customer("2", "", "", ""),
            customer("3", "", "", ""),
            customer("4", "", "", ""),
        ];
        customers[0].zone = "Centro".into();
        customers[1].zone = "Norte".into();
        customers[2].zone = "Centro".into();
        customers[3].zone = "".into();

        assert_eq!(unique_zones(&customers), vec!["Centro", "Norte"]);
    }
}
