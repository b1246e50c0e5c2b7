// src/services/dates.rs

use chrono::{DateTime, Datelike, NaiveDate};

// =============================================================================
//  CLASSIFICADOR DE DATAS
// =============================================================================
//
// A planilha mistura formatos: "05/03/1990", "2024-06-01", carimbos com hora,
// texto livre... Tudo aqui é função pura com o "hoje" injetado, para os
// testes não dependerem do relógio.

/// Interpreta o texto de data da planilha.
///
/// Política, nesta ordem:
/// - contém `/` → dia/mês/ano (escolha de localidade: NUNCA mês/dia/ano);
/// - contém `-` → data de calendário estilo ISO (aceita carimbo com hora,
///   fica só a parte da data);
/// - caso contrário → tentativa genérica (RFC 2822).
///
/// Qualquer coisa que não encaixe vira `None`, nunca pânico.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if raw.contains('/') {
        let parts: Vec<&str> = raw.split('/').collect();
        if parts.len() != 3 {
            return None;
        }
        let day: u32 = parts[0].trim().parse().ok()?;
        let month: u32 = parts[1].trim().parse().ok()?;
        let year: i32 = parts[2].trim().parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if raw.contains('-') {
        // "2024-06-01", "2024-06-01T10:30:00Z", "2024-06-01 10:30:00"
        let token = raw
            .split(['T', ' '])
            .next()
            .unwrap_or(raw);
        return NaiveDate::parse_from_str(token, "%Y-%m-%d").ok();
    }

    DateTime::parse_from_rfc2822(raw).map(|dt| dt.date_naive()).ok()
}

/// O aniversário cai hoje? Só dia e mês contam; o ano é ignorado.
///
/// Caso 29/02: em ano não bissexto, o aniversário é comemorado em 01/03.
/// Data inválida nunca é aniversário.
pub fn is_birthday(raw: &str, today: NaiveDate) -> bool {
    let Some(birth) = parse_date(raw) else {
        return false;
    };

    if birth.month() == 2 && birth.day() == 29 && !is_leap_year(today.year()) {
        return today.month() == 3 && today.day() == 1;
    }

    birth.day() == today.day() && birth.month() == today.month()
}

/// Dias corridos entre a data registrada e hoje (truncamento por dia de
/// calendário). Negativo se a data está no futuro; preservamos o sinal.
/// `None` significa "desconhecido", que é diferente de zero para todo mundo
/// que consome isso (filtro de recência, rótulos, destaque visual).
pub fn days_since(raw: &str, today: NaiveDate) -> Option<i64> {
    parse_date(raw).map(|date| (today - date).num_days())
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // -------------------------------------------------------------------------
    // parse_date
    // -------------------------------------------------------------------------

    #[test]
    fn parse_date_slash_is_day_month_year() {
        // 05/03 é 5 de março, não 3 de maio
        assert_eq!(parse_date("05/03/1990"), Some(date(1990, 3, 5)));
        assert_eq!(parse_date("5/3/1990"), Some(date(1990, 3, 5)));
    }

    #[test]
    fn parse_date_iso() {
        assert_eq!(parse_date("2024-06-01"), Some(date(2024, 6, 1)));
    }

    #[test]
    fn parse_date_iso_with_time_keeps_calendar_day() {
        assert_eq!(parse_date("2024-06-01T23:59:00Z"), Some(date(2024, 6, 1)));
        assert_eq!(parse_date("2024-06-01 10:30:00"), Some(date(2024, 6, 1)));
    }

    #[test]
    fn parse_date_garbage_is_none() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("mañana"), None);
        assert_eq!(parse_date("31/02/1990"), None); // forma válida, calendário não
        assert_eq!(parse_date("05/03"), None);
    }

    // -------------------------------------------------------------------------
    // is_birthday
    // -------------------------------------------------------------------------

    #[test]
    fn is_birthday_matches_day_and_month_ignoring_year() {
        assert!(is_birthday("05/03/1990", date(2024, 3, 5)));
        assert!(is_birthday("05/03/1955", date(2024, 3, 5)));
        assert!(!is_birthday("05/03/1990", date(2024, 3, 6)));
    }

    #[test]
    fn is_birthday_false_for_unparseable() {
        assert!(!is_birthday("", date(2024, 3, 5)));
        assert!(!is_birthday("???", date(2024, 3, 5)));
    }

    #[test]
    fn is_birthday_feb_29_falls_on_mar_1_in_common_years() {
        assert!(is_birthday("29/02/1992", date(2023, 3, 1)));
        assert!(!is_birthday("29/02/1992", date(2023, 2, 28)));
        // Em ano bissexto, só no próprio 29/02
        assert!(is_birthday("29/02/1992", date(2024, 2, 29)));
        assert!(!is_birthday("29/02/1992", date(2024, 3, 1)));
    }

    // -------------------------------------------------------------------------
    // days_since
    // -------------------------------------------------------------------------

    #[test]
    fn days_since_counts_calendar_days() {
        assert_eq!(days_since("2024-06-01", date(2024, 6, 2)), Some(1));
        assert_eq!(days_since("2024-06-01", date(2024, 6, 1)), Some(0));
        assert_eq!(days_since("2024-01-01", date(2024, 6, 2)), Some(153));
    }

    #[test]
    fn days_since_future_date_is_negative_not_clamped() {
        assert_eq!(days_since("2024-06-10", date(2024, 6, 2)), Some(-8));
    }

    #[test]
    fn days_since_unknown_is_none_not_zero() {
        assert_eq!(days_since("", date(2024, 6, 2)), None);
        assert_eq!(days_since("sin fecha", date(2024, 6, 2)), None);
    }
}
