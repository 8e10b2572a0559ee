use chrono::{Duration, Local, NaiveDate};

/// Date du jour au format YYYY-MM-DD (heure locale).
pub fn today_string() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Abrège une date YYYY-MM-DD en MM-DD pour les tableaux d'historique.
/// Une date non analysable est rendue telle quelle.
pub fn format_date_short(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d.format("%m-%d").to_string(),
        Err(_) => date.to_string(),
    }
}

pub fn is_today(date: &str) -> bool {
    date == today_string()
}

/// Écart signé en jours entre deux dates YYYY-MM-DD (`to - from`), ou
/// None si l'une des deux n'est pas analysable.
pub fn days_between(from: &str, to: &str) -> Option<i64> {
    let from = NaiveDate::parse_from_str(from, "%Y-%m-%d").ok()?;
    let to = NaiveDate::parse_from_str(to, "%Y-%m-%d").ok()?;
    Some((to - from).num_days())
}

/// Date d'il y a `days` jours, au format YYYY-MM-DD. Sert de borne de
/// rétention pour l'historique (comparaison lexicographique).
pub fn days_ago_string(days: i64) -> String {
    (Local::now().date_naive() - Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_today_string_shape() {
        let today = today_string();
        assert_eq!(today.len(), 10);
        assert!(NaiveDate::parse_from_str(&today, "%Y-%m-%d").is_ok());
    }

    #[test]
    fn test_format_date_short() {
        assert_eq!(format_date_short("2024-01-01"), "01-01");
        assert_eq!(format_date_short("2025-08-21"), "08-21");
    }

    #[test]
    fn test_format_date_short_unparseable() {
        assert_eq!(format_date_short("n/a"), "n/a");
    }

    #[test]
    fn test_is_today() {
        assert!(is_today(&today_string()));
        assert!(!is_today("1999-12-31"));
    }

    #[test]
    fn test_days_between() {
        assert_eq!(days_between("2024-01-01", "2024-01-08"), Some(7));
        assert_eq!(days_between("2024-01-08", "2024-01-01"), Some(-7));
        assert_eq!(days_between("2024-01-01", "2024-01-01"), Some(0));
        assert_eq!(days_between("n/a", "2024-01-01"), None);
    }

    #[test]
    fn test_days_ago_ordering() {
        // Les chaînes YYYY-MM-DD se comparent comme les dates.
        assert!(days_ago_string(30) < today_string());
        assert_eq!(days_ago_string(0), today_string());
    }
}
