use anyhow::Result;

use crate::date::today_string;
use crate::models::{LotteryKind, Ticket};
use crate::rng::{daily_seed, SeededRandom};
use crate::sampler::sample_unique;

/// Génère le ticket du jour pour une date donnée.
///
/// Un seul flux aléatoire, graine dérivée de la date : les rouges sont
/// tirés d'abord, les bleus ensuite sur le flux CONTINUÉ (pas de nouvelle
/// graine). Cet ordre fait partie du contrat de déterminisme — l'inverser
/// changerait les numéros attribués à chaque pot.
pub fn generate_for_date(kind: LotteryKind, date: &str) -> Result<Ticket> {
    let spec = kind.format();
    let mut random = SeededRandom::new(daily_seed(date));

    let red = sample_unique(&mut random, spec.red_min, spec.red_max, spec.red_count)?;
    let blue = sample_unique(&mut random, spec.blue_min, spec.blue_max, spec.blue_count)?;

    Ok(Ticket {
        red,
        blue,
        date: date.to_string(),
        purchased: false,
    })
}

/// Ticket du jour courant (horloge locale).
pub fn generate_today(kind: LotteryKind) -> Result<Ticket> {
    generate_for_date(kind, &today_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::validate_numbers;

    #[test]
    fn test_ssq_reference_ticket() {
        let ticket = generate_for_date(LotteryKind::Ssq, "2024-01-01").unwrap();
        assert_eq!(ticket.red, vec![6, 8, 12, 19, 27, 29]);
        assert_eq!(ticket.blue, vec![3]);
        assert_eq!(ticket.date, "2024-01-01");
        assert!(!ticket.purchased);
    }

    #[test]
    fn test_dlt_reference_ticket() {
        let ticket = generate_for_date(LotteryKind::Dlt, "2024-01-01").unwrap();
        assert_eq!(ticket.red, vec![7, 13, 20, 29, 30]);
        assert_eq!(ticket.blue, vec![2, 3]);
    }

    #[test]
    fn test_generate_deterministic() {
        for kind in [LotteryKind::Ssq, LotteryKind::Dlt] {
            let a = generate_for_date(kind, "2025-08-21").unwrap();
            let b = generate_for_date(kind, "2025-08-21").unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_generated_tickets_valid() {
        for kind in [LotteryKind::Ssq, LotteryKind::Dlt] {
            for day in 1..=28 {
                let date = format!("2024-02-{:02}", day);
                let ticket = generate_for_date(kind, &date).unwrap();
                validate_numbers(kind, &ticket.red, &ticket.blue).unwrap();
            }
        }
    }

    #[test]
    fn test_formats_share_seed_but_not_numbers() {
        // Même date, même graine, mais plages différentes : les tickets
        // des deux loteries divergent dès le premier tirage.
        let ssq = generate_for_date(LotteryKind::Ssq, "2024-01-01").unwrap();
        let dlt = generate_for_date(LotteryKind::Dlt, "2024-01-01").unwrap();
        assert_ne!(ssq.red, dlt.red);
    }

    #[test]
    fn test_generate_today_matches_for_date() {
        let today = crate::date::today_string();
        let a = generate_today(LotteryKind::Ssq).unwrap();
        let b = generate_for_date(LotteryKind::Ssq, &today).unwrap();
        assert_eq!(a, b);
    }
}
