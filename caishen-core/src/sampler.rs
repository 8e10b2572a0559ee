use anyhow::{bail, Result};

use crate::rng::SeededRandom;

/// Tire `count` entiers distincts dans [min, max], triés croissant.
///
/// Technique du pot rétrécissant : le pot contient tous les candidats
/// restants, chaque tirage indexe le pot COURANT puis retire la valeur
/// (retrait avec conservation de l'ordre). Exactement `count` tirages sont
/// consommés sur le flux — c'est ce qui rend le ticket complet
/// reproductible pour une graine donnée.
pub fn sample_unique(
    random: &mut SeededRandom,
    min: u8,
    max: u8,
    count: usize,
) -> Result<Vec<u8>> {
    if min > max {
        bail!("Plage invalide : [{}, {}]", min, max);
    }
    let pool_size = max as usize - min as usize + 1;
    if count > pool_size {
        bail!(
            "Tirage impossible : {} numéros demandés dans [{}, {}] ({} disponibles)",
            count,
            min,
            max,
            pool_size
        );
    }

    let mut pool: Vec<u8> = (min..=max).collect();
    let mut numbers = Vec::with_capacity(count);

    for _ in 0..count {
        let idx = random.next_int(0, (pool.len() - 1) as u32) as usize;
        numbers.push(pool.remove(idx));
    }

    numbers.sort();
    Ok(numbers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_properties() {
        // Bornes, unicité et tri sur un éventail de graines.
        for seed in 0..200u64 {
            let mut rng = SeededRandom::new(seed);
            let numbers = sample_unique(&mut rng, 1, 33, 6).unwrap();
            assert_eq!(numbers.len(), 6);
            for w in numbers.windows(2) {
                assert!(w[0] < w[1], "non trié ou doublon : {:?}", numbers);
            }
            for &n in &numbers {
                assert!((1..=33).contains(&n), "hors limites : {}", n);
            }
        }
    }

    #[test]
    fn test_sample_full_range() {
        // count == taille de la plage : toute la plage, chaque valeur une fois.
        let mut rng = SeededRandom::new(7);
        let numbers = sample_unique(&mut rng, 1, 5, 5).unwrap();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_sample_insufficient_range() {
        let mut rng = SeededRandom::new(1);
        assert!(sample_unique(&mut rng, 1, 5, 6).is_err());
        let mut rng = SeededRandom::new(1);
        assert!(sample_unique(&mut rng, 3, 2, 1).is_err());
    }

    #[test]
    fn test_sample_zero_count() {
        let mut rng = SeededRandom::new(1);
        assert_eq!(sample_unique(&mut rng, 1, 10, 0).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_sample_consumes_exactly_count_draws() {
        // Le flux doit avancer d'exactement `count` tirages : un témoin
        // avancé à la main de 6 tirages donne ensuite la même valeur.
        let mut sampled = SeededRandom::new(2642);
        sample_unique(&mut sampled, 1, 33, 6).unwrap();

        let mut manual = SeededRandom::new(2642);
        for _ in 0..6 {
            manual.next();
        }

        assert_eq!(sampled.next_int(1, 16), manual.next_int(1, 16));
    }

    #[test]
    fn test_sample_deterministic() {
        let mut a = SeededRandom::new(2713);
        let mut b = SeededRandom::new(2713);
        assert_eq!(
            sample_unique(&mut a, 1, 35, 5).unwrap(),
            sample_unique(&mut b, 1, 35, 5).unwrap()
        );
    }

    #[test]
    fn test_sample_single_value_pool() {
        let mut rng = SeededRandom::new(42);
        assert_eq!(sample_unique(&mut rng, 9, 9, 1).unwrap(), vec![9]);
    }
}
