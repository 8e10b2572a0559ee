use anyhow::{bail, Result};

/// Les deux loteries supportées.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LotteryKind {
    /// 双色球 (loterie du bien-être, cwl.gov.cn)
    Ssq,
    /// 大乐透 (loterie sportive, sporttery.cn)
    Dlt,
}

/// Signature structurelle d'une loterie : plages et nombres de boules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSpec {
    pub red_min: u8,
    pub red_max: u8,
    pub red_count: usize,
    pub blue_min: u8,
    pub blue_max: u8,
    pub blue_count: usize,
}

impl LotteryKind {
    pub fn format(&self) -> FormatSpec {
        match self {
            LotteryKind::Ssq => FormatSpec {
                red_min: 1,
                red_max: 33,
                red_count: 6,
                blue_min: 1,
                blue_max: 16,
                blue_count: 1,
            },
            LotteryKind::Dlt => FormatSpec {
                red_min: 1,
                red_max: 35,
                red_count: 5,
                blue_min: 1,
                blue_max: 12,
                blue_count: 2,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LotteryKind::Ssq => "ssq",
            LotteryKind::Dlt => "dlt",
        }
    }

    /// Nom affiché de la loterie.
    pub fn display_name(&self) -> &'static str {
        match self {
            LotteryKind::Ssq => "双色球",
            LotteryKind::Dlt => "大乐透",
        }
    }
}

impl std::str::FromStr for LotteryKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ssq" => Ok(LotteryKind::Ssq),
            "dlt" => Ok(LotteryKind::Dlt),
            other => bail!("Loterie inconnue : '{}' (attendu : ssq ou dlt)", other),
        }
    }
}

impl std::fmt::Display for LotteryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sélection personnelle pour une date calendaire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub red: Vec<u8>,
    pub blue: Vec<u8>,
    pub date: String,
    pub purchased: bool,
}

/// Résultat officiel publié pour une période de tirage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawingResult {
    pub period: u32,
    pub date: String,
    pub red: Vec<u8>,
    pub blue: Vec<u8>,
}

/// Rangs de gain. Le libellé exact dépend de la loterie (voir `label`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrizeTier {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Eighth,
    Ninth,
}

impl PrizeTier {
    /// Libellé officiel du rang. Les rangs à montant fixe (5 yuans)
    /// portent le suffixe d'origine : 六等奖 en 双色球, 九等奖 en 大乐透.
    pub fn label(&self, kind: LotteryKind) -> &'static str {
        match (kind, self) {
            (LotteryKind::Ssq, PrizeTier::Sixth) => "六等奖 5元",
            (LotteryKind::Dlt, PrizeTier::Ninth) => "九等奖 5元",
            (_, PrizeTier::First) => "一等奖",
            (_, PrizeTier::Second) => "二等奖",
            (_, PrizeTier::Third) => "三等奖",
            (_, PrizeTier::Fourth) => "四等奖",
            (_, PrizeTier::Fifth) => "五等奖",
            (_, PrizeTier::Sixth) => "六等奖",
            (_, PrizeTier::Seventh) => "七等奖",
            (_, PrizeTier::Eighth) => "八等奖",
            (_, PrizeTier::Ninth) => "九等奖",
        }
    }
}

/// Vérifie les invariants d'un jeu de numéros pour une loterie donnée :
/// effectifs exacts, plages, unicité, ordre croissant.
pub fn validate_numbers(kind: LotteryKind, red: &[u8], blue: &[u8]) -> Result<()> {
    let spec = kind.format();

    if red.len() != spec.red_count {
        bail!(
            "{} rouges attendus, {} reçus",
            spec.red_count,
            red.len()
        );
    }
    if blue.len() != spec.blue_count {
        bail!(
            "{} bleus attendus, {} reçus",
            spec.blue_count,
            blue.len()
        );
    }
    for &r in red {
        if r < spec.red_min || r > spec.red_max {
            bail!("Rouge {} hors limites ({}-{})", r, spec.red_min, spec.red_max);
        }
    }
    for &b in blue {
        if b < spec.blue_min || b > spec.blue_max {
            bail!("Bleu {} hors limites ({}-{})", b, spec.blue_min, spec.blue_max);
        }
    }
    for w in red.windows(2) {
        if w[0] == w[1] {
            bail!("Rouge en double : {}", w[0]);
        }
        if w[0] > w[1] {
            bail!("Rouges non triés : {} avant {}", w[0], w[1]);
        }
    }
    for w in blue.windows(2) {
        if w[0] == w[1] {
            bail!("Bleu en double : {}", w[0]);
        }
        if w[0] > w[1] {
            bail!("Bleus non triés : {} avant {}", w[0], w[1]);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_ssq() {
        let spec = LotteryKind::Ssq.format();
        assert_eq!((spec.red_min, spec.red_max, spec.red_count), (1, 33, 6));
        assert_eq!((spec.blue_min, spec.blue_max, spec.blue_count), (1, 16, 1));
    }

    #[test]
    fn test_format_dlt() {
        let spec = LotteryKind::Dlt.format();
        assert_eq!((spec.red_min, spec.red_max, spec.red_count), (1, 35, 5));
        assert_eq!((spec.blue_min, spec.blue_max, spec.blue_count), (1, 12, 2));
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!(LotteryKind::from_str("ssq").unwrap(), LotteryKind::Ssq);
        assert_eq!(LotteryKind::from_str("dlt").unwrap(), LotteryKind::Dlt);
        assert!(LotteryKind::from_str("loto").is_err());
        assert!(LotteryKind::from_str("").is_err());
    }

    #[test]
    fn test_kind_roundtrip() {
        for kind in [LotteryKind::Ssq, LotteryKind::Dlt] {
            assert_eq!(LotteryKind::from_str(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn test_tier_labels() {
        assert_eq!(PrizeTier::First.label(LotteryKind::Ssq), "一等奖");
        assert_eq!(PrizeTier::First.label(LotteryKind::Dlt), "一等奖");
        assert_eq!(PrizeTier::Sixth.label(LotteryKind::Ssq), "六等奖 5元");
        assert_eq!(PrizeTier::Sixth.label(LotteryKind::Dlt), "六等奖");
        assert_eq!(PrizeTier::Ninth.label(LotteryKind::Dlt), "九等奖 5元");
    }

    #[test]
    fn test_validate_ok() {
        assert!(validate_numbers(LotteryKind::Ssq, &[1, 2, 3, 4, 5, 6], &[16]).is_ok());
        assert!(validate_numbers(LotteryKind::Dlt, &[4, 9, 17, 30, 33], &[5, 9]).is_ok());
    }

    #[test]
    fn test_validate_wrong_count() {
        assert!(validate_numbers(LotteryKind::Ssq, &[1, 2, 3, 4, 5], &[16]).is_err());
        assert!(validate_numbers(LotteryKind::Dlt, &[4, 9, 17, 30, 33], &[5]).is_err());
    }

    #[test]
    fn test_validate_out_of_range() {
        assert!(validate_numbers(LotteryKind::Ssq, &[1, 2, 3, 4, 5, 34], &[16]).is_err());
        assert!(validate_numbers(LotteryKind::Ssq, &[1, 2, 3, 4, 5, 6], &[17]).is_err());
        assert!(validate_numbers(LotteryKind::Dlt, &[0, 9, 17, 30, 33], &[5, 9]).is_err());
        assert!(validate_numbers(LotteryKind::Dlt, &[4, 9, 17, 30, 33], &[5, 13]).is_err());
    }

    #[test]
    fn test_validate_duplicates() {
        assert!(validate_numbers(LotteryKind::Ssq, &[1, 1, 3, 4, 5, 6], &[16]).is_err());
        assert!(validate_numbers(LotteryKind::Dlt, &[4, 9, 17, 30, 33], &[5, 5]).is_err());
    }

    #[test]
    fn test_validate_unsorted() {
        assert!(validate_numbers(LotteryKind::Ssq, &[2, 1, 3, 4, 5, 6], &[16]).is_err());
        assert!(validate_numbers(LotteryKind::Dlt, &[4, 9, 17, 30, 33], &[9, 5]).is_err());
    }
}
