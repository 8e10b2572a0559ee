use chrono::{Datelike, Local, NaiveDate};

// Panneau décoratif : aucune interaction avec les tirages. Tout est dérivé
// arithmétiquement de la date grégorienne — l'année sexagénaire réelle
// bascule au nouvel an lunaire, pas au 1er janvier, donc les premières
// semaines de l'année portent l'animal de l'année précédente.

const ANIMALS: [(&str, &str); 12] = [
    ("鼠", "🐭"),
    ("牛", "🐮"),
    ("虎", "🐯"),
    ("兔", "🐰"),
    ("龙", "🐲"),
    ("蛇", "🐍"),
    ("马", "🐴"),
    ("羊", "🐑"),
    ("猴", "🐵"),
    ("鸡", "🐔"),
    ("狗", "🐶"),
    ("猪", "🐷"),
];

const STEMS: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];
const BRANCHES: [&str; 12] = ["子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥"];

// Lignes 宜/忌 de l'almanach, choisies par jour de l'année.
const ALMANAC: [(&str, &str); 8] = [
    ("祈福", "出行"),
    ("开市", "动土"),
    ("嫁娶", "安葬"),
    ("出行", "开市"),
    ("安床", "嫁娶"),
    ("动土", "祈福"),
    ("纳财", "安床"),
    ("入宅", "纳财"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZodiacInfo {
    pub name: &'static str,
    pub icon: &'static str,
}

/// Calendrier zodiacal construit explicitement pour une date donnée et
/// passé tel quel à l'affichage — pas d'état global paresseux.
pub struct ZodiacCalendar {
    year: i32,
    day_of_year: u32,
}

impl ZodiacCalendar {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            day_of_year: date.ordinal(),
        }
    }

    pub fn today() -> Self {
        Self::for_date(Local::now().date_naive())
    }

    /// Animal de l'année : (année - 4) mod 12, 1984 étant une année 鼠.
    pub fn zodiac(&self) -> ZodiacInfo {
        let idx = (self.year - 4).rem_euclid(12) as usize;
        let (name, icon) = ANIMALS[idx];
        ZodiacInfo { name, icon }
    }

    /// Nom sexagénaire de l'année, ex. « 乙巳年 ».
    pub fn year_name(&self) -> String {
        let stem = STEMS[(self.year - 4).rem_euclid(10) as usize];
        let branch = BRANCHES[(self.year - 4).rem_euclid(12) as usize];
        format!("{}{}年", stem, branch)
    }

    /// Ligne 宜/忌 du jour, stable pour une même date.
    pub fn almanac_line(&self) -> String {
        let (suit, avoid) = ALMANAC[self.day_of_year as usize % ALMANAC.len()];
        format!("宜：{} 忌：{}", suit, avoid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calendar(date: &str) -> ZodiacCalendar {
        ZodiacCalendar::for_date(NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap())
    }

    #[test]
    fn test_zodiac_known_years() {
        assert_eq!(calendar("2024-06-01").zodiac().name, "龙");
        assert_eq!(calendar("2025-06-01").zodiac().name, "蛇");
        assert_eq!(calendar("1984-06-01").zodiac().name, "鼠");
    }

    #[test]
    fn test_zodiac_icon_matches_name() {
        let info = calendar("2024-06-01").zodiac();
        assert_eq!(info.icon, "🐲");
    }

    #[test]
    fn test_year_name_known_years() {
        assert_eq!(calendar("2024-06-01").year_name(), "甲辰年");
        assert_eq!(calendar("2025-06-01").year_name(), "乙巳年");
    }

    #[test]
    fn test_sexagenary_cycle_length() {
        // Le cycle complet fait 60 ans.
        assert_eq!(calendar("1964-06-01").year_name(), calendar("2024-06-01").year_name());
        assert_ne!(calendar("2014-06-01").year_name(), calendar("2024-06-01").year_name());
    }

    #[test]
    fn test_almanac_line_stable() {
        let a = calendar("2025-08-21").almanac_line();
        let b = calendar("2025-08-21").almanac_line();
        assert_eq!(a, b);
        assert!(a.starts_with("宜："));
        assert!(a.contains("忌："));
    }
}
