//! Samvatsara: the 60-year Jovian cycle of year names.
//!
//! The cycle is keyed by the Saka year: `cycle[(saka + 11) mod 60]`.

/// The 60 samvatsaras, index 0 = Prabhava.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[allow(missing_docs)]
pub enum Samvatsara {
    Prabhava,
    Vibhava,
    Shukla,
    Pramodoota,
    Prajothpatti,
    Angirasa,
    Shrimukha,
    Bhava,
    Yuva,
    Dhaatu,
    Eeshvara,
    Bahudhanya,
    Pramaathi,
    Vikrama,
    Vrisha,
    Chitrabhanu,
    Svabhanu,
    Taarana,
    Paarthiva,
    Vyaya,
    Sarvajit,
    Sarvadhari,
    Virodhi,
    Vikruti,
    Khara,
    Nandana,
    Vijaya,
    Jaya,
    Manmatha,
    Durmukhi,
    Hevilambi,
    Vilambi,
    Vikari,
    Sharvari,
    Plava,
    Shubhakrut,
    Shobhakrut,
    Krodhi,
    Vishvavasu,
    Paraabhava,
    Plavanga,
    Keelaka,
    Saumya,
    Sadharana,
    Virodhikrut,
    Paridhavi,
    Pramaadhi,
    Aananda,
    Raakshasa,
    Naala,
    Pingala,
    Kaalayukti,
    Siddharthi,
    Raudri,
    Durmathi,
    Dundubhi,
    Rudhirodgaari,
    Raktaakshi,
    Krodhana,
    Akshaya,
}

/// All 60 samvatsaras in cycle order.
pub const ALL_SAMVATSARAS: [Samvatsara; 60] = [
    Samvatsara::Prabhava,
    Samvatsara::Vibhava,
    Samvatsara::Shukla,
    Samvatsara::Pramodoota,
    Samvatsara::Prajothpatti,
    Samvatsara::Angirasa,
    Samvatsara::Shrimukha,
    Samvatsara::Bhava,
    Samvatsara::Yuva,
    Samvatsara::Dhaatu,
    Samvatsara::Eeshvara,
    Samvatsara::Bahudhanya,
    Samvatsara::Pramaathi,
    Samvatsara::Vikrama,
    Samvatsara::Vrisha,
    Samvatsara::Chitrabhanu,
    Samvatsara::Svabhanu,
    Samvatsara::Taarana,
    Samvatsara::Paarthiva,
    Samvatsara::Vyaya,
    Samvatsara::Sarvajit,
    Samvatsara::Sarvadhari,
    Samvatsara::Virodhi,
    Samvatsara::Vikruti,
    Samvatsara::Khara,
    Samvatsara::Nandana,
    Samvatsara::Vijaya,
    Samvatsara::Jaya,
    Samvatsara::Manmatha,
    Samvatsara::Durmukhi,
    Samvatsara::Hevilambi,
    Samvatsara::Vilambi,
    Samvatsara::Vikari,
    Samvatsara::Sharvari,
    Samvatsara::Plava,
    Samvatsara::Shubhakrut,
    Samvatsara::Shobhakrut,
    Samvatsara::Krodhi,
    Samvatsara::Vishvavasu,
    Samvatsara::Paraabhava,
    Samvatsara::Plavanga,
    Samvatsara::Keelaka,
    Samvatsara::Saumya,
    Samvatsara::Sadharana,
    Samvatsara::Virodhikrut,
    Samvatsara::Paridhavi,
    Samvatsara::Pramaadhi,
    Samvatsara::Aananda,
    Samvatsara::Raakshasa,
    Samvatsara::Naala,
    Samvatsara::Pingala,
    Samvatsara::Kaalayukti,
    Samvatsara::Siddharthi,
    Samvatsara::Raudri,
    Samvatsara::Durmathi,
    Samvatsara::Dundubhi,
    Samvatsara::Rudhirodgaari,
    Samvatsara::Raktaakshi,
    Samvatsara::Krodhana,
    Samvatsara::Akshaya,
];

const SAMVATSARA_NAMES: [&str; 60] = [
    "Prabhava",
    "Vibhava",
    "Shukla",
    "Pramodoota",
    "Prajothpatti",
    "Angirasa",
    "Shrimukha",
    "Bhava",
    "Yuva",
    "Dhaatu",
    "Eeshvara",
    "Bahudhanya",
    "Pramaathi",
    "Vikrama",
    "Vrisha",
    "Chitrabhanu",
    "Svabhanu",
    "Taarana",
    "Paarthiva",
    "Vyaya",
    "Sarvajit",
    "Sarvadhari",
    "Virodhi",
    "Vikruti",
    "Khara",
    "Nandana",
    "Vijaya",
    "Jaya",
    "Manmatha",
    "Durmukhi",
    "Hevilambi",
    "Vilambi",
    "Vikari",
    "Sharvari",
    "Plava",
    "Shubhakrut",
    "Shobhakrut",
    "Krodhi",
    "Vishvavasu",
    "Paraabhava",
    "Plavanga",
    "Keelaka",
    "Saumya",
    "Sadharana",
    "Virodhikrut",
    "Paridhavi",
    "Pramaadhi",
    "Aananda",
    "Raakshasa",
    "Naala",
    "Pingala",
    "Kaalayukti",
    "Siddharthi",
    "Raudri",
    "Durmathi",
    "Dundubhi",
    "Rudhirodgaari",
    "Raktaakshi",
    "Krodhana",
    "Akshaya",
];

/// Offset added to the Saka year before reducing modulo 60.
pub const SAKA_CYCLE_OFFSET: i32 = 11;

impl Samvatsara {
    /// 0-based position in the cycle.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// 1-based order in the cycle (1..=60).
    pub const fn order(self) -> u8 {
        self.index() + 1
    }

    pub fn name(self) -> &'static str {
        SAMVATSARA_NAMES[self.index() as usize]
    }
}

/// Samvatsara for a Saka year.
pub fn samvatsara_for_saka_year(saka_year: i32) -> Samvatsara {
    ALL_SAMVATSARAS[(saka_year + SAKA_CYCLE_OFFSET).rem_euclid(60) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixty_distinct_names() {
        let mut names: Vec<_> = ALL_SAMVATSARAS.iter().map(|s| s.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 60);
    }

    #[test]
    fn indices_sequential() {
        for (i, s) in ALL_SAMVATSARAS.iter().enumerate() {
            assert_eq!(s.index() as usize, i);
        }
    }

    #[test]
    fn saka_1946_is_krodhi() {
        // New year 2024 CE = Saka 1946
        assert_eq!(samvatsara_for_saka_year(1946), Samvatsara::Krodhi);
        assert_eq!(samvatsara_for_saka_year(1945), Samvatsara::Shobhakrut);
    }

    #[test]
    fn saka_1909_is_prabhava() {
        // 1987 CE
        let s = samvatsara_for_saka_year(1909);
        assert_eq!(s, Samvatsara::Prabhava);
        assert_eq!(s.order(), 1);
    }

    #[test]
    fn cycle_wraps_every_sixty_years() {
        for saka in [1800, 1901, 1946, 2000] {
            assert_eq!(
                samvatsara_for_saka_year(saka),
                samvatsara_for_saka_year(saka + 60)
            );
        }
        assert_eq!(samvatsara_for_saka_year(-11), Samvatsara::Prabhava);
    }
}
