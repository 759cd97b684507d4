//! Curated distractor pool
//!
//! A generic advanced-vocabulary pool blended with the user's own word list
//! when picking distractors. No copyrighted test items; just plausible
//! high-register words.

pub const DISTRACTOR_POOL: &[&str] = &[
    "diffidence",
    "humility",
    "cynicism",
    "garrulity",
    "obsequiousness",
    "equivocation",
    "magnanimity",
    "acerbic",
    "insipid",
    "didactic",
    "capricious",
    "quixotic",
    "recalcitrant",
    "sanguine",
    "morose",
    "fastidious",
    "laconic",
    "loquacious",
    "munificent",
    "parsimonious",
    "sophistry",
    "perfidy",
    "intransigent",
    "obdurate",
    "ubiquitous",
    "perfunctory",
    "pedantic",
    "placate",
    "incisive",
    "banal",
    "trenchant",
    "cogent",
    "arduous",
    "austere",
    "venerable",
    "implacable",
    "pernicious",
    "ameliorate",
    "enervate",
    "assuage",
    "eschew",
    "obviate",
    "anomalous",
    "equanimity",
    "prodigal",
    "frugal",
    "mitigate",
    "inchoate",
    "vociferous",
    "reticent",
    "diffuse",
    "esoteric",
    "iconoclastic",
    "ostentatious",
    "aesthetic",
    "pragmatic",
    "antipathy",
    "cathartic",
    "prosaic",
    "misanthropic",
    "altruistic",
    "ephemeral",
    "tenacious",
    "epitome",
    "paragon",
    "reverence",
    "condescension",
    "dispassionate",
    "impartial",
    "disingenuous",
    "candor",
    "prevarication",
    "inexorable",
    "immutable",
    "capitulate",
    "deleterious",
    "ambivalent",
    "antithetical",
    "circuitous",
    "conflagration",
    "delineate",
    "deride",
    "dormant",
    "erudite",
    "fervent",
    "gregarious",
    "hackneyed",
    "idiosyncratic",
    "jovial",
    "kowtow",
    "lament",
    "meticulous",
    "nebulous",
    "opaque",
    "parochial",
    "quandary",
    "relegate",
    "sporadic",
    "taciturn",
    "unyielding",
    "vindicate",
    "wary",
    "zealous",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_has_no_case_insensitive_duplicates() {
        let mut lowered: Vec<String> = DISTRACTOR_POOL.iter().map(|w| w.to_lowercase()).collect();
        lowered.sort();
        lowered.dedup();
        assert_eq!(lowered.len(), DISTRACTOR_POOL.len());
    }

    #[test]
    fn test_pool_words_are_long_enough_to_qualify() {
        // Distractor picking filters out words under 4 characters; the
        // curated pool should never lose entries to that filter.
        assert!(DISTRACTOR_POOL.iter().all(|w| w.chars().count() >= 4));
    }
}
