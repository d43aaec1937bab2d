/// Taxonomic rank labels and their fixed specificity order
use serde::{Deserialize, Serialize};
use std::fmt;

/// Known rank labels with their order value, most specific first. `no rank`
/// and `varietas` share 0; `superkingdom` is 32.
pub const RANK_TABLE: [(&str, u8); 34] = [
    ("no rank", 0),
    ("varietas", 0),
    ("forma", 1),
    ("subspecies", 2),
    ("species", 3),
    ("species subgroup", 4),
    ("species group", 5),
    ("series", 6),
    ("subsection", 7),
    ("section", 8),
    ("subgenus", 9),
    ("genus", 10),
    ("subtribe", 11),
    ("tribe", 12),
    ("subfamily", 13),
    ("family", 14),
    ("superfamily", 15),
    ("parvorder", 16),
    ("infraorder", 17),
    ("suborder", 18),
    ("order", 19),
    ("superorder", 20),
    ("subcohort", 21),
    ("cohort", 22),
    ("infraclass", 23),
    ("subclass", 24),
    ("class", 25),
    ("superclass", 26),
    ("subphylum", 27),
    ("phylum", 28),
    ("superphylum", 29),
    ("subkingdom", 30),
    ("kingdom", 31),
    ("superkingdom", 32),
];

pub const NO_RANK: &str = "no rank";
pub const SPECIES: &str = "species";

/// Order value of a rank label. Labels outside the table (`clade`, `strain`,
/// ...) count as `no rank`.
pub fn rank_order(label: &str) -> u8 {
    RANK_TABLE
        .iter()
        .find(|(known, _)| *known == label)
        .map(|(_, order)| *order)
        .unwrap_or(0)
}

/// Rank label as it appears in the taxonomy dump
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rank(String);

impl Rank {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn order(&self) -> u8 {
        rank_order(&self.0)
    }

    /// Unranked nodes are skipped when looking for the nearest ranked ancestor
    pub fn is_ranked(&self) -> bool {
        self.order() > 0
    }

    pub fn is_species(&self) -> bool {
        self.0 == SPECIES
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Rank {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for Rank {
    fn from(label: String) -> Self {
        Self(label)
    }
}
