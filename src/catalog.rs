//! Pair Catalog
//!
//! Static table of minimal pairs grouped by phoneme contrast.
//! Loaded once at startup and never mutated.

use crate::error::{PairsError, PairsResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Two phonologically similar words presented together
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordPair {
    pub word1: String,
    pub word2: String,
}

impl WordPair {
    pub fn new(word1: &str, word2: &str) -> Self {
        Self {
            word1: word1.to_string(),
            word2: word2.to_string(),
        }
    }
}

impl std::fmt::Display for WordPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.word1, self.word2)
    }
}

/// A named phoneme contrast and its ordered pairs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub label: String,
    pub pairs: Vec<WordPair>,
}

impl Category {
    /// Human-readable label: "p_b" -> "p / b"
    pub fn display_name(&self) -> String {
        self.label.replace('_', " / ")
    }
}

/// Contrast categories, in presentation order
const CONTRASTS: &[(&str, &[(&str, &str)])] = &[
    (
        "p_b",
        &[
            ("pain", "bain"),
            ("palais", "balai"),
            ("pelle", "belle"),
            ("peur", "beurre"),
            ("poire", "boire"),
            ("pou", "boue"),
            ("pull", "bulle"),
            ("poule", "boule"),
            ("pompon", "bonbon"),
            ("percer", "bercer"),
            ("peigner", "baigner"),
            ("pois", "bois"),
        ],
    ),
    (
        "t_d",
        &[
            ("touche", "douche"),
            ("tord", "dort"),
            ("tôt", "dos"),
            ("temps", "dent"),
            ("toux", "doux"),
            ("thé", "dé"),
            ("tire", "dire"),
            ("tard", "dard"),
            ("râteau", "radeau"),
        ],
    ),
    (
        "k_g",
        &[
            ("bac", "bague"),
            ("camp", "gant"),
            ("car", "gare"),
            ("carré", "garé"),
            ("cou", "goût"),
            ("classe", "glace"),
            ("oncle", "ongle"),
            ("crotte", "grotte"),
            ("crier", "griller"),
        ],
    ),
    (
        "f_v",
        &[
            ("faim", "vingt"),
            ("fâche", "vache"),
            ("fils", "vis"),
            ("faux", "veau"),
            ("faon", "vent"),
            ("folle", "vole"),
            ("fée", "v"),
            ("baffe", "bave"),
            ("foot", "voûte"),
            ("fond", "vont"),
            ("fer", "verre"),
            ("fil", "ville"),
        ],
    ),
    (
        "s_z",
        &[
            ("coussin", "cousin"),
            ("poisson", "poison"),
            ("douce", "douze"),
            ("tresse", "treize"),
            ("seau", "zoo"),
            ("casse", "case"),
            ("dessert", "désert"),
            ("visser", "viser"),
            ("les soeurs", "les heures"),
        ],
    ),
    (
        "ch_j",
        &[
            ("champ", "gens"),
            ("chou", "joue"),
            ("lécher", "léger"),
            ("manche", "mange"),
            ("bêche", "beige"),
            ("boucher", "bouger"),
            ("je l'achète", "je la jette"),
            ("cache", "cage"),
            ("hache", "âge"),
            ("chaîne", "gêne"),
        ],
    ),
    (
        "j_z",
        &[
            ("jaune", "zone"),
            ("rage", "rase"),
            ("bouse", "bouge"),
            ("des oeufs", "des jeux"),
            ("case", "cage"),
        ],
    ),
    (
        "s_ch",
        &[
            ("sous", "chou"),
            ("seau", "chaud"),
            ("sang", "champ"),
            ("bus", "bûche"),
            ("cassé", "caché"),
            ("mousse", "mouche"),
            ("douce", "douche"),
            ("tasse", "tache"),
            ("percer", "perché"),
            ("brosse", "broche"),
        ],
    ),
    (
        "t_k",
        &[
            ("pâté", "paquet"),
            ("pâtes", "pâques"),
            ("caché", "taché"),
            ("tarte", "carte"),
            ("tube", "cube"),
            ("toux", "cou"),
            ("tasse", "casse"),
            ("tas", "k"),
            ("tour", "court"),
            ("tôle", "colle"),
            ("temps", "camp"),
            ("tape", "cape"),
        ],
    ),
    (
        "tr_kr",
        &[
            ("trier", "crier"),
            ("trois", "croix"),
            ("trop", "croc"),
            ("trait", "craie"),
            ("entre", "encre"),
        ],
    ),
    (
        "r_l",
        &[
            ("barre", "balle"),
            ("roue", "loup"),
            ("poire", "poêle"),
            ("rat", "la"),
            ("mare", "malle"),
            ("reine", "laine"),
            ("fort", "folle"),
            ("père", "pelle"),
            ("robe", "lobe"),
            ("rang", "lent"),
            ("riz", "lit"),
        ],
    ),
    (
        "a_an",
        &[
            ("chat", "chant"),
            ("bas", "banc"),
            ("rat", "rang"),
            ("tas", "temps"),
            ("K", "camp"),
            ("fa", "faon"),
            ("va", "vent"),
            ("la", "lent"),
            ("plat", "plan"),
        ],
    ),
    (
        "an_on",
        &[
            ("blanc", "blond"),
            ("banc", "bond"),
            ("rang", "rond"),
            ("temps", "tond"),
            ("paon", "pont"),
            ("dent", "don"),
            ("lent", "long"),
            ("faon", "fond"),
            ("vent", "vont"),
            ("ranger", "ronger"),
        ],
    ),
];

/// Final-consonant categories (word vs. word plus a closing consonant)
const FINALS: &[(&str, &[(&str, &str)])] = &[
    (
        "fin_s",
        &[
            ("pain", "pince"),
            ("mou", "mousse"),
            ("tas", "tasse"),
            ("scie", "six"),
        ],
    ),
    (
        "fin_t",
        &[
            ("roue", "route"),
            ("champ", "chante"),
            ("pas", "pâtes"),
            ("bois", "boîte"),
        ],
    ),
    (
        "fin_l",
        &[
            ("mât", "malle"),
            ("pue", "pull"),
            ("pou", "poule"),
            ("boue", "boule"),
        ],
    ),
    (
        "fin_r",
        &[
            ("bas", "barre"),
            ("lit", "lire"),
            ("cou", "court"),
            ("chat", "char"),
            ("bois", "boire"),
        ],
    ),
    ("fin_m", &[("rat", "rame"), ("pot", "pomme")]),
    ("fin_p", &[("poule", "poulpe")]),
    (
        "fins",
        &[
            ("boue", "bouche"),
            ("doux", "douze"),
            ("k", "canne"),
            ("cou", "coude"),
            ("rang", "range"),
            ("bas", "bague"),
            ("loup", "louche"),
            ("ment", "mange"),
        ],
    ),
];

/// Immutable, ordered collection of categories
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Build a catalog, rejecting empty categories
    pub fn new(categories: Vec<Category>) -> PairsResult<Self> {
        if let Some(empty) = categories.iter().find(|c| c.pairs.is_empty()) {
            return Err(PairsError::InvalidState(format!(
                "category '{}' has no pairs",
                empty.label
            )));
        }
        Ok(Self { categories })
    }

    /// The built-in French minimal-pair table
    pub fn builtin() -> Self {
        let categories: Vec<Category> = CONTRASTS
            .iter()
            .chain(FINALS.iter())
            .map(|(label, pairs)| Category {
                label: label.to_string(),
                pairs: pairs.iter().map(|(a, b)| WordPair::new(a, b)).collect(),
            })
            .collect();
        debug!("Loaded {} built-in categories", categories.len());
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn pairs_for(&self, label: &str) -> PairsResult<&[WordPair]> {
        self.categories
            .iter()
            .find(|c| c.label == label)
            .map(|c| c.pairs.as_slice())
            .ok_or_else(|| PairsError::InvalidCategoryLabel(label.to_string()))
    }

    /// Total number of pairs across all categories
    pub fn pair_count(&self) -> usize {
        self.categories.iter().map(|c| c.pairs.len()).sum()
    }

    /// Every distinct word, first occurrence order
    pub fn words(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.categories
            .iter()
            .flat_map(|c| c.pairs.iter())
            .flat_map(|p| [p.word1.as_str(), p.word2.as_str()])
            .filter(|w| seen.insert(*w))
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order() {
        let catalog = Catalog::builtin();
        let labels: Vec<&str> = catalog
            .categories()
            .iter()
            .map(|c| c.label.as_str())
            .collect();
        assert_eq!(&labels[..3], &["p_b", "t_d", "k_g"]);
        assert_eq!(labels[12], "an_on");
        assert_eq!(labels.last(), Some(&"fins"));
        assert_eq!(labels.len(), 20);
    }

    #[test]
    fn test_pairs_for() {
        let catalog = Catalog::builtin();
        let pairs = catalog.pairs_for("p_b").unwrap();
        assert_eq!(pairs[0], WordPair::new("pain", "bain"));
        assert_eq!(pairs[1], WordPair::new("palais", "balai"));
        assert_eq!(pairs.len(), 12);

        assert_eq!(catalog.pairs_for("fin_p").unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_label() {
        let catalog = Catalog::builtin();
        let err = catalog.pairs_for("x_y").unwrap_err();
        assert!(matches!(err, PairsError::InvalidCategoryLabel(label) if label == "x_y"));
    }

    #[test]
    fn test_every_category_non_empty() {
        let catalog = Catalog::builtin();
        assert!(catalog.categories().iter().all(|c| !c.pairs.is_empty()));
        assert!(Catalog::new(catalog.categories().to_vec()).is_ok());
    }

    #[test]
    fn test_empty_category_rejected() {
        let result = Catalog::new(vec![Category {
            label: "x_y".to_string(),
            pairs: vec![],
        }]);
        assert!(matches!(result, Err(PairsError::InvalidState(_))));
    }

    #[test]
    fn test_pair_count_and_words() {
        let catalog = Catalog::builtin();
        // 123 contrast pairs + 28 final-consonant pairs
        assert_eq!(catalog.pair_count(), 151);

        let words = catalog.words();
        assert_eq!(&words[..2], &["pain", "bain"]);
        let unique: HashSet<&&str> = words.iter().collect();
        assert_eq!(unique.len(), words.len());
    }

    #[test]
    fn test_display_name() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.categories()[0].display_name(), "p / b");
        assert_eq!(catalog.categories()[9].display_name(), "tr / kr");
    }
}
