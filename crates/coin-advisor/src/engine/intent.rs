//! Intent Classification
//!
//! First-match dispatch over an ordered keyword table.

use serde::{Deserialize, Serialize};

use crate::query::QuerySignals;

/// What the user is asking for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    MostSustainable,
    HighestMomentum,
    Compare,
    List,
    Help,
    Unknown,
}

/// Keyword stems per intent, in priority order
///
/// A rule fires on an exact stem. Forms the stemmer keeps whole
/// (`greener`, `greenest`) are listed explicitly.
pub const INTENT_RULES: [(Intent, &[&str]); 5] = [
    (Intent::MostSustainable, &["sustain", "eco", "green", "greener", "greenest"]),
    (Intent::HighestMomentum, &["trend", "profit", "longterm", "long"]),
    (Intent::Compare, &["vs", "compar"]),
    (Intent::List, &["list", "show"]),
    (Intent::Help, &["help", "command"]),
];

impl Intent {
    /// The first rule with a matching keyword wins
    pub fn classify(signals: &QuerySignals) -> Intent {
        INTENT_RULES
            .iter()
            .find(|(_, keywords)| signals.contains_any(keywords))
            .map_or(Intent::Unknown, |(intent, _)| *intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::normalize;

    fn classify(query: &str) -> Intent {
        Intent::classify(&normalize(query))
    }

    #[test]
    fn test_each_rule() {
        assert_eq!(classify("Most sustainable coin?"), Intent::MostSustainable);
        assert_eq!(classify("anything eco-friendly?"), Intent::MostSustainable);
        assert_eq!(classify("greener coins"), Intent::MostSustainable);
        assert_eq!(classify("the greenest one"), Intent::MostSustainable);
        assert_eq!(classify("Which crypto is trending up?"), Intent::HighestMomentum);
        assert_eq!(classify("best for long-term growth"), Intent::HighestMomentum);
        assert_eq!(classify("most profitable coin"), Intent::HighestMomentum);
        assert_eq!(classify("Compare Bitcoin and Cardano"), Intent::Compare);
        assert_eq!(classify("bitcoin vs ethereum"), Intent::Compare);
        assert_eq!(classify("List all coins"), Intent::List);
        assert_eq!(classify("show me everything"), Intent::List);
        assert_eq!(classify("help"), Intent::Help);
        assert_eq!(classify("what commands are there"), Intent::Help);
        assert_eq!(classify("asdkjf"), Intent::Unknown);
        assert_eq!(classify(""), Intent::Unknown);
    }

    #[test]
    fn test_priority_order() {
        // sustainability beats momentum and comparison
        assert_eq!(classify("is a green coin trending?"), Intent::MostSustainable);
        assert_eq!(classify("compare sustainable coins"), Intent::MostSustainable);
        // momentum beats comparison
        assert_eq!(classify("compare trending coins"), Intent::HighestMomentum);
        // words that merely begin with a keyword do not fire it
        assert_eq!(
            classify("compare the cardano ecosystem vs polkadot"),
            Intent::Compare
        );
        assert_eq!(classify("how is the economy"), Intent::Unknown);
        // list beats help
        assert_eq!(classify("help me list coins"), Intent::List);
    }

    #[test]
    fn test_rules_are_in_declared_order() {
        let order: Vec<Intent> = INTENT_RULES.iter().map(|(intent, _)| *intent).collect();
        assert_eq!(
            order,
            vec![
                Intent::MostSustainable,
                Intent::HighestMomentum,
                Intent::Compare,
                Intent::List,
                Intent::Help,
            ]
        );
    }
}
