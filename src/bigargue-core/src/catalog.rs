//! Tone and discipline catalogs.
//!
//! Read-only data describing the debate tones and the academic disciplines
//! a user can pick from. The catalog is built once at startup from the
//! configuration and never mutated.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ArgueError;

/// Stylistic constraint applied uniformly to all generated contributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Skeptical,
    Curious,
    Thoughtful,
    Confident,
}

impl Tone {
    /// All tones, in display order.
    pub const ALL: [Tone; 4] = [
        Tone::Skeptical,
        Tone::Curious,
        Tone::Thoughtful,
        Tone::Confident,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Tone::Skeptical => "skeptical",
            Tone::Curious => "curious",
            Tone::Thoughtful => "thoughtful",
            Tone::Confident => "confident",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tone {
    type Err = ArgueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skeptical" => Ok(Tone::Skeptical),
            "curious" => Ok(Tone::Curious),
            "thoughtful" => Ok(Tone::Thoughtful),
            "confident" => Ok(Tone::Confident),
            other => Err(ArgueError::UnknownTone(other.to_string())),
        }
    }
}

/// An academic viewpoint category, assigned as a speaker in the debate.
///
/// Identity is `id`; `label` is what the wheel and the generated transcript
/// show. The colors drive the wheel rendering only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discipline {
    pub id: String,
    pub label: String,
    pub color: String,
    pub text_color: String,
}

/// Display metadata for a tone (portrait image and a short description).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToneAsset {
    pub image: String,
    pub description: String,
}

/// The fixed, ordered discipline list plus the tone asset mapping.
#[derive(Debug, Clone)]
pub struct Catalog {
    disciplines: Vec<Discipline>,
    tone_assets: Vec<(Tone, ToneAsset)>,
}

impl Catalog {
    pub fn new(disciplines: Vec<Discipline>, tone_assets: Vec<(Tone, ToneAsset)>) -> Self {
        Self {
            disciplines,
            tone_assets,
        }
    }

    /// All disciplines, in catalog order.
    pub fn disciplines(&self) -> &[Discipline] {
        &self.disciplines
    }

    /// Look up a single discipline by id.
    pub fn discipline(&self, id: &str) -> Option<&Discipline> {
        self.disciplines.iter().find(|d| d.id == id)
    }

    /// Resolve a set of selected ids to full records.
    ///
    /// The returned order follows the catalog, not the selection order.
    /// Ids that do not exist in the catalog are dropped.
    pub fn resolve(&self, selected_ids: &[String]) -> Vec<Discipline> {
        self.disciplines
            .iter()
            .filter(|d| selected_ids.iter().any(|id| *id == d.id))
            .cloned()
            .collect()
    }

    pub fn tone_asset(&self, tone: Tone) -> Option<&ToneAsset> {
        self.tone_assets
            .iter()
            .find(|(t, _)| *t == tone)
            .map(|(_, asset)| asset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_config;

    #[test]
    fn tone_round_trips_through_from_str() {
        for tone in Tone::ALL {
            assert_eq!(tone.name().parse::<Tone>().unwrap(), tone);
        }
    }

    #[test]
    fn tone_from_str_is_case_insensitive() {
        assert_eq!("Skeptical".parse::<Tone>().unwrap(), Tone::Skeptical);
        assert_eq!("CURIOUS".parse::<Tone>().unwrap(), Tone::Curious);
    }

    #[test]
    fn tone_from_str_rejects_unknown() {
        assert!(matches!(
            "sarcastic".parse::<Tone>(),
            Err(ArgueError::UnknownTone(_))
        ));
    }

    #[test]
    fn resolve_follows_catalog_order_not_selection_order() {
        let catalog = default_config().catalog();
        let selected = vec!["history".to_string(), "science".to_string()];
        let resolved = catalog.resolve(&selected);
        let labels: Vec<&str> = resolved.iter().map(|d| d.label.as_str()).collect();
        // Science precedes History in the catalog even though the user
        // picked History first.
        assert_eq!(labels, vec!["Science", "History"]);
    }

    #[test]
    fn resolve_drops_unknown_ids() {
        let catalog = default_config().catalog();
        let selected = vec!["science".to_string(), "alchemy".to_string()];
        let resolved = catalog.resolve(&selected);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].id, "science");
    }

    #[test]
    fn every_tone_has_an_asset() {
        let catalog = default_config().catalog();
        for tone in Tone::ALL {
            let asset = catalog.tone_asset(tone).expect("missing tone asset");
            assert!(!asset.description.is_empty());
        }
    }
}
