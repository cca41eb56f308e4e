//! Configuration module for loading TOML config files.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::catalog::{Catalog, Discipline, Tone, ToneAsset};
use crate::error::ArgueError;

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub generation: GenerationConfig,
    pub prompts: PromptsConfig,
    #[serde(default)]
    pub disciplines: Vec<Discipline>,
    pub tones: ToneAssetsConfig,
}

/// Settings for the generation service call.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    /// Model name sent with every request.
    pub model: String,
    /// OpenAI-compatible API base URL. Environment variables take
    /// precedence at the CLI boundary.
    pub api_base: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            api_base: "https://api.openai.com/v1".to_string(),
        }
    }
}

/// Prompt templates for the facilitator.
#[derive(Debug, Clone, Deserialize)]
pub struct PromptsConfig {
    /// System prompt template. Placeholders: {topic}, {disciplines}, {tones}.
    pub facilitator: String,
    /// The single user turn that opens the debate.
    #[serde(default = "default_opener")]
    pub opener: String,
}

fn default_opener() -> String {
    "Start the debate now.".to_string()
}

impl PromptsConfig {
    /// Fill the facilitator template with the current selection.
    pub fn facilitator_prompt(&self, topic: &str, disciplines: &str, tones: &str) -> String {
        self.facilitator
            .replace("{topic}", topic)
            .replace("{disciplines}", disciplines)
            .replace("{tones}", tones)
    }
}

/// Display metadata per tone.
#[derive(Debug, Clone, Deserialize)]
pub struct ToneAssetsConfig {
    pub skeptical: ToneAsset,
    pub curious: ToneAsset,
    pub thoughtful: ToneAsset,
    pub confident: ToneAsset,
}

impl ToneAssetsConfig {
    pub fn get(&self, tone: Tone) -> &ToneAsset {
        match tone {
            Tone::Skeptical => &self.skeptical,
            Tone::Curious => &self.curious,
            Tone::Thoughtful => &self.thoughtful,
            Tone::Confident => &self.confident,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ArgueError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| ArgueError::ConfigError(format!("Failed to read config: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| ArgueError::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Load configuration from string content.
    pub fn from_str(content: &str) -> Result<Self, ArgueError> {
        toml::from_str(content)
            .map_err(|e| ArgueError::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Build the read-only catalog from this configuration.
    pub fn catalog(&self) -> Catalog {
        let tone_assets = Tone::ALL
            .iter()
            .map(|&tone| (tone, self.tones.get(tone).clone()))
            .collect();
        Catalog::new(self.disciplines.clone(), tone_assets)
    }
}

/// Default configuration embedded in the binary.
pub fn default_config() -> Config {
    let discipline = |id: &str, label: &str, color: &str, text_color: &str| Discipline {
        id: id.to_string(),
        label: label.to_string(),
        color: color.to_string(),
        text_color: text_color.to_string(),
    };
    let asset = |image: &str, description: &str| ToneAsset {
        image: image.to_string(),
        description: description.to_string(),
    };

    Config {
        generation: GenerationConfig::default(),
        prompts: PromptsConfig {
            facilitator: DEFAULT_FACILITATOR_PROMPT.to_string(),
            opener: default_opener(),
        },
        disciplines: vec![
            discipline("science", "Science", "#ff7f27", "#cc5c00"),
            discipline("geography", "Geography", "#ff9c3a", "#cc6e00"),
            discipline("history", "History", "#ed1c24", "#b50000"),
            discipline("theology", "Theology, Religious Studies", "#ff5c9f", "#d6006e"),
            discipline("languages", "Languages of the World", "#e01693", "#990060"),
            discipline("literature", "Our Language and Literature", "#8d309b", "#601b6b"),
            discipline("arts", "The Arts", "#3f48cc", "#222999"),
            discipline("philosophy", "Philosophy", "#00a2e8", "#006ea6"),
            discipline("engineering", "Engineering and Computer Science", "#22b14c", "#157532"),
            discipline("math", "Mathematics", "#8ed93b", "#5b9e15"),
        ],
        tones: ToneAssetsConfig {
            skeptical: asset(
                "https://images.unsplash.com/photo-1542385151-efd9000785a0?auto=format&fit=crop&q=80&w=400&h=400",
                "Questioning and doubt-filled perspective",
            ),
            curious: asset(
                "https://images.unsplash.com/photo-1544005313-94ddf0286df2?auto=format&fit=crop&q=80&w=400&h=400",
                "Inquisitive and open-ended exploration",
            ),
            thoughtful: asset(
                "https://images.unsplash.com/photo-1554151228-14d9def656e4?auto=format&fit=crop&q=80&w=400&h=400",
                "Reflective and deep analysis",
            ),
            confident: asset(
                "https://images.unsplash.com/photo-1531123897727-8f129e1688ce?auto=format&fit=crop&q=80&w=400&h=400",
                "Assertive and authoritative stance",
            ),
        },
    }
}

const DEFAULT_FACILITATOR_PROMPT: &str = r#"You are a facilitator for an intellectual debate platform called "The Big Argue".
Your goal is to simulate a concise, high-level debate about a specific topic.

Topic: {topic}
Participants: Experts from the following fields: {disciplines}.
Tone: The entire debate must be conducted with a {tones} tone.

Instructions:
- Generate a back-and-forth argument between the selected disciplines.
- Each discipline should have one clear, expert-level contribution.
- Keep the responses concise (under 60 words per speaker).
- Ensure the requested tone is palpable in every response.
- Return the results as a JSON array of objects, each with the required
  string fields "speaker" (the name of the discipline) and "text" (the
  concise argument text). Output only the JSON array, nothing else."#;
