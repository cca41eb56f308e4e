//! In-memory selection state and the validation gate.
//!
//! Holds what the user has picked so far: tones, discipline ids, and the
//! free-text topic. Purely in-memory; nothing here survives a restart and
//! the system never clears it on its own (the topic persists across
//! requests).

use crate::catalog::Tone;
use crate::error::ArgueError;

#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected_tones: Vec<Tone>,
    selected_discipline_ids: Vec<String>,
    topic: String,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the tone if absent, remove it if present. Self-inverse.
    pub fn toggle_tone(&mut self, tone: Tone) {
        if let Some(pos) = self.selected_tones.iter().position(|t| *t == tone) {
            self.selected_tones.remove(pos);
        } else {
            self.selected_tones.push(tone);
        }
    }

    /// Add the discipline id if absent, remove it if present. Self-inverse.
    pub fn toggle_discipline(&mut self, id: &str) {
        if let Some(pos) = self.selected_discipline_ids.iter().position(|d| d == id) {
            self.selected_discipline_ids.remove(pos);
        } else {
            self.selected_discipline_ids.push(id.to_string());
        }
    }

    /// Replace the topic verbatim. No trimming, no length cap.
    pub fn set_topic(&mut self, text: impl Into<String>) {
        self.topic = text.into();
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn tones(&self) -> &[Tone] {
        &self.selected_tones
    }

    pub fn discipline_ids(&self) -> &[String] {
        &self.selected_discipline_ids
    }

    /// The validation gate.
    ///
    /// Checks run in a fixed order and stop at the first failure, so only
    /// one error is ever surfaced at a time: topic first, then tones, then
    /// disciplines.
    pub fn validate(&self) -> Result<(), ArgueError> {
        if self.topic.trim().is_empty() {
            return Err(ArgueError::MissingTopic);
        }
        if self.selected_tones.is_empty() {
            return Err(ArgueError::MissingTone);
        }
        if self.selected_discipline_ids.is_empty() {
            return Err(ArgueError::MissingDiscipline);
        }
        Ok(())
    }
}
