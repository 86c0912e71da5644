//! Entrant and the registry entrants are collected in before a tournament is generated.

use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};

/// Swatch used when an entrant is registered without a color.
pub const DEFAULT_ENTRANT_COLOR: &str = "#3498db";

/// A competing entrant (team or player).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Entrant {
    pub name: String,
    /// Display color, usually a CSS hex value.
    pub color: String,
}

impl Entrant {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }

    /// Case-insensitive name comparison used for duplicate detection.
    pub fn has_name_ignore_case(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// Entrants registered so far, in registration order. Names are unique, case-insensitive.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct EntrantRegistry {
    entrants: Vec<Entrant>,
}

impl EntrantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entrants(&self) -> &[Entrant] {
        &self.entrants
    }

    pub fn len(&self) -> usize {
        self.entrants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrants.is_empty()
    }

    /// Register an entrant. The name is trimmed and must be non-empty and not already present
    /// (ignoring case). A blank color falls back to [`DEFAULT_ENTRANT_COLOR`].
    pub fn add(&mut self, name: &str, color: Option<&str>) -> Result<(), TournamentError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyEntrantName);
        }
        if self.entrants.iter().any(|e| e.has_name_ignore_case(name)) {
            return Err(TournamentError::DuplicateEntrantName(name.to_string()));
        }
        let color = color
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_ENTRANT_COLOR);
        self.entrants.push(Entrant::new(name, color));
        Ok(())
    }

    /// Remove every entrant whose name matches exactly. Absent names are ignored.
    pub fn remove(&mut self, name: &str) {
        self.entrants.retain(|e| e.name != name);
    }
}
