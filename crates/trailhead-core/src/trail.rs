use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RouteError;

/// How demanding a trail is. The backend schema restricts answers to these four values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
    Extreme,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Moderate => "Moderate",
            Difficulty::Hard => "Hard",
            Difficulty::Extreme => "Extreme",
        }
    }

    pub fn all() -> [Difficulty; 4] {
        [
            Difficulty::Easy,
            Difficulty::Moderate,
            Difficulty::Hard,
            Difficulty::Extreme,
        ]
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A single hiking or biking trail as returned by the query service.
///
/// Only `difficulty` is constrained. Ratings outside 0-5 or odd coordinates
/// are passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trail {
    pub id: String,
    pub name: String,
    pub location: String,
    pub difficulty: Difficulty,
    pub rating: f64,
    /// Display string, e.g. "5.2 mi"
    pub distance: String,
    /// Display string, e.g. "2h 30m"
    pub duration: String,
    pub description: String,
    pub coordinates: Coordinates,
}

/// The start/destination pair that defines the corridor to search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub start: String,
    pub destination: String,
}

impl RouteRequest {
    /// Build a request from raw form input. Both fields must be non-empty and
    /// are stored exactly as entered.
    pub fn new(start: &str, destination: &str) -> Result<Self, RouteError> {
        if start.is_empty() {
            return Err(RouteError::MissingStart);
        }
        if destination.is_empty() {
            return Err(RouteError::MissingDestination);
        }

        Ok(Self {
            start: start.to_string(),
            destination: destination.to_string(),
        })
    }
}

/// Parse a backend answer into trails. The whole answer is rejected if any
/// element does not match the trail shape.
pub fn parse_trails(body: &str) -> Result<Vec<Trail>, serde_json::Error> {
    serde_json::from_str(body)
}
