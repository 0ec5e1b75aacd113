use serde_json::{json, Value};
use std::sync::Arc;

use crate::ai::TrailBackend;
use crate::error::TrailQueryError;
use crate::trail::{parse_trails, Coordinates, Difficulty, Trail};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Number of trails the prompt asks for
const TRAILS_PER_ROUTE: usize = 4;

/// Finds trails between two places by asking a text-generation backend.
///
/// Callers never see an error: failures are logged and replaced with
/// [`fallback_trails`].
#[derive(Clone)]
pub struct TrailService {
    backend: Arc<dyn TrailBackend>,
    model: String,
}

impl TrailService {
    pub fn new(backend: Arc<dyn TrailBackend>) -> Self {
        Self {
            backend,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn set_model(&mut self, model: &str) {
        self.model = model.to_string();
    }

    pub async fn find_trails(&self, start: &str, destination: &str) -> Vec<Trail> {
        match self.try_find_trails(start, destination).await {
            Ok(trails) => {
                tracing::info!(count = trails.len(), start, destination, "trail query finished");
                trails
            }
            Err(e) => {
                tracing::warn!(error = %e, start, destination, "trail query failed, using sample trails");
                fallback_trails()
            }
        }
    }

    /// The raw query without the fallback policy. An answer with no text is
    /// an empty list, not an error.
    pub async fn try_find_trails(
        &self,
        start: &str,
        destination: &str,
    ) -> Result<Vec<Trail>, TrailQueryError> {
        let prompt = build_trail_prompt(start, destination);
        let schema = trail_response_schema();

        match self.backend.generate(&self.model, &prompt, &schema).await? {
            Some(body) => Ok(parse_trails(&body)?),
            None => Ok(Vec::new()),
        }
    }
}

pub fn build_trail_prompt(start: &str, destination: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str(&format!(
        "I am planning a road trip from {} to {}.\n",
        start, destination
    ));
    prompt.push_str(&format!(
        "Identify {} distinct, real hiking or mountain biking trails located geographically \
         between these two points (along the general route).\n",
        TRAILS_PER_ROUTE
    ));
    prompt.push_str("Provide coordinates that are somewhat accurate to the real location.");

    prompt
}

/// Response schema in the Gemini `Schema` dialect: an array of trail objects.
pub fn trail_response_schema() -> Value {
    let difficulties: Vec<&str> = Difficulty::all().iter().map(|d| d.as_str()).collect();

    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": { "type": "STRING" },
                "name": { "type": "STRING" },
                "location": { "type": "STRING", "description": "City or Park name" },
                "difficulty": { "type": "STRING", "enum": difficulties },
                "rating": { "type": "NUMBER" },
                "distance": { "type": "STRING" },
                "duration": { "type": "STRING" },
                "description": { "type": "STRING" },
                "coordinates": {
                    "type": "OBJECT",
                    "properties": {
                        "lat": { "type": "NUMBER" },
                        "lng": { "type": "NUMBER" }
                    }
                }
            }
        }
    })
}

/// Sample trails shown whenever the live query fails.
pub fn fallback_trails() -> Vec<Trail> {
    vec![
        Trail {
            id: "1".to_string(),
            name: "Lost Coast Trail".to_string(),
            location: "King Range Wilderness".to_string(),
            difficulty: Difficulty::Hard,
            rating: 4.8,
            distance: "24.6 mi".to_string(),
            duration: "3 days".to_string(),
            description: "A rugged coastal trail featuring black sand beaches and tide pools."
                .to_string(),
            coordinates: Coordinates { lat: 40.1, lng: -124.1 },
        },
        Trail {
            id: "2".to_string(),
            name: "Emerald Bay Loop".to_string(),
            location: "Lake Tahoe".to_string(),
            difficulty: Difficulty::Moderate,
            rating: 4.9,
            distance: "4.5 mi".to_string(),
            duration: "2h 15m".to_string(),
            description: "Stunning views of the bay with moderately steep switchbacks."
                .to_string(),
            coordinates: Coordinates { lat: 38.9, lng: -120.1 },
        },
    ]
}
