pub mod ai;
pub mod carousel;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod selection;
pub mod service;
pub mod state;
pub mod trail;

// Re-export main types for convenience
pub use ai::{GeminiClient, TrailBackend};
pub use carousel::{Carousel, Scene, SceneKind};
pub use config::Config;
pub use error::{RouteError, TrailQueryError, TransitionError};
pub use selection::TrailSelection;
pub use service::{fallback_trails, TrailService};
pub use state::{AppState, TripController, View};
pub use trail::{Coordinates, Difficulty, RouteRequest, Trail};
