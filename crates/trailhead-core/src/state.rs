//! UI-agnostic application state
//!
//! The controller here is shared by any front end: it knows which screen is
//! showing and which trails were loaded, but nothing about how they are drawn.

use serde::{Deserialize, Serialize};

use crate::error::TransitionError;
use crate::service::TrailService;
use crate::trail::{RouteRequest, Trail};

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Home,
    Map,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub view: View,
    pub route: Option<RouteRequest>,
    pub trails: Vec<Trail>,
    pub loading: bool,
    /// First trail of the last search. The results screen keeps its own
    /// selection on top of this.
    pub selected_trail: Option<Trail>,
}

/// Owns [`AppState`] and performs the home/map transitions.
#[derive(Debug, Default)]
pub struct TripController {
    state: AppState,
}

impl TripController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> View {
        self.state.view
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    /// Mark a search as in flight. The view stays on home until
    /// [`complete_search`](Self::complete_search).
    pub fn begin_search(&mut self, route: &RouteRequest) -> Result<(), TransitionError> {
        if self.state.view != View::Home {
            return Err(TransitionError::NotOnHome);
        }
        tracing::debug!(start = %route.start, destination = %route.destination, "search started");
        self.state.loading = true;
        Ok(())
    }

    /// Apply the result of a search in one step and switch to the map view.
    pub fn complete_search(&mut self, route: RouteRequest, trails: Vec<Trail>) {
        let selected_trail = trails.first().cloned();
        self.state = AppState {
            view: View::Map,
            route: Some(route),
            trails,
            loading: false,
            selected_trail,
        };
    }

    pub async fn submit_search(
        &mut self,
        route: RouteRequest,
        service: &TrailService,
    ) -> Result<(), TransitionError> {
        self.begin_search(&route)?;
        let trails = service.find_trails(&route.start, &route.destination).await;
        self.complete_search(route, trails);
        Ok(())
    }

    /// Return to the search screen. Trails from the last search stay in
    /// state until the next search replaces them.
    pub fn go_back(&mut self) {
        self.state.view = View::Home;
        self.state.route = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrailQueryError;
    use crate::service::tests::{ScriptedBackend, TWO_TRAILS};
    use std::sync::Arc;

    fn route() -> RouteRequest {
        RouteRequest::new("Portland, OR", "Joshua Tree, CA").unwrap()
    }

    #[test]
    fn test_initial_state_is_home() {
        let controller = TripController::new();
        let state = controller.state();
        assert_eq!(state.view, View::Home);
        assert!(state.route.is_none());
        assert!(state.trails.is_empty());
        assert!(!state.loading);
        assert!(state.selected_trail.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_service_lands_on_map_with_fallback() {
        let service = TrailService::new(Arc::new(ScriptedBackend::new(|| {
            Err(TrailQueryError::Backend("unreachable".to_string()))
        })));
        let mut controller = TripController::new();

        controller.submit_search(route(), &service).await.unwrap();

        let state = controller.state();
        assert_eq!(state.view, View::Map);
        assert_eq!(state.route, Some(route()));
        assert!(!state.loading);
        let names: Vec<&str> = state.trails.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Lost Coast Trail", "Emerald Bay Loop"]);
        assert_eq!(state.selected_trail.as_ref().map(|t| t.id.as_str()), Some("1"));
    }

    #[tokio::test]
    async fn test_selected_trail_is_first_result() {
        let service = TrailService::new(Arc::new(ScriptedBackend::text(TWO_TRAILS)));
        let mut controller = TripController::new();

        controller.submit_search(route(), &service).await.unwrap();

        let state = controller.state();
        assert_eq!(state.selected_trail.as_ref(), state.trails.first());
        assert_eq!(state.selected_trail.as_ref().unwrap().id, "t1");
    }

    #[tokio::test]
    async fn test_empty_result_has_no_selection() {
        let service = TrailService::new(Arc::new(ScriptedBackend::text("[]")));
        let mut controller = TripController::new();

        controller.submit_search(route(), &service).await.unwrap();

        assert_eq!(controller.view(), View::Map);
        assert!(controller.state().trails.is_empty());
        assert!(controller.state().selected_trail.is_none());
    }

    #[tokio::test]
    async fn test_submit_from_map_is_rejected() {
        let service = TrailService::new(Arc::new(ScriptedBackend::text("[]")));
        let mut controller = TripController::new();
        controller.submit_search(route(), &service).await.unwrap();

        let result = controller.submit_search(route(), &service).await;

        assert_eq!(result, Err(TransitionError::NotOnHome));
        assert!(!controller.is_loading());
    }

    #[test]
    fn test_begin_search_sets_loading_and_stays_home() {
        let mut controller = TripController::new();
        controller.begin_search(&route()).unwrap();
        assert!(controller.is_loading());
        assert_eq!(controller.view(), View::Home);
        assert!(controller.state().route.is_none());
    }

    #[test]
    fn test_go_back_clears_route_but_keeps_trails() {
        let mut controller = TripController::new();
        controller.complete_search(route(), crate::service::fallback_trails());

        controller.go_back();

        let state = controller.state();
        assert_eq!(state.view, View::Home);
        assert!(state.route.is_none());
        assert_eq!(state.trails.len(), 2);
        assert!(state.selected_trail.is_some());
    }

    #[test]
    fn test_go_back_from_home_is_harmless() {
        let mut controller = TripController::new();
        controller.go_back();
        assert_eq!(controller.view(), View::Home);
        assert!(controller.state().route.is_none());
    }

    #[test]
    fn test_view_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&View::Home).unwrap(), "\"home\"");
        assert_eq!(serde_json::to_string(&View::Map).unwrap(), "\"map\"");
    }
}
