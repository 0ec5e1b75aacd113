use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;
use trailhead_core::carousel::ROTATION_INTERVAL;
use trailhead_core::{
    fallback_trails, Carousel, Config, GeminiClient, RouteRequest, Trail, TrailSelection,
    TrailService, TripController, View,
};

/// Rows taken by one entry in the trail list
pub const TRAIL_ITEM_HEIGHT: u16 = 3;

/// Header brand variants as (name, tagline), cycled by clicking the logo
pub const LOGOS: [(&str, &str); 3] = [
    ("ONROUTE", "OUTDOORS"),
    ("NOMAD", "TRAILS"),
    ("WILD", "EARTH"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Start,
    Destination,
}

/// Single-line text field with a character cursor
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

impl TextInput {
    pub fn insert(&mut self, c: char) {
        let byte_pos = char_to_byte_index(&self.value, self.cursor);
        self.value.insert(byte_pos, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_pos = char_to_byte_index(&self.value, self.cursor);
            self.value.remove(byte_pos);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let byte_pos = char_to_byte_index(&self.value, self.cursor);
            self.value.remove(byte_pos);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.chars().count();
    }
}

/// A query running in the background together with the route it was started for
pub struct PendingSearch {
    pub route: RouteRequest,
    pub task: JoinHandle<Vec<Trail>>,
}

pub struct App {
    pub should_quit: bool,
    pub controller: TripController,
    pub service: TrailService,
    pub has_api_key: bool,

    // Header
    pub logo_variant: usize,
    /// Updated during render for mouse hit-testing
    pub logo_area: Option<Rect>,

    // Search screen
    pub start_input: TextInput,
    pub destination_input: TextInput,
    pub focus: SearchField,
    pub notice: Option<String>,
    pub pending: Option<PendingSearch>,
    pub animation_frame: u8,

    // Scenery behind the search form
    pub carousel: Carousel,
    pub last_rotation: Instant,
    rng: StdRng,

    // Results screen
    pub selection: TrailSelection,
    pub trail_list_state: ListState,
    /// Updated during render for mouse hit-testing
    pub trail_list_area: Option<Rect>,

    // Model picker state
    pub show_model_picker: bool,
    pub available_models: Vec<String>,
    pub model_picker_state: ListState,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let api_key = config.resolved_api_key();
        if api_key.is_none() {
            tracing::warn!("no Gemini API key found, searches will show sample trails");
        }

        let client = GeminiClient::new(api_key.as_deref())
            .with_base_url(config.base_url_or_default())
            .with_timeout(config.request_timeout());
        let has_api_key = client.has_api_key();
        let service = TrailService::new(Arc::new(client)).with_model(config.model_or_default());

        let mut app = Self::with_service(service);
        app.has_api_key = has_api_key;
        app
    }

    pub fn with_service(service: TrailService) -> Self {
        Self {
            should_quit: false,
            controller: TripController::new(),
            service,
            has_api_key: false,

            logo_variant: 0,
            logo_area: None,

            start_input: TextInput::default(),
            destination_input: TextInput::default(),
            focus: SearchField::Start,
            notice: None,
            pending: None,
            animation_frame: 0,

            carousel: Carousel::new(),
            last_rotation: Instant::now(),
            rng: StdRng::from_entropy(),

            selection: TrailSelection::default(),
            trail_list_state: ListState::default(),
            trail_list_area: None,

            show_model_picker: false,
            available_models: Vec::new(),
            model_picker_state: ListState::default(),
        }
    }

    pub fn view(&self) -> View {
        self.controller.view()
    }

    pub fn trails(&self) -> &[Trail] {
        &self.controller.state().trails
    }

    pub fn is_loading(&self) -> bool {
        self.controller.is_loading()
    }

    // Header

    pub fn logo(&self) -> (&'static str, &'static str) {
        LOGOS[self.logo_variant % LOGOS.len()]
    }

    pub fn cycle_logo(&mut self) {
        self.logo_variant = (self.logo_variant + 1) % LOGOS.len();
    }

    /// Cycle the logo if the click landed on it. Returns whether it did.
    pub fn click_logo(&mut self, column: u16, row: u16) -> bool {
        let Some(area) = self.logo_area else {
            return false;
        };
        let inside = column >= area.x
            && column < area.x.saturating_add(area.width)
            && row >= area.y
            && row < area.y.saturating_add(area.height);
        if inside {
            self.cycle_logo();
        }
        inside
    }

    // Search form

    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            SearchField::Start => &mut self.start_input,
            SearchField::Destination => &mut self.destination_input,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            SearchField::Start => SearchField::Destination,
            SearchField::Destination => SearchField::Start,
        };
    }

    /// Validate the form and start a background query. Ignored while a query
    /// is already running.
    pub fn submit_search(&mut self) {
        if self.pending.is_some() || self.is_loading() {
            return;
        }

        let route = match RouteRequest::new(&self.start_input.value, &self.destination_input.value) {
            Ok(route) => route,
            Err(e) => {
                self.notice = Some(e.to_string());
                return;
            }
        };

        if let Err(e) = self.controller.begin_search(&route) {
            self.notice = Some(e.to_string());
            return;
        }

        tracing::info!(start = %route.start, destination = %route.destination, model = self.service.model(), "searching for trails");
        self.notice = None;
        self.animation_frame = 0;

        let service = self.service.clone();
        let query = route.clone();
        let task = tokio::spawn(async move {
            service.find_trails(&query.start, &query.destination).await
        });
        self.pending = Some(PendingSearch { route, task });
    }

    /// Apply the pending search if its task has finished.
    pub async fn poll_search(&mut self) {
        let finished = self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.task.is_finished());
        if finished {
            self.finish_search().await;
        }
    }

    /// Wait for the pending search and switch to the results screen.
    pub async fn finish_search(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };

        let trails = match pending.task.await {
            Ok(trails) => trails,
            Err(e) => {
                tracing::error!(error = %e, "trail query task failed, using sample trails");
                fallback_trails()
            }
        };

        self.selection = TrailSelection::new(&trails);
        self.controller.complete_search(pending.route, trails);
        self.sync_trail_list();
    }

    pub fn go_back(&mut self) {
        self.controller.go_back();
        self.trail_list_area = None;
        self.last_rotation = Instant::now();
    }

    // Results

    pub fn selected_trail(&self) -> Option<&Trail> {
        self.selection.resolve(self.trails())
    }

    pub fn select_trail(&mut self, id: &str) {
        let trails = &self.controller.state().trails;
        if self.selection.select(trails, id) {
            tracing::debug!(id, "trail selected");
        }
        self.sync_trail_list();
    }

    pub fn select_trail_at(&mut self, index: usize) {
        if let Some(id) = self.trails().get(index).map(|t| t.id.clone()) {
            self.select_trail(&id);
        }
    }

    pub fn trail_nav_down(&mut self) {
        let len = self.trails().len();
        if len > 0 {
            let i = self.selection.index(self.trails()).unwrap_or(0);
            self.select_trail_at((i + 1).min(len - 1));
        }
    }

    pub fn trail_nav_up(&mut self) {
        let i = self.selection.index(self.trails()).unwrap_or(0);
        self.select_trail_at(i.saturating_sub(1));
    }

    pub fn trail_nav_first(&mut self) {
        self.select_trail_at(0);
    }

    pub fn trail_nav_last(&mut self) {
        let len = self.trails().len();
        if len > 0 {
            self.select_trail_at(len - 1);
        }
    }

    /// Map a click inside the trail list to a trail. Clicks on borders or
    /// below the last trail do nothing.
    pub fn click_trail(&mut self, column: u16, row: u16) {
        let Some(area) = self.trail_list_area else {
            return;
        };
        let inside = column > area.x
            && column < area.x + area.width.saturating_sub(1)
            && row > area.y
            && row < area.y + area.height.saturating_sub(1);
        if !inside {
            return;
        }

        let visual_row = (row - area.y - 1) / TRAIL_ITEM_HEIGHT;
        let index = self.trail_list_state.offset() + visual_row as usize;
        self.select_trail_at(index);
    }

    fn sync_trail_list(&mut self) {
        let index = self.selection.index(self.trails());
        self.trail_list_state.select(index);
    }

    // Timers

    pub fn tick(&mut self) {
        if self.is_loading() {
            self.animation_frame = (self.animation_frame + 1) % 4;
        }

        if self.view() == View::Home && self.last_rotation.elapsed() >= ROTATION_INTERVAL {
            self.carousel.advance(&mut self.rng);
            self.last_rotation = Instant::now();
        }
    }

    // Model picker methods

    pub fn open_model_picker(&mut self) {
        self.available_models = GeminiClient::list_models();
        let current_idx = self
            .available_models
            .iter()
            .position(|m| m == self.service.model())
            .unwrap_or(0);
        self.model_picker_state.select(Some(current_idx));
        self.show_model_picker = true;
    }

    pub fn model_picker_nav_down(&mut self) {
        let len = self.available_models.len();
        if len > 0 {
            let i = self.model_picker_state.selected().unwrap_or(0);
            self.model_picker_state.select(Some((i + 1).min(len - 1)));
        }
    }

    pub fn model_picker_nav_up(&mut self) {
        let i = self.model_picker_state.selected().unwrap_or(0);
        self.model_picker_state.select(Some(i.saturating_sub(1)));
    }

    pub fn select_model(&mut self) {
        let Some(model) = self
            .model_picker_state
            .selected()
            .and_then(|i| self.available_models.get(i))
            .cloned()
        else {
            return;
        };

        self.service.set_model(&model);
        self.show_model_picker = false;
        if let Err(e) = Config::save_default_model(&model) {
            tracing::warn!(error = %e, "could not save model to config");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_app() -> App {
        let service = TrailService::new(Arc::new(GeminiClient::new(None)));
        App::with_service(service)
    }

    fn type_into(app: &mut App, text: &str) {
        for c in text.chars() {
            app.focused_input().insert(c);
        }
    }

    #[test]
    fn test_text_input_editing_is_utf8_safe() {
        let mut input = TextInput::default();
        for c in "Mönchsberg".chars() {
            input.insert(c);
        }
        input.left();
        input.left();
        input.backspace();
        input.home();
        input.delete();
        assert_eq!(input.value, "önchsbrg");
        input.end();
        assert_eq!(input.cursor, 8);
    }

    #[test]
    fn test_submit_with_empty_destination_shows_notice() {
        let mut app = offline_app();
        type_into(&mut app, "Portland, OR");

        app.submit_search();

        assert!(app.pending.is_none());
        assert!(!app.is_loading());
        assert_eq!(app.notice.as_deref(), Some("a destination is required"));
    }

    #[tokio::test]
    async fn test_offline_search_shows_sample_trails() {
        let mut app = offline_app();
        type_into(&mut app, "Portland, OR");
        app.toggle_focus();
        type_into(&mut app, "Joshua Tree, CA");

        app.submit_search();
        assert!(app.is_loading());
        assert_eq!(app.view(), View::Home);

        app.finish_search().await;

        assert_eq!(app.view(), View::Map);
        assert!(!app.is_loading());
        assert_eq!(app.selected_trail().map(|t| t.id.as_str()), Some("1"));
        assert_eq!(app.trail_list_state.selected(), Some(0));
        let route = app.controller.state().route.clone().unwrap();
        assert_eq!(route.destination, "Joshua Tree, CA");
    }

    #[tokio::test]
    async fn test_route_is_stored_as_typed() {
        let mut app = offline_app();
        type_into(&mut app, " Portland, OR");
        app.toggle_focus();
        type_into(&mut app, "Joshua Tree, CA ");

        app.submit_search();
        app.finish_search().await;

        let route = app.controller.state().route.clone().unwrap();
        assert_eq!(route.start, " Portland, OR");
        assert_eq!(route.destination, "Joshua Tree, CA ");
    }

    #[tokio::test]
    async fn test_second_submit_while_loading_is_ignored() {
        let mut app = offline_app();
        type_into(&mut app, "A");
        app.toggle_focus();
        type_into(&mut app, "B");

        app.submit_search();
        app.destination_input.value = "C".to_string();
        app.submit_search();
        app.finish_search().await;

        let route = app.controller.state().route.clone().unwrap();
        assert_eq!(route.destination, "B");
    }

    #[tokio::test]
    async fn test_trail_navigation_and_back() {
        let mut app = offline_app();
        type_into(&mut app, "A");
        app.toggle_focus();
        type_into(&mut app, "B");
        app.submit_search();
        app.finish_search().await;

        app.trail_nav_down();
        assert_eq!(app.selected_trail().unwrap().id, "2");
        app.trail_nav_down();
        assert_eq!(app.selected_trail().unwrap().id, "2");
        app.select_trail("missing");
        assert_eq!(app.selected_trail().unwrap().id, "2");
        app.trail_nav_first();
        assert_eq!(app.selected_trail().unwrap().id, "1");

        app.go_back();
        assert_eq!(app.view(), View::Home);
        assert!(app.controller.state().route.is_none());
    }

    #[tokio::test]
    async fn test_click_selects_trail_row() {
        let mut app = offline_app();
        type_into(&mut app, "A");
        app.toggle_focus();
        type_into(&mut app, "B");
        app.submit_search();
        app.finish_search().await;

        app.trail_list_area = Some(Rect::new(0, 10, 40, 20));
        // Border at row 10, first trail rows 11-13, second trail rows 14-16
        app.click_trail(5, 15);
        assert_eq!(app.selected_trail().unwrap().id, "2");

        // Below the last trail
        app.click_trail(5, 25);
        assert_eq!(app.selected_trail().unwrap().id, "2");

        // On the border
        app.click_trail(0, 12);
        assert_eq!(app.selected_trail().unwrap().id, "2");
    }

    #[test]
    fn test_logo_click_cycles_variants() {
        let mut app = offline_app();
        assert_eq!(app.logo(), ("ONROUTE", "OUTDOORS"));

        // Nothing rendered yet
        assert!(!app.click_logo(1, 0));

        app.logo_area = Some(Rect::new(0, 0, 20, 1));
        assert!(app.click_logo(3, 0));
        assert_eq!(app.logo(), ("NOMAD", "TRAILS"));
        assert!(app.click_logo(19, 0));
        assert_eq!(app.logo(), ("WILD", "EARTH"));
        assert!(app.click_logo(0, 0));
        assert_eq!(app.logo(), ("ONROUTE", "OUTDOORS"));

        assert!(!app.click_logo(20, 0));
        assert!(!app.click_logo(3, 1));
        assert_eq!(app.logo_variant, 0);
    }

    #[test]
    fn test_model_picker_starts_on_current_model() {
        let mut app = offline_app();
        app.open_model_picker();
        assert!(app.show_model_picker);
        let idx = app.model_picker_state.selected().unwrap();
        assert_eq!(app.available_models[idx], "gemini-2.5-flash");
    }
}
