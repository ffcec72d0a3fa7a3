//! Command handlers - business logic for processing UI events

use crate::app::countries::CountriesAction;
use crate::app::slider::slides_for;
use crate::app::store::Settlement;
use crate::app::AppState;
use crate::constants::{ALL_REGIONS, FETCH_FAILED_MESSAGE, ITEMS_PER_PAGE_OPTIONS, KNOWN_REGIONS};
use crate::messages::ui_events::Screen;
use crate::messages::{NetworkCommand, NetworkResponse};

impl AppState {
    // ========================
    // Login gate
    // ========================

    pub fn login_char(&mut self, c: char) {
        self.login.enter_char(c);
    }

    pub fn login_backspace(&mut self) {
        self.login.delete_char();
    }

    pub fn login_next_field(&mut self) {
        self.login.next_field();
    }

    pub fn login_prev_field(&mut self) {
        self.login.prev_field();
    }

    pub fn toggle_keep_signed_in(&mut self) {
        self.login.toggle_keep_signed_in();
    }

    /// Validate the form; on success enter Home and start the fetch
    pub fn submit_login(&mut self) -> Option<NetworkCommand> {
        let session = self.login.submit()?;
        tracing::info!(email = %session.email, keep_signed_in = session.keep_signed_in, "Signed in");
        self.session = Some(session);
        self.screen = Screen::Home;
        self.status_message = None;
        self.request_fetch()
    }

    pub fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::info!(email = %session.email, "Signed out");
        }
        self.login = Default::default();
        self.screen = Screen::Login;
        self.show_help = false;
        self.status_message = None;
    }

    // ========================
    // Fetch lifecycle
    // ========================

    /// Start a fetch; only allowed behind the login gate
    pub fn request_fetch(&mut self) -> Option<NetworkCommand> {
        if !self.is_signed_in() {
            return None;
        }
        let id = self.store.begin_fetch();
        Some(NetworkCommand::FetchCountries {
            id,
            url: self.api_url.clone(),
        })
    }

    pub fn handle_response(&mut self, response: NetworkResponse) {
        let id = response.id();
        let time_ms = response.time_ms();
        let settlement = match response {
            NetworkResponse::CountriesLoaded { countries, .. } => {
                let count = countries.len();
                let settlement = self.store.settle_success(id, countries);
                if settlement == Settlement::Applied {
                    self.status_message = Some(format!("Loaded {} countries in {} ms", count, time_ms));
                }
                settlement
            }
            NetworkResponse::FetchFailed { message, .. } => {
                let message = if message.is_empty() {
                    String::from(FETCH_FAILED_MESSAGE)
                } else {
                    message
                };
                let settlement = self.store.settle_failure(id, message);
                if settlement == Settlement::Applied {
                    self.status_message = None;
                }
                settlement
            }
        };

        if settlement == Settlement::Stale {
            tracing::info!(id, "Ignoring settlement of superseded fetch");
            return;
        }
        self.refresh_view();
    }

    // ========================
    // Region filter
    // ========================

    pub fn set_region(&mut self, region: &str) {
        self.store
            .dispatch(CountriesAction::SetRegionFilter(region.to_string()));
        self.list_selected = 0;
        self.refresh_view();
    }

    pub fn select_region(&mut self, index: usize) {
        if let Some(region) = KNOWN_REGIONS.get(index) {
            self.set_region(region);
        }
    }

    pub fn next_region(&mut self) {
        let index = (self.region_index() + 1) % KNOWN_REGIONS.len();
        self.select_region(index);
    }

    pub fn prev_region(&mut self) {
        let index = (self.region_index() + KNOWN_REGIONS.len() - 1) % KNOWN_REGIONS.len();
        self.select_region(index);
    }

    pub fn clear_filters(&mut self) {
        self.store.dispatch(CountriesAction::ClearAllFilters);
        self.list_selected = 0;
        self.refresh_view();
    }

    /// Position of the selected region in the filter bar (0 = all)
    fn region_index(&self) -> usize {
        let selected = &self.countries().selected_region;
        if selected == ALL_REGIONS {
            return 0;
        }
        KNOWN_REGIONS
            .iter()
            .position(|r| r.eq_ignore_ascii_case(selected.trim()))
            .unwrap_or(0)
    }

    // ========================
    // Paging
    // ========================

    pub fn load_more(&mut self) {
        self.store.dispatch(CountriesAction::LoadMore);
        self.refresh_view();
    }

    pub fn reset_display_count(&mut self) {
        self.store.dispatch(CountriesAction::ResetDisplayCount);
        self.refresh_view();
    }

    /// Step through the offered page sizes, wrapping at the end
    pub fn cycle_page_size(&mut self) {
        let current = self.countries().items_per_page;
        let next = ITEMS_PER_PAGE_OPTIONS
            .iter()
            .copied()
            .find(|&n| n > current)
            .unwrap_or(ITEMS_PER_PAGE_OPTIONS[0]);
        self.store.dispatch(CountriesAction::SetItemsPerPage(next));
        self.refresh_view();
    }

    // ========================
    // Country list
    // ========================

    pub fn list_up(&mut self) {
        self.list_selected = self.list_selected.saturating_sub(1);
    }

    pub fn list_down(&mut self) {
        let len = self.countries().shown_count();
        if self.list_selected + 1 < len {
            self.list_selected += 1;
        }
    }

    pub fn list_top(&mut self) {
        self.list_selected = 0;
    }

    /// Show the selected country in the slider
    pub fn select_country(&mut self) {
        self.slider.go_to(self.list_selected);
    }

    // ========================
    // Slider
    // ========================

    pub fn slider_next(&mut self) {
        self.slider.next();
    }

    pub fn slider_prev(&mut self) {
        self.slider.prev();
    }

    pub fn toggle_auto_play(&mut self) {
        self.slider.toggle_auto_play();
    }

    /// Auto-play step; returns true when a redraw is needed
    pub fn slider_tick(&mut self) -> bool {
        self.screen == Screen::Home && self.slider.tick()
    }

    // ========================
    // Popups
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    /// Rebuild slides and keep the list cursor on a visible row
    fn refresh_view(&mut self) {
        let slides = slides_for(self.store.snapshot());
        self.slider.set_slides(slides);

        let shown = self.countries().shown_count();
        if self.list_selected >= shown {
            self.list_selected = shown.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::Country;

    fn signed_in() -> AppState {
        let mut state = AppState::default();
        state.login.email = "ana@example.com".into();
        state.login.password = "Passw0rd!".into();
        assert!(state.submit_login().is_some());
        state
    }

    fn load(state: &mut AppState, list: Vec<Country>) {
        let id = match state.request_fetch() {
            Some(NetworkCommand::FetchCountries { id, .. }) => id,
            _ => panic!("expected fetch command"),
        };
        state.handle_response(NetworkResponse::CountriesLoaded {
            id,
            countries: list,
            time_ms: 3,
        });
    }

    fn world() -> Vec<Country> {
        let mut list = Vec::new();
        for i in 0..20 {
            list.push(Country::new(format!("Africa {:02}", i), "Africa"));
        }
        for i in 0..10 {
            list.push(Country::new(format!("Europe {:02}", i), "Europe"));
        }
        list.push(Country::new("Peru", "America"));
        list.push(Country::new("Brazil", "Americas"));
        list
    }

    #[test]
    fn test_render_state_shows_sign_in_time() {
        let state = signed_in();
        let render = state.to_render_state();
        assert_eq!(render.user_email.as_deref(), Some("ana@example.com"));
        let since = render.signed_in_since.unwrap();
        assert_eq!(since.len(), 5);
        assert_eq!(&since[2..3], ":");

        assert!(AppState::default().to_render_state().signed_in_since.is_none());
    }

    #[test]
    fn test_fetch_requires_session() {
        let mut state = AppState::default();
        assert!(state.request_fetch().is_none());
        assert!(!state.countries().loading);
    }

    #[test]
    fn test_login_enters_home_and_fetches() {
        let mut state = AppState::default();
        state.login.email = "ana@example.com".into();
        state.login.password = "Passw0rd!".into();
        match state.submit_login() {
            Some(NetworkCommand::FetchCountries { id, url }) => {
                assert_eq!(id, 1);
                assert_eq!(url, crate::constants::DEFAULT_API_URL);
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(state.screen, Screen::Home);
        assert!(state.countries().loading);
    }

    #[test]
    fn test_invalid_login_stays_on_gate() {
        let mut state = AppState::default();
        state.login.email = "ana".into();
        assert!(state.submit_login().is_none());
        assert_eq!(state.screen, Screen::Login);
        assert!(state.session.is_none());
    }

    #[test]
    fn test_load_populates_view_and_slides() {
        let mut state = signed_in();
        load(&mut state, world());

        let render = state.to_render_state();
        assert_eq!(render.total_countries, 32);
        assert_eq!(render.visible_countries.len(), 12);
        assert_eq!(render.slide_count, 12);
        assert!(render.has_more);
        assert_eq!(render.status_message.as_deref(), Some("Loaded 32 countries in 3 ms"));
    }

    #[test]
    fn test_failure_sets_error() {
        let mut state = signed_in();
        assert!(state.countries().loading);
        state.handle_response(NetworkResponse::FetchFailed {
            id: 1,
            message: String::new(),
            time_ms: 1,
        });
        let render = state.to_render_state();
        assert!(!render.loading);
        assert_eq!(render.error.as_deref(), Some("Failed to fetch countries"));
        assert_eq!(render.total_countries, 0);
    }

    #[test]
    fn test_region_cycle_and_alias_counts() {
        let mut state = signed_in();
        load(&mut state, world());

        state.next_region();
        assert_eq!(state.countries().selected_region, "Africa");
        state.next_region();
        assert_eq!(state.countries().selected_region, "Americas");
        assert_eq!(state.countries().filtered_countries.len(), 2);

        state.prev_region();
        state.prev_region();
        assert_eq!(state.countries().selected_region, "all");
        state.prev_region();
        assert_eq!(state.countries().selected_region, "Polar");

        let render = state.to_render_state();
        let americas = render
            .region_counts
            .iter()
            .find(|(r, _)| r == "Americas")
            .map(|(_, n)| *n);
        assert_eq!(americas, Some(2));
    }

    #[test]
    fn test_filter_resets_paging_and_limits_slides() {
        let mut state = signed_in();
        load(&mut state, world());
        state.load_more();
        assert_eq!(state.countries().displayed_count, 24);

        state.select_region(1);
        assert_eq!(state.countries().displayed_count, 12);
        assert_eq!(state.slider.slides.len(), 5);

        state.clear_filters();
        assert_eq!(state.countries().filtered_countries.len(), 32);
        assert_eq!(state.slider.slides.len(), 12);
    }

    #[test]
    fn test_cycle_page_size() {
        let mut state = signed_in();
        load(&mut state, world());
        let sizes: Vec<usize> = (0..4)
            .map(|_| {
                state.cycle_page_size();
                state.countries().items_per_page
            })
            .collect();
        assert_eq!(sizes, vec![24, 36, 48, 12]);
        // Growing never shrinks what is shown
        assert_eq!(state.countries().displayed_count, 48);

        state.reset_display_count();
        assert_eq!(state.countries().displayed_count, 12);
    }

    #[test]
    fn test_list_selection_stays_visible() {
        let mut state = signed_in();
        load(&mut state, world());
        for _ in 0..40 {
            state.list_down();
        }
        assert_eq!(state.list_selected, 11);

        state.select_country();
        assert_eq!(state.slider.current, 11);

        state.select_region(3);
        assert_eq!(state.list_selected, 0);
        state.list_up();
        assert_eq!(state.list_selected, 0);
    }

    #[test]
    fn test_stale_settlement_with_fencing() {
        let config = Config {
            fence_fetches: true,
            ..Config::default()
        };
        let mut state = AppState::new(&config);
        state.login.email = "ana@example.com".into();
        state.login.password = "Passw0rd!".into();
        state.submit_login();
        let newer = match state.request_fetch() {
            Some(NetworkCommand::FetchCountries { id, .. }) => id,
            _ => panic!("expected fetch command"),
        };

        state.handle_response(NetworkResponse::CountriesLoaded {
            id: newer,
            countries: world(),
            time_ms: 1,
        });
        state.handle_response(NetworkResponse::FetchFailed {
            id: newer - 1,
            message: "late".into(),
            time_ms: 9,
        });
        assert!(state.countries().error.is_none());
        assert_eq!(state.countries().countries.len(), 32);
    }

    #[test]
    fn test_logout_keeps_data() {
        let mut state = signed_in();
        load(&mut state, world());
        state.logout();
        assert_eq!(state.screen, Screen::Login);
        assert!(state.session.is_none());
        assert!(state.login.email.is_empty());
        assert_eq!(state.countries().countries.len(), 32);
        assert!(state.request_fetch().is_none());
    }

    #[test]
    fn test_slider_tick_only_on_home() {
        let mut state = AppState::default();
        assert!(!state.slider_tick());

        let mut state = signed_in();
        load(&mut state, world());
        assert!(state.slider_tick());
        assert_eq!(state.slider.current, 1);
    }
}
