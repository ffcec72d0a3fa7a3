//! App state - pure data structure with no I/O logic

use crate::app::countries::CountriesState;
use crate::app::login::LoginForm;
use crate::app::slider::SliderState;
use crate::app::store::CountryStore;
use crate::config::Config;
use crate::constants::KNOWN_REGIONS;
use crate::messages::ui_events::Screen;
use crate::messages::RenderState;
use crate::models::Session;

/// Main application state - pure data, no I/O
pub struct AppState {
    pub screen: Screen,

    // Login gate
    pub login: LoginForm,
    pub session: Option<Session>,

    // Country data
    pub store: CountryStore,
    pub api_url: String,

    // Home view
    pub slider: SliderState,
    pub list_selected: usize,

    // Popups / status
    pub show_help: bool,
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let countries = CountriesState::with_items_per_page(config.items_per_page);
        AppState {
            screen: Screen::Login,
            login: LoginForm::new(),
            session: None,
            store: CountryStore::new(countries).with_fencing(config.fence_fetches),
            api_url: config.api_url.clone(),
            slider: SliderState::new(config.auto_play, config.slider_interval()),
            list_selected: 0,
            show_help: false,
            status_message: None,
        }
    }

    pub fn countries(&self) -> &CountriesState {
        self.store.snapshot()
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        let countries = self.countries();
        let region_counts = KNOWN_REGIONS
            .iter()
            .skip(1)
            .map(|r| (r.to_string(), countries.region_count(r)))
            .collect();

        RenderState {
            screen: self.screen,
            login_email: self.login.email.clone(),
            login_password_masked: self.login.masked_password(),
            login_keep_signed_in: self.login.keep_signed_in,
            login_focus: self.login.focus,
            login_errors: self.login.errors.clone(),
            user_email: self.session.as_ref().map(|s| s.email.clone()),
            signed_in_since: self.session.as_ref().map(|s| {
                s.signed_in_at
                    .with_timezone(&chrono::Local)
                    .format("%H:%M")
                    .to_string()
            }),
            visible_countries: countries.visible().to_vec(),
            total_countries: countries.countries.len(),
            filtered_count: countries.filtered_countries.len(),
            selected_region: countries.selected_region.clone(),
            region_counts,
            largest_region: countries.largest_region(),
            displayed_count: countries.displayed_count,
            items_per_page: countries.items_per_page,
            has_more: countries.has_more(),
            current_page: countries.current_page(),
            total_pages: countries.total_pages(),
            progress: countries.progress(),
            loading: countries.loading,
            error: countries.error.clone(),
            list_selected: self.list_selected,
            current_slide: self.slider.current_slide().cloned(),
            slide_index: self.slider.current,
            slide_count: self.slider.slides.len(),
            auto_play: self.slider.auto_play,
            show_help: self.show_help,
            status_message: self.status_message.clone(),
        }
    }
}
