//! Render state - data structure sent from App layer to UI for rendering

use crate::app::login::{LoginErrors, LoginField};
use crate::messages::ui_events::Screen;
use crate::models::{Country, Slide};

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    pub screen: Screen,

    // Login form
    pub login_email: String,
    pub login_password_masked: String,
    pub login_keep_signed_in: bool,
    pub login_focus: LoginField,
    pub login_errors: LoginErrors,

    // Session
    pub user_email: Option<String>,
    /// Local sign-in time, "HH:MM"
    pub signed_in_since: Option<String>,

    // Countries
    pub visible_countries: Vec<Country>,
    pub total_countries: usize,
    pub filtered_count: usize,
    pub selected_region: String,
    pub region_counts: Vec<(String, usize)>,
    pub largest_region: Option<(String, usize)>,
    pub displayed_count: usize,
    pub items_per_page: usize,
    pub has_more: bool,
    pub current_page: usize,
    pub total_pages: usize,
    pub progress: f64,
    pub loading: bool,
    pub error: Option<String>,

    // List
    pub list_selected: usize,

    // Slider
    pub current_slide: Option<Slide>,
    pub slide_index: usize,
    pub slide_count: usize,
    pub auto_play: bool,

    // Popups / status
    pub show_help: bool,
    pub status_message: Option<String>,
}

impl RenderState {
    pub fn is_filtered(&self) -> bool {
        self.selected_region != crate::constants::ALL_REGIONS
    }
}
