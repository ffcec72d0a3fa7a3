//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::constants::KNOWN_REGIONS;

/// Application screens
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum Screen {
    #[default]
    Login,
    Home,
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Login form
    LoginChar(char),
    LoginBackspace,
    LoginNextField,
    LoginPrevField,
    ToggleKeepSignedIn,
    SubmitLogin,

    // Region filter
    NextRegion,
    PrevRegion,
    SelectRegion(usize),
    ClearFilters,

    // Paging
    LoadMore,
    CyclePageSize,
    ResetDisplayCount,

    // Country list
    ListUp,
    ListDown,
    ListTop,
    SelectCountry,

    // Slider
    SliderNext,
    SliderPrev,
    ToggleAutoPlay,

    // Data
    RetryFetch,

    // Session
    Logout,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    screen: Screen,
    show_help: bool,
    login_on_checkbox: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char('c') = key.code {
            return Some(UiEvent::Quit);
        }
        return None;
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match screen {
        Screen::Login => handle_login_keys(key, login_on_checkbox),
        Screen::Home => handle_home_keys(key),
    }
}

/// Handle keys for the login form; every printable key is text input
fn handle_login_keys(key: KeyEvent, on_checkbox: bool) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::Quit),
        KeyCode::Tab | KeyCode::Down => Some(UiEvent::LoginNextField),
        KeyCode::BackTab | KeyCode::Up => Some(UiEvent::LoginPrevField),
        KeyCode::Enter => Some(UiEvent::SubmitLogin),
        KeyCode::Backspace => Some(UiEvent::LoginBackspace),
        KeyCode::Char(' ') if on_checkbox => Some(UiEvent::ToggleKeepSignedIn),
        KeyCode::Char(c) => Some(UiEvent::LoginChar(c)),
        _ => None,
    }
}

/// Handle keys for the home screen
fn handle_home_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Char('f') => Some(UiEvent::NextRegion),
        KeyCode::Char('F') => Some(UiEvent::PrevRegion),
        KeyCode::Char(c @ '0'..='9') => {
            let index = c.to_digit(10)? as usize;
            (index < KNOWN_REGIONS.len()).then_some(UiEvent::SelectRegion(index))
        }
        KeyCode::Char('x') => Some(UiEvent::ClearFilters),
        KeyCode::Char('m') | KeyCode::Char(' ') => Some(UiEvent::LoadMore),
        KeyCode::Char('p') => Some(UiEvent::CyclePageSize),
        KeyCode::Char('c') => Some(UiEvent::ResetDisplayCount),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::ListUp),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::ListDown),
        KeyCode::Home | KeyCode::Char('t') => Some(UiEvent::ListTop),
        KeyCode::Enter => Some(UiEvent::SelectCountry),
        KeyCode::Left | KeyCode::Char('h') => Some(UiEvent::SliderPrev),
        KeyCode::Right | KeyCode::Char('l') => Some(UiEvent::SliderNext),
        KeyCode::Char('a') => Some(UiEvent::ToggleAutoPlay),
        KeyCode::Char('r') => Some(UiEvent::RetryFetch),
        KeyCode::Char('o') => Some(UiEvent::Logout),
        _ => None,
    }
}
