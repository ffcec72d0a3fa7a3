//! Login form - field editing and validation
//!
//! The login gate is a stub: a well-formed email and password are enough to
//! open a session. Nothing is sent anywhere.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::Session;

const PASSWORD_SYMBOLS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";
const MIN_PASSWORD_LEN: usize = 8;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

/// Focusable login fields
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
    KeepSignedIn,
}

impl LoginField {
    pub fn next(&self) -> LoginField {
        match self {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::KeepSignedIn,
            LoginField::KeepSignedIn => LoginField::Email,
        }
    }

    pub fn prev(&self) -> LoginField {
        match self {
            LoginField::Email => LoginField::KeepSignedIn,
            LoginField::Password => LoginField::Email,
            LoginField::KeepSignedIn => LoginField::Password,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, LoginField::Email | LoginField::Password)
    }
}

/// Per-field validation messages
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginErrors {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

#[derive(Clone, Debug, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub keep_signed_in: bool,
    pub focus: LoginField,
    pub errors: LoginErrors,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn prev_field(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn enter_char(&mut self, c: char) {
        match self.focus {
            LoginField::Email => self.email.push(c),
            LoginField::Password => self.password.push(c),
            LoginField::KeepSignedIn => {
                if c == ' ' {
                    self.toggle_keep_signed_in();
                }
            }
        }
    }

    pub fn delete_char(&mut self) {
        match self.focus {
            LoginField::Email => {
                self.email.pop();
            }
            LoginField::Password => {
                self.password.pop();
            }
            LoginField::KeepSignedIn => {}
        }
    }

    pub fn toggle_keep_signed_in(&mut self) {
        self.keep_signed_in = !self.keep_signed_in;
    }

    /// Masked password for display
    pub fn masked_password(&self) -> String {
        "*".repeat(self.password.chars().count())
    }

    pub fn validate(&self) -> LoginErrors {
        LoginErrors {
            email: validate_email(&self.email),
            password: validate_password(&self.password),
        }
    }

    /// Validate and open a session; on failure the errors stay on the form
    pub fn submit(&mut self) -> Option<Session> {
        self.errors = self.validate();
        if !self.errors.is_empty() {
            return None;
        }
        let session = Session::new(self.email.trim(), self.keep_signed_in);
        self.password.clear();
        Some(session)
    }
}

pub fn validate_email(email: &str) -> Option<String> {
    if email.is_empty() {
        return Some("Email is required".into());
    }
    if !email_regex().is_match(email) {
        return Some("Please enter a valid email address".into());
    }
    None
}

pub fn validate_password(password: &str) -> Option<String> {
    if password.is_empty() {
        return Some("Password is required".into());
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Some("Password must be at least 8 characters long".into());
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Some("Password must contain at least 1 uppercase letter".into());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Some("Password must contain at least 1 number".into());
    }
    if !password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        return Some("Password must contain at least 1 symbol".into());
    }
    None
}
