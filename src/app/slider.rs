//! Featured country slider with auto-play

use std::time::Duration;

use crate::app::countries::CountriesState;
use crate::constants::{DEFAULT_SLIDER_INTERVAL_MS, FILTERED_SLIDE_LIMIT};
use crate::models::Slide;

#[derive(Clone, Debug)]
pub struct SliderState {
    pub slides: Vec<Slide>,
    pub current: usize,
    pub auto_play: bool,
    pub interval: Duration,
}

impl Default for SliderState {
    fn default() -> Self {
        SliderState {
            slides: Vec::new(),
            current: 0,
            auto_play: true,
            interval: Duration::from_millis(DEFAULT_SLIDER_INTERVAL_MS),
        }
    }
}

impl SliderState {
    pub fn new(auto_play: bool, interval: Duration) -> Self {
        SliderState {
            auto_play,
            interval,
            ..Default::default()
        }
    }

    pub fn current_slide(&self) -> Option<&Slide> {
        self.slides.get(self.current)
    }

    pub fn next(&mut self) {
        if !self.slides.is_empty() {
            self.current = (self.current + 1) % self.slides.len();
        }
    }

    pub fn prev(&mut self) {
        if !self.slides.is_empty() {
            self.current = (self.current + self.slides.len() - 1) % self.slides.len();
        }
    }

    pub fn go_to(&mut self, index: usize) {
        if index < self.slides.len() {
            self.current = index;
        }
    }

    /// Auto-play step; returns true when the slide changed
    pub fn tick(&mut self) -> bool {
        if !self.auto_play || self.slides.len() <= 1 {
            return false;
        }
        self.next();
        true
    }

    pub fn toggle_auto_play(&mut self) {
        self.auto_play = !self.auto_play;
    }

    pub fn set_slides(&mut self, slides: Vec<Slide>) {
        self.slides = slides;
        if self.current >= self.slides.len() {
            self.current = 0;
        }
    }
}

/// Slides for the visible page: every visible country when unfiltered,
/// the first few otherwise.
pub fn slides_for(state: &CountriesState) -> Vec<Slide> {
    let visible = state.visible();
    let limit = if state.is_filtered() {
        FILTERED_SLIDE_LIMIT
    } else {
        visible.len()
    };

    visible
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, country)| Slide::for_country(i, country))
        .collect()
}
