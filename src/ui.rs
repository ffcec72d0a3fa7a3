use ratatui::{prelude::*, widgets::*};

use crate::constants::{ALL_REGIONS, KNOWN_REGIONS};
use crate::messages::RenderState;

/// Display label for a region token
pub fn region_label(region: &str) -> String {
    if region == ALL_REGIONS {
        String::from("All Regions")
    } else {
        region.to_string()
    }
}

/// Region accent color
pub fn region_color(region: &str) -> Color {
    match region.trim().to_lowercase().as_str() {
        "africa" => Color::Yellow,
        "americas" | "america" => Color::Green,
        "asia" => Color::Red,
        "europe" => Color::Blue,
        "oceania" => Color::Cyan,
        "polar" => Color::White,
        _ => Color::Gray,
    }
}

/// Renders the region filter bar; number keys select a tab
pub fn render_region_tabs(state: &RenderState) -> Tabs<'static> {
    let titles: Vec<Line> = KNOWN_REGIONS
        .iter()
        .enumerate()
        .map(|(i, region)| {
            let count = if *region == ALL_REGIONS {
                state.total_countries
            } else {
                state
                    .region_counts
                    .iter()
                    .find(|(r, _)| r.as_str() == *region)
                    .map(|(_, n)| *n)
                    .unwrap_or(0)
            };
            let label = if *region == ALL_REGIONS { "All" } else { *region };
            Line::from(format!("{}:{} ({})", i, label, count))
        })
        .collect();

    let selected = KNOWN_REGIONS
        .iter()
        .position(|r| r.eq_ignore_ascii_case(state.selected_region.trim()))
        .unwrap_or(0);

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .divider("|")
}

/// "Showing X of Y countries (Page A of B)"
pub fn pager_summary(state: &RenderState) -> String {
    let shown = state.displayed_count.min(state.filtered_count);
    let mut text = format!("Showing {} of {} countries", shown, state.filtered_count);
    if state.total_pages > 1 {
        text.push_str(&format!(" (Page {} of {})", state.current_page, state.total_pages));
    }
    text
}

/// "N countries found in Region"
pub fn filter_summary(state: &RenderState) -> String {
    let noun = if state.filtered_count == 1 { "country" } else { "countries" };
    if state.is_filtered() {
        format!("{} {} found in {}", state.filtered_count, noun, state.selected_region)
    } else {
        format!("{} {} found", state.filtered_count, noun)
    }
}

/// Message shown when the list is empty
pub fn empty_list_message(state: &RenderState) -> String {
    if state.is_filtered() {
        format!(
            "No countries found in {}. Try selecting a different region.",
            state.selected_region
        )
    } else {
        String::from("No countries available at the moment.")
    }
}
