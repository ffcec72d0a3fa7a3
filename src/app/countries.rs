//! Country list state - fetch lifecycle, region filter and paging
//!
//! All transitions go through [`reduce`]. It is synchronous and total: no
//! action can fail, and unknown regions or out-of-range counts degrade to
//! empty results or no-ops.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::constants::{ALL_REGIONS, DEFAULT_ITEMS_PER_PAGE};
use crate::models::Country;

/// Commands and fetch lifecycle events accepted by the country state
#[derive(Debug, Clone, PartialEq)]
pub enum CountriesAction {
    FetchStarted,
    FetchSucceeded(Vec<Country>),
    FetchFailed(String),
    SetRegionFilter(String),
    LoadMore,
    ResetDisplayCount,
    SetItemsPerPage(usize),
    ClearAllFilters,
}

/// Fetched countries plus the current filtered and paged view
#[derive(Debug, Clone, PartialEq)]
pub struct CountriesState {
    /// Full list, sorted by name
    pub countries: Vec<Country>,
    /// Subset of `countries` matching `selected_region`
    pub filtered_countries: Vec<Country>,
    pub selected_region: String,
    pub displayed_count: usize,
    pub items_per_page: usize,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for CountriesState {
    fn default() -> Self {
        Self::with_items_per_page(DEFAULT_ITEMS_PER_PAGE)
    }
}

impl CountriesState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial state with a custom page size
    pub fn with_items_per_page(items_per_page: usize) -> Self {
        CountriesState {
            countries: Vec::new(),
            filtered_countries: Vec::new(),
            selected_region: String::from(ALL_REGIONS),
            displayed_count: items_per_page,
            items_per_page,
            loading: false,
            error: None,
        }
    }

    /// Leading slice of the filtered list that is currently shown
    pub fn visible(&self) -> &[Country] {
        let end = self.displayed_count.min(self.filtered_countries.len());
        &self.filtered_countries[..end]
    }

    /// Number of countries actually shown
    pub fn shown_count(&self) -> usize {
        self.displayed_count.min(self.filtered_countries.len())
    }

    pub fn has_more(&self) -> bool {
        self.displayed_count < self.filtered_countries.len()
    }

    pub fn is_filtered(&self) -> bool {
        self.selected_region != ALL_REGIONS
    }

    pub fn total_pages(&self) -> usize {
        if self.items_per_page == 0 {
            return 0;
        }
        self.filtered_countries.len().div_ceil(self.items_per_page)
    }

    pub fn current_page(&self) -> usize {
        if self.items_per_page == 0 {
            return 0;
        }
        self.shown_count().div_ceil(self.items_per_page)
    }

    /// Fraction of the filtered list currently shown, in `[0, 1]`
    pub fn progress(&self) -> f64 {
        let total = self.filtered_countries.len();
        if total == 0 {
            return 0.0;
        }
        (self.displayed_count as f64 / total as f64).min(1.0)
    }

    /// Country count per raw region string, ordered by region name
    pub fn region_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for country in &self.countries {
            *counts.entry(country.region.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Count for one region, using the same matching as the filter
    pub fn region_count(&self, region: &str) -> usize {
        if region == ALL_REGIONS {
            return self.countries.len();
        }
        self.countries
            .iter()
            .filter(|c| region_matches(&c.region, region))
            .count()
    }

    /// Region with the most countries; ties go to the region whose first
    /// country comes earliest in the sorted list
    pub fn largest_region(&self) -> Option<(String, usize)> {
        let counts = self.region_counts();
        let mut best: Option<(String, usize)> = None;
        for country in &self.countries {
            let count = counts.get(&country.region).copied().unwrap_or(0);
            match &best {
                Some((_, best_count)) if *best_count >= count => {}
                _ => best = Some((country.region.clone(), count)),
            }
        }
        best
    }
}

/// Apply one action to the state
pub fn reduce(state: &mut CountriesState, action: CountriesAction) {
    match action {
        CountriesAction::FetchStarted => {
            state.loading = true;
            state.error = None;
        }
        CountriesAction::FetchSucceeded(mut countries) => {
            countries.sort_by(|a, b| locale_cmp(&a.name, &b.name));
            state.loading = false;
            state.filtered_countries = countries.clone();
            state.countries = countries;
            // The previously selected region is not reapplied here.
        }
        CountriesAction::FetchFailed(message) => {
            state.loading = false;
            state.error = Some(message);
        }
        CountriesAction::SetRegionFilter(region) => {
            state.displayed_count = state.items_per_page;
            state.filtered_countries = filter_by_region(&state.countries, &region);
            state.selected_region = region;
        }
        CountriesAction::LoadMore => {
            let remaining = state
                .filtered_countries
                .len()
                .saturating_sub(state.displayed_count);
            state.displayed_count += state.items_per_page.min(remaining);
        }
        CountriesAction::ResetDisplayCount => {
            state.displayed_count = state.items_per_page;
        }
        CountriesAction::SetItemsPerPage(n) => {
            state.items_per_page = n;
            state.displayed_count = state.displayed_count.max(n);
        }
        CountriesAction::ClearAllFilters => {
            state.selected_region = String::from(ALL_REGIONS);
            state.filtered_countries = state.countries.clone();
            state.displayed_count = state.items_per_page;
        }
    }
}

/// Countries matching a region token, in their original order
pub fn filter_by_region(countries: &[Country], region: &str) -> Vec<Country> {
    if region == ALL_REGIONS {
        return countries.to_vec();
    }
    countries
        .iter()
        .filter(|c| region_matches(&c.region, region))
        .cloned()
        .collect()
}

/// Case and whitespace insensitive region comparison.
///
/// "americas" also accepts records tagged "america".
pub fn region_matches(country_region: &str, selected: &str) -> bool {
    let country_region = normalize_region(country_region);
    let selected = normalize_region(selected);

    if selected == "americas" {
        return country_region == "americas" || country_region == "america";
    }

    country_region == selected
}

pub fn normalize_region(region: &str) -> String {
    region.trim().to_lowercase()
}

/// Name ordering for the country list.
///
/// Base letters are compared first with accents and case stripped, so
/// "Åland Islands" sorts between "Afghanistan" and "Albania". Remaining ties
/// break on accents, then lowercase before uppercase, then raw code points.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(primary_key(b))
        .then_with(|| secondary_key(a).cmp(secondary_key(b)))
        .then_with(|| tertiary_key(a).cmp(tertiary_key(b)))
        .then_with(|| a.cmp(b))
}

fn primary_key(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn secondary_key(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

fn tertiary_key(s: &str) -> impl Iterator<Item = bool> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(char::is_uppercase)
}
