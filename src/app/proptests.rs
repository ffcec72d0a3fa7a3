//! Property-based tests for the country state transitions

use super::countries::*;
use crate::models::Country;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_region() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Africa".to_string()),
        Just("Americas".to_string()),
        Just("America".to_string()),
        Just(" asia ".to_string()),
        Just("Europe".to_string()),
        Just("OCEANIA".to_string()),
        Just(String::new()),
        "[A-Za-z]{1,8}",
    ]
}

fn arb_country() -> impl Strategy<Value = Country> {
    ("[A-Za-z ]{1,12}", arb_region()).prop_map(|(name, region)| Country::new(name, region))
}

fn arb_filter() -> impl Strategy<Value = String> {
    prop_oneof![Just("all".to_string()), arb_region()]
}

fn arb_action() -> impl Strategy<Value = CountriesAction> {
    prop_oneof![
        Just(CountriesAction::FetchStarted),
        proptest::collection::vec(arb_country(), 0..40).prop_map(CountriesAction::FetchSucceeded),
        "[a-z ]{0,10}".prop_map(CountriesAction::FetchFailed),
        arb_filter().prop_map(CountriesAction::SetRegionFilter),
        Just(CountriesAction::LoadMore),
        Just(CountriesAction::ResetDisplayCount),
        (1usize..50).prop_map(CountriesAction::SetItemsPerPage),
        Just(CountriesAction::ClearAllFilters),
    ]
}

fn is_sorted(list: &[Country]) -> bool {
    list.windows(2)
        .all(|w| locale_cmp(&w[0].name, &w[1].name) != std::cmp::Ordering::Greater)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn filtered_tracks_last_applied_filter(actions in proptest::collection::vec(arb_action(), 0..30)) {
        let mut state = CountriesState::new();
        // A successful fetch shows everything until the next filter command
        let mut effective = String::from("all");
        for action in actions {
            match &action {
                CountriesAction::SetRegionFilter(r) => effective = r.clone(),
                CountriesAction::ClearAllFilters | CountriesAction::FetchSucceeded(_) => {
                    effective = String::from("all")
                }
                _ => {}
            }
            reduce(&mut state, action);
            prop_assert_eq!(
                &state.filtered_countries,
                &filter_by_region(&state.countries, &effective)
            );
        }
    }

    #[test]
    fn fetch_success_sorts_and_unfilters(
        filter in arb_filter(),
        payload in proptest::collection::vec(arb_country(), 0..40),
    ) {
        let mut state = CountriesState::new();
        reduce(&mut state, CountriesAction::SetRegionFilter(filter));
        reduce(&mut state, CountriesAction::FetchStarted);
        reduce(&mut state, CountriesAction::FetchSucceeded(payload.clone()));

        prop_assert!(!state.loading);
        prop_assert!(is_sorted(&state.countries));
        prop_assert_eq!(state.countries.len(), payload.len());
        prop_assert_eq!(&state.filtered_countries, &state.countries);
    }

    #[test]
    fn filter_admits_only_matching_regions(
        payload in proptest::collection::vec(arb_country(), 0..40),
        region in arb_region(),
    ) {
        prop_assume!(region != "all");
        let mut state = CountriesState::new();
        reduce(&mut state, CountriesAction::FetchSucceeded(payload));
        reduce(&mut state, CountriesAction::SetRegionFilter(region.clone()));

        let wanted = normalize_region(&region);
        for c in &state.filtered_countries {
            let got = normalize_region(&c.region);
            prop_assert!(got == wanted || (wanted == "americas" && got == "america"));
        }
        let expected = state
            .countries
            .iter()
            .filter(|c| region_matches(&c.region, &region))
            .count();
        prop_assert_eq!(state.filtered_countries.len(), expected);
    }

    #[test]
    fn filter_resets_displayed_count(
        actions in proptest::collection::vec(arb_action(), 0..20),
        region in arb_filter(),
    ) {
        let mut state = CountriesState::new();
        for action in actions {
            reduce(&mut state, action);
        }
        reduce(&mut state, CountriesAction::SetRegionFilter(region));
        prop_assert_eq!(state.displayed_count, state.items_per_page);
    }

    #[test]
    fn load_more_never_passes_end(
        payload in proptest::collection::vec(arb_country(), 0..80),
        page in 1usize..30,
        steps in 0usize..12,
    ) {
        let mut state = CountriesState::with_items_per_page(page);
        reduce(&mut state, CountriesAction::FetchSucceeded(payload));
        let start = state.displayed_count;
        for _ in 0..steps {
            reduce(&mut state, CountriesAction::LoadMore);
        }
        prop_assert!(state.displayed_count <= state.filtered_countries.len().max(start));

        // Idempotent once everything is shown
        let len = state.filtered_countries.len();
        for _ in 0..(len / page + 2) {
            reduce(&mut state, CountriesAction::LoadMore);
        }
        let settled = state.displayed_count;
        reduce(&mut state, CountriesAction::LoadMore);
        prop_assert_eq!(state.displayed_count, settled);
        prop_assert!(!state.has_more());
    }

    #[test]
    fn page_size_change_never_shrinks(
        actions in proptest::collection::vec(arb_action(), 0..20),
        n in 1usize..100,
    ) {
        let mut state = CountriesState::new();
        for action in actions {
            reduce(&mut state, action);
        }
        let before = state.displayed_count;
        reduce(&mut state, CountriesAction::SetItemsPerPage(n));
        prop_assert_eq!(state.displayed_count, before.max(n));
        prop_assert_eq!(state.items_per_page, n);
    }
}
