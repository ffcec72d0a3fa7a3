//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Country list endpoint (name, region and flag only)
pub const DEFAULT_API_URL: &str = "https://restcountries.com/v2/all?fields=name,region,flag";

/// Sentinel region token meaning "no filter"
pub const ALL_REGIONS: &str = "all";

/// Default page size, also the initial displayed count
pub const DEFAULT_ITEMS_PER_PAGE: usize = 12;

/// Page sizes offered by the pager
pub const ITEMS_PER_PAGE_OPTIONS: [usize; 4] = [12, 24, 36, 48];

/// Slider auto-play interval
pub const DEFAULT_SLIDER_INTERVAL_MS: u64 = 5000;

/// Slides shown when a specific region is selected
pub const FILTERED_SLIDE_LIMIT: usize = 5;

/// HTTP timeout for the country fetch
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Message used when the endpoint answers with a non-success status
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch countries";

/// Regions offered by the filter bar, in display order
pub const KNOWN_REGIONS: [&str; 7] = [
    ALL_REGIONS,
    "Africa",
    "Americas",
    "Asia",
    "Europe",
    "Oceania",
    "Polar",
];

/// Config directory name under the user's home
pub const CONFIG_DIR_NAME: &str = ".countries-explorer";

/// Log file written next to the binary's working directory
pub const LOG_FILE_NAME: &str = "countries-explorer.log";

/// Application name
pub const APP_NAME: &str = "Countries Explorer";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
