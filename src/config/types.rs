use serde::Deserialize;

/// Directory site the built-in listing pages belong to
pub const DEFAULT_ORIGIN: &str = "https://www.cde.ca.gov";

/// Every active high school in California, 500 entries per page
const DEFAULT_LISTING_URLS: &[&str] = &[
    "https://www.cde.ca.gov/SchoolDirectory/Results?title=California%20School%20Directory&search=0&status=1%2C2&types=80%2C66%2C67&nps=0&multilingual=0&charter=0&magnet=0&yearround=0&qdc=0&qsc=0&tab=1&order=0&page=0&items=500&hidecriteria=False&isstaticreport=False",
    "https://www.cde.ca.gov/SchoolDirectory/Results?title=California%20School%20Directory&search=0&status=1%2C2&types=80%2C66%2C67&nps=0&multilingual=0&charter=0&magnet=0&yearround=0&qdc=0&qsc=0&tab=1&order=0&page=1&items=500&hidecriteria=False&isstaticreport=False",
    "https://www.cde.ca.gov/SchoolDirectory/Results?title=California%20School%20Directory&search=0&status=1%2C2&types=80%2C66%2C67&nps=0&multilingual=0&charter=0&magnet=0&yearround=0&qdc=0&qsc=0&tab=1&order=0&page=2&items=500&hidecriteria=False&isstaticreport=False",
    "https://www.cde.ca.gov/SchoolDirectory/Results?title=California%20School%20Directory&search=0&status=1%2C2&types=80%2C66%2C67&nps=0&multilingual=0&charter=0&magnet=0&yearround=0&qdc=0&qsc=0&tab=1&order=0&page=3&items=500&hidecriteria=False&isstaticreport=False",
];

/// Main configuration structure for School-Harvest
///
/// Every section is optional; an empty file is equivalent to the built-in
/// defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub listing: ListingConfig,
    #[serde(default)]
    pub selectors: SelectorConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Number of fetches a stage may have in flight at once
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: usize,

    /// Upper bound on a single page fetch, in seconds
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Upper bound on establishing a connection, in seconds
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: 1,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "SchoolHarvest".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://github.com/school-harvest/school-harvest".to_string(),
        }
    }
}

/// Listing pages to enumerate and the origin their relative links resolve against
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    pub origin: String,
    pub urls: Vec<String>,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            urls: DEFAULT_LISTING_URLS.iter().map(|u| u.to_string()).collect(),
        }
    }
}

/// CSS selectors that locate each field on the directory site
///
/// These target fixed structural positions (for example the fourth row of
/// the details table), so they change whenever the site layout does.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Anchor to a detail page on a listing page
    #[serde(rename = "detail-link")]
    pub detail_link: String,

    pub region: String,

    pub name: String,

    pub code: String,

    /// Anchor whose href is the school's own website
    pub website: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            detail_link: "td:nth-child(4) > a".to_string(),
            region: "table.table.small tr:nth-child(1) > td".to_string(),
            name: "tr:nth-child(3) > td".to_string(),
            code: "tr:nth-child(4) > td".to_string(),
            website: "tr:nth-child(10) > td > a".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the file holding every harvested record
    #[serde(rename = "all-results-path")]
    pub all_results_path: String,

    /// Path of the file holding only records with directory links
    #[serde(rename = "directory-results-path")]
    pub directory_results_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            all_results_path: "all_results.json".to_string(),
            directory_results_path: "directory_results.json".to_string(),
        }
    }
}
