//! Job-site search links for recommended roles

use serde::{Deserialize, Serialize};
use url::Url;

/// A job board with a known search URL layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct KnownSite {
    key: &'static str,
    name: &'static str,
    base: &'static str,
    role_param: &'static str,
    location_param: &'static str,
}

const KNOWN_SITES: &[KnownSite] = &[
    KnownSite {
        key: "linkedin",
        name: "LinkedIn",
        base: "https://www.linkedin.com/jobs/search/",
        role_param: "keywords",
        location_param: "location",
    },
    KnownSite {
        key: "indeed",
        name: "Indeed",
        base: "https://www.indeed.com/jobs",
        role_param: "q",
        location_param: "l",
    },
    KnownSite {
        key: "glassdoor",
        name: "Glassdoor",
        base: "https://www.glassdoor.com/Job/jobs.htm",
        role_param: "sc.keyword",
        location_param: "locKeyword",
    },
    KnownSite {
        key: "stepstone",
        name: "StepStone",
        base: "https://www.stepstone.de/jobs",
        role_param: "what",
        location_param: "where",
    },
];

const GOOGLE_SEARCH: &str = "https://www.google.com/search";

/// One search link for a (role, site, location) triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLink {
    pub role: String,
    pub site: String,
    pub location: String,
    pub url: String,
}

/// Reduce user input like `https://www.LinkedIn.com/jobs` to `linkedin.com`
pub fn normalize_site(site: &str) -> String {
    let lower = site.trim().to_lowercase();
    let without_scheme = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))
        .unwrap_or(&lower);
    let host = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or(without_scheme);
    host.strip_prefix("www.").unwrap_or(host).to_string()
}

fn known_site(normalized: &str) -> Option<&'static KnownSite> {
    let label = normalized.split('.').next().unwrap_or(normalized);
    KNOWN_SITES.iter().find(|site| site.key == label)
}

/// Display name for a site as entered by the user
pub fn site_name(site: &str) -> String {
    let normalized = normalize_site(site);
    match known_site(&normalized) {
        Some(known) => known.name.to_string(),
        None => normalized,
    }
}

/// Build a search URL for `role` on `site` in `location`
///
/// Known boards use their own query parameters; anything else becomes a
/// Google search restricted to the site's domain.
pub fn search_url(site: &str, role: &str, location: &str) -> String {
    let normalized = normalize_site(site);
    let location = location.trim();

    if let Some(known) = known_site(&normalized) {
        let mut params = vec![(known.role_param, role.trim())];
        if !location.is_empty() {
            params.push((known.location_param, location));
        }
        if let Ok(url) = Url::parse_with_params(known.base, &params) {
            return url.to_string();
        }
    }

    let domain = if normalized.contains('.') {
        normalized
    } else {
        format!("{}.com", normalized)
    };
    let mut query = format!("\"{}\" jobs", role.trim());
    if !location.is_empty() {
        query.push(' ');
        query.push_str(location);
    }
    query.push_str(" site:");
    query.push_str(&domain);

    match Url::parse_with_params(GOOGLE_SEARCH, &[("q", query.as_str())]) {
        Ok(url) => url.to_string(),
        Err(_) => GOOGLE_SEARCH.to_string(),
    }
}

/// Links for every (site, location) pair of one role, sites outermost
pub fn links_for_role(role: &str, sites: &[String], locations: &[String]) -> Vec<SearchLink> {
    let any_location = [String::new()];
    let locations = if locations.is_empty() {
        &any_location[..]
    } else {
        locations
    };

    let mut links = Vec::with_capacity(sites.len() * locations.len());
    for site in sites {
        for location in locations {
            links.push(SearchLink {
                role: role.to_string(),
                site: site_name(site),
                location: location.clone(),
                url: search_url(site, role, location),
            });
        }
    }
    links
}

/// Split comma or semicolon separated user input into trimmed, non-empty items
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split([',', ';'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
