//! Regex patterns for field formats.

use regex::Regex;
use std::sync::LazyLock;

/// Kubernetes object names (DNS-1123 subdomain).
pub static DNS1123_SUBDOMAIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$").unwrap()
});

/// Semantic version without a leading `v`.
pub static SEMVER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(0|[1-9]\d*)\.(0|[1-9]\d*)\.(0|[1-9]\d*)(-[0-9A-Za-z-]+(\.[0-9A-Za-z-]+)*)?(\+[0-9A-Za-z-]+(\.[0-9A-Za-z-]+)*)?$",
    )
    .unwrap()
});

const MAX_NAME_LEN: usize = 253;

pub fn is_dns1123_subdomain(name: &str) -> bool {
    name.len() <= MAX_NAME_LEN && DNS1123_SUBDOMAIN_PATTERN.is_match(name)
}

pub fn is_semver(version: &str) -> bool {
    SEMVER_PATTERN.is_match(version)
}
