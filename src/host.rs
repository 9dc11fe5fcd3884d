//! Hostname classification for multi-tenant routing.
//!
//! Every inbound request is classified by its `Host` header before routing:
//! the bare platform domain serves the marketing pages, the reserved
//! dashboard subdomain serves the management app, and any other hostname is
//! a tenant site (platform subdomain or custom domain).

/// Internal namespace a request is rewritten into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostRoute {
    /// Bare platform domain: marketing/home pages.
    Marketing,
    /// Reserved dashboard subdomain.
    Dashboard,
    /// A tenant site, keyed by subdomain or full custom domain.
    Tenant(String),
}

/// Stateless hostname classifier.
#[derive(Debug, Clone)]
pub struct HostRouter {
    base_domain: String,
    dashboard_host: String,
}

impl HostRouter {
    /// Build a classifier for one platform base domain.
    #[must_use]
    pub fn new(base_domain: &str, dashboard_host: &str) -> Self {
        Self {
            base_domain: base_domain.to_ascii_lowercase(),
            dashboard_host: dashboard_host.to_ascii_lowercase(),
        }
    }

    /// Classify a raw `Host` header value.
    ///
    /// Matching is case-insensitive and ignores any port suffix. Hostnames
    /// outside the base domain fall through to the tenant branch as custom
    /// domains; there is no failure mode.
    #[must_use]
    pub fn classify(&self, host: &str) -> HostRoute {
        let hostname = host
            .split(':')
            .next()
            .unwrap_or(host)
            .to_ascii_lowercase();
        if hostname == self.base_domain {
            return HostRoute::Marketing;
        }
        let key = hostname
            .strip_suffix(self.base_domain.as_str())
            .and_then(|prefix| prefix.strip_suffix('.'));
        match key {
            Some("") | None => HostRoute::Tenant(hostname),
            Some(key) if key == self.dashboard_host => HostRoute::Dashboard,
            Some(key) => HostRoute::Tenant(key.to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::bare_domain("blogkit.io", HostRoute::Marketing)]
    #[case::bare_domain_with_port("blogkit.io:8080", HostRoute::Marketing)]
    #[case::dashboard("app.blogkit.io", HostRoute::Dashboard)]
    #[case::dashboard_mixed_case("App.BlogKit.io", HostRoute::Dashboard)]
    #[case::subdomain("demo.blogkit.io", HostRoute::Tenant("demo".to_owned()))]
    #[case::nested_subdomain("a.b.blogkit.io", HostRoute::Tenant("a.b".to_owned()))]
    #[case::custom_domain("example.net", HostRoute::Tenant("example.net".to_owned()))]
    #[case::suffix_but_not_subdomain("notblogkit.io", HostRoute::Tenant("notblogkit.io".to_owned()))]
    fn classifies_hostnames(#[case] host: &str, #[case] expected: HostRoute) {
        let router = HostRouter::new("blogkit.io", "app");
        assert_eq!(router.classify(host), expected);
    }
}
