//! Network-Policy Resolver
//!
//! Derives CORS origins and the host allow-list from the environment, the
//! provider and operator overrides. Both lists are ordered and built by
//! appending only; some consumers match them as prefixes in order.

use crate::provider::{Environment, ProviderIdentity};
use crate::settings::{keys, RawSettings};
use serde::Serialize;

/// Origins always allowed in development
pub const DEVELOPMENT_ORIGINS: [&str; 3] = [
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "http://0.0.0.0:3000",
];

/// Hosts always allowed in development
pub const DEVELOPMENT_HOSTS: [&str; 4] = ["localhost", "127.0.0.1", "0.0.0.0", "testserver"];

/// CORS origins and allowed hosts, in evaluation order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkPolicy {
    pub cors_allowed_origins: Vec<String>,
    pub allowed_hosts: Vec<String>,
}

impl NetworkPolicy {
    pub fn resolve(settings: &RawSettings, environment: &Environment, provider: Option<ProviderIdentity>) -> Self {
        Self {
            cors_allowed_origins: resolve_cors(settings, environment),
            allowed_hosts: resolve_hosts(settings, environment, provider),
        }
    }
}

/// Wildcard host patterns for the platform domains of a provider
pub fn provider_host_patterns(provider: ProviderIdentity) -> &'static [&'static str] {
    match provider {
        ProviderIdentity::Gcp => &["*.run.app"],
        ProviderIdentity::Aws => &["*.amazonaws.com", "*.elasticbeanstalk.com"],
        ProviderIdentity::Azure => &["*.azurewebsites.net", "*.cloudapp.azure.com"],
    }
}

/// CORS allowed origins
///
/// Development always gets the fixed localhost set and ignores overrides.
/// Anywhere else only `CORS_ALLOWED_ORIGINS` counts; unset means none.
pub fn resolve_cors(settings: &RawSettings, environment: &Environment) -> Vec<String> {
    if environment.is_development() {
        return DEVELOPMENT_ORIGINS.iter().map(|o| o.to_string()).collect();
    }
    settings.list(&keys::CORS_ALLOWED_ORIGINS)
}

/// Allowed host patterns: development locals, provider wildcards, then `ALLOWED_HOSTS`
///
/// `provider` is `None` for an unrecognised provider name, which contributes
/// no wildcard patterns.
pub fn resolve_hosts(
    settings: &RawSettings,
    environment: &Environment,
    provider: Option<ProviderIdentity>,
) -> Vec<String> {
    let mut hosts = Vec::new();

    if environment.is_development() {
        hosts.extend(DEVELOPMENT_HOSTS.iter().map(|h| h.to_string()));
    }

    if let Some(provider) = provider {
        hosts.extend(provider_host_patterns(provider).iter().map(|h| h.to_string()));
    }

    hosts.extend(settings.list(&keys::ALLOWED_HOSTS));
    hosts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MapSource;

    fn settings(pairs: &[(&str, &str)]) -> RawSettings {
        RawSettings::new().with_source(pairs.iter().copied().collect::<MapSource>())
    }

    #[test]
    fn test_cors_development_ignores_override() {
        let s = settings(&[("CORS_ALLOWED_ORIGINS", "https://evil.example.com")]);
        assert_eq!(
            resolve_cors(&s, &Environment::development()),
            vec!["http://localhost:3000", "http://127.0.0.1:3000", "http://0.0.0.0:3000"]
        );
    }

    #[test]
    fn test_cors_production_is_empty_by_default() {
        assert!(resolve_cors(&RawSettings::new(), &"production".into()).is_empty());
    }

    #[test]
    fn test_cors_staging_uses_override() {
        let s = settings(&[(
            "CORS_ALLOWED_ORIGINS",
            "https://app.example.com, https://admin.example.com",
        )]);
        assert_eq!(
            resolve_cors(&s, &"staging".into()),
            vec!["https://app.example.com", "https://admin.example.com"]
        );
    }

    #[test]
    fn test_hosts_ordering_development_aws() {
        let s = settings(&[("ALLOWED_HOSTS", "api.example.com")]);
        assert_eq!(
            resolve_hosts(&s, &Environment::development(), Some(ProviderIdentity::Aws)),
            vec![
                "localhost",
                "127.0.0.1",
                "0.0.0.0",
                "testserver",
                "*.amazonaws.com",
                "*.elasticbeanstalk.com",
                "api.example.com",
            ]
        );
    }

    #[test]
    fn test_hosts_production_has_no_localhost() {
        let s = settings(&[("ALLOWED_HOSTS", "api.example.com, www.example.com")]);
        assert_eq!(
            resolve_hosts(&s, &"production".into(), Some(ProviderIdentity::Gcp)),
            vec!["*.run.app", "api.example.com", "www.example.com"]
        );
    }

    #[test]
    fn test_hosts_azure_patterns() {
        assert_eq!(
            resolve_hosts(&RawSettings::new(), &"production".into(), Some(ProviderIdentity::Azure)),
            vec!["*.azurewebsites.net", "*.cloudapp.azure.com"]
        );
    }

    #[test]
    fn test_hosts_unknown_provider_adds_no_wildcards() {
        let s = settings(&[("ALLOWED_HOSTS", "api.example.com")]);
        assert_eq!(resolve_hosts(&s, &"production".into(), None), vec!["api.example.com"]);
    }

    #[test]
    fn test_policy_combines_both_lists() {
        let policy = NetworkPolicy::resolve(&RawSettings::new(), &"production".into(), Some(ProviderIdentity::Gcp));
        assert!(policy.cors_allowed_origins.is_empty());
        assert_eq!(policy.allowed_hosts, vec!["*.run.app"]);
    }
}
