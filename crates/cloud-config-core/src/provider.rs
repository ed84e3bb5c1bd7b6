//! Provider and environment identities

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The cloud vendor whose services back the configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderIdentity {
    Gcp,
    Aws,
    Azure,
}

impl ProviderIdentity {
    /// Every supported provider
    pub const ALL: [ProviderIdentity; 3] = [
        ProviderIdentity::Gcp,
        ProviderIdentity::Aws,
        ProviderIdentity::Azure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderIdentity::Gcp => "gcp",
            ProviderIdentity::Aws => "aws",
            ProviderIdentity::Azure => "azure",
        }
    }
}

impl fmt::Display for ProviderIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a provider name is not recognised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProvider(pub String);

impl fmt::Display for UnknownProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown cloud provider: {}", self.0)
    }
}

impl std::error::Error for UnknownProvider {}

/// Names are matched exactly after trimming; `AWS` is not `aws`
impl FromStr for ProviderIdentity {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "gcp" => Ok(ProviderIdentity::Gcp),
            "aws" => Ok(ProviderIdentity::Aws),
            "azure" => Ok(ProviderIdentity::Azure),
            _ => Err(UnknownProvider(s.to_string())),
        }
    }
}

/// Deployment stage label
///
/// Only `development` changes behavior: it relaxes CORS and host rules.
/// Every other label is treated as production-like.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Environment(String);

impl Environment {
    pub const DEVELOPMENT: &'static str = "development";

    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into().trim().to_string())
    }

    pub fn development() -> Self {
        Self(Self::DEVELOPMENT.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_development(&self) -> bool {
        self.0 == Self::DEVELOPMENT
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::development()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Environment {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parse() {
        assert_eq!("gcp".parse::<ProviderIdentity>().unwrap(), ProviderIdentity::Gcp);
        assert_eq!(" aws ".parse::<ProviderIdentity>().unwrap(), ProviderIdentity::Aws);
        assert_eq!("azure\n".parse::<ProviderIdentity>().unwrap(), ProviderIdentity::Azure);

        let err = "oracle".parse::<ProviderIdentity>().unwrap_err();
        assert_eq!(err, UnknownProvider("oracle".to_string()));
        assert_eq!(err.to_string(), "unknown cloud provider: oracle");
    }

    #[test]
    fn test_provider_parse_is_case_sensitive() {
        for raw in ["AWS", "Gcp", "AZURE"] {
            let err = raw.parse::<ProviderIdentity>().unwrap_err();
            assert_eq!(err, UnknownProvider(raw.to_string()));
        }
    }

    #[test]
    fn test_provider_display_round_trips() {
        for provider in ProviderIdentity::ALL {
            assert_eq!(provider.to_string().parse::<ProviderIdentity>().unwrap(), provider);
        }
    }

    #[test]
    fn test_environment_development() {
        assert!(Environment::development().is_development());
        assert!(Environment::from(" development ").is_development());
        assert!(!Environment::from("staging").is_development());
        assert!(!Environment::from("production").is_development());
        assert!(!Environment::from("Development").is_development());
    }
}
