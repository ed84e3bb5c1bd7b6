//! Identity-Provider Aggregator
//!
//! Inspects the credential settings of a fixed set of OAuth vendors and
//! emits only the vendors that are fully configured. A vendor with a missing
//! required field is left out silently: absence means "disabled", so one
//! misconfigured integration never blocks the others.
//!
//! | Vendor      | Required                                        | Available on |
//! |-------------|-------------------------------------------------|--------------|
//! | `google`    | `GOOGLE_OAUTH2_CLIENT_ID`, `GOOGLE_OAUTH2_CLIENT_SECRET` | all |
//! | `microsoft` | `MICROSOFT_OAUTH2_CLIENT_ID`, `MICROSOFT_OAUTH2_CLIENT_SECRET` | all |
//! | `cognito`   | `AWS_COGNITO_CLIENT_ID`, `AWS_COGNITO_DOMAIN`   | aws only     |

use crate::capability::mask;
use crate::provider::ProviderIdentity;
use crate::settings::{keys, RawSettings};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Configured OAuth vendors keyed by vendor name
pub type OAuthProviderSet = BTreeMap<String, OAuthProvider>;

/// The closed set of OAuth vendors the aggregator knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuthVendor {
    Google,
    Microsoft,
    Cognito,
}

impl OAuthVendor {
    pub const ALL: [OAuthVendor; 3] = [OAuthVendor::Google, OAuthVendor::Microsoft, OAuthVendor::Cognito];

    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthVendor::Google => "google",
            OAuthVendor::Microsoft => "microsoft",
            OAuthVendor::Cognito => "cognito",
        }
    }

    /// Whether the vendor can be offered under the given cloud provider
    pub fn available_on(&self, provider: Option<ProviderIdentity>) -> bool {
        match self {
            OAuthVendor::Google | OAuthVendor::Microsoft => true,
            OAuthVendor::Cognito => provider == Some(ProviderIdentity::Aws),
        }
    }

    /// Build the vendor entry, or `None` if a required field is empty
    fn configure(&self, settings: &RawSettings) -> Option<OAuthProvider> {
        match self {
            OAuthVendor::Google => {
                let app = OAuthApp::required(
                    settings.string(&keys::GOOGLE_OAUTH2_CLIENT_ID),
                    settings.string(&keys::GOOGLE_OAUTH2_CLIENT_SECRET),
                )?;
                Some(OAuthProvider {
                    scope: Some(vec!["profile".into(), "email".into()]),
                    auth_params: BTreeMap::from([("access_type".to_string(), "online".to_string())]),
                    pkce_enabled: Some(true),
                    app,
                    domain: None,
                })
            }
            OAuthVendor::Microsoft => {
                let app = OAuthApp::required(
                    settings.string(&keys::MICROSOFT_OAUTH2_CLIENT_ID),
                    settings.string(&keys::MICROSOFT_OAUTH2_CLIENT_SECRET),
                )?;
                Some(OAuthProvider {
                    scope: Some(vec!["User.Read".into(), "email".into()]),
                    auth_params: BTreeMap::new(),
                    pkce_enabled: None,
                    app,
                    domain: None,
                })
            }
            OAuthVendor::Cognito => {
                let client_id = settings.string(&keys::AWS_COGNITO_CLIENT_ID);
                let domain = settings.string(&keys::AWS_COGNITO_DOMAIN);
                if client_id.is_empty() || domain.is_empty() {
                    return None;
                }
                Some(OAuthProvider {
                    scope: None,
                    auth_params: BTreeMap::new(),
                    pkce_enabled: None,
                    app: OAuthApp {
                        client_id,
                        secret: settings.string(&keys::AWS_COGNITO_CLIENT_SECRET),
                        key: None,
                    },
                    domain: Some(domain),
                })
            }
        }
    }
}

impl fmt::Display for OAuthVendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application credentials registered with a vendor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OAuthApp {
    pub client_id: String,
    pub secret: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl OAuthApp {
    fn required(client_id: String, secret: String) -> Option<Self> {
        if client_id.is_empty() || secret.is_empty() {
            return None;
        }
        Some(Self {
            client_id,
            secret,
            key: Some(String::new()),
        })
    }
}

/// One configured OAuth vendor
///
/// Unset options are omitted when serialized; an absent `scope` is not the
/// same as an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OAuthProvider {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Vec<String>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub auth_params: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pkce_enabled: Option<bool>,
    pub app: OAuthApp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

impl OAuthProvider {
    /// Copy with the client secret masked
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        mask(&mut copy.app.secret);
        copy
    }
}

/// Collect every fully configured vendor
///
/// `provider` is `None` when the active provider name is not recognised;
/// provider-specific vendors are then never offered. This never fails.
pub fn resolve_oauth(settings: &RawSettings, provider: Option<ProviderIdentity>) -> OAuthProviderSet {
    OAuthVendor::ALL
        .iter()
        .filter(|vendor| vendor.available_on(provider))
        .filter_map(|vendor| {
            vendor
                .configure(settings)
                .map(|entry| (vendor.as_str().to_string(), entry))
        })
        .collect()
}
