//! Credential guard
//!
//! Pure helpers that read or override the paper-vs-live flag on a credential
//! bundle. The guard never mutates an existing bundle: overrides return a new
//! copy so the caller's original stays usable for logging and inspection.

use serde::{Deserialize, Serialize};

/// Which brokerage environment a credential bundle targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialEnvironment {
    /// Sandbox account with no real financial effect
    Paper,
    /// Real-money account
    Live,
}

impl std::fmt::Display for CredentialEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialEnvironment::Paper => write!(f, "paper"),
            CredentialEnvironment::Live => write!(f, "live"),
        }
    }
}

/// Brokerage credential bundle.
///
/// Owned exclusively by the calling node for the duration of one work item.
/// The secret material is opaque to the gate and never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BrokerCredentials {
    /// Target brokerage environment
    pub environment: CredentialEnvironment,
    /// API key for the brokerage
    #[serde(default)]
    pub api_key: String,
    /// API secret for the brokerage
    #[serde(default)]
    pub api_secret: String,
    /// Brokerage account identifier, if the broker uses one
    #[serde(default)]
    pub account_id: Option<String>,
}

/// Return a copy of `creds` downgraded to the paper environment.
///
/// The original bundle is left untouched; all other fields carry over
/// unchanged.
pub fn force_paper_trading_credentials(creds: &BrokerCredentials) -> BrokerCredentials {
    BrokerCredentials {
        environment: CredentialEnvironment::Paper,
        ..creds.clone()
    }
}

/// Whether a credential bundle targets the paper environment
pub fn is_paper_trading(creds: &BrokerCredentials) -> bool {
    creds.environment == CredentialEnvironment::Paper
}
