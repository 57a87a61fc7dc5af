//! Target domain allowlist.
//!
//! # Design Decisions
//! - A hostname is allowed when it *contains* an entry as a substring.
//!   `api.httpbin.org` and `httpbin.org.example.com` both pass for
//!   `httpbin.org`; this looseness is kept on purpose.
//! - The set is built once at startup and only read afterwards.

use url::Url;

use crate::error::RelayError;

#[derive(Debug, Clone)]
pub struct DomainAllowlist {
    domains: Vec<String>,
}

impl DomainAllowlist {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domains: domains.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if `hostname` contains any allowed entry.
    pub fn allows(&self, hostname: &str) -> bool {
        self.domains.iter().any(|d| hostname.contains(d.as_str()))
    }

    /// Parse `raw` and check its hostname.
    ///
    /// A URL that does not parse is an [`RelayError::InvalidUrl`], not a
    /// domain rejection. A URL with no host has the empty hostname.
    pub fn check(&self, raw: &str) -> Result<Url, RelayError> {
        let url = Url::parse(raw).map_err(|e| RelayError::InvalidUrl(e.to_string()))?;
        let hostname = url.host_str().unwrap_or_default();

        if self.allows(hostname) {
            Ok(url)
        } else {
            Err(RelayError::DomainRejected {
                hostname: hostname.to_string(),
            })
        }
    }
}
