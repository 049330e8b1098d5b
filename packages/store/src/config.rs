//! # Site configuration: `site.toml`
//!
//! Operator-facing settings for the association site, read once by the
//! server at startup (filename: [`SiteConfig::filename`] = `"site.toml"`,
//! overridable with the `SITE_CONFIG` environment variable).
//!
//! ```toml
//! [site]
//! name = "New City Regency Layout Residents Welfare Association"
//!
//! [contact]
//! address = "New City Regency Layout (Madhu Reddy Layout)"
//! phone = "+91 00000 00000"
//! email = "office@ncrl.example"
//!
//! [access]
//! admin_emails = ["secretary@ncrl.example"]
//! ```
//!
//! Every section has a `Default`, so a missing file or an empty one means
//! the default configuration. Secrets (OAuth credentials, the admin bootstrap
//! token) never live here; they come from the environment.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::ContactInfo;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid site config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteSection,
    #[serde(default)]
    pub contact: ContactSection,
    #[serde(default)]
    pub access: AccessSection,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SiteSection {
    #[serde(default = "default_site_name")]
    pub name: String,
}

fn default_site_name() -> String {
    "New City Regency Layout Residents Welfare Association".to_string()
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            name: default_site_name(),
        }
    }
}

/// Published contact details returned by the contact-info read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContactSection {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

fn default_address() -> String {
    "New City Regency Layout (Madhu Reddy Layout)".to_string()
}

impl Default for ContactSection {
    fn default() -> Self {
        Self {
            address: default_address(),
            phone: String::new(),
            email: String::new(),
        }
    }
}

impl From<ContactSection> for ContactInfo {
    fn from(section: ContactSection) -> Self {
        ContactInfo {
            address: section.address,
            phone: section.phone,
            email: section.email,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessSection {
    /// Saving a profile with one of these addresses grants the admin role.
    #[serde(default)]
    pub admin_emails: Vec<String>,
}

impl AccessSection {
    pub fn is_admin_email(&self, email: &str) -> bool {
        let email = email.trim();
        !email.is_empty()
            && self
                .admin_emails
                .iter()
                .any(|candidate| candidate.trim().eq_ignore_ascii_case(email))
    }
}

impl SiteConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "site.toml"
    }

    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Read the file at `SITE_CONFIG` (or [`filename`](Self::filename)).
    /// A missing file yields the default configuration.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("SITE_CONFIG").unwrap_or_else(|_| Self::filename().to_string());
        Self::load_from(&path)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Ok(Self::from_toml(&contents)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path, "no site config found, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.contact.address, "New City Regency Layout (Madhu Reddy Layout)");
        assert!(config.access.admin_emails.is_empty());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = SiteConfig::from_toml("").unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let toml_str = r#"
[contact]
phone = "+91 80 0000 0000"

[access]
admin_emails = ["Secretary@NCRL.example"]
"#;
        let config = SiteConfig::from_toml(toml_str).unwrap();
        assert_eq!(config.contact.phone, "+91 80 0000 0000");
        assert_eq!(config.contact.address, default_address());
        assert_eq!(config.site.name, default_site_name());
        assert!(config.access.is_admin_email(" secretary@ncrl.example"));
        assert!(!config.access.is_admin_email(""));
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = SiteConfig::default();
        config.access.admin_emails.push("a@b.example".to_string());
        let parsed = SiteConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_missing_file_is_default() {
        let config = SiteConfig::load_from("/nonexistent/site.toml").unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(SiteConfig::from_toml("[access]\nadmin_emails = 3").is_err());
    }
}
