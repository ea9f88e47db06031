/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::deki::errors::DekiError;
use crate::deki::parsers::{from_bool_like, from_empty_str_to_none, parse_bool_str};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Fixed root of the Deki API on every MindTouch site
pub const API_ROOT: &str = "/@api/deki/";

/// Credential configuration as it is usually stored by consumers of this library.
///
/// Empty strings are treated as absent values.
///
/// ```json
/// {
///     "api_domain": "help.example.com",
///     "api_username": "admin",
///     "api_password": "password",
///     "api_key": "key",
///     "api_secret": "secret",
///     "secure": true
/// }
/// ```
#[derive(Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default, deserialize_with = "from_empty_str_to_none")]
    pub api_domain: Option<String>,

    #[serde(default, deserialize_with = "from_empty_str_to_none")]
    pub api_username: Option<String>,

    #[serde(default, deserialize_with = "from_empty_str_to_none")]
    pub api_password: Option<String>,

    #[serde(default, deserialize_with = "from_empty_str_to_none")]
    pub api_key: Option<String>,

    #[serde(default, deserialize_with = "from_empty_str_to_none")]
    pub api_secret: Option<String>,

    #[serde(default = "default_secure", deserialize_with = "from_bool_like")]
    pub secure: bool,

    /// Skips TLS certificate verification. Only meant for self-signed internal sites.
    #[serde(default, deserialize_with = "from_bool_like")]
    pub accept_invalid_certs: bool,
}

fn default_secure() -> bool {
    true
}

impl ApiConfig {
    /// Loads the configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DekiError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Loads the configuration from `MINDTOUCH_*` environment variables.
    ///
    /// Recognized variables are `MINDTOUCH_API_DOMAIN`, `MINDTOUCH_API_USERNAME`,
    /// `MINDTOUCH_API_PASSWORD`, `MINDTOUCH_API_KEY`, `MINDTOUCH_API_SECRET`,
    /// `MINDTOUCH_SECURE` and `MINDTOUCH_ACCEPT_INVALID_CERTS`.
    pub fn from_env() -> Result<Self, DekiError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DekiError> {
        let text = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let flag = |name: &str, default: bool| -> Result<bool, DekiError> {
            match text(name) {
                None => Ok(default),
                Some(v) => parse_bool_str(&v)
                    .ok_or_else(|| DekiError::Config(format!("{name} is not a boolean: {v}"))),
            }
        };

        Ok(Self {
            api_domain: text("MINDTOUCH_API_DOMAIN"),
            api_username: text("MINDTOUCH_API_USERNAME"),
            api_password: text("MINDTOUCH_API_PASSWORD"),
            api_key: text("MINDTOUCH_API_KEY"),
            api_secret: text("MINDTOUCH_API_SECRET"),
            secure: flag("MINDTOUCH_SECURE", true)?,
            accept_invalid_certs: flag("MINDTOUCH_ACCEPT_INVALID_CERTS", false)?,
        })
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_domain", &self.api_domain)
            .field("api_username", &self.api_username)
            .field("api_password", &"xxx")
            .field("api_key", &"xxx")
            .field("api_secret", &"xxx")
            .field("secure", &self.secure)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}

/// Resolved credentials used to sign and address every request.
///
/// The base url always has the form `scheme://domain/@api/deki/`, or is empty when no
/// domain was configured.
#[derive(Clone, Default)]
pub struct Creds {
    pub(crate) base_url: String,
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) api_key: Option<String>,
    pub(crate) api_secret: Option<String>,
    pub(crate) secure: bool,
    pub(crate) accept_invalid_certs: bool,
}

impl Creds {
    /// Creates credentials for basic authentication against the given domain over https
    pub fn new(domain: &str, username: &str, password: &str) -> Self {
        Self::from_config(&ApiConfig {
            api_domain: Some(domain.to_string()),
            api_username: Some(username.to_string()),
            api_password: Some(password.to_string()),
            ..ApiConfig::default()
        })
    }

    /// Builds the credentials from a configuration. A missing domain leaves the base url empty.
    pub fn from_config(config: &ApiConfig) -> Self {
        let domain = config.api_domain.as_deref().filter(|d| !d.is_empty());
        let base_url = domain
            .map(|d| Self::build_base_url(d, config.secure))
            .unwrap_or_default();

        let non_empty = |v: &Option<String>| v.clone().filter(|s| !s.is_empty());
        Self {
            base_url,
            username: non_empty(&config.api_username).unwrap_or_default(),
            password: non_empty(&config.api_password).unwrap_or_default(),
            api_key: non_empty(&config.api_key),
            api_secret: non_empty(&config.api_secret),
            secure: config.secure,
            accept_invalid_certs: config.accept_invalid_certs,
        }
    }

    /// Adds the API key/secret pair, which switches requests over to token authentication
    pub fn with_api_key(mut self, api_key: &str, api_secret: &str) -> Self {
        self.api_key = Some(api_key.to_string()).filter(|s| !s.is_empty());
        self.api_secret = Some(api_secret.to_string()).filter(|s| !s.is_empty());
        self
    }

    /// Selects https (the default) or plain http
    pub fn secure(mut self, secure: bool) -> Self {
        if secure != self.secure && !self.base_url.is_empty() {
            let domain = self.domain().to_string();
            self.base_url = Self::build_base_url(&domain, secure);
        }
        self.secure = secure;
        self
    }

    /// Disables TLS certificate verification for this site
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Full url of the API root, e.g. `https://help.example.com/@api/deki/`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// The configured domain, without scheme or API root
    pub fn domain(&self) -> &str {
        self.base_url
            .split_once("://")
            .map(|(_, rest)| rest)
            .and_then(|rest| rest.strip_suffix(API_ROOT))
            .unwrap_or_default()
    }

    /// Url of the site itself, i.e. the base url with the API root removed
    pub fn site_url(&self) -> String {
        self.base_url.replace("@api/deki/", "")
    }

    fn build_base_url(domain: &str, secure: bool) -> String {
        let scheme = if secure { "https://" } else { "http://" };
        format!("{scheme}{}{API_ROOT}", domain.trim_end_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_domain: None,
            api_username: None,
            api_password: None,
            api_key: None,
            api_secret: None,
            secure: default_secure(),
            accept_invalid_certs: false,
        }
    }
}

impl From<ApiConfig> for Creds {
    fn from(config: ApiConfig) -> Self {
        Self::from_config(&config)
    }
}

impl std::fmt::Debug for Creds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Creds")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"xxx")
            .field("api_key", &"xxx")
            .field("api_secret", &"xxx")
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn base_url_from_domain() {
        let creds = Creds::new("help.example.com", "admin", "pw");
        assert_eq!(creds.base_url(), "https://help.example.com/@api/deki/");
        assert_eq!(creds.domain(), "help.example.com");
        assert_eq!(creds.site_url(), "https://help.example.com/");

        let creds = creds.secure(false);
        assert_eq!(creds.base_url(), "http://help.example.com/@api/deki/");
    }

    #[test]
    fn missing_domain_leaves_base_url_empty() {
        let creds = Creds::from_config(&ApiConfig {
            api_username: Some("admin".into()),
            ..Default::default()
        });
        assert!(creds.base_url().is_empty());
        assert_eq!(creds.username(), "admin");
    }

    #[test]
    fn config_from_json_treats_empty_strings_as_absent() {
        let config: ApiConfig = serde_json::from_str(
            r#"{"api_domain": "help.example.com", "api_username": "bot",
                "api_key": "", "api_secret": "s3cret", "secure": "false"}"#,
        )
        .unwrap();
        assert_eq!(config.api_key, None);
        assert_eq!(config.api_secret.as_deref(), Some("s3cret"));
        assert!(!config.secure);
        assert!(!config.accept_invalid_certs);

        let creds = Creds::from(config);
        assert_eq!(creds.base_url(), "http://help.example.com/@api/deki/");
        assert!(creds.api_key.is_none());
    }

    #[test]
    fn default_config_uses_https() {
        let creds = Creds::from_config(&ApiConfig {
            api_domain: Some("help.example.com".into()),
            ..Default::default()
        });
        assert!(creds.base_url().starts_with("https://"));
        assert!(ApiConfig::default().secure);
    }

    #[test]
    fn secure_defaults_to_true() {
        let config: ApiConfig = serde_json::from_str(r#"{"api_domain": "a.b"}"#).unwrap();
        assert!(config.secure);
    }

    #[test]
    fn config_from_lookup() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("MINDTOUCH_API_DOMAIN", "wiki.internal"),
            ("MINDTOUCH_API_USERNAME", "svc"),
            ("MINDTOUCH_API_PASSWORD", ""),
            ("MINDTOUCH_ACCEPT_INVALID_CERTS", "yes"),
        ]);
        let config = ApiConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.api_domain.as_deref(), Some("wiki.internal"));
        assert_eq!(config.api_password, None);
        assert!(config.secure);
        assert!(config.accept_invalid_certs);

        let bad: HashMap<&str, &str> = HashMap::from([("MINDTOUCH_SECURE", "maybe")]);
        assert!(matches!(
            ApiConfig::from_lookup(|k| bad.get(k).map(|v| v.to_string())),
            Err(DekiError::Config(_))
        ));
    }

    #[test]
    fn debug_hides_secrets() {
        let creds = Creds::new("a.b", "u", "hunter2").with_api_key("k", "topsecret");
        let dbg = format!("{creds:?}");
        assert!(!dbg.contains("hunter2"));
        assert!(!dbg.contains("topsecret"));
    }
}
