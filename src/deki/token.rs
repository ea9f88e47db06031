/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::deki::Creds;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the signed token
pub const TOKEN_HEADER: &str = "X-Deki-Token";

impl Creds {
    /// Returns a freshly signed `X-Deki-Token` value.
    ///
    /// `None` means one of the API key, secret or username is missing and requests fall
    /// back to HTTP Basic authentication. The server decides how long a token stays valid.
    pub fn token(&self) -> Option<String> {
        self.token_at(Utc::now().timestamp())
    }

    /// Signs a token for the given unix timestamp
    pub fn token_at(&self, timestamp: i64) -> Option<String> {
        let key = self.api_key.as_deref()?;
        let secret = self.api_secret.as_deref()?;
        if self.username.is_empty() {
            return None;
        }

        let payload = format!("{key}_{timestamp}_={}", self.username);
        // HMAC accepts keys of any length, so this never fails
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
        mac.update(payload.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());

        Some(format!("tkn_{payload}_{signature}"))
    }

    /// Builds a link that logs the given user into the site through impersonation.
    ///
    /// The redirect defaults to the site root.
    pub fn authenticate_link(&self, api_key: &str, username: &str, redirect: Option<&str>) -> String {
        self.authenticate_link_at(api_key, username, redirect, Utc::now().timestamp())
    }

    pub(crate) fn authenticate_link_at(
        &self,
        api_key: &str,
        username: &str,
        redirect: Option<&str>,
        timestamp: i64,
    ) -> String {
        let redirect = redirect
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.site_url());

        let auth_hash = md5::compute(format!("{username}:{timestamp}:{api_key}"));
        let auth_token = format!("imp_{timestamp}_{auth_hash:x}_={username}");

        format!(
            "{}users/authenticate?authtoken={}&redirect={}",
            self.base_url,
            urlencoding::encode(&auth_token),
            urlencoding::encode(&redirect)
        )
    }
}
