/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use mindtouch::deki::{ApiConfig, Client, Creds};
use mockito::{Server, ServerGuard};

pub(crate) const API: &str = "/@api/deki";

/// Starts a mock server and a client using basic auth against it
#[allow(dead_code)]
pub(crate) async fn basic_client() -> (ServerGuard, Client) {
    let server = Server::new_async().await;
    let creds = Creds::new(&server.host_with_port(), "user", "pass").secure(false);
    let client = Client::new(creds).unwrap();
    (server, client)
}

/// Starts a mock server and a client signing requests with a token
#[allow(dead_code)]
pub(crate) async fn token_client() -> (ServerGuard, Client) {
    let server = Server::new_async().await;
    let creds = Creds::new(&server.host_with_port(), "admin", "pass")
        .secure(false)
        .with_api_key("key1", "secret1");
    let client = Client::new(creds).unwrap();
    (server, client)
}

/// Basic auth header for user:pass
#[allow(dead_code)]
pub(crate) const BASIC_USER_PASS: &str = "Basic dXNlcjpwYXNz";

#[allow(dead_code)]
pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Credentials of a real site taken from the `MINDTOUCH_*` environment (or `.env`)
#[allow(dead_code)]
pub(crate) fn get_live_creds() -> anyhow::Result<Creds> {
    let config = ApiConfig::from_env()?;
    if config.api_domain.is_none() {
        anyhow::bail!("MINDTOUCH_API_DOMAIN is not set");
    }
    Ok(Creds::from_config(&config))
}
