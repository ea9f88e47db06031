/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use crate::deki::errors::DekiError;
use crate::deki::response::{interpret, interpret_bytes};
use crate::deki::{ApiClient, ApiRequest, ApiResponse, Creds, OutputFormat, XmlNode};
use bytes::Bytes;
use chrono::Utc;
use std::sync::Arc;

/// Entry point to the Deki API of one MindTouch site.
///
/// Cloning is cheap; clones share the underlying http connection pool.
///
/// ```rust,no_run
/// use mindtouch::deki::{Client, Creds, PageId};
///
/// async fn show_home() -> Result<(), mindtouch::deki::DekiError> {
///     let client = Client::new(Creds::new("help.example.com", "admin", "password"))?;
///     let page = client.page_get(&PageId::Home).await?.into_parsed()?;
///     println!("{:?}", page.child_text("title"));
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    api_client: Arc<ApiClient>,
    format: OutputFormat,
    edit_time: String,
}

impl Client {
    pub fn new(creds: Creds) -> Result<Self, DekiError> {
        Ok(Self {
            api_client: Arc::new(ApiClient::new(creds)?),
            format: OutputFormat::default(),
            edit_time: Utc::now().format("%Y%m%d%H%M%S").to_string(),
        })
    }

    /// Returns this client with the given output format
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn set_format(&mut self, format: OutputFormat) {
        self.format = format;
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Replaces the credentials used by this client
    pub fn set_credentials(&mut self, creds: Creds) -> Result<(), DekiError> {
        self.api_client = Arc::new(ApiClient::new(creds)?);
        Ok(())
    }

    pub fn creds(&self) -> &Creds {
        self.api_client.creds()
    }

    /// Timestamp sent as `edittime` on every content edit made through this client
    pub fn edit_time(&self) -> &str {
        &self.edit_time
    }

    /// A freshly signed token, or `None` when basic auth is in use
    pub fn token(&self) -> Option<String> {
        self.api_client.creds().token()
    }

    /// Performs a GET against a preformatted, absolute API url
    pub async fn api_call(&self, url: &str) -> Result<Bytes, DekiError> {
        interpret_bytes(self.api_client.execute_url(url).await?)
    }

    /// Sends the request and interprets the response with the client's output format
    pub async fn send(&self, req: ApiRequest) -> Result<ApiResponse, DekiError> {
        interpret(self.format, self.api_client.execute(req).await?)
    }

    /// Sends the request and returns the body of a successful response as is
    pub async fn send_bytes(&self, req: ApiRequest) -> Result<Bytes, DekiError> {
        interpret_bytes(self.api_client.execute(req).await?)
    }

    pub(crate) async fn get(&self, path: impl Into<String>) -> Result<ApiResponse, DekiError> {
        self.send(ApiRequest::get(path)).await
    }

    pub(crate) async fn delete(&self, path: impl Into<String>) -> Result<ApiResponse, DekiError> {
        self.send(ApiRequest::delete(path)).await
    }

    // POST with an empty body, used by the action endpoints (publish, activate, move, ...)
    pub(crate) async fn post_empty(&self, path: impl Into<String>) -> Result<ApiResponse, DekiError> {
        self.send(ApiRequest::post(path)).await
    }

    // The parsed tree for the existence checks. Server side and decode failures mean "no".
    pub(crate) async fn probe(&self, path: String) -> Result<Option<XmlNode>, DekiError> {
        let req = ApiRequest::get(path);
        match interpret(OutputFormat::Parsed, self.api_client.execute(req).await?) {
            Ok(resp) => Ok(resp.into_parsed().ok()),
            Err(err) if err.is_api_error() => Ok(None),
            Err(err) => Err(err),
        }
    }
}
