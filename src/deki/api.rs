/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::deki::errors::DekiError;
use crate::deki::response::RawResponse;
use crate::deki::token::TOKEN_HEADER;
use crate::deki::Creds;
use bytes::Bytes;
use log::{debug, trace, warn};
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderName, HeaderValue};
use reqwest::{Method, RequestBuilder};

/// This can be filter types as well as other parameters the specific API expects
pub type ApiParams<'a> = [(&'a str, &'a str)];

/// Header naming the property created by a properties POST
pub const SLUG_HEADER: &str = "Slug";

/// One request against the API, relative to the credentials' base url
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Bytes>,
    pub content_type: Option<String>,
    /// Send the content type as given, without adding a charset
    pub verbatim_content_type: bool,
    pub extra_header: Option<(String, String)>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            content_type: None,
            verbatim_content_type: false,
            extra_header: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Body sent as `application/xml`
    pub fn xml(self, body: impl Into<Bytes>) -> Self {
        self.body(body).content_type("application/xml")
    }

    /// Body sent as `text/plain`
    pub fn text(self, body: impl Into<Bytes>) -> Self {
        self.body(body).content_type("text/plain")
    }

    pub fn content_type(mut self, content_type: &str) -> Self {
        self.content_type = Some(content_type.to_string());
        self
    }

    /// File contents sent with their own mime type, which is never given a charset
    pub fn attachment(mut self, body: impl Into<Bytes>, mime_type: &str) -> Self {
        self.verbatim_content_type = true;
        self.body(body).content_type(mime_type)
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.extra_header = Some((name.to_string(), value.to_string()));
        self
    }
}

/// How a single request authenticates
#[derive(Clone, PartialEq, Eq)]
pub(crate) enum Auth {
    Token(String),
    Basic { username: String, password: String },
}

impl Auth {
    /// Token auth when the credentials can sign one, basic auth otherwise
    pub(crate) fn select(creds: &Creds) -> Self {
        match creds.token() {
            Some(token) => Self::Token(token),
            None => Self::Basic {
                username: creds.username.clone(),
                password: creds.password.clone(),
            },
        }
    }

    fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Token(token) => request.header(TOKEN_HEADER, token),
            Self::Basic { username, password } => request.basic_auth(username, Some(password)),
        }
    }
}

/// Directly communicates with the API.
#[derive(Clone)]
pub struct ApiClient {
    creds: Creds,
    https_client: reqwest::Client,
}

impl ApiClient {
    /// Creates a new client for the given credentials
    pub fn new(creds: Creds) -> Result<Self, DekiError> {
        let mut builder = reqwest::Client::builder();
        if creds.accept_invalid_certs {
            warn!(
                "TLS certificate verification is disabled for {}",
                creds.base_url
            );
            builder = builder.danger_accept_invalid_certs(true);
        }
        Ok(Self {
            creds,
            https_client: builder.build()?,
        })
    }

    pub fn creds(&self) -> &Creds {
        &self.creds
    }

    /// Resolves a path relative to the API root into an absolute url
    pub fn resolve(&self, path: &str) -> Result<url::Url, DekiError> {
        if self.creds.base_url.is_empty() {
            return Err(DekiError::NotConfigured());
        }
        Ok(url::Url::parse(&format!("{}{}", self.creds.base_url, path))?)
    }

    /// Performs one round trip and returns the status and full body
    pub async fn execute(&self, req: ApiRequest) -> Result<RawResponse, DekiError> {
        let url = self.resolve(&req.path)?;
        debug!("{} {}", req.method, redacted(&url));

        let mut builder = self.https_client.request(req.method.clone(), url);
        builder = Auth::select(&self.creds).apply_to_request(builder);

        if let (Some(content_type), Some(_)) = (&req.content_type, &req.body) {
            let content_type = if req.verbatim_content_type {
                content_type.clone()
            } else {
                with_charset(content_type)
            };
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        if let Some((name, value)) = &req.extra_header {
            let (name, value) = header_pair(name, value)?;
            builder = builder.header(name, value);
        }

        let body = req.body.unwrap_or_default();
        if req.method == Method::PUT {
            builder = builder.header(CONTENT_LENGTH, body.len());
        }
        if !body.is_empty() || req.method == Method::PUT || req.method == Method::POST {
            builder = builder.body(body);
        }

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await?;
        trace!("{} bytes returned with status {}", body.len(), status);

        Ok(RawResponse { status, body })
    }

    /// Performs a GET against an already absolute url
    pub async fn execute_url(&self, url: &str) -> Result<RawResponse, DekiError> {
        let url = url::Url::parse(url)?;
        debug!("GET {}", redacted(&url));

        let builder = Auth::select(&self.creds).apply_to_request(self.https_client.get(url));
        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        Ok(RawResponse {
            status,
            body: resp.bytes().await?,
        })
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("creds", &self.creds)
            .finish()
    }
}

// Query values that carry secrets
const SECRET_PARAMS: &[&str] = &["accountpassword", "password", "authtoken"];

// The url as it may be logged, with secret query values replaced
fn redacted(url: &url::Url) -> String {
    if !url
        .query_pairs()
        .any(|(k, _)| SECRET_PARAMS.contains(&&*k))
    {
        return url.to_string();
    }
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if SECRET_PARAMS.contains(&&*k) {
                "xxx".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    let mut url = url.clone();
    url.query_pairs_mut().clear().extend_pairs(pairs);
    url.to_string()
}

// Header values are passed on as bytes, so names like `urn:custom#größe` survive
fn header_pair(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), DekiError> {
    let name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|_| DekiError::InvalidHeader(name.to_string()))?;
    let value = HeaderValue::from_bytes(value.as_bytes())
        .map_err(|_| DekiError::InvalidHeader(name.to_string()))?;
    Ok((name, value))
}

// Text payloads are always sent as UTF-8
fn with_charset(content_type: &str) -> String {
    let is_text = content_type.starts_with("text/") || content_type.contains("xml");
    if is_text && !content_type.to_ascii_lowercase().contains("charset") {
        format!("{content_type}; charset=UTF-8")
    } else {
        content_type.to_string()
    }
}

/// Builds a query string from the options whose key is in `allowed`
pub(crate) fn allowed_query(options: &ApiParams<'_>, allowed: &[&str]) -> String {
    let dropped: Vec<&str> = options
        .iter()
        .map(|(k, _)| *k)
        .filter(|k| !allowed.contains(k))
        .collect();
    if !dropped.is_empty() {
        debug!("Dropping unsupported options: {}", dropped.join(", "));
    }
    query(options.iter().filter(|(k, _)| allowed.contains(k)).copied())
}

/// Form encodes key/value pairs into a query string
pub(crate) fn query<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

/// Appends a query string to a path, leaving the path untouched when it is empty
pub(crate) fn with_query(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_string()
    } else if path.contains('?') {
        format!("{path}&{query}")
    } else {
        format!("{path}?{query}")
    }
}
