/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use std::io;
use thiserror::Error;

/// Error conditions that can be returned
#[derive(Error, Debug)]
pub enum DekiError {
    #[error("I/O error")]
    Io(#[from] io::Error),

    #[error("Request network error")]
    Request(#[from] reqwest::Error),

    #[error("URL Parse error")]
    UrlParsing(#[from] url::ParseError),

    #[error("Deserialization error")]
    Deserialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Client has no API domain configured")]
    NotConfigured(),

    #[error("Invalid header value for {0}")]
    InvalidHeader(String),

    #[error("API Response is not well formed XML: {0}")]
    Decode(#[from] quick_xml::Error),

    #[error("API Response was error: {title} ({status}): {message}")]
    Api {
        status: u16,
        title: String,
        message: String,
    },

    #[error("API Response status was {0}: {1}")]
    HttpStatus(u16, String),

    #[error("Expected a parsed response but the client is in raw output mode")]
    UnexpectedFormat(),
}

impl DekiError {
    /// True when the server answered with an error document or a failing status.
    ///
    /// Transport, configuration and local errors return false.
    pub fn is_api_error(&self) -> bool {
        matches!(self, Self::Api { .. } | Self::HttpStatus(..) | Self::Decode(_))
    }
}
