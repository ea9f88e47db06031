/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! # MindTouch
//!
//! This MindTouch library was created for working with the MindTouch (Deki) REST API that
//! lives under `https://{site}/@api/deki/`.
//!
//! ## Features
//!
//! - Pages
//!     - Create, read, rename, move, order and delete
//!     - Attachments, properties, tags and security
//! - Drafts (create, update, publish, unpublish)
//! - Users and groups
//! - Context ids and context maps
//! - Site search, tags, feed, activity and export
//! - Lower level interface for handling the raw communication
//!
//! *Requests are signed with an `X-Deki-Token` when an API key/secret is configured and
//! fall back to HTTP Basic authentication otherwise.*
//!
//! *Responses are returned as a generic [`deki::XmlNode`] tree. Error documents sent by
//! the server are turned into [`deki::DekiError::Api`].*
//!
//! ## TLS certificates
//!
//! Certificates are verified. Sites using self-signed certificates have to opt out
//! explicitly with [`deki::Creds::accept_invalid_certs`] (or `accept_invalid_certs` in the
//! [`deki::ApiConfig`]); a warning is logged whenever verification is disabled.
//!
//! ## Installation
//!
//! ```toml
//! [dependencies]
//! mindtouch = "0.1.0"
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mindtouch::deki::{page_create_check, ApiConfig, Client, Creds, PageId};
//!
//! async fn publish_release_notes(body: &str) -> anyhow::Result<bool> {
//!     // MINDTOUCH_API_DOMAIN, MINDTOUCH_API_USERNAME, MINDTOUCH_API_KEY, ...
//!     let client = Client::new(Creds::from_config(&ApiConfig::from_env()?))?;
//!
//!     // "Release Notes/2.0" below "Products/Widget" becomes one encoded page id
//!     let page_id = PageId::from_title("Release Notes/2.0", "Products/Widget");
//!     if !client.page_exists(&page_id).await? {
//!         let resp = client.page_create(&page_id, body, None).await?.into_parsed()?;
//!         return Ok(page_create_check(&resp));
//!     }
//!     Ok(false)
//! }
//! ```
//!
pub mod deki;
