/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::deki::errors::DekiError;
use crate::deki::xml::escape;
use crate::deki::{ApiRequest, ApiResponse, Client};
use bytes::Bytes;

/// Context ids and their mapping to pages.
///
/// Context ids are used by products embedding help content to link to a page without
/// knowing its id. Mappings are kept per language (`en-us` unless given).
impl Client {
    fn contexts_url(context_id: Option<&str>) -> String {
        match context_id.filter(|c| !c.is_empty()) {
            Some(context_id) => format!("contexts/{}", urlencoding::encode(context_id)),
            None => "contexts".to_string(),
        }
    }

    /// Lists the context ids of the site, or a single one when `context_id` is given
    pub async fn contexts_get(&self, context_id: Option<&str>) -> Result<ApiResponse, DekiError> {
        self.get(Self::contexts_url(context_id)).await
    }

    /// Creates or updates a context id
    pub async fn contexts_put(&self, context_id: &str, description: &str) -> Result<ApiResponse, DekiError> {
        let content = format!(
            "<context><description>{}</description></context>",
            escape(description)
        );
        self.send(ApiRequest::put(Self::contexts_url(Some(context_id))).xml(content))
            .await
    }

    pub async fn contexts_delete(&self, context_id: &str) -> Result<Bytes, DekiError> {
        self.send_bytes(ApiRequest::delete(Self::contexts_url(Some(context_id))))
            .await
    }

    /// Lists every context mapping, or the mapping of one context id in `language`
    pub async fn context_maps_get(
        &self,
        context_id: Option<&str>,
        language: &str,
    ) -> Result<ApiResponse, DekiError> {
        let path = match context_id.filter(|c| !c.is_empty()) {
            Some(context_id) => format!(
                "contextmaps/{language}/{}?verbose=true",
                urlencoding::encode(context_id)
            ),
            None => "contextmaps?verbose=true".to_string(),
        };
        self.get(path).await
    }

    /// Maps a context id to a page
    pub async fn context_maps_put(
        &self,
        context_id: &str,
        page_id: u64,
        language: &str,
    ) -> Result<ApiResponse, DekiError> {
        let path = format!("contextmaps/{language}/{}", urlencoding::encode(context_id));
        let content = format!("<contextmap><pageid>{page_id}</pageid></contextmap>");
        self.send(ApiRequest::put(path).xml(content)).await
    }

    /// Lists the context ids mapped to a page
    pub async fn context_maps_page_get(&self, page_id: u64) -> Result<ApiResponse, DekiError> {
        self.get(format!("contextmaps/query?pageID={page_id}&verbose=true"))
            .await
    }
}
