/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::deki::api::{query, with_query};
use crate::deki::errors::DekiError;
use crate::deki::response::has_live_draft_state;
use crate::deki::{ApiParams, ApiRequest, ApiResponse, Client, PageId};

impl Client {
    fn drafts_url(page_id: Option<&PageId>) -> String {
        match page_id {
            Some(page_id) => format!("drafts/{}", page_id.draft_segment()),
            None => "drafts".to_string(),
        }
    }

    /// Draft information for a page, or every page with a draft when `page_id` is `None`
    pub async fn drafts_get(&self, page_id: Option<&PageId>) -> Result<ApiResponse, DekiError> {
        self.get(Self::drafts_url(page_id)).await
    }

    /// True when the page has an active or unpublished draft
    pub async fn drafts_exists(&self, page_id: &PageId) -> Result<bool, DekiError> {
        Ok(self
            .probe(Self::drafts_url(Some(page_id)))
            .await?
            .is_some_and(|draft| has_live_draft_state(&draft)))
    }

    /// Creates a draft where no page exists yet
    pub async fn drafts_create(&self, page_id: &PageId) -> Result<ApiResponse, DekiError> {
        self.draft_action(page_id, "create").await
    }

    /// Activates a draft on an existing page, copying its content and attachments
    pub async fn drafts_activate(&self, page_id: &PageId) -> Result<ApiResponse, DekiError> {
        self.draft_action(page_id, "activate").await
    }

    pub async fn drafts_deactivate(&self, page_id: &PageId) -> Result<ApiResponse, DekiError> {
        self.draft_action(page_id, "deactivate").await
    }

    /// Publishes the draft to the live page
    pub async fn drafts_publish(&self, page_id: &PageId) -> Result<ApiResponse, DekiError> {
        self.draft_action(page_id, "publish").await
    }

    /// Unpublishes the page and turns it into a draft
    pub async fn drafts_unpublish(&self, page_id: &PageId) -> Result<ApiResponse, DekiError> {
        self.draft_action(page_id, "unpublish").await
    }

    async fn draft_action(&self, page_id: &PageId, action: &str) -> Result<ApiResponse, DekiError> {
        self.post_empty(format!("{}/{action}", Self::drafts_url(Some(page_id))))
            .await
    }

    pub async fn drafts_contents_get(
        &self,
        page_id: &PageId,
        options: &ApiParams<'_>,
    ) -> Result<ApiResponse, DekiError> {
        let path = format!("{}/contents", Self::drafts_url(Some(page_id)));
        self.get(with_query(&path, &query(options.iter().copied()))).await
    }

    /// Updates the draft contents, stamped with this client's edit time
    pub async fn drafts_contents_post(
        &self,
        page_id: &PageId,
        content: &str,
        title: Option<&str>,
    ) -> Result<ApiResponse, DekiError> {
        let path = self.contents_edit_url(&Self::drafts_url(Some(page_id)), title);
        self.send(ApiRequest::post(path).text(content.to_string())).await
    }

    pub async fn draft_properties_get(
        &self,
        page_id: &PageId,
        property: Option<&str>,
    ) -> Result<ApiResponse, DekiError> {
        self.properties_get(&Self::drafts_url(Some(page_id)), property)
            .await
    }

    pub async fn draft_properties_post(
        &self,
        page_id: &PageId,
        property: &str,
        description: &str,
        content: &str,
    ) -> Result<ApiResponse, DekiError> {
        self.properties_post(&Self::drafts_url(Some(page_id)), property, description, content)
            .await
    }
}
