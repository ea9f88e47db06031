/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::deki::api::{query, with_query, SLUG_HEADER};
use crate::deki::errors::DekiError;
use crate::deki::response::has_positive_id;
use crate::deki::xml::escape;
use crate::deki::{ApiParams, ApiRequest, ApiResponse, Cascade, Client, PageId, Restriction};
use bytes::Bytes;
use log::debug;
use std::path::Path;

/// Page endpoints, see `pages/{pageid}` in the Deki API reference.
impl Client {
    fn page_url(page_id: &PageId) -> String {
        format!("pages/{}", page_id.page_segment())
    }

    /// Lists all pages of the site
    pub async fn pages(&self) -> Result<ApiResponse, DekiError> {
        self.get("pages").await
    }

    pub async fn page_get(&self, page_id: &PageId) -> Result<ApiResponse, DekiError> {
        self.get(Self::page_url(page_id)).await
    }

    /// True when the server returns the page with a positive id
    pub async fn page_exists(&self, page_id: &PageId) -> Result<bool, DekiError> {
        Ok(self
            .probe(Self::page_url(page_id))
            .await?
            .is_some_and(|page| has_positive_id(&page)))
    }

    /// Creates the page, or overwrites its contents when it already exists.
    ///
    /// Use [`page_create_check`](crate::deki::page_create_check) on the parsed response to
    /// find out whether the edit went through.
    pub async fn page_create(
        &self,
        page_id: &PageId,
        content: &str,
        title: Option<&str>,
    ) -> Result<ApiResponse, DekiError> {
        let path = self.contents_edit_url(&Self::page_url(page_id), title);
        self.send(ApiRequest::post(path).text(content.to_string())).await
    }

    pub(crate) fn contents_edit_url(&self, base: &str, title: Option<&str>) -> String {
        let mut params = vec![("edittime", self.edit_time()), ("overwrite", "true")];
        if let Some(title) = title.filter(|t| !t.is_empty()) {
            params.push(("title", title));
        }
        format!("{base}/contents?{}", query(params))
    }

    pub async fn page_contents_get(
        &self,
        page_id: &PageId,
        options: &ApiParams<'_>,
    ) -> Result<ApiResponse, DekiError> {
        let path = format!("{}/contents", Self::page_url(page_id));
        self.get(with_query(&path, &query(options.iter().copied()))).await
    }

    pub async fn page_delete(&self, page_id: &PageId) -> Result<ApiResponse, DekiError> {
        self.delete(Self::page_url(page_id)).await
    }

    /// Downloads an attachment of the page
    pub async fn page_file_get(&self, page_id: &PageId, file_name: &str) -> Result<Bytes, DekiError> {
        let path = format!("{}/files/{}", Self::page_url(page_id), file_segment(file_name));
        self.send_bytes(ApiRequest::get(path)).await
    }

    /// Lists the attachments of the page
    pub async fn page_files_get(&self, page_id: &PageId) -> Result<ApiResponse, DekiError> {
        self.get(format!("{}/files", Self::page_url(page_id))).await
    }

    /// Attaches a local file to the page.
    ///
    /// The whole file is read into memory. `name` overrides the attachment name and
    /// the mime type is guessed from the file extension when not given.
    pub async fn page_file_put(
        &self,
        page_id: &PageId,
        file: impl AsRef<Path>,
        description: Option<&str>,
        name: Option<&str>,
        mime_type: Option<&str>,
    ) -> Result<ApiResponse, DekiError> {
        let file = file.as_ref();
        let data = tokio::fs::read(file).await?;

        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = name.filter(|n| !n.is_empty()).unwrap_or(file_name.as_str());
        let mime_type = mime_type
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| mime_guess::from_path(file).first_or_octet_stream().to_string());
        debug!("Uploading {} ({}, {} bytes)", name, mime_type, data.len());

        let mut path = format!("{}/files/{}", Self::page_url(page_id), file_segment(name));
        if let Some(description) = description.filter(|d| !d.is_empty()) {
            path = with_query(&path, &query([("description", description)]));
        }
        self.send(ApiRequest::put(path).attachment(data, &mime_type))
            .await
    }

    /// Moves the page to a new title, which also changes its uri
    pub async fn page_rename(&self, page_id: &PageId, title: &str) -> Result<ApiResponse, DekiError> {
        self.page_move(page_id, &[("to", title)]).await
    }

    /// Changes the page title while keeping the uri name `name`
    pub async fn page_rename_title(
        &self,
        page_id: &PageId,
        name: &str,
        title: &str,
    ) -> Result<ApiResponse, DekiError> {
        self.page_move(page_id, &[("name", name), ("title", title)])
            .await
    }

    /// Changes the uri name of the page while keeping its title
    pub async fn page_rename_uri(&self, page_id: &PageId, name: &str) -> Result<ApiResponse, DekiError> {
        self.page_move(page_id, &[("name", name)]).await
    }

    async fn page_move(&self, page_id: &PageId, params: &ApiParams<'_>) -> Result<ApiResponse, DekiError> {
        let path = format!("{}/move", Self::page_url(page_id));
        self.post_empty(with_query(&path, &query(params.iter().copied())))
            .await
    }

    /// Places the page after `after_id` among its siblings. `0` moves it to the front.
    pub async fn page_order_put(&self, page_id: &PageId, after_id: u64) -> Result<ApiResponse, DekiError> {
        let path = format!("{}/order?afterid={after_id}", Self::page_url(page_id));
        self.send(ApiRequest::put(path).xml("")).await
    }

    /// Lists the page properties, or returns the value of a single property as is
    pub async fn page_properties_get(
        &self,
        page_id: &PageId,
        property: Option<&str>,
    ) -> Result<ApiResponse, DekiError> {
        self.properties_get(&Self::page_url(page_id), property).await
    }

    /// Creates a page property. The name travels in the `Slug` header as UTF-8 bytes.
    pub async fn page_properties_post(
        &self,
        page_id: &PageId,
        property: &str,
        description: &str,
        content: &str,
    ) -> Result<ApiResponse, DekiError> {
        self.properties_post(&Self::page_url(page_id), property, description, content)
            .await
    }

    pub(crate) async fn properties_get(
        &self,
        base: &str,
        property: Option<&str>,
    ) -> Result<ApiResponse, DekiError> {
        match property.filter(|p| !p.is_empty()) {
            None => self.get(format!("{base}/properties")).await,
            // Property values are returned as stored, they are not XML
            Some(property) => {
                let path = format!("{base}/properties/{}", urlencoding::encode(property));
                Ok(ApiResponse::Raw(self.send_bytes(ApiRequest::get(path)).await?))
            }
        }
    }

    pub(crate) async fn properties_post(
        &self,
        base: &str,
        property: &str,
        description: &str,
        content: &str,
    ) -> Result<ApiResponse, DekiError> {
        let path = format!(
            "{base}/properties?{}",
            query([("abort", "never"), ("description", description)])
        );
        let req = ApiRequest::post(path)
            .text(content.to_string())
            .header(SLUG_HEADER, property);
        self.send(req).await
    }

    pub async fn page_security_get(&self, page_id: &PageId) -> Result<ApiResponse, DekiError> {
        self.get(format!("{}/security", Self::page_url(page_id))).await
    }

    /// Sets the page restriction, cascading to child pages as requested
    pub async fn page_security_put(
        &self,
        page_id: &PageId,
        restriction: Restriction,
        cascade: Cascade,
    ) -> Result<ApiResponse, DekiError> {
        let cascade: &str = cascade.into();
        let restriction: &str = restriction.into();
        let path = format!("{}/security?cascade={cascade}", Self::page_url(page_id));
        let content = format!(
            "<security><permissions.page><restriction>{}</restriction></permissions.page></security>",
            escape(restriction)
        );
        self.send(ApiRequest::put(path).xml(content)).await
    }

    /// Resets the page security to its defaults
    pub async fn page_security_delete(&self, page_id: &PageId) -> Result<Bytes, DekiError> {
        let path = format!("{}/security", Self::page_url(page_id));
        self.send_bytes(ApiRequest::delete(path)).await
    }

    pub async fn page_tags_get(&self, page_id: &PageId) -> Result<ApiResponse, DekiError> {
        self.get(format!("{}/tags", Self::page_url(page_id))).await
    }

    /// Replaces the tags of the page
    pub async fn page_tags_set<S: AsRef<str>>(
        &self,
        page_id: &PageId,
        tags: &[S],
    ) -> Result<ApiResponse, DekiError> {
        let path = format!("{}/tags", Self::page_url(page_id));
        let content: String = tags
            .iter()
            .map(|tag| format!(r#"<tag value="{}"/>"#, escape(tag.as_ref())))
            .collect();
        self.send(ApiRequest::put(path).xml(format!("<tags>{content}</tags>")))
            .await
    }

    /// Site map below the page
    pub async fn page_tree_get(
        &self,
        page_id: &PageId,
        options: &ApiParams<'_>,
    ) -> Result<ApiResponse, DekiError> {
        let path = format!("{}/tree", Self::page_url(page_id));
        self.get(with_query(&path, &query(options.iter().copied()))).await
    }

    pub async fn pages_subpages_get(&self, page_id: &PageId) -> Result<ApiResponse, DekiError> {
        self.get(format!("{}/subpages", Self::page_url(page_id))).await
    }
}

// Attachment names without an extension are addressed with a leading `=`
fn file_segment(name: &str) -> String {
    let encoded = urlencoding::encode(name);
    if name.contains('.') {
        encoded.into_owned()
    } else {
        format!("={encoded}")
    }
}
