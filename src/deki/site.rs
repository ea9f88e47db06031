/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::deki::api::{allowed_query, query, with_query};
use crate::deki::errors::DekiError;
use crate::deki::xml::escape;
use crate::deki::{
    ApiParams, ApiRequest, ApiResponse, Client, ExportRoot, SITE_FEED_OPTIONS, SITE_TAGS_OPTIONS,
};
use chrono::{DateTime, Utc};

impl Client {
    /// Searches the site
    pub async fn search(&self, q: &str, options: &ApiParams<'_>) -> Result<ApiResponse, DekiError> {
        let params = std::iter::once(("q", q)).chain(options.iter().copied());
        self.get(format!("site/search?{}", query(params))).await
    }

    /// Report on site activity. The server defaults to the last 14 days.
    pub async fn site_activity_get(&self, since: Option<DateTime<Utc>>) -> Result<ApiResponse, DekiError> {
        let path = match since {
            Some(since) => format!("site/activity?since={}", since.format("%Y%m%d%H%M%S")),
            None => "site/activity".to_string(),
        };
        self.get(path).await
    }

    /// Generates export information for the whole site or the tree below `root`
    pub async fn site_export(&self, root: Option<&ExportRoot>) -> Result<ApiResponse, DekiError> {
        let page = match root {
            Some(ExportRoot::Id(id)) => format!(r#"<page id="{id}" recursive="true"/>"#),
            Some(ExportRoot::Path(path)) => {
                format!(r#"<page path="{}" recursive="true"/>"#, escape(path))
            }
            None => r#"<page path="" recursive="true"/>"#.to_string(),
        };
        let content = format!("<export>{page}</export>");
        self.send(ApiRequest::post("site/export").xml(content)).await
    }

    /// Feed of site changes. Options outside `filter namespace format offset limit since`
    /// are dropped.
    pub async fn site_feed_get(&self, options: &ApiParams<'_>) -> Result<ApiResponse, DekiError> {
        self.get(with_query("site/feed", &allowed_query(options, SITE_FEED_OPTIONS)))
            .await
    }

    /// Tags of the site. Options outside `to from type q pages` are dropped.
    pub async fn site_tags_get(&self, options: &ApiParams<'_>) -> Result<ApiResponse, DekiError> {
        self.get(with_query("site/tags", &allowed_query(options, SITE_TAGS_OPTIONS)))
            .await
    }
}
