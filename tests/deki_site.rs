/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
mod helpers;

#[cfg(test)]
mod test {
    use crate::helpers::{self, API};
    use chrono::{TimeZone, Utc};
    use mindtouch::deki::{Client, ExportRoot, PageId};

    #[tokio::test]
    async fn site_tags_drops_unknown_options() {
        let (mut server, client) = helpers::basic_client().await;
        let mock = server
            .mock("GET", format!("{API}/site/tags?type=text&q=ru").as_str())
            .with_status(200)
            .with_body(r#"<tags count="1"><tag value="rust"/></tags>"#)
            .create_async()
            .await;

        let tags = client
            .site_tags_get(&[("type", "text"), ("admin", "true"), ("q", "ru")])
            .await
            .unwrap()
            .into_parsed()
            .unwrap();
        assert_eq!(tags.children_named("tag").count(), 1);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn site_feed_without_options() {
        let (mut server, client) = helpers::basic_client().await;
        let mock = server
            .mock("GET", format!("{API}/site/feed").as_str())
            .with_status(200)
            .with_body("<feed/>")
            .create_async()
            .await;

        client.site_feed_get(&[("bogus", "1")]).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn search_puts_query_first() {
        let (mut server, client) = helpers::basic_client().await;
        let mock = server
            .mock("GET", format!("{API}/site/search?q=install+guide&limit=5").as_str())
            .with_status(200)
            .with_body(r#"<search count="0"/>"#)
            .create_async()
            .await;

        client.search("install guide", &[("limit", "5")]).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn activity_since_timestamp() {
        let (mut server, client) = helpers::basic_client().await;
        let mock = server
            .mock("GET", format!("{API}/site/activity?since=20240102030405").as_str())
            .with_status(200)
            .with_body("<activity/>")
            .create_async()
            .await;

        let since = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        client.site_activity_get(Some(since)).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn export_of_a_path() {
        let (mut server, client) = helpers::basic_client().await;
        let mock = server
            .mock("POST", format!("{API}/site/export").as_str())
            .match_body(r#"<export><page path="Guides &amp; FAQ" recursive="true"/></export>"#)
            .with_status(200)
            .with_body("<manifest/>")
            .create_async()
            .await;

        client
            .site_export(Some(&ExportRoot::Path("Guides & FAQ".to_string())))
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn malformed_xml_is_a_decode_error() {
        let (mut server, client) = helpers::basic_client().await;
        server
            .mock("GET", format!("{API}/pages/1").as_str())
            .with_status(200)
            .with_body("<page><title>broken</page>")
            .create_async()
            .await;

        let err = client.page_get(&PageId::from(1)).await.unwrap_err();
        assert!(err.is_api_error());
    }

    /// Runs against the site configured through `MINDTOUCH_*` variables
    #[tokio::test]
    #[ignore]
    async fn live_home_page() -> anyhow::Result<()> {
        dotenvy::dotenv().ok();
        helpers::init_logging();
        let client = Client::new(helpers::get_live_creds()?)?;

        let home = client.page_get(&PageId::Home).await?.into_parsed()?;
        assert!(home.attr("id").is_some());
        assert!(client.page_exists(&PageId::Home).await?);
        Ok(())
    }
}
