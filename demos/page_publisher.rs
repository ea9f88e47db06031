/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

extern crate mindtouch;

use anyhow::{Result, bail};
use dotenvy::dotenv;
use mindtouch::deki::{ApiConfig, Client, Creds, PageId, page_create_check};
use std::path::PathBuf;

// Publishes an HTML file as a page, then tags it and attaches the source file.
//
// Usage: page_publisher <file.html> <title> [parent path]
#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let (Some(file), Some(title)) = (args.next(), args.next()) else {
        bail!("usage: page_publisher <file.html> <title> [parent path]");
    };
    let parent = args.next().unwrap_or_default();
    let file = PathBuf::from(file);

    // MINDTOUCH_API_DOMAIN and either the username/password or the API key/secret
    let client = Client::new(Creds::from_config(&ApiConfig::from_env()?))?;

    let page_id = PageId::from_title(&title, &parent);
    if client.page_exists(&page_id).await? {
        println!("Updating existing page {}", page_id);
    }

    let contents = tokio::fs::read_to_string(&file).await?;
    let resp = client
        .page_create(&page_id, &contents, Some(&title))
        .await?
        .into_parsed()?;
    if !page_create_check(&resp) {
        bail!("Page edit was not accepted: {:?}", resp);
    }

    client.page_tags_set(&page_id, &["published", "demo"]).await?;
    client
        .page_file_put(&page_id, &file, Some("Source of this page"), None, None)
        .await?;

    let page = client.page_get(&page_id).await?.into_parsed()?;
    println!(
        "Published \"{}\" as page {}",
        page.child_text("title").unwrap_or(&title),
        page.attr("id").unwrap_or("?")
    );
    Ok(())
}
