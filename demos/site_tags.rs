/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

extern crate mindtouch;

use anyhow::Result;
use dotenvy::dotenv;
use mindtouch::deki::{ApiConfig, Client, Creds};

// Lists the tags of a site together with the pages using them.
//
// An optional argument limits the output to tags starting with it.
#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let prefix = std::env::args().nth(1).unwrap_or_default();
    let client = Client::new(Creds::from_config(&ApiConfig::from_env()?))?;

    let mut options = vec![("pages", "true")];
    if !prefix.is_empty() {
        options.push(("q", prefix.as_str()));
    }
    let tags = client.site_tags_get(&options).await?.into_parsed()?;

    for tag in tags.children_named("tag") {
        let pages: Vec<&str> = tag
            .find("pages")
            .map(|p| p.children_named("page").filter_map(|page| page.child_text("title")).collect())
            .unwrap_or_default();
        println!(
            "{} ({} pages) {}",
            tag.attr("value").unwrap_or_default(),
            pages.len(),
            pages.join(", ")
        );
    }
    Ok(())
}
