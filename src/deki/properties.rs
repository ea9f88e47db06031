/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use strum_macros::{EnumString, IntoStaticStr};

/// Language used for context maps when none is given
pub const DEFAULT_LANGUAGE: &str = "en-us";

/// Options accepted by `site/tags`
pub const SITE_TAGS_OPTIONS: &[&str] = &["to", "from", "type", "q", "pages"];

/// Options accepted by `site/feed`
pub const SITE_FEED_OPTIONS: &[&str] = &["filter", "namespace", "format", "offset", "limit", "since"];

/// Page restriction applied through `pages/{id}/security`
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
pub enum Restriction {
    Public,
    #[strum(to_string = "Semi-Public")]
    SemiPublic,
    #[strum(to_string = "Semi-Private")]
    SemiPrivate,
    Private,
}

/// How a security change is applied to child pages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Cascade {
    #[default]
    None,
    Delta,
    Absolute,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

/// A user to create, or to update when `id` is set
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: Option<String>,
    pub id: Option<u64>,
}

/// Replacement values for an existing user
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub status: UserStatus,
}

/// Root of a site export
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportRoot {
    Id(u64),
    Path(String),
}
