/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

pub mod api;
pub mod client;
pub mod creds;
pub mod errors;
pub mod identifier;
mod parsers;
pub mod properties;
pub mod response;
pub mod token;
pub mod xml;

mod contexts;
mod drafts;
mod groups;
mod pages;
mod site;
mod users;

pub use api::*;
pub use client::*;
pub use creds::*;
pub use errors::*;
pub use identifier::*;
pub use properties::*;
pub use response::*;
pub use token::*;
pub use xml::XmlNode;
