/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::deki::errors::DekiError;
use crate::deki::xml::XmlNode;
use bytes::Bytes;
use strum_macros::{Display, EnumString, IntoStaticStr};

/// How responses are handed back to the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// XML is parsed into an [`XmlNode`] and error documents become [`DekiError::Api`]
    #[default]
    Parsed,
    /// The body is returned verbatim
    Raw,
}

impl OutputFormat {
    /// Anything other than `raw` selects the parsed format
    pub fn from_name(name: &str) -> Self {
        if name == "raw" { Self::Raw } else { Self::Parsed }
    }
}

/// Status and body of a completed round trip
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Response of an endpoint call
#[derive(Debug, Clone)]
pub enum ApiResponse {
    Parsed(XmlNode),
    Raw(Bytes),
}

impl ApiResponse {
    /// The parsed tree, if the client is in parsed mode
    pub fn parsed(&self) -> Option<&XmlNode> {
        match self {
            Self::Parsed(node) => Some(node),
            Self::Raw(_) => None,
        }
    }

    pub fn into_parsed(self) -> Result<XmlNode, DekiError> {
        match self {
            Self::Parsed(node) => Ok(node),
            Self::Raw(_) => Err(DekiError::UnexpectedFormat()),
        }
    }

    /// Raw body. Parsed responses have already consumed theirs.
    pub fn raw(&self) -> Option<&Bytes> {
        match self {
            Self::Raw(body) => Some(body),
            Self::Parsed(_) => None,
        }
    }
}

/// Interprets a response according to the client's output format.
///
/// Every endpoint wrapper goes through here, so error detection lives in one place.
pub fn interpret(format: OutputFormat, resp: RawResponse) -> Result<ApiResponse, DekiError> {
    if format == OutputFormat::Raw {
        return Ok(ApiResponse::Raw(resp.body));
    }

    let text = resp.body_text();
    if text.trim().is_empty() {
        return if resp.is_success() {
            Ok(ApiResponse::Parsed(XmlNode::default()))
        } else {
            Err(DekiError::HttpStatus(resp.status, text))
        };
    }

    match XmlNode::parse(&text) {
        Ok(node) => {
            // Error documents sometimes arrive with a 200 status
            if let Some(err) = error_from_document(&node, resp.status) {
                return Err(err);
            }
            if !resp.is_success() {
                return Err(DekiError::HttpStatus(resp.status, text));
            }
            Ok(ApiResponse::Parsed(node))
        }
        Err(_) if !resp.is_success() => Err(DekiError::HttpStatus(resp.status, text)),
        Err(err) => Err(err),
    }
}

/// Interprets a response whose payload is not XML (file contents, property values, ...)
pub fn interpret_bytes(resp: RawResponse) -> Result<Bytes, DekiError> {
    if resp.is_success() {
        return Ok(resp.body);
    }
    let text = resp.body_text();
    match XmlNode::parse(&text)
        .ok()
        .and_then(|node| error_from_document(&node, resp.status))
    {
        Some(err) => Err(err),
        None => Err(DekiError::HttpStatus(resp.status, text)),
    }
}

fn error_from_document(node: &XmlNode, http_status: u16) -> Option<DekiError> {
    if node.name != "error" {
        return None;
    }
    let status = node
        .child_text("status")
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(http_status);
    Some(DekiError::Api {
        status,
        title: node.child_text("title").unwrap_or_default().to_string(),
        message: node.child_text("message").unwrap_or_default().to_string(),
    })
}

/// Formats an API error document as `title (status): message`
pub fn parse_error_message(error: &XmlNode) -> String {
    format!(
        "{} ({}): {}",
        error.child_text("title").unwrap_or_default(),
        error.child_text("status").unwrap_or_default(),
        error.child_text("message").unwrap_or_default()
    )
}

/// True when a page (or draft) edit response reports `success`, either as a `status`
/// child element or as a `status` attribute
pub fn page_create_check(output: &XmlNode) -> bool {
    output
        .child_text("status")
        .or_else(|| output.attr("status"))
        .is_some_and(|s| s == "success")
}

// A page exists when the response carries a positive numeric id
pub(crate) fn has_positive_id(output: &XmlNode) -> bool {
    output
        .attr("id")
        .and_then(|id| id.trim().parse::<i64>().ok())
        .is_some_and(|id| id > 0)
}

// A draft exists while it is active or unpublished
pub(crate) fn has_live_draft_state(output: &XmlNode) -> bool {
    matches!(output.attr("state"), Some("active" | "unpublished"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn resp(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            body: Bytes::from(body.to_string()),
        }
    }

    const NOT_FOUND: &str = "<error><status>404</status><title>Not Found</title>\
        <message>Page not found</message></error>";

    #[test]
    fn format_names() {
        assert_eq!(OutputFormat::from_name("raw"), OutputFormat::Raw);
        assert_eq!(OutputFormat::from_name("xml"), OutputFormat::Parsed);
        assert_eq!(OutputFormat::from_str("parsed").unwrap(), OutputFormat::Parsed);
        assert_eq!(OutputFormat::Raw.to_string(), "raw");
    }

    #[test]
    fn parsed_success() {
        let out = interpret(OutputFormat::Parsed, resp(200, r#"<page id="3"/>"#)).unwrap();
        assert_eq!(out.parsed().and_then(|p| p.attr("id")), Some("3"));
    }

    #[test]
    fn error_document_with_ok_status_is_an_error() {
        match interpret(OutputFormat::Parsed, resp(200, NOT_FOUND)) {
            Err(DekiError::Api { status, title, message }) => {
                assert_eq!(status, 404);
                assert_eq!(title, "Not Found");
                assert_eq!(message, "Page not found");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn failing_status_without_document() {
        assert!(matches!(
            interpret(OutputFormat::Parsed, resp(502, "Bad Gateway")),
            Err(DekiError::HttpStatus(502, _))
        ));
        assert!(matches!(
            interpret_bytes(resp(500, "")),
            Err(DekiError::HttpStatus(500, _))
        ));
    }

    #[test]
    fn malformed_success_is_a_decode_error() {
        assert!(matches!(
            interpret(OutputFormat::Parsed, resp(200, "<page>")),
            Err(DekiError::Decode(_))
        ));
    }

    #[test]
    fn empty_success_body_is_an_empty_tree() {
        let out = interpret(OutputFormat::Parsed, resp(200, "")).unwrap();
        assert!(out.parsed().unwrap().is_empty());
    }

    #[test]
    fn raw_format_passes_through() {
        let out = interpret(OutputFormat::Raw, resp(200, NOT_FOUND)).unwrap();
        assert_eq!(out.raw().unwrap().as_ref(), NOT_FOUND.as_bytes());
        assert!(matches!(out.into_parsed(), Err(DekiError::UnexpectedFormat())));
    }

    #[test]
    fn bytes_with_error_document() {
        assert_eq!(interpret_bytes(resp(200, "value")).unwrap().as_ref(), b"value");
        assert!(matches!(
            interpret_bytes(resp(404, NOT_FOUND)),
            Err(DekiError::Api { status: 404, .. })
        ));
    }

    #[test]
    fn error_message_format() {
        let node = XmlNode::parse(NOT_FOUND).unwrap();
        assert_eq!(parse_error_message(&node), "Not Found (404): Page not found");
    }

    #[test]
    fn create_check() {
        let ok = XmlNode::parse("<edit><status>success</status></edit>").unwrap();
        let ok_attr = XmlNode::parse(r#"<edit status="success"/>"#).unwrap();
        let conflict = XmlNode::parse(r#"<edit status="conflict"/>"#).unwrap();
        let none = XmlNode::parse("<edit/>").unwrap();
        assert!(page_create_check(&ok));
        assert!(page_create_check(&ok_attr));
        assert!(!page_create_check(&conflict));
        assert!(!page_create_check(&none));
    }

    #[test]
    fn existence_checks() {
        assert!(has_positive_id(&XmlNode::parse(r#"<page id="42"/>"#).unwrap()));
        assert!(!has_positive_id(&XmlNode::parse(r#"<page id="0"/>"#).unwrap()));
        assert!(!has_positive_id(&XmlNode::parse("<page/>").unwrap()));
        assert!(has_live_draft_state(&XmlNode::parse(r#"<draft state="unpublished"/>"#).unwrap()));
        assert!(!has_live_draft_state(&XmlNode::parse(r#"<draft state="inactive"/>"#).unwrap()));
    }
}
