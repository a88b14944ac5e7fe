//! Value types passed between the flattener, the dispatcher and the consumer.

use reqwest::{Method, Url};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// One translated term as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationRecord {
    pub language: String,
    pub text: String,
}

impl TranslationRecord {
    pub fn new(language: impl Into<String>, text: impl Into<String>) -> Self {
        Self { language: language.into(), text: text.into() }
    }
}

/// Records in document order. Possibly empty.
pub type FlattenResult = Vec<TranslationRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    ParseError,
    TransportError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetail {
    pub kind: ErrorKind,
    pub message: String,
}

impl ErrorDetail {
    pub fn parse(message: impl Into<String>) -> Self {
        Self { kind: ErrorKind::ParseError, message: message.into() }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self { kind: ErrorKind::TransportError, message: message.into() }
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Terminal result of one dispatched request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "lowercase")]
pub enum Outcome {
    Success(FlattenResult),
    Failure(ErrorDetail),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

/// Immutable description of one GET call handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub method: Method,
    pub url: Url,
    pub headers: BTreeMap<String, String>,
}

impl RequestDescriptor {
    pub fn get(url: Url) -> Self {
        Self { method: Method::GET, url, headers: BTreeMap::new() }
    }

    /// Returns a copy decorated with the given headers; later pairs win.
    pub fn with_headers<K, V, I>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers.extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}
