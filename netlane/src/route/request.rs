//! Transport-agnostic request descriptor.

use std::collections::BTreeMap;
use url::Url;

use super::definition::HttpMethod;

pub const AUTHORIZATION: &str = "Authorization";
pub const APP_ID: &str = "App-ID";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A fully built request.
///
/// Produced by [`RequestBuilder`](super::RequestBuilder) and handed to a
/// backend; nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    url: Url,
    method: HttpMethod,
    headers: BTreeMap<String, String>,
    body: Option<Vec<u8>>,
}

impl RequestDescriptor {
    pub(crate) fn new(
        url: Url,
        method: HttpMethod,
        headers: BTreeMap<String, String>,
        body: Option<Vec<u8>>,
    ) -> Self {
        Self {
            url,
            method,
            headers,
            body,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}
