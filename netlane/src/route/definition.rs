//! The closed set of routes.

use std::fmt;

/// Parameters of a route that takes arguments.
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// Payload keys for [`Route::Route2`].
pub mod keys {
    pub const DEVICE_NAME: &str = "deviceName";
    pub const PLATFORM: &str = "platform";
    pub const PLATFORM_VERSION: &str = "platformVersion";
    pub const TOKEN: &str = "token";
}

/// HTTP method of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a route's payload becomes a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// No body.
    None,
    /// JSON object body with `Content-Type: application/json`.
    Json,
}

/// One network operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    /// `GET /route1`, no arguments, no auth headers.
    Route1,
    /// `POST /route2` with a JSON body, auth headers attached.
    Route2(Attributes),
}

impl Route {
    pub fn method(&self) -> HttpMethod {
        match self {
            Self::Route1 => HttpMethod::Get,
            Self::Route2(_) => HttpMethod::Post,
        }
    }

    /// Path segment appended to the API base.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Route1 => "route1",
            Self::Route2(_) => "route2",
        }
    }

    /// Whether `Authorization` and `App-ID` are attached.
    pub fn requires_auth(&self) -> bool {
        match self {
            Self::Route1 => false,
            Self::Route2(_) => true,
        }
    }

    pub fn encoding(&self) -> Encoding {
        match self {
            Self::Route1 => Encoding::None,
            Self::Route2(_) => Encoding::Json,
        }
    }

    pub fn attributes(&self) -> Option<&Attributes> {
        match self {
            Self::Route1 => None,
            Self::Route2(attributes) => Some(attributes),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} /{}", self.method(), self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route1_table() {
        let route = Route::Route1;
        assert_eq!(route.method(), HttpMethod::Get);
        assert_eq!(route.path(), "route1");
        assert!(!route.requires_auth());
        assert_eq!(route.encoding(), Encoding::None);
        assert!(route.attributes().is_none());
    }

    #[test]
    fn test_route2_table() {
        let mut attributes = Attributes::new();
        attributes.insert(keys::TOKEN.to_string(), "abc".into());
        let route = Route::Route2(attributes);

        assert_eq!(route.method(), HttpMethod::Post);
        assert_eq!(route.path(), "route2");
        assert!(route.requires_auth());
        assert_eq!(route.encoding(), Encoding::Json);
        assert_eq!(route.attributes().unwrap()["token"], "abc");
        assert_eq!(route.to_string(), "POST /route2");
    }
}
