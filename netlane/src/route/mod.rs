//! Routes and request construction.
//!
//! A [`Route`] names one network operation and carries its parameters.
//! [`RequestBuilder`] compiles it against an [`Environment`] into a
//! [`RequestDescriptor`] (absolute URL, method, headers, optional body)
//! that any backend can execute.
//!
//! | Route | Method | Path | Auth headers | Body |
//! |---|---|---|---|---|
//! | `Route1` | GET | `/route1` | no | none |
//! | `Route2` | POST | `/route2` | `Authorization`, `App-ID` | JSON |

mod builder;
mod definition;
mod environment;
mod error;
mod request;

pub use builder::{RequestBuilder, StagedRequest};
pub use definition::{keys, Attributes, Encoding, HttpMethod, Route};
pub use environment::{Environment, Profile};
pub use error::RouteError;
pub use request::{
    RequestDescriptor, APP_ID, AUTHORIZATION, CONTENT_TYPE, JSON_CONTENT_TYPE,
};
