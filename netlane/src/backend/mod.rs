//! Network backends.
//!
//! A [`Backend`] performs the transfer for a built request and feeds the
//! result through the shared response pipeline. Four mechanisms exist:
//!
//! | Kind | Transfer | Completion runs on |
//! |---|---|---|
//! | [`NativeBackend`] | blocking `reqwest` | a scheduler lane |
//! | [`LibraryBackend`] | async `reqwest` | a runtime worker |
//! | [`MockSyncBackend`] | canned fixtures | the calling thread |
//! | [`MockAsyncBackend`] | canned fixtures | a scheduler lane |
//!
//! [`BackendKind::from_env`] and [`BackendFactory`] pick and build one.

mod factory;
mod http;
mod library;
mod mock_async;
mod mock_sync;
mod native;
mod selection;
mod traits;
mod transfer;

pub use factory::BackendFactory;
pub use http::{AsyncHttpClient, AsyncReqwestClient, HttpClient, ReqwestClient};
pub use library::LibraryBackend;
pub use mock_async::{DispatchMode, MockAsyncBackend, MOCK_ASYNC_LANE};
pub use mock_sync::{MockFixtures, MockSyncBackend, ROUTE1_FIXTURE, ROUTE2_FIXTURE};
pub use native::{NativeBackend, DEFAULT_NATIVE_LANE};
pub use selection::{BackendKind, ENV_FLAGS};
pub use traits::Backend;
pub use transfer::{TransferResult, TransportError};

use thiserror::Error;

/// Failures building a backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Failed to create HTTP client: {0}")]
    Client(#[from] TransportError),
}
