//! Logging sink abstraction.
//!
//! Components of the request pipeline never talk to `tracing` directly; they
//! accept an `Arc<dyn Logger>` and log through the macros exported at the
//! crate root. This keeps the response processor and the backends testable
//! (swap in [`RecordingLogger`] and assert on the captured lines) and lets an
//! embedding application route pipeline diagnostics wherever it wants.
//!
//! # Implementations
//!
//! - [`TracingLogger`]: production adapter that forwards to `tracing`
//! - [`NoOpLogger`]: discards everything
//! - [`RecordingLogger`]: keeps every line in memory
//!
//! # Usage
//!
//! ```
//! use netlane::log::{Logger, NoOpLogger};
//! use netlane::log_info;
//! use std::sync::Arc;
//!
//! struct Component {
//!     logger: Arc<dyn Logger>,
//! }
//!
//! let component = Component { logger: Arc::new(NoOpLogger) };
//! log_info!(component.logger, "component ready");
//! ```

mod noop;
mod recording;
mod tracing_adapter;
mod r#trait;

pub use noop::NoOpLogger;
pub use r#trait::{LogLevel, Logger};
pub use recording::{LogRecord, RecordingLogger};
pub use tracing_adapter::TracingLogger;
