//! # typed-pipeline
//!
//! Sequential, type-safe pipe composition in Rust.
//!
//! A pipeline is configured by chaining pipes, each consuming the previous
//! pipe's output. Every pipe runs as soon as it is appended; a failure skips
//! the rest of the chain, and a failing pipe whose input and output types are
//! the same is logged and skipped over instead.
//!
//! ## Core Concepts
//!
//! - **Pipe**: The trait for a single typed transformation
//! - **LambdaPipe**: A pipe built from a closure
//! - **Source**: Seeds a chain with a self-mapping pipe
//! - **Chain**: The immutable, append-only chain state (`append`, `tap`, `tap_error`)
//! - **Pipeline**: Runs a configuration callback and checks the chain's final type
//! - **Outcome**: Success with a value, or failure with error messages
//! - **Logger**: The sink for recovered failures and tap messages
//! - **PipelineMetrics** / **TraceEntry**: What happened while the chain ran
//!
//! ## Example: Configuring a Pipeline
//!
//! ```rust
//! use std::sync::Arc;
//! use typed_pipeline::{LambdaPipe, MemoryLogger, Outcome, Pipeline};
//!
//! let logger = Arc::new(MemoryLogger::new());
//!
//! let pipeline = Pipeline::<bool>::new(logger.clone()).configure(|source| {
//!     source
//!         .append(LambdaPipe::new(|_: &String| Ok(" 42 ".to_string())))
//!         // Same input and output type: a failure here is logged and skipped.
//!         .append(LambdaPipe::new(|_: &String| -> typed_pipeline::Result<String> {
//!             Err("normalization unavailable".into())
//!         }))
//!         .append(LambdaPipe::new(|s: &String| {
//!             s.trim().parse::<i32>().map_err(|e| e.to_string().into())
//!         }))
//!         .append(LambdaPipe::new(|n: &i32| Ok(n % 2 == 0)))
//! });
//!
//! assert_eq!(pipeline.run(), &Outcome::Success(true));
//! assert_eq!(logger.errors(), vec!["normalization unavailable"]);
//! assert_eq!(pipeline.metrics().recoveries, 1);
//! ```

pub mod error;
pub mod outcome;
pub mod type_tag;
pub mod logger;
pub mod metrics;
pub mod events;
pub mod pipe;
pub mod chain;
pub mod pipeline;

pub use error::{Error, Result};
pub use outcome::Outcome;
pub use type_tag::TypeTag;
pub use logger::{LogLevel, LogRecord, Logger, MemoryLogger, TracingLogger};
pub use metrics::PipelineMetrics;
pub use events::{PipelineEvent, TraceEntry};
pub use pipeline::Pipeline;
pub use chain::{Chain, Source, ERROR_DELIMITER};

// Re-export pipe types
pub use pipe::{LambdaPipe, Pipe, PipeExt};
pub use pipe::compose::ComposedPipe;
pub use pipe::named::NamedPipe;
