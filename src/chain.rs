//! Step chains: the immutable, append-only state built while configuring a pipeline.
//!
//! A configuration callback receives a [`Source`], seeds it with a
//! self-mapping pipe, then appends pipes to the resulting [`Chain`]. Every
//! append runs its pipe immediately and consumes the chain, returning a new
//! one typed on the pipe's output.
//!
//! Failure rules:
//!
//! - A failed chain never runs further pipes; it forwards its messages.
//! - A failing pipe whose input and output types are identical is logged
//!   through [`Logger::error`] and the chain continues with the previous value.
//! - Any other failing pipe turns the chain into a failure, without logging.

use std::sync::Arc;
use std::time::Instant;

use crate::pipe::invoke;
use crate::type_tag::{reinterpret, TypeTag};
use crate::{Logger, Outcome, Pipe, PipelineEvent, PipelineMetrics, TraceEntry};

/// Separator used to join failure messages for [`Chain::tap_error`].
pub const ERROR_DELIMITER: &str = "/";

/// The entry point of a chain, bound to the pipeline's logger.
pub struct Source {
    logger: Arc<dyn Logger>,
}

impl Source {
    /// Create a source that hands `logger` to the chain it starts.
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }

    /// Seed the chain by running a self-mapping pipe on `T::default()`.
    ///
    /// A failure here cannot be recovered, since there is no earlier value;
    /// the chain starts failed and nothing is logged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use typed_pipeline::{LambdaPipe, MemoryLogger, Source};
    ///
    /// let chain = Source::new(Arc::new(MemoryLogger::new()))
    ///     .append(LambdaPipe::new(|_: &String| Ok("seed".to_string())));
    /// assert_eq!(chain.outcome().value().map(String::as_str), Some("seed"));
    /// ```
    pub fn append<T, P>(self, pipe: P) -> Chain<T>
    where
        P: Pipe<Input = T, Output = T>,
        T: Default + 'static,
    {
        let mut journal = Journal::default();
        let step_name = pipe.name().to_string();
        journal.start::<T>(&step_name);

        let start = Instant::now();
        let outcome = match invoke(&pipe, &T::default()) {
            Ok(value) => {
                journal.end(step_name, start);
                Outcome::Success(value)
            }
            Err(err) => journal.fail(step_name, err.to_string()),
        };
        Chain {
            outcome,
            logger: self.logger,
            journal,
        }
    }
}

/// A chain positioned on payload type `T`.
///
/// Holds the current [`Outcome`] along with the metrics and trace collected
/// so far. Consumed by every operation, so an earlier chain value can never be
/// observed changing.
pub struct Chain<T> {
    outcome: Outcome<T>,
    logger: Arc<dyn Logger>,
    journal: Journal,
}

impl<T: 'static> Chain<T> {
    /// Run `pipe` on the current value, producing a chain typed on its output.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use typed_pipeline::{LambdaPipe, MemoryLogger, Source};
    ///
    /// let logger = Arc::new(MemoryLogger::new());
    /// let chain = Source::new(logger.clone())
    ///     .append(LambdaPipe::new(|_: &String| Ok("abc".to_string())))
    ///     .append(LambdaPipe::new(|_: &String| -> typed_pipeline::Result<String> {
    ///         Err("upper-casing failed".into())
    ///     }))
    ///     .append(LambdaPipe::new(|s: &String| Ok(s.len())));
    ///
    /// // The String -> String pipe failed: logged, and "abc" carried on.
    /// assert_eq!(chain.outcome().value(), Some(&3));
    /// assert_eq!(logger.errors(), vec!["upper-casing failed"]);
    /// ```
    pub fn append<P>(self, pipe: P) -> Chain<P::Output>
    where
        P: Pipe<Input = T>,
        P::Output: 'static,
    {
        let Chain {
            outcome,
            logger,
            mut journal,
        } = self;
        let step_name = pipe.name().to_string();

        let value = match outcome {
            Outcome::Success(value) => value,
            Outcome::Failure(errors) => {
                journal.skip(step_name);
                return Chain {
                    outcome: Outcome::Failure(errors),
                    logger,
                    journal,
                };
            }
        };

        journal.start::<T>(&step_name);
        let start = Instant::now();
        let outcome = match invoke(&pipe, &value) {
            Ok(output) => {
                journal.end(step_name, start);
                Outcome::Success(output)
            }
            Err(err) => {
                let message = err.to_string();
                match reinterpret::<T, P::Output>(value) {
                    Some(previous) => {
                        logger.error(&message);
                        journal.recover(step_name, message);
                        Outcome::Success(previous)
                    }
                    None => journal.fail(step_name, message),
                }
            }
        };
        Chain {
            outcome,
            logger,
            journal,
        }
    }

    /// The tag of the chain's payload type.
    pub fn type_tag(&self) -> TypeTag {
        TypeTag::of::<T>()
    }
}

impl<T> Chain<T> {
    /// Log a message built from the current value, if the chain succeeded.
    ///
    /// `generator` is not called on a failed chain.
    pub fn tap<F>(self, generator: F) -> Self
    where
        F: FnOnce(&T) -> String,
    {
        if let Outcome::Success(value) = &self.outcome {
            self.logger.info(&generator(value));
        }
        self
    }

    /// Log a message built from the joined failure messages, if the chain failed.
    ///
    /// Messages are joined with [`ERROR_DELIMITER`] in the order they occurred.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use typed_pipeline::{LambdaPipe, MemoryLogger, Source};
    ///
    /// let logger = Arc::new(MemoryLogger::new());
    /// Source::new(logger.clone())
    ///     .append(LambdaPipe::new(|_: &u8| -> typed_pipeline::Result<u8> {
    ///         Err("no seed".into())
    ///     }))
    ///     .tap_error(|errors| format!("failed: {errors}"));
    ///
    /// assert_eq!(logger.errors(), vec!["failed: no seed"]);
    /// ```
    pub fn tap_error<F>(self, generator: F) -> Self
    where
        F: FnOnce(&str) -> String,
    {
        if let Some(joined) = self.outcome.joined_errors(ERROR_DELIMITER) {
            self.logger.error(&generator(&joined));
        }
        self
    }

    /// The current outcome.
    pub fn outcome(&self) -> &Outcome<T> {
        &self.outcome
    }

    /// Counters collected so far.
    pub fn metrics(&self) -> &PipelineMetrics {
        &self.journal.metrics
    }

    /// Events collected so far.
    pub fn trace(&self) -> &[TraceEntry] {
        &self.journal.trace
    }

    /// Consume the chain, returning its outcome.
    pub fn into_outcome(self) -> Outcome<T> {
        self.outcome
    }

    pub(crate) fn into_parts(self) -> (Outcome<T>, PipelineMetrics, Vec<TraceEntry>) {
        (self.outcome, self.journal.metrics, self.journal.trace)
    }
}

/// Metrics and trace carried from one chain value to the next.
#[derive(Default)]
struct Journal {
    metrics: PipelineMetrics,
    trace: Vec<TraceEntry>,
}

impl Journal {
    fn emit(&mut self, event: PipelineEvent) {
        self.trace.push(TraceEntry::new(event));
    }

    fn start<T: 'static>(&mut self, step_name: &str) {
        self.emit(PipelineEvent::StepStart {
            step_name: step_name.to_string(),
            input_type: TypeTag::of::<T>().to_string(),
        });
    }

    fn end(&mut self, step_name: String, start: Instant) {
        tracing::debug!(step = %step_name, "pipe completed");
        self.metrics.record_step();
        self.emit(PipelineEvent::StepEnd {
            step_name,
            duration_ms: start.elapsed().as_millis(),
        });
    }

    fn skip(&mut self, step_name: String) {
        tracing::debug!(step = %step_name, "chain already failed, skipping pipe");
        self.metrics.record_skip();
        self.emit(PipelineEvent::Skipped { step_name });
    }

    fn recover(&mut self, step_name: String, message: String) {
        tracing::warn!(step = %step_name, error = %message, "recovered same-type pipe");
        self.metrics.record_recovery();
        self.emit(PipelineEvent::Recovered { step_name, message });
    }

    fn fail<U>(&mut self, step_name: String, message: String) -> Outcome<U> {
        tracing::debug!(step = %step_name, error = %message, "pipe failed");
        self.metrics.record_failed_step();
        self.metrics.record_failure(message.clone());
        self.emit(PipelineEvent::Error {
            step_name,
            message: message.clone(),
        });
        Outcome::fail(message)
    }
}
