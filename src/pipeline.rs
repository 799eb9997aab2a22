//! High-level pipeline container with return-type validation.

use std::sync::Arc;

use crate::chain::{Chain, Source};
use crate::type_tag::{reinterpret, TypeTag};
use crate::{Error, Logger, Outcome, PipelineEvent, PipelineMetrics, TraceEntry, TracingLogger};

/// A pipeline declaring the output type `TOut` it expects from its chain.
///
/// All work happens in [`configure`](Pipeline::configure), which returns a new
/// pipeline holding the result; [`run`](Pipeline::run) only reads it back.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use typed_pipeline::{LambdaPipe, MemoryLogger, Outcome, Pipeline};
///
/// let logger = Arc::new(MemoryLogger::new());
/// let pipeline = Pipeline::<usize>::new(logger.clone())
///     .with_name("WordCount")
///     .configure(|source| {
///         source
///             .append(LambdaPipe::new(|_: &String| Ok("a b c".to_string())))
///             .append(LambdaPipe::new(|s: &String| Ok(s.split_whitespace().count())))
///             .tap(|n| format!("{n} words"))
///     });
///
/// assert_eq!(pipeline.run(), &Outcome::Success(3));
/// assert_eq!(logger.infos(), vec!["3 words"]);
///
/// // Ending on the wrong type is reported, not panicked on.
/// let wrong = Pipeline::<bool>::new(logger).configure(|source| {
///     source.append(LambdaPipe::new(|n: &i32| Ok(*n)))
/// });
/// assert_eq!(wrong.run().errors(), ["The return type 'i32' is not valid.".to_string()]);
/// ```
pub struct Pipeline<TOut> {
    logger: Arc<dyn Logger>,
    outcome: Outcome<TOut>,
    name: String,
    metrics: PipelineMetrics,
    trace: Vec<TraceEntry>,
}

impl<TOut> Default for Pipeline<TOut> {
    fn default() -> Self {
        Self::new(Arc::new(TracingLogger))
    }
}

impl<TOut> Pipeline<TOut> {
    /// Create an unconfigured pipeline logging to `logger`.
    ///
    /// Until configured, [`run`](Pipeline::run) reports [`Error::NotConfigured`].
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self::with_source(logger, Outcome::fail(Error::NotConfigured.to_string()))
    }

    /// Create a pipeline pre-seeded with `source` as its outcome.
    pub fn with_source(logger: Arc<dyn Logger>, source: Outcome<TOut>) -> Self {
        Self {
            logger,
            outcome: source,
            name: "pipeline".to_string(),
            metrics: PipelineMetrics::default(),
            trace: Vec::new(),
        }
    }

    /// Set a human-readable name for this pipeline.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Returns the name of this pipeline.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The final outcome. Performs no computation.
    pub fn run(&self) -> &Outcome<TOut> {
        &self.outcome
    }

    /// Consume the pipeline, returning its outcome.
    pub fn into_outcome(self) -> Outcome<TOut> {
        self.outcome
    }

    /// Counters from the last configuration.
    pub fn metrics(&self) -> &PipelineMetrics {
        &self.metrics
    }

    /// Events from the last configuration.
    pub fn trace(&self) -> &[TraceEntry] {
        &self.trace
    }

    /// Configure with a chain already typed on `TOut`.
    ///
    /// A chain ending on any other type does not compile, so no runtime check
    /// is needed.
    pub fn configure_typed<F>(&self, build: F) -> Pipeline<TOut>
    where
        F: FnOnce(Source) -> Chain<TOut>,
    {
        let span = tracing::info_span!("pipeline", name = %self.name);
        let _enter = span.enter();

        let (outcome, metrics, trace) = build(Source::new(Arc::clone(&self.logger))).into_parts();
        self.finish(outcome, metrics, trace)
    }

    fn finish(
        &self,
        outcome: Outcome<TOut>,
        metrics: PipelineMetrics,
        trace: Vec<TraceEntry>,
    ) -> Pipeline<TOut> {
        Pipeline {
            logger: Arc::clone(&self.logger),
            outcome,
            name: self.name.clone(),
            metrics,
            trace,
        }
    }
}

impl<TOut: 'static> Pipeline<TOut> {
    /// Build and run a chain, then check that it ends on `TOut`.
    ///
    /// `build` receives a fresh [`Source`] bound to this pipeline's logger and is
    /// called exactly once. If the chain's payload type is not `TOut`, the
    /// returned pipeline fails with `The return type '<T>' is not valid.`,
    /// replacing whatever the chain produced.
    pub fn configure<T, F>(&self, build: F) -> Pipeline<TOut>
    where
        T: 'static,
        F: FnOnce(Source) -> Chain<T>,
    {
        let span = tracing::info_span!("pipeline", name = %self.name);
        let _enter = span.enter();

        let (outcome, mut metrics, mut trace) =
            build(Source::new(Arc::clone(&self.logger))).into_parts();

        let actual = TypeTag::of::<T>();
        let expected = TypeTag::of::<TOut>();
        let outcome = match reinterpret::<Outcome<T>, Outcome<TOut>>(outcome) {
            Some(outcome) if actual.is_assignable_to(&expected) => outcome,
            _ => {
                tracing::debug!(%actual, %expected, "chain ends on an undeclared type");
                let message = Error::InvalidReturnType {
                    type_name: actual.name().to_string(),
                }
                .to_string();
                metrics.record_failure(message.clone());
                trace.push(TraceEntry::new(PipelineEvent::Rejected {
                    actual_type: actual.to_string(),
                    expected_type: expected.to_string(),
                }));
                Outcome::fail(message)
            }
        };
        self.finish(outcome, metrics, trace)
    }
}
