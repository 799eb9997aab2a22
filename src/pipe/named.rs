//! Renaming wrapper.

use crate::Result;
use super::Pipe;

/// Wraps a pipe and reports a caller-chosen name.
///
/// Constructed via [`PipeExt::named`](crate::PipeExt::named).
pub struct NamedPipe<P> {
    inner: P,
    name: String,
}

impl<P> NamedPipe<P> {
    /// Wrap `inner`, labelling it `name`.
    pub fn new(inner: P, name: impl Into<String>) -> Self {
        Self {
            inner,
            name: name.into(),
        }
    }

    /// Access the inner pipe.
    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: Pipe> Pipe for NamedPipe<P> {
    type Input = P::Input;
    type Output = P::Output;

    fn execute(&self, input: &P::Input) -> Result<P::Output> {
        self.inner.execute(input)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
