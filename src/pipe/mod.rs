//! Core pipe trait and fundamental pipe types.
//!
//! This module defines the [`Pipe`] trait, the single unit of work a chain
//! executes, along with [`LambdaPipe`] for closure-based pipes and
//! [`PipeExt`] for fluent pipe composition.

use std::any::Any;
use std::marker::PhantomData;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::{Error, Result};

pub mod compose;
pub mod named;

pub use compose::ComposedPipe;
pub use named::NamedPipe;

/// A synchronous, typed mapping from an input value to an output value.
///
/// Pipes borrow their input: when a pipe whose input and output types are the
/// same fails, the chain carries the unmodified input forward instead.
///
/// # Example
///
/// ```rust
/// use typed_pipeline::{Pipe, Result};
///
/// struct Trim;
///
/// impl Pipe for Trim {
///     type Input = String;
///     type Output = String;
///
///     fn execute(&self, input: &String) -> Result<String> {
///         Ok(input.trim().to_string())
///     }
/// }
///
/// assert_eq!(Trim.execute(&"  hi ".to_string()).unwrap(), "hi");
/// ```
pub trait Pipe {
    /// The input type for this pipe.
    type Input;
    /// The output type produced by this pipe.
    type Output;

    /// Map `input` to an output, or fail.
    fn execute(&self, input: &Self::Input) -> Result<Self::Output>;

    /// Returns a human-readable name for this pipe. Defaults to the type name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// A pipe constructed from a closure or function pointer.
///
/// The type parameters `I` and `O` encode the input and output types,
/// while `F` is the concrete closure type.
///
/// # Example
///
/// ```rust
/// use typed_pipeline::{LambdaPipe, Pipe};
///
/// let is_empty = LambdaPipe::new(|s: &String| Ok(s.is_empty())).with_name("IsEmpty");
/// assert_eq!(is_empty.name(), "IsEmpty");
/// assert!(is_empty.execute(&String::new()).unwrap());
/// ```
pub struct LambdaPipe<I, O, F> {
    f: F,
    name: Option<String>,
    _phantom: PhantomData<fn(&I) -> O>,
}

impl<I, O, F> LambdaPipe<I, O, F>
where
    F: Fn(&I) -> Result<O>,
{
    /// Create a new `LambdaPipe` from the given closure.
    pub fn new(f: F) -> Self {
        Self {
            f,
            name: None,
            _phantom: PhantomData,
        }
    }

    /// Report `name` instead of the closure's type name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl<I, O, F> Pipe for LambdaPipe<I, O, F>
where
    F: Fn(&I) -> Result<O>,
{
    type Input = I;
    type Output = O;

    fn execute(&self, input: &I) -> Result<O> {
        (self.f)(input)
    }

    fn name(&self) -> &str {
        self.name
            .as_deref()
            .unwrap_or_else(|| std::any::type_name::<F>())
    }
}

impl<P: Pipe + ?Sized> Pipe for &P {
    type Input = P::Input;
    type Output = P::Output;

    fn execute(&self, input: &P::Input) -> Result<P::Output> {
        (**self).execute(input)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<P: Pipe + ?Sized> Pipe for Box<P> {
    type Input = P::Input;
    type Output = P::Output;

    fn execute(&self, input: &P::Input) -> Result<P::Output> {
        (**self).execute(input)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<P: Pipe + ?Sized> Pipe for Arc<P> {
    type Input = P::Input;
    type Output = P::Output;

    fn execute(&self, input: &P::Input) -> Result<P::Output> {
        (**self).execute(input)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Extension trait providing fluent composition methods for all [`Pipe`] implementors.
///
/// - [`PipeExt::then`]: Fuse two pipes into one
/// - [`PipeExt::named`]: Override the reported name
/// - [`PipeExt::boxed`]: Erase the concrete type behind a `Box<dyn Pipe<...>>`
pub trait PipeExt: Pipe + Sized {
    /// Fuse this pipe with `next`, feeding this pipe's output into it.
    ///
    /// The result is a single pipe from `Self::Input` to `Q::Output`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use typed_pipeline::{LambdaPipe, Pipe, PipeExt};
    ///
    /// let len_is_even = LambdaPipe::new(|s: &String| Ok(s.len()))
    ///     .then(LambdaPipe::new(|n: &usize| Ok(n % 2 == 0)));
    /// assert!(len_is_even.execute(&"ab".to_string()).unwrap());
    /// ```
    fn then<Q>(self, next: Q) -> ComposedPipe<Self, Q>
    where
        Q: Pipe<Input = Self::Output>,
    {
        ComposedPipe::new(self, next)
    }

    /// Report `name` for this pipe in traces.
    fn named(self, name: impl Into<String>) -> NamedPipe<Self> {
        NamedPipe::new(self, name)
    }

    /// Erase the concrete pipe type, returning a trait object.
    fn boxed(self) -> Box<dyn Pipe<Input = Self::Input, Output = Self::Output>>
    where
        Self: 'static,
    {
        Box::new(self)
    }
}

impl<T: Pipe + Sized> PipeExt for T {}

/// Run `pipe`, turning a panic into [`Error::Panic`].
pub(crate) fn invoke<P: Pipe>(pipe: &P, input: &P::Input) -> Result<P::Output> {
    catch_unwind(AssertUnwindSafe(|| pipe.execute(input)))
        .unwrap_or_else(|payload| Err(Error::Panic(panic_message(payload))))
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        return (*msg).to_string();
    }
    if let Some(msg) = payload.downcast_ref::<String>() {
        return msg.clone();
    }
    "non-string panic payload".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse() -> LambdaPipe<String, i32, impl Fn(&String) -> Result<i32>> {
        LambdaPipe::new(|s: &String| s.parse::<i32>().map_err(|e| Error::Message(e.to_string())))
    }

    #[test]
    fn test_lambda_pipe_executes() {
        assert_eq!(parse().execute(&"42".to_string()).unwrap(), 42);
        assert!(parse().execute(&"x".to_string()).is_err());
    }

    #[test]
    fn test_default_name_is_type_name() {
        struct Identity;
        impl Pipe for Identity {
            type Input = u8;
            type Output = u8;
            fn execute(&self, input: &u8) -> Result<u8> {
                Ok(*input)
            }
        }
        assert!(Identity.name().ends_with("Identity"));
    }

    #[test]
    fn test_references_and_boxes_delegate() {
        let pipe = parse().with_name("Parse");
        assert_eq!((&pipe).name(), "Parse");
        assert_eq!(Arc::new(parse()).execute(&"7".to_string()).unwrap(), 7);

        let named = parse().with_name("Parse").named("Renamed");
        assert_eq!(named.name(), "Renamed");
        assert_eq!(named.inner().name(), "Parse");

        let boxed = parse().named("Boxed").boxed();
        assert_eq!(boxed.name(), "Boxed");
        assert_eq!(boxed.execute(&"-1".to_string()).unwrap(), -1);
    }

    #[test]
    fn test_invoke_catches_panics() {
        let pipe = LambdaPipe::new(|_: &u8| -> Result<u8> { panic!("exploded") });
        let err = invoke(&pipe, &0).unwrap_err();
        assert_eq!(err.to_string(), "Pipe panicked: exploded");
    }

    #[test]
    fn test_invoke_passes_errors_through() {
        let pipe = LambdaPipe::new(|_: &u8| -> Result<u8> { Err("refused".into()) });
        assert_eq!(invoke(&pipe, &0).unwrap_err().to_string(), "refused");
    }
}
