//! Sequential pipe fusion.

use crate::Result;
use super::Pipe;

/// Two pipes fused into one: the output of `A` feeds into `B`.
///
/// A chain treats the pair as a single step, so same-type recovery is decided
/// on `A::Input` versus `B::Output`. Constructed via
/// [`PipeExt::then`](crate::PipeExt::then).
pub struct ComposedPipe<A, B> {
    first: A,
    second: B,
    name: String,
}

impl<A: Pipe, B: Pipe> ComposedPipe<A, B> {
    /// Create a new fused pipe.
    pub fn new(first: A, second: B) -> Self {
        let name = format!("{} -> {}", first.name(), second.name());
        Self {
            first,
            second,
            name,
        }
    }
}

impl<A, B> Pipe for ComposedPipe<A, B>
where
    A: Pipe,
    B: Pipe<Input = A::Output>,
{
    type Input = A::Input;
    type Output = B::Output;

    fn execute(&self, input: &A::Input) -> Result<B::Output> {
        let intermediate = self.first.execute(input)?;
        self.second.execute(&intermediate)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, LambdaPipe, Pipe, PipeExt};

    #[test]
    fn test_first_failure_stops_second() {
        let composed = LambdaPipe::new(|_: &u32| -> crate::Result<u32> { Err("first".into()) })
            .then(LambdaPipe::new(|_: &u32| -> crate::Result<u32> { panic!("unreachable") }));
        assert!(matches!(composed.execute(&1), Err(Error::Message(m)) if m == "first"));
    }

    #[test]
    fn test_composed_name() {
        let composed = LambdaPipe::new(|n: &u32| Ok(n + 1))
            .with_name("Inc")
            .then(LambdaPipe::new(|n: &u32| Ok(n.to_string())).with_name("Show"));
        assert_eq!(composed.name(), "Inc -> Show");
        assert_eq!(composed.execute(&1).unwrap(), "2");
    }
}
