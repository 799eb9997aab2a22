//! Success-or-failure result carried through a chain.
//!
//! An [`Outcome`] is what every chain step produces and what a configured
//! [`Pipeline`](crate::Pipeline) finally exposes. Unlike [`Result`](crate::Result)
//! it carries rendered error messages rather than an [`Error`](crate::Error),
//! so it can be cloned, compared and serialized freely.

use serde::{de, Deserialize, Deserializer, Serialize};

/// Either a value or one or more error messages.
///
/// The `Failure` list is never empty; deserializing an empty one is an error.
///
/// # Example
///
/// ```rust
/// use typed_pipeline::Outcome;
///
/// let ok = Outcome::success(3);
/// assert_eq!(ok.value(), Some(&3));
///
/// let failed: Outcome<i32> = Outcome::fail("boom");
/// assert_eq!(failed.errors(), ["boom".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "payload", rename_all = "snake_case")]
pub enum Outcome<T> {
    /// The chain produced a value.
    Success(T),
    /// The chain failed; messages are kept in the order they occurred.
    Failure(#[serde(deserialize_with = "non_empty_errors")] Vec<String>),
}

fn non_empty_errors<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let errors = Vec::<String>::deserialize(deserializer)?;
    if errors.is_empty() {
        return Err(de::Error::custom("a failure needs at least one error message"));
    }
    Ok(errors)
}

impl<T> Outcome<T> {
    /// Wrap a value.
    pub fn success(value: T) -> Self {
        Outcome::Success(value)
    }

    /// A failure carrying a single message.
    pub fn fail(message: impl Into<String>) -> Self {
        Outcome::Failure(vec![message.into()])
    }

    /// Returns `true` for `Success`.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Returns `true` for `Failure`.
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// The success value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    /// The failure messages; empty on success.
    pub fn errors(&self) -> &[String] {
        match self {
            Outcome::Success(_) => &[],
            Outcome::Failure(errors) => errors,
        }
    }

    /// Consume the outcome, returning the success value if any.
    pub fn into_value(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    /// Convert into a standard `Result`, keeping the messages on failure.
    pub fn into_result(self) -> std::result::Result<T, Vec<String>> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(errors) => Err(errors),
        }
    }

    /// Transform the success value, passing failures through untouched.
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Failure(errors) => Outcome::Failure(errors),
        }
    }

    /// Render all failure messages joined by `delimiter`, or `None` on success.
    pub fn joined_errors(&self, delimiter: &str) -> Option<String> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(errors) => Some(errors.join(delimiter)),
        }
    }
}

impl<T> From<crate::Result<T>> for Outcome<T> {
    fn from(result: crate::Result<T>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(err) => Outcome::fail(err.to_string()),
        }
    }
}
