//! The outcome envelope returned by every fallible revdiff operation.
//!
//! An [`Outcome`] is in exactly one of three states:
//!
//! - **Success** -- data present, no errors.
//! - **Partial** -- data present together with at least one error. A run that
//!   compared some files and failed on others ends up here.
//! - **Failure** -- no data, errors describe why.
//!
//! Messages are informational and may accompany any state. Messages and
//! errors are append-only. Recording an error on a successful outcome moves
//! it to the partial state, so "success with errors" cannot be represented.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

/// Coarse status of an [`Outcome`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Partial,
    Failure,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "Success"),
            Self::Partial => write!(f, "Partial"),
            Self::Failure => write!(f, "Failure"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum State<T> {
    Complete(T),
    Partial(T, Vec<String>),
    Failed(Vec<String>),
}

/// Success/failure envelope carrying data, messages, and errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome<T> {
    state: State<T>,
    messages: Vec<String>,
    created_at: DateTime<Utc>,
}

impl<T> Outcome<T> {
    /// A successful outcome with no messages.
    pub fn success(data: T) -> Self {
        Self {
            state: State::Complete(data),
            messages: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// A successful outcome with messages, kept in the given order.
    pub fn success_with<I, S>(data: T, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut outcome = Self::success(data);
        outcome.messages.extend(messages.into_iter().map(Into::into));
        outcome
    }

    /// A failed outcome carrying the given errors, kept in the given order.
    pub fn failure<I, S>(errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            state: State::Failed(errors.into_iter().map(Into::into).collect()),
            messages: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Build an outcome from a `Result`, rendering the error with `Display`.
    pub fn from_result<E: fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(e) => Self::failure([e.to_string()]),
        }
    }

    pub fn status(&self) -> Status {
        match self.state {
            State::Complete(_) => Status::Success,
            State::Partial(..) => Status::Partial,
            State::Failed(_) => Status::Failure,
        }
    }

    /// `true` only for the success state.
    pub fn is_success(&self) -> bool {
        matches!(self.state, State::Complete(_))
    }

    /// The data, if the outcome carries any (success or partial).
    pub fn data(&self) -> Option<&T> {
        match &self.state {
            State::Complete(data) | State::Partial(data, _) => Some(data),
            State::Failed(_) => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self.state {
            State::Complete(data) | State::Partial(data, _) => Some(data),
            State::Failed(_) => None,
        }
    }

    /// The data, or `T::default()` for a failed outcome.
    pub fn data_or_default(&self) -> T
    where
        T: Default + Clone,
    {
        self.data().cloned().unwrap_or_default()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn errors(&self) -> &[String] {
        match &self.state {
            State::Complete(_) => &[],
            State::Partial(_, errors) | State::Failed(errors) => errors,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Append an informational message.
    pub fn add_message(&mut self, message: impl Into<String>) -> &mut Self {
        self.messages.push(message.into());
        self
    }

    /// Append an error. A successful outcome becomes partial; its data is kept.
    pub fn add_error(&mut self, error: impl Into<String>) -> &mut Self {
        let error = error.into();
        let state = std::mem::replace(&mut self.state, State::Failed(Vec::new()));
        self.state = match state {
            State::Complete(data) => State::Partial(data, vec![error]),
            State::Partial(data, mut errors) => {
                errors.push(error);
                State::Partial(data, errors)
            }
            State::Failed(mut errors) => {
                errors.push(error);
                State::Failed(errors)
            }
        };
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.add_message(message);
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.add_error(error);
        self
    }

    /// Transform the data, keeping status, messages, errors, and timestamp.
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        let state = match self.state {
            State::Complete(data) => State::Complete(f(data)),
            State::Partial(data, errors) => State::Partial(f(data), errors),
            State::Failed(errors) => State::Failed(errors),
        };
        Outcome {
            state,
            messages: self.messages,
            created_at: self.created_at,
        }
    }

    /// Chain a dependent step. Messages and errors of both steps accumulate;
    /// a failed outcome short-circuits without calling `f`.
    pub fn and_then<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        let (data, prior_errors) = match self.state {
            State::Complete(data) => (data, Vec::new()),
            State::Partial(data, errors) => (data, errors),
            State::Failed(errors) => {
                return Outcome {
                    state: State::Failed(errors),
                    messages: self.messages,
                    created_at: self.created_at,
                };
            }
        };

        let mut next = f(data);
        let mut messages = self.messages;
        messages.append(&mut next.messages);
        next.messages = messages;
        next.created_at = self.created_at;
        for error in prior_errors {
            next.add_error(error);
        }
        next
    }

    /// Convert into a plain `Result`. Only the success state maps to `Ok`.
    pub fn into_result(self) -> Result<T, Vec<String>> {
        match self.state {
            State::Complete(data) => Ok(data),
            State::Partial(_, errors) | State::Failed(errors) => Err(errors),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Outcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = match self.data() {
            Some(data) => data.to_string(),
            None => "No Data".to_string(),
        };
        let messages = if self.messages.is_empty() {
            "No Messages".to_string()
        } else {
            self.messages.join(", ")
        };
        let errors = if self.errors().is_empty() {
            "No Errors".to_string()
        } else {
            self.errors().join(", ")
        };
        write!(
            f,
            "[{}] {}: Data = {}, Messages = [{}], Errors = [{}]",
            self.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.status(),
            data,
            messages,
            errors
        )
    }
}

#[derive(Serialize)]
struct OutcomeView<'a, T> {
    success: bool,
    status: Status,
    data: Option<&'a T>,
    messages: &'a [String],
    errors: &'a [String],
    created_at: DateTime<Utc>,
}

impl<T: Serialize> Serialize for Outcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        OutcomeView {
            success: self.is_success(),
            status: self.status(),
            data: self.data(),
            messages: &self.messages,
            errors: self.errors(),
            created_at: self.created_at,
        }
        .serialize(serializer)
    }
}
