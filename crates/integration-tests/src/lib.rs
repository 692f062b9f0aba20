//! Test support for driving the completion client against a local endpoint.

mod completions;

pub use completions::{CompletionsMock, MockReply, MockServer};
