pub mod envelope;

pub use envelope::{EnvelopeError, PreToolUseInput, PreToolUseOutput, StopInput};
