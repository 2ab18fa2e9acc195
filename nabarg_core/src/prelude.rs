//! Traits which, typically, may be imported without concern: `use nabarg::prelude::*`.
use crate::error::ArgsError;

/// Behaviour for the error channel: receives every parse failure before it is returned to the caller.
// Needs to be imported in order to implement a custom handler.
pub trait ErrorHandler {
    /// Handle the `error` raised while parsing the arguments of `program`.
    ///
    /// Implementations may terminate the process, log, or do nothing.
    /// When this returns, the error is handed back to the caller as an `Err`.
    fn handle(&self, program: &str, error: &ArgsError);
}
