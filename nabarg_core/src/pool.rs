use std::cell::RefCell;
use std::env;
use std::path::Path;

use crate::convert::Converters;
use crate::error::{ArgsError, ExitOnError};
use crate::interface::{ConsoleInterface, UserInterface};
use crate::prelude::ErrorHandler;
use crate::usage::synopsis;

mod argument;
mod flag;
mod parameter;
mod record;
mod tokens;

pub use argument::Deferred;
pub use record::Query;
use record::History;
use tokens::TokenPool;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The ad-hoc command line parser: query flags, parameters and positional arguments on demand.
///
/// There is no declaration step.
/// Each query consumes the tokens it resolves, so later queries see what earlier queries left behind.
/// Every query is remembered, which is how [`Args::usage`] renders a synopsis without any configuration.
///
/// ### Example
/// ```
/// # use nabarg_core as nabarg;
/// use nabarg::{Args, ReturnError};
///
/// let args = Args::from_tokens("sorter", &["data.csv", "-v", "--field", "3"])
///     .with_error_handler(ReturnError);
///
/// let input = args.next_argument();
/// let verbose = args.flag(('v', "verbose"));
/// let field: i64 = args.get_or(('f', "field"), 1).unwrap();
///
/// assert!(verbose);
/// assert_eq!(field, 3);
/// assert_eq!(input.force().unwrap(), "data.csv");
/// assert_eq!(args.usage(), "sorter -v -f <Integer> <argument>");
/// ```
pub struct Args {
    program: String,
    pool: RefCell<TokenPool>,
    history: RefCell<History>,
    converters: Converters,
    error_handler: Box<dyn ErrorHandler>,
    user_interface: Box<dyn UserInterface>,
}

impl std::fmt::Debug for Args {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Args")
            .field("program", &self.program)
            .field("pool", &self.pool)
            .field("history", &self.history)
            .field("converters", &self.converters)
            .finish_non_exhaustive()
    }
}

impl Default for Args {
    fn default() -> Self {
        Self::new()
    }
}

impl Args {
    /// Capture the process arguments.
    /// The program name is the file name of the invoked executable.
    pub fn new() -> Self {
        let mut tokens = env::args();
        let program = program_name(tokens.next());
        Self::with_tokens(program, tokens.collect())
    }

    /// Capture the provided tokens in place of the process arguments.
    pub fn from_tokens(program: impl Into<String>, tokens: &[&str]) -> Self {
        Self::with_tokens(
            program.into(),
            tokens.iter().map(|t| t.to_string()).collect(),
        )
    }

    fn with_tokens(program: String, tokens: Vec<String>) -> Self {
        Self {
            program,
            pool: RefCell::new(TokenPool::new(tokens)),
            history: RefCell::default(),
            converters: Converters::default(),
            error_handler: Box::new(ExitOnError),
            user_interface: Box::new(ConsoleInterface::default()),
        }
    }

    /// Replace the error channel (default: [`ExitOnError`]).
    pub fn with_error_handler(mut self, error_handler: impl ErrorHandler + 'static) -> Self {
        self.error_handler = Box::new(error_handler);
        self
    }

    /// Replace the conversion registry used by the parameter queries.
    pub fn with_converters(mut self, converters: Converters) -> Self {
        self.converters = converters;
        self
    }

    /// The conversion registry, for registering further types.
    pub fn converters_mut(&mut self) -> &mut Converters {
        &mut self.converters
    }

    #[cfg(test)]
    pub(crate) fn with_user_interface(mut self, user_interface: impl UserInterface + 'static) -> Self {
        self.user_interface = Box::new(user_interface);
        self
    }

    /// Start over with a new command line.
    /// The token pool, pure arguments, combined flag cache and query history are all discarded.
    pub fn reset(&mut self, tokens: &[&str]) {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Resetting with {} tokens.", tokens.len());
        }

        self.pool = RefCell::new(TokenPool::new(
            tokens.iter().map(|t| t.to_string()).collect(),
        ));
        self.history = RefCell::default();
    }

    /// The program name used in the usage line and error messages.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Render the usage line from every query made so far.
    ///
    /// Short flags come first (grouped as `-abc`), then long-only flags, then short parameters, long-only parameters, and finally positional arguments.
    /// Within each group the queries keep the order they were made in.
    pub fn usage(&self) -> String {
        synopsis(&self.program, self.history.borrow().usage_entries())
    }

    /// Print the usage line to stdout.
    pub fn print_usage(&self) {
        self.user_interface.print(self.usage());
    }

    /// Every query made so far, in the order made.
    pub fn queries(&self) -> Vec<Query> {
        self.history.borrow().queries().to_vec()
    }

    // Route the error through the error channel, then hand it back for the caller to return.
    fn fail(&self, error: ArgsError) -> ArgsError {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Query failed: {error:?}.");
        }

        self.error_handler.handle(&self.program, &error);
        error
    }
}

fn program_name(invocation: Option<String>) -> String {
    match invocation {
        Some(invocation) => match Path::new(&invocation).file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => invocation,
        },
        None => String::default(),
    }
}
