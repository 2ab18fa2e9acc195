use thiserror::Error;

use crate::interface::{ConsoleInterface, UserInterface};
use crate::prelude::ErrorHandler;

/// The ways parsing the command line can fail.
///
/// Every failure is first routed through the configured [`ErrorHandler`], and then returned as an `Err`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ArgsError {
    /// A positional lookup found a flag-looking token directly followed by a plain token, before that flag was resolved.
    #[error("Ambiguous parameter order: '{token}' follows '{flag}', which may take it as a value.")]
    AmbiguousOrder {
        /// The flag-looking token.
        flag: String,
        /// The plain token that may belong to `flag`.
        token: String,
    },

    /// A positional lookup exhausted every token, and no default was supplied.
    #[error("Argument missing.")]
    MissingArgument,

    /// A parameter was found without a value to go with it.
    #[error("Missing parameter value after '{option}'.")]
    MissingValue {
        /// The parameter token.
        option: String,
    },

    /// A parameter value could not be converted into the requested type.
    #[error("Option '{option}': cannot convert '{token}' to {type_name}.")]
    Conversion {
        /// The parameter identity.
        option: String,
        /// The offending value.
        token: String,
        /// The label of the requested type.
        type_name: String,
    },

    /// No converter is registered for the requested type.
    #[error("No converter registered for type {type_name} (option '{option}').")]
    UnsupportedType {
        /// The parameter identity.
        option: String,
        /// The requested type.
        type_name: String,
    },

    /// A token names an option that was never declared.
    #[error("Unknown option '{0}'.")]
    UnknownOption(String),

    /// Two declared options share a short or long name.
    #[error("Cannot duplicate the option '{0}'.")]
    DuplicateDeclaration(String),

    /// A required declared positional was never supplied.
    #[error("Missing required positional '{0}'.")]
    MissingRequiredPositional(String),

    /// The help switch was given; usage has already been printed.
    #[error("Help requested.")]
    WantsHelp,
}

impl ArgsError {
    /// The token responsible for this error (empty when there is none).
    pub fn faulty_token(&self) -> &str {
        match self {
            ArgsError::AmbiguousOrder { token, .. } => token,
            ArgsError::MissingValue { option } => option,
            ArgsError::Conversion { token, .. } => token,
            ArgsError::UnsupportedType { option, .. } => option,
            ArgsError::UnknownOption(option) => option,
            ArgsError::DuplicateDeclaration(option) => option,
            ArgsError::MissingRequiredPositional(name) => name,
            ArgsError::MissingArgument | ArgsError::WantsHelp => "",
        }
    }

    /// The process exit code matching this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ArgsError::WantsHelp => 0,
            _ => 1,
        }
    }
}

/// The default error handler: print the error and exit the process.
///
/// The exit code comes from [`ArgsError::exit_code`].
/// [`ArgsError::WantsHelp`] exits silently, since the usage has already been printed.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExitOnError;

impl ErrorHandler for ExitOnError {
    fn handle(&self, program: &str, error: &ArgsError) {
        if !matches!(error, ArgsError::WantsHelp) {
            let console = ConsoleInterface::default();
            console.print_error(format!("Error in {program}:"));
            console.print_error(error.to_string());
        }

        std::process::exit(error.exit_code());
    }
}

/// An error handler that does nothing, so every error comes back to the caller as an `Err`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReturnError;

impl ErrorHandler for ReturnError {
    fn handle(&self, _program: &str, _error: &ArgsError) {
        // Do nothing.
    }
}

impl<F> ErrorHandler for F
where
    F: Fn(&str, &ArgsError),
{
    fn handle(&self, program: &str, error: &ArgsError) {
        self(program, error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::RefCell;

    #[rstest]
    #[case(ArgsError::AmbiguousOrder { flag: "-a".to_string(), token: "x".to_string() }, "x")]
    #[case(ArgsError::MissingArgument, "")]
    #[case(ArgsError::MissingValue { option: "-p".to_string() }, "-p")]
    #[case(ArgsError::Conversion { option: "-p".to_string(), token: "abc".to_string(), type_name: "Integer".to_string() }, "abc")]
    #[case(ArgsError::UnknownOption("-z".to_string()), "-z")]
    #[case(ArgsError::WantsHelp, "")]
    fn faulty_token(#[case] error: ArgsError, #[case] expected: &str) {
        assert_eq!(error.faulty_token(), expected);
    }

    #[rstest]
    #[case(ArgsError::WantsHelp, 0)]
    #[case(ArgsError::MissingArgument, 1)]
    #[case(ArgsError::DuplicateDeclaration("x".to_string()), 1)]
    fn exit_code(#[case] error: ArgsError, #[case] expected: i32) {
        assert_eq!(error.exit_code(), expected);
    }

    #[test]
    fn display() {
        let error = ArgsError::Conversion {
            option: "-p".to_string(),
            token: "abc".to_string(),
            type_name: "Integer".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Option '-p': cannot convert 'abc' to Integer."
        );
        assert_eq!(
            ArgsError::MissingValue {
                option: "--name".to_string()
            }
            .to_string(),
            "Missing parameter value after '--name'."
        );
    }

    #[test]
    fn closure_handler() {
        let seen: RefCell<Vec<(String, String)>> = RefCell::default();
        let handler = |program: &str, error: &ArgsError| {
            seen.borrow_mut()
                .push((program.to_string(), error.faulty_token().to_string()));
        };

        handler.handle("program", &ArgsError::UnknownOption("-z".to_string()));

        assert_eq!(
            seen.into_inner(),
            vec![("program".to_string(), "-z".to_string())]
        );
    }
}
