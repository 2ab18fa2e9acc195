//! `nabarg` is a command line parser for Rust, offering two ways to read the command line.
//!
//! * *Ad-hoc queries* via [`Args`]:
//! there is no declaration step.
//! The program asks for flags, parameters and positional arguments wherever it needs them, and the usage line writes itself from those queries.
//! * *Declared schema* via [`GetOpt`]:
//! every option is declared up front (short name, long name, value type, callback), and the command line is parsed in a single pass.
//!
//! # Usage
//! This page includes a demo of each style.
//! More detail lives on the types themselves.
//!
//! via [`Args`]:
//! ```no_run
#![doc = include_str!("../demos/args_demo.rs")]
//! ```
//! via [`GetOpt`]:
//! ```no_run
#![doc = include_str!("../demos/sort_fields.rs")]
//! ```
//!
//! # Ad-hoc queries
//! An [`Args`] holds the command line as a pool of tokens.
//! Each query consumes the tokens it resolves, so later queries only see what earlier queries left behind.
//! * [`Args::flag`] answers whether `-v`/`--verbose` is present.
//! Short flags may be packed together (ex: `-abc`).
//! * [`Args::get`], [`Args::get_or`] and [`Args::get_all`] read `-p value`, `-p=value`, `--param value` or `--param=value`, converting the value through the [`Converters`] registry.
//! * [`Args::next_argument`] hands back a [`Deferred`] positional argument.
//! Its token is only chosen once it is forced, so flag and parameter queries made in the meantime get to claim their tokens first.
//!
//! Everything after a literal `--` is only ever returned as a positional argument.
//!
//! ```
//! use nabarg::{Args, ReturnError};
//!
//! let args = Args::from_tokens("summer", &["-a", "maybe parameter", "argument"])
//!     .with_error_handler(ReturnError);
//!
//! let first = args.next_argument();
//! let parameter: Option<String> = args.get('a').unwrap();
//!
//! assert_eq!(parameter.as_deref(), Some("maybe parameter"));
//! assert_eq!(first.force().unwrap(), "argument");
//! assert_eq!(args.usage(), "summer -a <String> <argument>");
//! ```
//!
//! # Declared schema
//! Configure a [`GetOpt`] by `add`ing [`CommandLineOption`]s, then build a [`SchemaParser`].
//! Options carry a [`ParameterType`]: switches take no value, and the others take an integer, a floating point or a string.
//! Unnamed options bind to positional tokens in declaration order; surplus positional tokens are reported in [`Parsed::additional`].
//! A `-h`/`--help` switch is added automatically.
//!
//! # Errors
//! Every failure is an [`ArgsError`], sent through the [`ErrorHandler`](prelude::ErrorHandler) error channel before it is returned.
//! The default channel, [`ExitOnError`], prints the error and exits the process.
//! Use [`ReturnError`] (or any `Fn(&str, &ArgsError)`) to handle errors yourself.
//!
//! # Features
//! * `tracing_debug`: emit `tracing` debug events while parsing.
pub use nabarg_core::*;
