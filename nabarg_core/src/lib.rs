//! Core module for `nabarg`.
//! See [documentation root](https://docs.rs/nabarg/latest/nabarg/index.html) for full details.
#![deny(missing_docs)]
mod constant;
mod convert;
mod error;
mod getopt;
mod interface;
mod model;
mod pool;
#[allow(missing_docs)]
pub mod prelude;
mod token;
mod usage;

pub use convert::*;
pub use error::*;
pub use getopt::*;
pub use model::*;
pub use pool::*;
pub use token::Key;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
