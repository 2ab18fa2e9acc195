mod column;
mod option;
mod parser;
mod printer;

pub use option::CommandLineOption;
pub use parser::{GetOpt, Parsed, SchemaParser};
