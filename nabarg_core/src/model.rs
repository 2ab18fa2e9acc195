/// The kind of value a declared [`CommandLineOption`](./struct.CommandLineOption.html) accepts.
///
/// Anything beyond these should be taken as a `String` and converted by the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterType {
    /// Takes no value (a switch).
    None,
    /// Takes an integer value.
    Integer,
    /// Takes a string value.
    String,
    /// Takes a floating point value.
    Double,
}

impl std::fmt::Display for ParameterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The value handed to a declared option's callback.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    /// The option was matched; it takes no value.
    None,
    /// An integer value.
    Integer(i64),
    /// A string value.
    String(String),
    /// A floating point value.
    Double(f64),
}
