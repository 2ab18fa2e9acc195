use crate::model::{OptionValue, ParameterType};
use crate::token::Key;
use crate::usage::UsageEntry;

/// An option declared up front for the [`GetOpt`](./struct.GetOpt.html) parser.
///
/// A named option has a short name, a long name, or both.
/// An unnamed option (see [`CommandLineOption::positional`]) binds to a positional token, in declaration order.
///
/// The callback runs once per occurrence, after the whole command line has been matched successfully.
pub struct CommandLineOption<'a> {
    key: Option<Key>,
    label: String,
    help: Option<String>,
    parameter_type: ParameterType,
    optional: bool,
    callback: Box<dyn FnMut(OptionValue) + 'a>,
}

impl<'a> std::fmt::Debug for CommandLineOption<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandLineOption")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("help", &self.help)
            .field("parameter_type", &self.parameter_type)
            .field("optional", &self.optional)
            .finish_non_exhaustive()
    }
}

impl<'a> CommandLineOption<'a> {
    /// A named option receiving its value untyped, as an [`OptionValue`] matching `parameter_type`.
    pub fn new(
        key: impl Into<Key>,
        parameter_type: ParameterType,
        callback: impl FnMut(OptionValue) + 'a,
    ) -> Self {
        Self {
            key: Some(key.into()),
            label: parameter_type.to_string(),
            help: None,
            parameter_type,
            optional: true,
            callback: Box::new(callback),
        }
    }

    /// A named option taking no value.
    ///
    /// ### Example
    /// ```
    /// # use nabarg_core as nabarg;
    /// use nabarg::{CommandLineOption, GetOpt};
    ///
    /// let mut verbose = false;
    /// GetOpt::new("program")
    ///     .add(CommandLineOption::switch(('v', "verbose"), || verbose = true))
    ///     .build_parser()
    ///     .unwrap()
    ///     .parse_tokens(&["--verbose"])
    ///     .unwrap();
    ///
    /// assert!(verbose);
    /// ```
    pub fn switch(key: impl Into<Key>, mut callback: impl FnMut() + 'a) -> Self {
        Self::new(key, ParameterType::None, move |_| callback())
    }

    /// A named option taking a string value.
    pub fn string(key: impl Into<Key>, mut callback: impl FnMut(String) + 'a) -> Self {
        Self::new(key, ParameterType::String, move |value| match value {
            OptionValue::String(value) => callback(value),
            _ => unreachable!("internal error - string option given {value:?}"),
        })
    }

    /// A named option taking an integer value.
    ///
    /// ### Example
    /// ```
    /// # use nabarg_core as nabarg;
    /// use nabarg::{CommandLineOption, GetOpt};
    ///
    /// let mut field = 0;
    /// GetOpt::new("program")
    ///     .add(CommandLineOption::integer(('f', "field"), |value| field = value))
    ///     .build_parser()
    ///     .unwrap()
    ///     .parse_tokens(&["-f", "3"])
    ///     .unwrap();
    ///
    /// assert_eq!(field, 3);
    /// ```
    pub fn integer(key: impl Into<Key>, mut callback: impl FnMut(i64) + 'a) -> Self {
        Self::new(key, ParameterType::Integer, move |value| match value {
            OptionValue::Integer(value) => callback(value),
            _ => unreachable!("internal error - integer option given {value:?}"),
        })
    }

    /// A named option taking a floating point value.
    pub fn double(key: impl Into<Key>, mut callback: impl FnMut(f64) + 'a) -> Self {
        Self::new(key, ParameterType::Double, move |value| match value {
            OptionValue::Double(value) => callback(value),
            _ => unreachable!("internal error - double option given {value:?}"),
        })
    }

    /// An unnamed option, bound to the next positional token.
    /// Required unless made [`CommandLineOption::optional`].
    pub fn positional(label: impl Into<String>, mut callback: impl FnMut(String) + 'a) -> Self {
        Self {
            key: None,
            label: label.into(),
            help: None,
            parameter_type: ParameterType::String,
            optional: false,
            callback: Box::new(move |value| match value {
                OptionValue::String(value) => callback(value),
                _ => unreachable!("internal error - positional given {value:?}"),
            }),
        }
    }

    /// Document the option in the usage text.
    pub fn help(mut self, description: impl Into<String>) -> Self {
        self.help.replace(description.into());
        self
    }

    /// Allow an unnamed option to be left out.
    /// Named options are always optional.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub(crate) fn key(&self) -> Option<&Key> {
        self.key.as_ref()
    }

    pub(crate) fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn help_text(&self) -> &str {
        self.help.as_deref().unwrap_or_default()
    }

    pub(crate) fn parameter_type(&self) -> ParameterType {
        self.parameter_type
    }

    pub(crate) fn is_optional(&self) -> bool {
        self.optional
    }

    pub(crate) fn invoke(&mut self, value: OptionValue) {
        (self.callback)(value)
    }

    pub(crate) fn usage_entry(&self) -> UsageEntry {
        match (&self.key, self.parameter_type) {
            (Some(key), ParameterType::None) => UsageEntry::Flag(key.clone()),
            (Some(key), _) => UsageEntry::Parameter {
                key: key.clone(),
                label: self.label.clone(),
            },
            (None, _) => UsageEntry::Positional {
                label: self.label.clone(),
                optional: self.optional,
            },
        }
    }

    /// The name column of this option's usage row, such as `-f, --field <Integer>`.
    pub(crate) fn row_name(&self) -> String {
        match &self.key {
            None if self.optional => format!("[{}]", self.label),
            None => format!("<{}>", self.label),
            Some(key) => {
                let names = match key.short() {
                    Some(_) => key.to_string(),
                    // Align long-only names with those behind a short name.
                    None => format!("    {key}"),
                };

                match self.parameter_type {
                    ParameterType::None => names,
                    _ => format!("{names} <{}>", self.label),
                }
            }
        }
    }
}
