use std::collections::HashMap;
use std::env;

use crate::constant::{HELP_MESSAGE, HELP_NAME, HELP_SHORT};
use crate::error::{ArgsError, ExitOnError};
use crate::getopt::column::terminal_width;
use crate::getopt::option::CommandLineOption;
use crate::getopt::printer::Printer;
use crate::interface::{ConsoleInterface, UserInterface};
use crate::model::{OptionValue, ParameterType};
use crate::prelude::ErrorHandler;
use crate::token::{classify, TokenShape};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The declarative, getopt style command line parser.
///
/// Declare every option up front, then parse the command line in a single pass.
/// A `-h`/`--help` switch is added automatically, unless [`GetOpt::without_help`] is used.
///
/// ### Example
/// ```
/// # use nabarg_core as nabarg;
/// use nabarg::{CommandLineOption, GetOpt};
///
/// let mut separator = "|".to_string();
/// let mut numeric = false;
/// let mut file = String::default();
///
/// let parsed = GetOpt::new("sort")
///     .about("Sorts rows by a delimited field.")
///     .add(CommandLineOption::string(('s', "separator"), |value| separator = value))
///     .add(CommandLineOption::switch("numeric", || numeric = true))
///     .add(CommandLineOption::positional("file", |value| file = value))
///     .build_parser()
///     .unwrap()
///     .parse_tokens(&["--numeric", "-s", ",", "rows.csv", "extra.csv"])
///     .unwrap();
///
/// assert_eq!(separator, ",");
/// assert!(numeric);
/// assert_eq!(file, "rows.csv");
/// assert_eq!(parsed.additional(), &["extra.csv".to_string()]);
/// ```
pub struct GetOpt<'a> {
    program: String,
    about: Option<String>,
    options: Vec<CommandLineOption<'a>>,
    add_help: bool,
    error_handler: Box<dyn ErrorHandler>,
}

impl<'a> std::fmt::Debug for GetOpt<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GetOpt")
            .field("program", &self.program)
            .field("about", &self.about)
            .field("options", &self.options)
            .field("add_help", &self.add_help)
            .finish_non_exhaustive()
    }
}

impl<'a> GetOpt<'a> {
    /// Start declaring the options of `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            about: None,
            options: Vec::default(),
            add_help: true,
            error_handler: Box::new(ExitOnError),
        }
    }

    /// Describe the program at the top of the usage text.
    pub fn about(mut self, description: impl Into<String>) -> Self {
        self.about.replace(description.into());
        self
    }

    /// Declare an option.
    pub fn add(mut self, option: CommandLineOption<'a>) -> Self {
        self.options.push(option);
        self
    }

    /// Do not add the automatic `-h`/`--help` switch.
    pub fn without_help(mut self) -> Self {
        self.add_help = false;
        self
    }

    /// Replace the error channel (default: [`ExitOnError`]).
    pub fn with_error_handler(mut self, error_handler: impl ErrorHandler + 'static) -> Self {
        self.error_handler = Box::new(error_handler);
        self
    }

    /// Build the parser.
    /// This finalizes the declarations and checks them for errors (ex: two options sharing a name).
    pub fn build_parser(self) -> Result<SchemaParser<'a>, ArgsError> {
        self.build_with(Box::new(ConsoleInterface::default()), terminal_width())
    }

    /// Build the parser.
    /// This finalizes the declarations and checks them for errors (ex: two options sharing a name).
    /// If an error is encountered, exits with error code `1` (via [`std::process::exit`]).
    pub fn build(self) -> SchemaParser<'a> {
        match self.build_parser() {
            Ok(parser) => parser,
            Err(error) => {
                eprintln!("{error}");
                std::process::exit(1);
            }
        }
    }

    pub(crate) fn build_with(
        self,
        user_interface: Box<dyn UserInterface>,
        terminal_width: Option<usize>,
    ) -> Result<SchemaParser<'a>, ArgsError> {
        let GetOpt {
            program,
            about,
            mut options,
            add_help,
            error_handler,
        } = self;

        let help = if add_help {
            options.push(
                CommandLineOption::switch((HELP_SHORT, HELP_NAME), || {}).help(HELP_MESSAGE),
            );
            Some(options.len() - 1)
        } else {
            None
        };

        let mut shorts = HashMap::default();
        let mut longs = HashMap::default();
        let mut unnamed = Vec::default();

        for (index, option) in options.iter().enumerate() {
            match option.key() {
                Some(key) => {
                    if let Some(short) = key.short() {
                        if shorts.insert(short, index).is_some() {
                            return Err(ArgsError::DuplicateDeclaration(format!("-{short}")));
                        }
                    }

                    if let Some(long) = key.long() {
                        if longs.insert(long.to_string(), index).is_some() {
                            return Err(ArgsError::DuplicateDeclaration(format!("--{long}")));
                        }
                    }
                }
                None => unnamed.push(index),
            }
        }

        let printer = Printer::new(&program, about.as_deref(), &options, terminal_width);

        Ok(SchemaParser {
            program,
            options,
            shorts,
            longs,
            unnamed,
            help,
            printer,
            error_handler,
            user_interface,
        })
    }
}

/// The configured declarative parser.
/// Built via [`GetOpt::build`] or [`GetOpt::build_parser`].
pub struct SchemaParser<'a> {
    program: String,
    options: Vec<CommandLineOption<'a>>,
    shorts: HashMap<char, usize>,
    longs: HashMap<String, usize>,
    unnamed: Vec<usize>,
    help: Option<usize>,
    printer: Printer,
    error_handler: Box<dyn ErrorHandler>,
    user_interface: Box<dyn UserInterface>,
}

impl<'a> std::fmt::Debug for SchemaParser<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaParser")
            .field("program", &self.program)
            .field("options", &self.options)
            .field("help", &self.help)
            .finish_non_exhaustive()
    }
}

/// The outcome of a successful parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parsed {
    additional: Vec<String>,
    consumed: usize,
}

impl Parsed {
    /// The positional tokens left over once every unnamed option was bound, in command line order.
    pub fn additional(&self) -> &[String] {
        &self.additional
    }

    /// How many input tokens were parsed, option values and the `--` separator included.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Take the leftover positional tokens.
    pub fn into_additional(self) -> Vec<String> {
        self.additional
    }
}

enum Matched {
    Complete {
        dispatches: Vec<(usize, OptionValue)>,
        additional: Vec<String>,
        consumed: usize,
    },
    Help,
}

impl<'a> SchemaParser<'a> {
    /// Run the parser against the input tokens.
    ///
    /// Parsing happens in two phases:
    /// 1. Every token is matched to a declared option, and every value is converted.
    /// 2. The callbacks run, in command line order.
    ///
    /// If the first phase fails, no callback runs: the error goes through the error channel and is returned.
    /// If the help switch is encountered, the usage text is printed and [`ArgsError::WantsHelp`] goes through the error channel instead.
    pub fn parse_tokens(self, tokens: &[&str]) -> Result<Parsed, ArgsError> {
        match self.match_tokens(tokens) {
            Ok(Matched::Complete {
                dispatches,
                additional,
                consumed,
            }) => {
                let mut options = self.options;

                for (index, value) in dispatches {
                    options[index].invoke(value);
                }

                Ok(Parsed {
                    additional,
                    consumed,
                })
            }
            Ok(Matched::Help) => {
                self.printer.print(self.user_interface.as_ref());
                Err(self.fail(ArgsError::WantsHelp))
            }
            Err(error) => Err(self.fail(error)),
        }
    }

    /// Run the parser against the process arguments.
    ///
    /// On error, exits with [`ArgsError::exit_code`] (via [`std::process::exit`]) once the error channel returns.
    pub fn parse(self) -> Parsed {
        let tokens: Vec<String> = env::args().skip(1).collect();
        let tokens: Vec<&str> = tokens.iter().map(String::as_str).collect();

        match self.parse_tokens(&tokens) {
            Ok(parsed) => parsed,
            Err(error) => std::process::exit(error.exit_code()),
        }
    }

    /// The usage text.
    pub fn usage(&self) -> String {
        self.printer.render().join("\n")
    }

    /// Print the usage text to stdout.
    pub fn print_usage(&self) {
        self.printer.print(self.user_interface.as_ref());
    }

    fn fail(&self, error: ArgsError) -> ArgsError {
        self.error_handler.handle(&self.program, &error);
        error
    }

    fn match_tokens(&self, tokens: &[&str]) -> Result<Matched, ArgsError> {
        let mut dispatches = Vec::default();
        let mut additional = Vec::default();
        let mut unnamed = self.unnamed.iter();
        let mut only_positionals = false;
        let mut index = 0;

        while index < tokens.len() {
            let token = tokens[index];
            let shape = if only_positionals {
                TokenShape::Positional(token)
            } else {
                classify(token)
            };

            #[cfg(feature = "tracing_debug")]
            {
                debug!("Matching '{token}' as {shape:?}.");
            }

            match shape {
                TokenShape::Separator => only_positionals = true,
                TokenShape::Long { name, value } => {
                    let option = *self
                        .longs
                        .get(name)
                        .ok_or_else(|| ArgsError::UnknownOption(format!("--{name}")))?;

                    if self.help == Some(option) {
                        return Ok(Matched::Help);
                    }

                    let written = format!("--{name}");
                    let (value, consumed) =
                        self.value_for(option, &written, value, tokens.get(index + 1))?;
                    dispatches.push((option, value));
                    index += consumed;
                }
                TokenShape::Short { names, value } => {
                    let count = names.chars().count();
                    let mut consumed = 0;

                    for (position, short) in names.chars().enumerate() {
                        let written = format!("-{short}");
                        let option = *self
                            .shorts
                            .get(&short)
                            .ok_or_else(|| ArgsError::UnknownOption(written.clone()))?;

                        if self.help == Some(option) {
                            return Ok(Matched::Help);
                        }

                        // Only the final option of a combined token may take a value.
                        let last = position + 1 == count;

                        if !last && self.options[option].parameter_type() != ParameterType::None {
                            return Err(ArgsError::MissingValue { option: written });
                        }

                        let inline = if last { value } else { None };
                        let (value, extra) =
                            self.value_for(option, &written, inline, tokens.get(index + 1))?;
                        dispatches.push((option, value));
                        consumed += extra;
                    }

                    index += consumed;
                }
                TokenShape::Positional(token) => match unnamed.next() {
                    Some(option) => dispatches.push((*option, OptionValue::String(token.to_string()))),
                    None => additional.push(token.to_string()),
                },
            }

            index += 1;
        }

        for option in unnamed {
            let option = &self.options[*option];

            if !option.is_optional() {
                return Err(ArgsError::MissingRequiredPositional(option.label().to_string()));
            }
        }

        Ok(Matched::Complete {
            dispatches,
            additional,
            consumed: index,
        })
    }

    // The value of the option, and how many following tokens it consumes.
    fn value_for(
        &self,
        option: usize,
        written: &str,
        inline: Option<&str>,
        following: Option<&&str>,
    ) -> Result<(OptionValue, usize), ArgsError> {
        let parameter_type = self.options[option].parameter_type();

        if parameter_type == ParameterType::None {
            return Ok((OptionValue::None, 0));
        }

        let (raw, consumed) = match (inline, following) {
            (Some(raw), _) => (raw, 0),
            (None, Some(raw)) => (*raw, 1),
            (None, None) => {
                return Err(ArgsError::MissingValue {
                    option: written.to_string(),
                })
            }
        };

        let conversion = |type_name: ParameterType| ArgsError::Conversion {
            option: written.to_string(),
            token: raw.to_string(),
            type_name: type_name.to_string(),
        };

        let value = match parameter_type {
            ParameterType::Integer => OptionValue::Integer(
                raw.parse()
                    .map_err(|_| conversion(ParameterType::Integer))?,
            ),
            ParameterType::Double => OptionValue::Double(
                raw.parse()
                    .map_err(|_| conversion(ParameterType::Double))?,
            ),
            ParameterType::String => OptionValue::String(raw.to_string()),
            ParameterType::None => unreachable!("internal error - switches take no value"),
        };

        Ok((value, consumed))
    }
}
