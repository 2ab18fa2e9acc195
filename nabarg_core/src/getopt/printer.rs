use crate::getopt::column::ColumnRenderer;
use crate::getopt::option::CommandLineOption;
use crate::interface::UserInterface;
use crate::usage::synopsis;

const PADDING_WIDTH: usize = 3;
const MAIN_INDENT: usize = 1;

/// The usage text of a declared schema.
#[derive(Debug)]
pub(crate) struct Printer {
    about: Option<String>,
    synopsis: String,
    arguments: Vec<(String, String)>,
    options: Vec<(String, String)>,
    terminal_width: Option<usize>,
}

impl Printer {
    pub(crate) fn new(
        program: &str,
        about: Option<&str>,
        options: &[CommandLineOption<'_>],
        terminal_width: Option<usize>,
    ) -> Self {
        let (unnamed, named): (Vec<_>, Vec<_>) =
            options.iter().partition(|option| option.key().is_none());
        let row = |option: &&CommandLineOption<'_>| (option.row_name(), option.help_text().to_string());

        Self {
            about: about.map(str::to_string),
            synopsis: synopsis(
                program,
                options.iter().map(CommandLineOption::usage_entry).collect(),
            ),
            arguments: unnamed.iter().map(row).collect(),
            options: named.iter().map(row).collect(),
            terminal_width,
        }
    }

    pub(crate) fn render(&self) -> Vec<String> {
        let rows = self.arguments.iter().chain(self.options.iter());
        let left_column_width = rows
            .clone()
            .map(|(name, _)| name.chars().count())
            .max()
            .unwrap_or_default();
        let middle_column_width = rows
            .map(|(_, help)| help.chars().count())
            .max()
            .unwrap_or_default();
        let column_renderer = ColumnRenderer::fitted(
            PADDING_WIDTH,
            left_column_width,
            middle_column_width + MAIN_INDENT,
            self.terminal_width,
        );
        let mut lines = Vec::default();

        if let Some(about) = &self.about {
            lines.push(about.clone());
        }

        lines.push(format!("Usage: {}", self.synopsis));

        for (heading, rows) in [("Arguments:", &self.arguments), ("Options:", &self.options)] {
            if !rows.is_empty() {
                lines.push(String::default());
                lines.push(heading.to_string());

                for (name, help) in rows {
                    lines.extend(column_renderer.render(MAIN_INDENT, name, help));
                }
            }
        }

        lines
    }

    pub(crate) fn print(&self, user_interface: &(impl UserInterface + ?Sized)) {
        for line in self.render() {
            user_interface.print(line);
        }
    }
}
