use terminal_size::{terminal_size, Width};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Renders two column rows: a name column, and a description column wrapped to fit.
#[derive(Debug)]
pub(crate) struct ColumnRenderer {
    padding: usize,
    left: usize,
    // `None` means unbounded: descriptions are never wrapped.
    middle: Option<usize>,
}

// Leave a little slack, so the rows don't touch the terminal's edge.
const TARGET_TOTAL_FACTOR: f64 = 0.95;

// Room for about three average words.
pub(crate) const MINIMUM_MIDDLE_WIDTH: usize = 17;

pub(crate) fn terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(width), _)| width as usize)
}

impl ColumnRenderer {
    /// Fit the description column to the total width, when it is known.
    pub(crate) fn fitted(
        padding: usize,
        left: usize,
        natural_middle: usize,
        total_width: Option<usize>,
    ) -> Self {
        let total_width = match total_width {
            Some(total_width) => total_width,
            None => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("No total width; description column unbounded.");
                }

                return Self::new(padding, left, None);
            }
        };

        let non_middle = left + padding;
        let target_total_width = (total_width as f64 * TARGET_TOTAL_FACTOR) as usize;

        let middle = if natural_middle + non_middle <= target_total_width {
            natural_middle
        } else {
            std::cmp::max(
                target_total_width.saturating_sub(non_middle),
                MINIMUM_MIDDLE_WIDTH,
            )
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Columns {non_middle} within total {total_width}: selecting middle {middle}.");
        }

        Self::new(padding, left, Some(std::cmp::max(middle, 2)))
    }

    pub(crate) fn new(padding: usize, left: usize, middle: Option<usize>) -> Self {
        Self {
            padding,
            left,
            middle,
        }
    }

    pub(crate) fn render(&self, indent: usize, left: &str, middle: &str) -> Vec<String> {
        let left_width = self.left;
        let padding = self.padding;
        let parts = match self.middle {
            Some(width) => chunk(middle, width),
            None if middle.is_empty() => Vec::default(),
            None => vec![middle.to_string()],
        };

        if parts.is_empty() {
            return vec![format!("{:indent$}{left}", "")];
        }

        parts
            .iter()
            .enumerate()
            .map(|(i, part)| {
                let name = if i == 0 { left } else { "" };
                format!("{:indent$}{name:left_width$}{:padding$}{part}", "", "")
            })
            .collect()
    }
}

fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split(' ').filter(|word| !word.is_empty()) {
        let current_length = current.chars().count();

        if current.is_empty() {
            hyphenate(width, &mut lines, &mut current, word);
        } else if current_length + word.chars().count() + 1 <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            hyphenate(width, &mut lines, &mut current, word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

// Break a word longer than the width into hyphenated pieces; the final piece stays in `current`.
fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let chars: Vec<char> = word.chars().collect();
    let increment = width - 1;
    let mut start = 0;

    while chars.len() - start > width {
        let piece: String = chars[start..start + increment].iter().collect();
        lines.push(format!("{piece}-"));
        start += increment;
    }

    current.extend(&chars[start..]);
}
