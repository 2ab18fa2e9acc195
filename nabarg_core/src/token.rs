use crate::constant::SEPARATOR;

/// The syntactic shape of a single command line token.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum TokenShape<'t> {
    /// The literal `--`.
    Separator,
    /// `--name` or `--name=value`.
    Long {
        name: &'t str,
        value: Option<&'t str>,
    },
    /// `-n`, `-abc`, or either followed by `=value`.
    Short {
        names: &'t str,
        value: Option<&'t str>,
    },
    /// Anything else, including a lone `-`.
    Positional(&'t str),
}

pub(crate) fn classify(token: &str) -> TokenShape<'_> {
    // 1. The separator, exactly:
    //  --
    // 2. Find a 'long' flag, such as:
    //  --initial
    //  --initial=..
    // 3. Find 'short' flag(s), such as (both -i and -v are example short flags):
    //  -i
    //  -i=..
    //  -iv
    //  -iv=..
    // 4. Everything else is positional.
    if token == SEPARATOR {
        TokenShape::Separator
    } else if let Some(rest) = token.strip_prefix("--") {
        let (name, value) = split_equals_delimiter(rest);
        TokenShape::Long { name, value }
    } else if let Some(rest) = token.strip_prefix('-') {
        if rest.is_empty() {
            TokenShape::Positional(token)
        } else {
            let (names, value) = split_equals_delimiter(rest);
            TokenShape::Short { names, value }
        }
    } else {
        TokenShape::Positional(token)
    }
}

/// Whether the token packs several short flags together, such as `-abc`.
///
/// A short parameter with an inline value (`-p=value`) does not count.
pub(crate) fn is_combined_flags(token: &str) -> bool {
    let mut chars = token.chars();

    match (chars.next(), chars.next(), chars.next()) {
        (Some('-'), Some(second), Some(third)) => second != '-' && third != '=',
        _ => false,
    }
}

fn split_equals_delimiter(token: &str) -> (&str, Option<&str>) {
    match token.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (token, None),
    }
}

fn is_single(names: &str, short: char) -> bool {
    let mut chars = names.chars();
    chars.next() == Some(short) && chars.next().is_none()
}

/// The identity of a flag or parameter: a short name, a long name, or both.
///
/// Build one from a `char`, a string, or a `(char, &str)` pair.
/// ```
/// # use nabarg_core as nabarg;
/// use nabarg::Key;
///
/// assert_eq!(Key::from('v').to_string(), "-v");
/// assert_eq!(Key::from("verbose").to_string(), "--verbose");
/// assert_eq!(Key::from(('v', "verbose")).to_string(), "-v, --verbose");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    short: Option<char>,
    long: Option<String>,
}

impl Key {
    /// The short name, if any.
    pub fn short(&self) -> Option<char> {
        self.short
    }

    /// The long name, if any.
    pub fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    /// Whether both keys name the same option through either name.
    pub(crate) fn overlaps(&self, other: &Key) -> bool {
        (self.short.is_some() && self.short == other.short)
            || (self.long.is_some() && self.long == other.long)
    }

    /// Whether the token is exactly this flag: `-s` or `--long`.
    pub(crate) fn matches_flag(&self, token: &str) -> bool {
        match classify(token) {
            TokenShape::Long { name, value: None } => self.long.as_deref() == Some(name),
            TokenShape::Short { names, value: None } => {
                self.short.map_or(false, |s| is_single(names, s))
            }
            _ => false,
        }
    }

    /// Match the token as this parameter.
    /// Returns `Some(None)` for the bare form (value in the following token), and `Some(Some(value))` for the `=value` form.
    pub(crate) fn match_parameter<'t>(&self, token: &'t str) -> Option<Option<&'t str>> {
        match classify(token) {
            TokenShape::Long { name, value } if self.long.as_deref() == Some(name) => Some(value),
            TokenShape::Short { names, value } if self.short.map_or(false, |s| is_single(names, s)) => {
                Some(value)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.short, &self.long) {
            (Some(s), Some(l)) => write!(f, "-{s}, --{l}"),
            (Some(s), None) => write!(f, "-{s}"),
            (None, Some(l)) => write!(f, "--{l}"),
            (None, None) => unreachable!("internal error - a key always carries a name"),
        }
    }
}

impl From<char> for Key {
    fn from(short: char) -> Self {
        Self {
            short: Some(short),
            long: None,
        }
    }
}

impl From<&str> for Key {
    fn from(long: &str) -> Self {
        Self {
            short: None,
            long: Some(long.to_string()),
        }
    }
}

impl From<String> for Key {
    fn from(long: String) -> Self {
        Self {
            short: None,
            long: Some(long),
        }
    }
}

impl From<(char, &str)> for Key {
    fn from((short, long): (char, &str)) -> Self {
        Self {
            short: Some(short),
            long: Some(long.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("--", TokenShape::Separator)]
    #[case("--flag", TokenShape::Long { name: "flag", value: None })]
    #[case("--flag=1", TokenShape::Long { name: "flag", value: Some("1") })]
    #[case("--flag=1=2", TokenShape::Long { name: "flag", value: Some("1=2") })]
    #[case("--flag=", TokenShape::Long { name: "flag", value: Some("") })]
    #[case("-f", TokenShape::Short { names: "f", value: None })]
    #[case("-abc", TokenShape::Short { names: "abc", value: None })]
    #[case("-abc=1", TokenShape::Short { names: "abc", value: Some("1") })]
    #[case("-", TokenShape::Positional("-"))]
    #[case("file.txt", TokenShape::Positional("file.txt"))]
    #[case("a-b", TokenShape::Positional("a-b"))]
    fn classify_shapes(#[case] token: &str, #[case] expected: TokenShape) {
        assert_eq!(classify(token), expected);
    }

    #[rstest]
    #[case("-abc", true)]
    #[case("-ab", true)]
    #[case("-wsd", true)]
    #[case("-a", false)]
    #[case("-", false)]
    #[case("--ab", false)]
    #[case("--", false)]
    #[case("-p=1", false)]
    #[case("-p=", false)]
    #[case("abc", false)]
    fn combined_flags(#[case] token: &str, #[case] expected: bool) {
        assert_eq!(is_combined_flags(token), expected);
    }

    #[rstest]
    #[case(Key::from('f'), "-f", true)]
    #[case(Key::from('f'), "-ff", false)]
    #[case(Key::from('f'), "--f", false)]
    #[case(Key::from('f'), "-f=1", false)]
    #[case(Key::from("flag"), "--flag", true)]
    #[case(Key::from("flag"), "-flag", false)]
    #[case(Key::from("flag"), "--flag=1", false)]
    #[case(Key::from(('f', "flag")), "-f", true)]
    #[case(Key::from(('f', "flag")), "--flag", true)]
    #[case(Key::from(('f', "flag")), "flag", false)]
    fn matches_flag(#[case] key: Key, #[case] token: &str, #[case] expected: bool) {
        assert_eq!(key.matches_flag(token), expected);
    }

    #[rstest]
    #[case(Key::from('p'), "-p", Some(None))]
    #[case(Key::from('p'), "-p=1", Some(Some("1")))]
    #[case(Key::from('p'), "-pq", None)]
    #[case(Key::from('p'), "--p", None)]
    #[case(Key::from("param"), "--param", Some(None))]
    #[case(Key::from("param"), "--param=a=b", Some(Some("a=b")))]
    #[case(Key::from("param"), "--parameter", None)]
    #[case(Key::from(('p', "param")), "--param=x", Some(Some("x")))]
    #[case(Key::from(('p', "param")), "value", None)]
    fn match_parameter(
        #[case] key: Key,
        #[case] token: &str,
        #[case] expected: Option<Option<&str>>,
    ) {
        assert_eq!(key.match_parameter(token), expected);
    }

    #[test]
    fn overlaps() {
        let both = Key::from(('v', "verbose"));
        assert!(both.overlaps(&Key::from('v')));
        assert!(both.overlaps(&Key::from("verbose")));
        assert!(!both.overlaps(&Key::from('x')));
        assert!(!Key::from('v').overlaps(&Key::from("verbose")));
    }
}
