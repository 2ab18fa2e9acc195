use crate::token::Key;

/// One item of a usage synopsis line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum UsageEntry {
    Flag(Key),
    Parameter { key: Key, label: String },
    Positional { label: String, optional: bool },
}

impl UsageEntry {
    // Short flags, long-only flags, short parameters, long-only parameters, positionals.
    fn group(&self) -> u8 {
        match self {
            UsageEntry::Flag(key) if key.short().is_some() => 0,
            UsageEntry::Flag(_) => 1,
            UsageEntry::Parameter { key, .. } if key.short().is_some() => 2,
            UsageEntry::Parameter { .. } => 3,
            UsageEntry::Positional { .. } => 4,
        }
    }
}

/// Render the one line synopsis, such as `program -vx --dry-run -p <Integer> <argument>`.
///
/// Entries are grouped by kind; within a group the given order is kept.
pub(crate) fn synopsis(program: &str, mut entries: Vec<UsageEntry>) -> String {
    // A stable sort, so each group keeps the order the entries arrived in.
    entries.sort_by_key(UsageEntry::group);
    let mut line = program.to_string();
    let shorts: String = entries
        .iter()
        .filter_map(|entry| match entry {
            UsageEntry::Flag(key) => key.short(),
            _ => None,
        })
        .collect();

    if !shorts.is_empty() {
        line.push_str(" -");
        line.push_str(&shorts);
    }

    for entry in &entries {
        match entry {
            UsageEntry::Flag(key) => {
                if key.short().is_none() {
                    line.push_str(&format!(" {key}"));
                }
            }
            UsageEntry::Parameter { key, label } => match (key.short(), key.long()) {
                (Some(s), _) => line.push_str(&format!(" -{s} <{label}>")),
                (None, Some(l)) => line.push_str(&format!(" --{l} <{label}>")),
                (None, None) => unreachable!("internal error - a key always carries a name"),
            },
            UsageEntry::Positional { label, optional } => {
                if *optional {
                    line.push_str(&format!(" [{label}]"));
                } else {
                    line.push_str(&format!(" <{label}>"));
                }
            }
        }
    }

    line
}
