use crate::constant::ARGUMENT_LABEL;
use crate::token::Key;
use crate::usage::UsageEntry;

/// One query made against [`Args`](./struct.Args.html), in the order it was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// A flag lookup, and whether the flag was present.
    Flag {
        /// The flag identity.
        key: Key,
        /// Whether the flag was found.
        present: bool,
    },

    /// A parameter lookup.
    Parameter {
        /// The parameter identity.
        key: Key,
        /// The label of the requested value type (ex: `Integer`).
        label: String,
        /// The first raw value found for this parameter, if any.
        value: Option<String>,
    },

    /// A positional lookup.
    Argument {
        /// The default supplied with the lookup.
        default: Option<String>,
    },
}

impl Query {
    pub(crate) fn usage_entry(&self) -> UsageEntry {
        match self {
            Query::Flag { key, .. } => UsageEntry::Flag(key.clone()),
            Query::Parameter { key, label, .. } => UsageEntry::Parameter {
                key: key.clone(),
                label: label.clone(),
            },
            Query::Argument { default } => UsageEntry::Positional {
                label: ARGUMENT_LABEL.to_string(),
                optional: default.is_some(),
            },
        }
    }
}

/// The query history: one record per flag or parameter identity, one per positional lookup.
#[derive(Debug, Default)]
pub(crate) struct History {
    queries: Vec<Query>,
}

impl History {
    /// The memoized answer for a flag overlapping this identity.
    /// When several recorded flags overlap, the flag counts as present if any of them was.
    pub(crate) fn flag_memo(&self, key: &Key) -> Option<bool> {
        self.queries
            .iter()
            .filter_map(|query| match query {
                Query::Flag { key: other, present } if other.overlaps(key) => Some(*present),
                _ => None,
            })
            .reduce(|a, b| a || b)
    }

    pub(crate) fn record_flag(&mut self, key: Key, present: bool) {
        let known = self
            .queries
            .iter()
            .any(|query| matches!(query, Query::Flag { key: other, .. } if other == &key));

        if !known {
            self.queries.push(Query::Flag { key, present });
        }
    }

    pub(crate) fn record_parameter(&mut self, key: Key, label: String, value: Option<String>) {
        let existing = self.queries.iter_mut().find_map(|query| match query {
            Query::Parameter {
                key: other,
                value: existing,
                ..
            } if other == &key => Some(existing),
            _ => None,
        });

        match existing {
            Some(existing) => {
                if existing.is_none() {
                    *existing = value;
                }
            }
            None => self.queries.push(Query::Parameter { key, label, value }),
        }
    }

    pub(crate) fn record_argument(&mut self, default: Option<String>) {
        self.queries.push(Query::Argument { default });
    }

    pub(crate) fn queries(&self) -> &[Query] {
        &self.queries
    }

    pub(crate) fn usage_entries(&self) -> Vec<UsageEntry> {
        self.queries.iter().map(Query::usage_entry).collect()
    }
}
