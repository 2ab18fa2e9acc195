use std::collections::{HashSet, VecDeque};

use crate::constant::SEPARATOR;
use crate::token::{is_combined_flags, Key};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The mutable pool of raw tokens queries consume from.
#[derive(Debug, Default)]
pub(crate) struct TokenPool {
    tokens: Vec<String>,
    // Everything after a literal `--`; only ever drained from the front, by positional lookups.
    pure: VecDeque<String>,
    // Every character of every combined short flag token (ex: `-abc`).
    flag_cache: HashSet<char>,
}

/// A positional lookup hit a flag-looking token directly followed by a plain token.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Ambiguity {
    pub(crate) flag: String,
    pub(crate) token: String,
}

impl TokenPool {
    pub(crate) fn new(tokens: Vec<String>) -> Self {
        let mut tokens = tokens;
        let mut pure = VecDeque::default();

        // 1. Split off the pure arguments.
        if let Some(index) = tokens.iter().position(|t| t == SEPARATOR) {
            pure.extend(tokens.drain(index..).skip(1));
        }

        // 2. Explode the combined short flags.
        let mut flag_cache = HashSet::default();

        while let Some(index) = tokens.iter().position(|t| is_combined_flags(t)) {
            let combined = tokens.remove(index);
            flag_cache.extend(combined.chars().skip(1));
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Token pool initialized: {} tokens, {} pure arguments, cached flags {:?}.",
                tokens.len(),
                pure.len(),
                flag_cache
            );
        }

        Self {
            tokens,
            pure,
            flag_cache,
        }
    }

    pub(crate) fn is_cached(&self, short: char) -> bool {
        self.flag_cache.contains(&short)
    }

    /// Remove every token that is exactly this flag, returning how many were removed.
    pub(crate) fn remove_flag(&mut self, key: &Key) -> usize {
        let before = self.tokens.len();
        self.tokens.retain(|token| !key.matches_flag(token));
        before - self.tokens.len()
    }

    /// Find the first token naming this parameter.
    /// Returns its index and, for the `=value` form, the inline value.
    pub(crate) fn find_parameter(&self, key: &Key) -> Option<(usize, Option<String>)> {
        self.tokens.iter().enumerate().find_map(|(index, token)| {
            key.match_parameter(token)
                .map(|inline| (index, inline.map(str::to_string)))
        })
    }

    pub(crate) fn get(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// Remove `count` tokens starting at `index`.
    pub(crate) fn remove(&mut self, index: usize, count: usize) {
        self.tokens.drain(index..index + count);
    }

    /// Take the next positional token: the first token neither flag-looking nor directly after a flag-looking token.
    /// Falls back to the pure arguments once the pool holds no candidate.
    pub(crate) fn take_argument(&mut self) -> Result<Option<String>, Ambiguity> {
        let mut previous_flag: Option<&String> = None;
        let mut candidate = None;

        for (index, token) in self.tokens.iter().enumerate() {
            if token.starts_with('-') {
                previous_flag.replace(token);
            } else if let Some(flag) = previous_flag {
                return Err(Ambiguity {
                    flag: flag.clone(),
                    token: token.clone(),
                });
            } else {
                candidate.replace(index);
                break;
            }
        }

        match candidate {
            Some(index) => Ok(Some(self.tokens.remove(index))),
            None => Ok(self.pure.pop_front()),
        }
    }

    #[cfg(test)]
    pub(crate) fn tokens(&self) -> Vec<&str> {
        self.tokens.iter().map(String::as_str).collect()
    }

    #[cfg(test)]
    pub(crate) fn pure(&self) -> Vec<&str> {
        self.pure.iter().map(String::as_str).collect()
    }
}
