use std::cell::OnceCell;

use crate::error::ArgsError;
use crate::pool::tokens::Ambiguity;
use crate::pool::Args;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// A positional argument whose token is only chosen once it is forced.
///
/// Issuing flag and parameter queries before forcing lets those queries claim their tokens first.
/// Once forced successfully, the value is kept: forcing again returns the same value.
/// A failed force keeps nothing, so it may be forced again later.
pub struct Deferred<'a> {
    args: &'a Args,
    default: Option<String>,
    value: OnceCell<String>,
}

impl<'a> std::fmt::Debug for Deferred<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deferred")
            .field("default", &self.default)
            .field("value", &self.value.get())
            .finish()
    }
}

impl<'a> Deferred<'a> {
    /// Resolve the argument (on first use) and return it.
    ///
    /// Takes the first pool token which neither looks like a flag nor directly follows one, then falls back to the tokens after `--`, then to the default.
    /// Fails with [`ArgsError::AmbiguousOrder`] when a flag-looking token is directly followed by a plain token, since that token might be the flag's value.
    /// Fails with [`ArgsError::MissingArgument`] when nothing is left and there is no default.
    pub fn force(&self) -> Result<&str, ArgsError> {
        if let Some(value) = self.value.get() {
            return Ok(value.as_str());
        }

        let value = self.args.resolve_argument(self.default.as_deref())?;
        Ok(self.value.get_or_init(|| value).as_str())
    }

    /// Whether the argument has been resolved already.
    pub fn is_resolved(&self) -> bool {
        self.value.get().is_some()
    }

    /// Resolve the argument (if not already) and take ownership of it.
    pub fn into_string(self) -> Result<String, ArgsError> {
        self.force()?;

        match self.value.into_inner() {
            Some(value) => Ok(value),
            None => unreachable!("internal error - forced argument holds no value"),
        }
    }
}

impl Args {
    /// The next positional argument, resolved lazily.
    ///
    /// Nothing is consumed until the returned handle is forced.
    /// ```
    /// # use nabarg_core as nabarg;
    /// use nabarg::Args;
    ///
    /// let args = Args::from_tokens("program", &["-a", "maybe parameter", "argument"]);
    ///
    /// let first = args.next_argument();
    /// assert!(args.flag('a'));
    /// assert_eq!(first.force().unwrap(), "maybe parameter");
    /// ```
    pub fn next_argument(&self) -> Deferred<'_> {
        self.deferred(None)
    }

    /// The next positional argument, resolved lazily, falling back to `default` when none remain.
    pub fn next_argument_or(&self, default: impl Into<String>) -> Deferred<'_> {
        self.deferred(Some(default.into()))
    }

    fn deferred(&self, default: Option<String>) -> Deferred<'_> {
        self.history.borrow_mut().record_argument(default.clone());

        Deferred {
            args: self,
            default,
            value: OnceCell::new(),
        }
    }

    fn resolve_argument(&self, default: Option<&str>) -> Result<String, ArgsError> {
        let taken = self.pool.borrow_mut().take_argument();

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Argument resolved: {taken:?}, default {default:?}.");
        }

        match taken {
            Ok(Some(token)) => Ok(token),
            Ok(None) => match default {
                Some(default) => Ok(default.to_string()),
                None => Err(self.fail(ArgsError::MissingArgument)),
            },
            Err(Ambiguity { flag, token }) => Err(self.fail(ArgsError::AmbiguousOrder { flag, token })),
        }
    }
}
