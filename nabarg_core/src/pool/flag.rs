use crate::pool::Args;
use crate::token::Key;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

impl Args {
    /// Whether the flag is present on the command line.
    ///
    /// Matches `-s` and `--long` tokens exactly, as well as short flags packed together (ex: `-abc`).
    /// The answer is remembered: asking again for the same flag returns the same answer without consuming anything further.
    /// A flag found in a packed token is answered from there, leaving any separate `-s` tokens in place.
    /// ```
    /// # use nabarg_core as nabarg;
    /// use nabarg::Args;
    ///
    /// let args = Args::from_tokens("program", &["-xv", "--dry-run"]);
    ///
    /// assert!(args.flag(('v', "verbose")));
    /// assert!(args.flag("dry-run"));
    /// assert!(!args.flag('q'));
    /// ```
    pub fn flag(&self, key: impl Into<Key>) -> bool {
        let key = key.into();
        let memo = self.history.borrow().flag_memo(&key);

        if let Some(present) = memo {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Flag {key} remembered: {present}.");
            }

            return present;
        }

        let present = {
            let mut pool = self.pool.borrow_mut();

            if key.short().map_or(false, |short| pool.is_cached(short)) {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Flag {key} found in a combined token.");
                }

                true
            } else {
                let removed = pool.remove_flag(&key);

                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Flag {key} resolved: removed={removed}.");
                }

                removed > 0
            }
        };

        self.history.borrow_mut().record_flag(key, present);
        present
    }
}
