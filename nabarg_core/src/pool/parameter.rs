use crate::convert::ConvertError;
use crate::error::ArgsError;
use crate::pool::Args;
use crate::token::Key;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

impl Args {
    /// The value of the next occurrence of this parameter, converted to `T`.
    ///
    /// Accepts `-p value`, `-p=value`, `--param value` and `--param=value`.
    /// When both names are given, whichever occurs first on the command line wins.
    /// The matched tokens are consumed, so a second call returns the next occurrence.
    /// Returns `Ok(None)` when the parameter is absent; nothing is consumed in that case.
    ///
    /// Fails when the parameter has no value, when the value does not convert, or when `T` has no registered converter.
    /// A failure leaves the command line untouched.
    /// ```
    /// # use nabarg_core as nabarg;
    /// use nabarg::Args;
    ///
    /// let args = Args::from_tokens("program", &["-n", "5", "--name=Tom", "-n", "8"]);
    ///
    /// assert_eq!(args.get::<u32>('n').unwrap(), Some(5));
    /// assert_eq!(args.get::<String>(('x', "name")).unwrap(), Some("Tom".to_string()));
    /// assert_eq!(args.get::<u32>('n').unwrap(), Some(8));
    /// assert_eq!(args.get::<u32>('n').unwrap(), None);
    /// ```
    pub fn get<T: 'static>(&self, key: impl Into<Key>) -> Result<Option<T>, ArgsError> {
        let key = key.into();
        let outcome = self.take_parameter::<T>(&key);
        let raw = match &outcome {
            Ok(Some((raw, _))) => Some(raw.clone()),
            _ => None,
        };
        self.history
            .borrow_mut()
            .record_parameter(key, self.converters.label::<T>(), raw);

        match outcome {
            Ok(found) => Ok(found.map(|(_, value)| value)),
            Err(error) => Err(self.fail(error)),
        }
    }

    /// Like [`Args::get`], falling back to `default` when the parameter is absent.
    pub fn get_or<T: 'static>(&self, key: impl Into<Key>, default: T) -> Result<T, ArgsError> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    /// Every remaining occurrence of this parameter, in command line order.
    ///
    /// Repeats [`Args::get`] until the first lookup which finds nothing.
    pub fn get_all<T: 'static>(&self, key: impl Into<Key>) -> Result<Vec<T>, ArgsError> {
        let key = key.into();
        let mut values = Vec::default();

        while let Some(value) = self.get(key.clone())? {
            values.push(value);
        }

        Ok(values)
    }

    // Find, convert, and only then consume.
    fn take_parameter<T: 'static>(&self, key: &Key) -> Result<Option<(String, T)>, ArgsError> {
        let mut pool = self.pool.borrow_mut();
        let (index, inline) = match pool.find_parameter(key) {
            Some(found) => found,
            None => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Parameter {key} absent.");
                }

                return Ok(None);
            }
        };

        let (raw, count) = match inline {
            Some(raw) => (raw, 1),
            None => match pool.get(index + 1) {
                Some(raw) => (raw.to_string(), 2),
                None => {
                    let option = pool.get(index).unwrap_or_default().to_string();
                    return Err(ArgsError::MissingValue { option });
                }
            },
        };

        let value = self
            .converters
            .convert::<T>(&raw)
            .map_err(|error| match error {
                ConvertError::Invalid { token, label } => ArgsError::Conversion {
                    option: key.to_string(),
                    token,
                    type_name: label,
                },
                ConvertError::Unsupported(type_name) => ArgsError::UnsupportedType {
                    option: key.to_string(),
                    type_name,
                },
            })?;

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Parameter {key} resolved: '{raw}' consuming {count} tokens from index {index}.");
        }

        pool.remove(index, count);
        Ok(Some((raw, value)))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ArgsError;
    use crate::pool::tests::args;
    use crate::pool::Query;
    use crate::token::Key;
    use rstest::rstest;

    #[rstest]
    #[case(vec!["-p", "1500"], Some(1500))]
    #[case(vec!["Hello", "-p", "1500"], Some(1500))]
    #[case(vec!["-p=1500"], Some(1500))]
    #[case(vec!["--param", "-7"], Some(-7))]
    #[case(vec!["--param=-7"], Some(-7))]
    #[case(vec!["Hello"], None)]
    #[case(vec!["-px", "1"], None)]
    #[case(vec!["--", "-p", "1"], None)]
    fn get(#[case] tokens: Vec<&str>, #[case] expected: Option<i64>) {
        let args = args(&tokens);
        assert_eq!(args.get::<i64>(('p', "param")).unwrap(), expected);
    }

    #[test]
    fn get_consumes() {
        // Setup
        let args = args(&["a", "-p", "1", "b", "--param=2", "c"]);

        // Execute
        let first: Option<u8> = args.get(('p', "param")).unwrap();
        let second: Option<u8> = args.get(('p', "param")).unwrap();

        // Verify
        assert_eq!(first, Some(1));
        assert_eq!(second, Some(2));
        assert_eq!(args.pool.borrow().tokens(), vec!["a", "b", "c"]);
    }

    #[test]
    fn get_earliest_name_wins() {
        let args = args(&["--param", "long", "-p", "short"]);

        assert_eq!(
            args.get::<String>(('p', "param")).unwrap(),
            Some("long".to_string())
        );
        assert_eq!(
            args.get::<String>(('p', "param")).unwrap(),
            Some("short".to_string())
        );
    }

    #[test]
    fn get_absent_untouched() {
        let args = args(&["a", "-q", "b"]);

        assert_eq!(args.get::<String>('p').unwrap(), None);
        assert_eq!(args.pool.borrow().tokens(), vec!["a", "-q", "b"]);
    }

    #[rstest]
    #[case(vec!["-p"], "-p")]
    #[case(vec!["x", "--param"], "--param")]
    fn get_missing_value(#[case] tokens: Vec<&str>, #[case] option: &str) {
        // Setup
        let args = args(&tokens);

        // Execute
        let result = args.get::<String>(('p', "param"));

        // Verify
        assert_matches!(result, Err(ArgsError::MissingValue { option: o }) if o == option);
        assert_eq!(args.pool.borrow().tokens(), tokens);
    }

    #[rstest]
    #[case(vec!["-p", "abc"], "abc")]
    #[case(vec!["-p=1.5"], "1.5")]
    #[case(vec!["-p", ""], "")]
    fn get_conversion(#[case] tokens: Vec<&str>, #[case] token: &str) {
        // Setup
        let args = args(&tokens);

        // Execute
        let result = args.get::<i32>('p');

        // Verify
        assert_eq!(
            result,
            Err(ArgsError::Conversion {
                option: "-p".to_string(),
                token: token.to_string(),
                type_name: "Integer".to_string(),
            })
        );
        assert_eq!(args.pool.borrow().tokens(), tokens);
    }

    #[test]
    fn get_unsupported() {
        #[derive(Debug)]
        struct Unknown;
        let args = args(&["--thing", "x"]);

        assert_matches!(
            args.get::<Unknown>("thing"),
            Err(ArgsError::UnsupportedType { option, type_name }) if option == "--thing" && type_name == "Unknown"
        );
        assert_matches!(args.get::<Unknown>("other"), Ok(None));
    }

    #[rstest]
    #[case(vec![], 5)]
    #[case(vec!["-p", "9"], 9)]
    fn get_or(#[case] tokens: Vec<&str>, #[case] expected: i64) {
        let args = args(&tokens);
        assert_eq!(args.get_or('p', 5).unwrap(), expected);
    }

    #[test]
    fn get_or_error() {
        let args = args(&["-p", "nine"]);
        assert_matches!(args.get_or('p', 5), Err(ArgsError::Conversion { .. }));
    }

    #[rstest]
    #[case(vec![], vec![])]
    #[case(vec!["-i", "a"], vec!["a"])]
    #[case(vec!["-i", "a", "x", "--include=b", "-i", "c"], vec!["a", "b", "c"])]
    #[case(vec!["-i", "a", "--", "-i", "b"], vec!["a"])]
    fn get_all(#[case] tokens: Vec<&str>, #[case] expected: Vec<&str>) {
        let args = args(&tokens);
        let values: Vec<String> = args.get_all(('i', "include")).unwrap();
        assert_eq!(values, expected);
    }

    #[test]
    fn get_all_matches_repeated_get() {
        let tokens = ["-n", "1", "x", "-n=2", "-n", "3", "y"];
        let repeated = args(&tokens);
        let all = args(&tokens);

        let mut expected = Vec::default();
        while let Some(value) = repeated.get::<u64>('n').unwrap() {
            expected.push(value);
        }

        assert_eq!(all.get_all::<u64>('n').unwrap(), expected);
        assert_eq!(
            all.pool.borrow().tokens(),
            repeated.pool.borrow().tokens()
        );
    }

    #[test]
    fn get_all_stops_at_error() {
        let args = args(&["-n", "1", "-n", "two"]);
        assert_matches!(
            args.get_all::<u64>('n'),
            Err(ArgsError::Conversion { token, .. }) if token == "two"
        );
    }

    #[test]
    fn get_records_once() {
        let args = args(&["-n", "1", "-n", "2"]);

        let _ = args.get_all::<u64>('n').unwrap();
        let _ = args.get::<u64>('n').unwrap();

        assert_eq!(
            args.queries(),
            vec![Query::Parameter {
                key: Key::from('n'),
                label: "Integer".to_string(),
                value: Some("1".to_string()),
            }]
        );
    }
}
