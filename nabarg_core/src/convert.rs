use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

// Erase the target type so converters for every T fit in one registry.
// The TypeId key guarantees the boxed value downcasts back to T.
type ErasedConvert = Box<dyn Fn(&str) -> Option<Box<dyn Any>>>;

struct Converter {
    label: String,
    convert: ErasedConvert,
}

/// Failure to convert a token into a value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    /// The registered converter rejected the token.
    #[error("cannot convert '{token}' to {label}.")]
    Invalid {
        /// The offending token.
        token: String,
        /// The label of the target type.
        label: String,
    },

    /// Nothing is registered for the target type.
    #[error("no converter registered for {0}.")]
    Unsupported(String),
}

/// The registry of `&str -> T` conversions used when reading parameter values.
///
/// The default registry covers every integer primitive (`Integer`), `f32`/`f64` (`Double`), `String`, `bool` (`Boolean`), `char` (`Char`) and `PathBuf` (`Path`).
/// The label is what the usage line shows, as in `-p <Integer>`.
///
/// ### Example
/// ```
/// # use nabarg_core as nabarg;
/// use nabarg::Converters;
///
/// #[derive(Debug, PartialEq)]
/// struct Celsius(i32);
///
/// let mut converters = Converters::default();
/// converters.register("Celsius", |token: &str| {
///     token.trim_end_matches('C').parse::<i32>().map(Celsius)
/// });
///
/// assert_eq!(converters.convert::<Celsius>("21C").unwrap(), Celsius(21));
/// assert_eq!(converters.label::<Celsius>(), "Celsius");
/// ```
pub struct Converters {
    converters: HashMap<TypeId, Converter>,
}

impl Default for Converters {
    fn default() -> Self {
        let mut converters = Self::empty();

        macro_rules! register_all {
            ($label:expr, $($t:ty),+) => {
                $( converters.register_from_str::<$t>($label); )+
            };
        }

        register_all!("Integer", i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
        register_all!("Double", f32, f64);
        register_all!("String", String);
        register_all!("Boolean", bool);
        register_all!("Char", char);
        register_all!("Path", PathBuf);
        converters
    }
}

impl std::fmt::Debug for Converters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut labels: Vec<&str> = self
            .converters
            .values()
            .map(|c| c.label.as_str())
            .collect();
        labels.sort_unstable();
        labels.dedup();
        f.debug_struct("Converters")
            .field("labels", &labels)
            .finish()
    }
}

impl Converters {
    /// A registry with no conversions at all.
    pub fn empty() -> Self {
        Self {
            converters: HashMap::default(),
        }
    }

    /// Register (or replace) the conversion for type `T`.
    /// The error type of `convert` is discarded; only success matters.
    pub fn register<T, E, F>(&mut self, label: impl Into<String>, convert: F)
    where
        T: 'static,
        F: Fn(&str) -> Result<T, E> + 'static,
    {
        let erased: ErasedConvert =
            Box::new(move |token: &str| convert(token).ok().map(|v| Box::new(v) as Box<dyn Any>));
        self.converters.insert(
            TypeId::of::<T>(),
            Converter {
                label: label.into(),
                convert: erased,
            },
        );
    }

    /// Register (or replace) the conversion for type `T` using its [`std::str::FromStr`] implementation.
    pub fn register_from_str<T>(&mut self, label: impl Into<String>)
    where
        T: FromStr + 'static,
    {
        self.register(label, T::from_str);
    }

    /// Whether a conversion for `T` is registered.
    pub fn contains<T: 'static>(&self) -> bool {
        self.converters.contains_key(&TypeId::of::<T>())
    }

    /// The label of type `T`: its registered label, or else its bare type name.
    pub fn label<T: 'static>(&self) -> String {
        match self.converters.get(&TypeId::of::<T>()) {
            Some(converter) => converter.label.clone(),
            None => bare_type_name::<T>(),
        }
    }

    /// Convert `token` into a `T`.
    pub fn convert<T: 'static>(&self, token: &str) -> Result<T, ConvertError> {
        let converter = self
            .converters
            .get(&TypeId::of::<T>())
            .ok_or_else(|| ConvertError::Unsupported(bare_type_name::<T>()))?;
        let value = (converter.convert)(token).ok_or_else(|| ConvertError::Invalid {
            token: token.to_string(),
            label: converter.label.clone(),
        })?;

        match value.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(_) => unreachable!("internal error - converter registered under a foreign TypeId"),
        }
    }
}

fn bare_type_name<T>() -> String {
    let full = std::any::type_name::<T>();
    // Keep generics intact: only strip the module path in front of the outermost type.
    let head = full.split('<').next().unwrap_or(full);
    let start = head.rfind("::").map(|i| i + 2).unwrap_or(0);
    full[start..].to_string()
}
