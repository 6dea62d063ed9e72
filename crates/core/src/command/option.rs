//! POSIX-style option values and their argv rendering

use indexmap::IndexMap;

/// Value of a single command line option
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Omit the option entirely
    Absent,
    /// Bare flag, emitted only when `true`
    Switch(bool),
    /// Flag followed by its value as a separate argument
    Valued(String),
}

impl OptionValue {
    /// Treat an empty string as an absent option.
    pub fn non_empty(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            OptionValue::Absent
        } else {
            OptionValue::Valued(value)
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Switch(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Valued(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Valued(value)
    }
}

impl From<&String> for OptionValue {
    fn from(value: &String) -> Self {
        OptionValue::Valued(value.clone())
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for OptionValue {
                fn from(value: $ty) -> Self {
                    OptionValue::Valued(value.to_string())
                }
            }
        )*
    };
}

impl_from_number!(i32, i64, u16, u32, u64, usize, f64);

impl<T: Into<OptionValue>> From<Option<T>> for OptionValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(OptionValue::Absent, Into::into)
    }
}

/// Insertion-ordered option mapping
///
/// The order options are inserted is the order they appear on the command
/// line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    entries: IndexMap<String, OptionValue>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option, replacing the value of an existing key in place.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Render the options as argv tokens.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        for (key, value) in &self.entries {
            match value {
                OptionValue::Absent | OptionValue::Switch(false) => continue,
                OptionValue::Switch(true) => args.push(flag(key)),
                OptionValue::Valued(value) => {
                    args.push(flag(key));
                    args.push(value.clone());
                }
            }
        }
        args
    }
}

impl<K, V> FromIterator<(K, V)> for Options
where
    K: Into<String>,
    V: Into<OptionValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = Options::new();
        for (key, value) in iter {
            options.insert(key, value);
        }
        options
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Options
where
    K: Into<String>,
    V: Into<OptionValue>,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

/// Render an option key as a flag: `-k` for single characters, `--key`
/// otherwise.
pub fn flag(key: &str) -> String {
    if key.chars().count() == 1 {
        format!("-{key}")
    } else {
        format!("--{key}")
    }
}
