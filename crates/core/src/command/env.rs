//! Environment overlays and the inherited base environment

use indexmap::IndexMap;
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Separator between entries of `PATH`-like variables on the host.
#[cfg(windows)]
pub const PATH_LIST_SEPARATOR: &str = ";";
#[cfg(not(windows))]
pub const PATH_LIST_SEPARATOR: &str = ":";

/// A single overlay entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvValue {
    Set(String),
    /// Remove the variable from the child environment
    Unset,
}

impl EnvValue {
    pub fn as_set(&self) -> Option<&str> {
        match self {
            EnvValue::Set(value) => Some(value),
            EnvValue::Unset => None,
        }
    }
}

impl From<&str> for EnvValue {
    fn from(value: &str) -> Self {
        EnvValue::Set(value.to_string())
    }
}

impl From<String> for EnvValue {
    fn from(value: String) -> Self {
        EnvValue::Set(value)
    }
}

/// Environment variables applied on top of the inherited environment
///
/// Keys are unique; merging overwrites on collision. Insertion order is kept
/// so rendered commands are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: IndexMap<String, EnvValue>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<EnvValue>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn unset(&mut self, key: impl Into<String>) {
        self.vars.insert(key.into(), EnvValue::Unset);
    }

    pub fn remove(&mut self, key: &str) -> Option<EnvValue> {
        self.vars.shift_remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&EnvValue> {
        self.vars.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EnvValue)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Overlay `other` on top of this environment.
    pub fn merge(&mut self, other: &Environment) {
        for (key, value) in &other.vars {
            self.vars.insert(key.clone(), value.clone());
        }
    }
}

impl<K: Into<String>, V: Into<EnvValue>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut env = Environment::new();
        for (key, value) in iter {
            env.set(key, value);
        }
        env
    }
}

/// The environment a command inherits when nothing overrides it
///
/// Lookups that fall back to "the parent process" go through this value so
/// command construction stays independent of the real process state.
#[derive(Debug, Clone, Default)]
pub struct BaseEnv {
    vars: HashMap<String, String>,
    current_dir: PathBuf,
}

impl BaseEnv {
    pub fn new(vars: HashMap<String, String>, current_dir: impl Into<PathBuf>) -> Self {
        Self {
            vars,
            current_dir: current_dir.into(),
        }
    }

    /// Snapshot the environment and working directory of this process.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn from_process() -> std::io::Result<Self> {
        Ok(Self {
            vars: utf8_vars(std::env::vars_os()),
            current_dir: std::env::current_dir()?,
        })
    }

    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    /// Resolve `path` against the base working directory.
    pub fn absolute(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.current_dir.join(path)
        }
    }
}

fn utf8_vars(vars: impl IntoIterator<Item = (OsString, OsString)>) -> HashMap<String, String> {
    vars.into_iter()
        .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
            (Ok(key), Ok(value)) => Some((key, value)),
            (key, _) => {
                debug!("Skipping non UTF-8 environment variable {:?}", key);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overwrites_on_collision() {
        let mut env: Environment = [("A", "1"), ("B", "2")].into_iter().collect();
        let mut other = Environment::new();
        other.set("B", "3");
        other.unset("C");
        env.merge(&other);

        assert_eq!(env.get("A"), Some(&EnvValue::Set("1".into())));
        assert_eq!(env.get("B"), Some(&EnvValue::Set("3".into())));
        assert_eq!(env.get("C"), Some(&EnvValue::Unset));
        assert_eq!(env.len(), 3);
    }

    #[test]
    fn test_unset_differs_from_empty() {
        let mut env = Environment::new();
        env.set("EMPTY", "");
        env.unset("GONE");
        assert_eq!(env.get("EMPTY").and_then(EnvValue::as_set), Some(""));
        assert_eq!(env.get("GONE").and_then(EnvValue::as_set), None);
    }

    #[test]
    fn test_absolute() {
        let base = BaseEnv::new(HashMap::new(), "/work");
        assert_eq!(base.absolute(".venv"), PathBuf::from("/work/.venv"));
        assert_eq!(base.absolute("/opt/venv"), PathBuf::from("/opt/venv"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_variables_are_skipped() {
        use std::os::unix::ffi::OsStringExt;

        let vars = utf8_vars([
            (OsString::from("GOOD"), OsString::from("yes")),
            (OsString::from("BAD_VALUE"), OsString::from_vec(vec![0xff, 0xfe])),
            (OsString::from_vec(vec![0xff]), OsString::from("x")),
        ]);
        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get("GOOD").map(String::as_str), Some("yes"));
    }
}
