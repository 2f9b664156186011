//! Layered key/value view over the process environment and an env file.

use std::collections::BTreeMap;
use std::env::{self, VarError};
use std::fmt;
use std::path::Path;

use super::vars;

/// Where settings values come from.
///
/// Two layers are consulted in order: the process layer, then the env file
/// layer. A lookup returns the first non-empty value, so a variable exported
/// in the shell always beats the same key in `.env`, and an empty export
/// falls through to the file.
///
/// Reading an env file never touches the process environment.
///
/// # Example
///
/// ```rust
/// use lexiconnect_config::EnvSource;
///
/// let source = EnvSource::from_pairs([("NEO4J_URI", "bolt://db:7687")])
///     .with_file_pairs([("NEO4J_URI", "bolt://file:7687"), ("NEO4J_USER", "reader")]);
///
/// assert_eq!(source.get("NEO4J_URI"), Some("bolt://db:7687"));
/// assert_eq!(source.get("NEO4J_USER"), Some("reader"));
/// assert_eq!(source.get("NEO4J_PASSWORD"), None);
/// ```
#[derive(Clone, Default)]
pub struct EnvSource {
    process: BTreeMap<String, String>,
    file: BTreeMap<String, String>,
}

impl EnvSource {
    /// Capture every known settings variable from the process environment.
    ///
    /// Variables holding non-UTF-8 data are treated as unset.
    pub fn from_process() -> Self {
        let mut process = BTreeMap::new();
        for &name in vars::ALL {
            match env::var(name) {
                Ok(value) => {
                    process.insert(name.to_string(), value);
                }
                Err(VarError::NotUnicode(_)) => {
                    tracing::warn!(var = name, "ignoring environment variable with non-UTF-8 value");
                }
                Err(VarError::NotPresent) => {}
            }
        }
        Self {
            process,
            file: BTreeMap::new(),
        }
    }

    /// Build a source whose process layer is exactly `pairs`.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            process: collect_pairs(pairs),
            file: BTreeMap::new(),
        }
    }

    /// Replace the env file layer with the contents of `path`. On failure the
    /// layer is left as it was.
    ///
    /// A missing file is expected in most deployments and only logged at
    /// debug level. A file that exists but cannot be read or parsed is
    /// skipped with a warning; every setting still has a default.
    ///
    /// Unquoted and double-quoted values expand `$VAR` references, so
    /// secrets containing `$` must be single-quoted to be read verbatim.
    pub fn with_env_file(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match read_env_file(path) {
            Ok(file) => {
                tracing::debug!(path = %path.display(), entries = file.len(), "loaded env file");
                self.file = file;
            }
            Err(e) if e.not_found() => {
                tracing::debug!(path = %path.display(), "no env file found");
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "ignoring unreadable env file, using process environment only"
                );
            }
        }
        self
    }

    /// Replace the env file layer with `pairs`.
    pub fn with_file_pairs<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.file = collect_pairs(pairs);
        self
    }

    /// Look up `key`, returning the first non-empty value across layers.
    pub fn get(&self, key: &str) -> Option<&str> {
        [&self.process, &self.file]
            .into_iter()
            .filter_map(|layer| layer.get(key))
            .map(String::as_str)
            .find(|value| !value.is_empty())
    }
}

// Values may hold secrets, so only keys are printed.
impl fmt::Debug for EnvSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvSource")
            .field("process", &self.process.keys().collect::<Vec<_>>())
            .field("file", &self.file.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// First occurrence wins, matching how dotenv files are applied.
fn collect_pairs<I, K, V>(pairs: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut map = BTreeMap::new();
    for (key, value) in pairs {
        map.entry(key.into()).or_insert_with(|| value.into());
    }
    map
}

fn read_env_file(path: &Path) -> Result<BTreeMap<String, String>, dotenvy::Error> {
    let mut pairs = Vec::new();
    for item in dotenvy::from_path_iter(path)? {
        pairs.push(item?);
    }
    Ok(collect_pairs(pairs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_utils::ScopedEnv;
    use std::fs;

    fn write_env_file(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn process_layer_wins_over_file() {
        let source = EnvSource::from_pairs([("NEO4J_URI", "bolt://process:7687")])
            .with_file_pairs([("NEO4J_URI", "bolt://file:7687")]);
        assert_eq!(source.get("NEO4J_URI"), Some("bolt://process:7687"));
    }

    #[test]
    fn file_layer_fills_unset_keys() {
        let source = EnvSource::from_pairs([("NEO4J_URI", "bolt://process:7687")])
            .with_file_pairs([("NEO4J_USER", "reader")]);
        assert_eq!(source.get("NEO4J_USER"), Some("reader"));
    }

    #[test]
    fn empty_process_value_falls_through_to_file() {
        let source = EnvSource::from_pairs([("ENVIRONMENT", "")])
            .with_file_pairs([("ENVIRONMENT", "staging")]);
        assert_eq!(source.get("ENVIRONMENT"), Some("staging"));
    }

    #[test]
    fn empty_everywhere_is_unset() {
        let source = EnvSource::from_pairs([("DEBUG", "")]).with_file_pairs([("DEBUG", "")]);
        assert_eq!(source.get("DEBUG"), None);
        assert_eq!(EnvSource::default().get("DEBUG"), None);
    }

    #[test]
    fn first_duplicate_wins() {
        let source = EnvSource::from_pairs([("PROJECT_NAME", "first"), ("PROJECT_NAME", "second")]);
        assert_eq!(source.get("PROJECT_NAME"), Some("first"));
    }

    #[test]
    fn reads_env_file_from_disk() {
        let (_dir, path) = write_env_file(
            "# local overrides\nNEO4J_URI=bolt://graph:7687\nGCS_BUCKET_NAME=\"lexi-media\"\n",
        );
        let source = EnvSource::default().with_env_file(&path);
        assert_eq!(source.get("NEO4J_URI"), Some("bolt://graph:7687"));
        assert_eq!(source.get("GCS_BUCKET_NAME"), Some("lexi-media"));
    }

    #[test]
    fn env_file_does_not_override_process_layer() {
        let (_dir, path) = write_env_file("SECRET_KEY=from-file\n");
        let source = EnvSource::from_pairs([("SECRET_KEY", "from-process")]).with_env_file(&path);
        assert_eq!(source.get("SECRET_KEY"), Some("from-process"));
    }

    #[test]
    fn single_quoted_values_are_verbatim() {
        let (_dir, path) = write_env_file("SECRET_KEY='ab$cdef'\nNEO4J_PASSWORD='p@$$'\n");
        let source = EnvSource::default().with_env_file(&path);
        assert_eq!(source.get("SECRET_KEY"), Some("ab$cdef"));
        assert_eq!(source.get("NEO4J_PASSWORD"), Some("p@$$"));
    }

    #[test]
    fn from_process_captures_every_settings_variable() {
        let env = ScopedEnv::clean();
        for &name in vars::ALL {
            env.set(name, &format!("value-of-{name}"));
        }
        env.set("UNRELATED_VARIABLE_FOR_SOURCE_TEST", "ignored");

        let source = EnvSource::from_process();
        for &name in vars::ALL {
            assert_eq!(source.get(name), Some(format!("value-of-{name}").as_str()), "{name}");
        }
        assert_eq!(source.get("UNRELATED_VARIABLE_FOR_SOURCE_TEST"), None);
        std::env::remove_var("UNRELATED_VARIABLE_FOR_SOURCE_TEST");
    }

    #[test]
    fn from_process_skips_unset_variables() {
        let env = ScopedEnv::clean();
        env.set("NEO4J_USER", "reader");

        let source = EnvSource::from_process();
        assert_eq!(source.get("NEO4J_USER"), Some("reader"));
        assert_eq!(source.get("NEO4J_URI"), None);
        assert_eq!(source.process.len(), 1);
    }

    #[test]
    fn missing_env_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let source = EnvSource::from_pairs([("NEO4J_USER", "neo4j")])
            .with_env_file(dir.path().join("does-not-exist.env"));
        assert_eq!(source.get("NEO4J_USER"), Some("neo4j"));
        assert!(source.file.is_empty());
    }

    #[test]
    fn malformed_env_file_is_skipped_entirely() {
        let (_dir, path) = write_env_file("NEO4J_USER=reader\nthis line is not valid\n");
        let source = EnvSource::default().with_env_file(&path);
        assert!(source.file.is_empty());
        assert_eq!(source.get("NEO4J_USER"), None);
    }

    #[test]
    fn debug_output_hides_values() {
        let source = EnvSource::from_pairs([("SECRET_KEY", "hunter2")]);
        let debug = format!("{source:?}");
        assert!(debug.contains("SECRET_KEY"));
        assert!(!debug.contains("hunter2"));
    }
}
