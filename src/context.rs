//! Template context handling.
//! The context is built once before generation starts and is only read
//! afterwards. It also hosts the path normalization used to turn user supplied
//! directories into the absolute paths stored in the context.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use serde::Serialize;
use std::path::{Component, Path, PathBuf};

pub const TEMPLATE_DIR: &str = "template_dir";
pub const OUTPUT_DIR: &str = "output_dir";
pub const PROJECT_NAME: &str = "project_name";
pub const PROJECT_SLUG: &str = "project_slug";

/// Immutable mapping from variable names to string values.
///
/// The template and output directories are also kept as paths, so names that
/// are not valid UTF-8 reach the filesystem unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Context {
    values: IndexMap<String, String>,
    #[serde(skip)]
    template_dir: PathBuf,
    #[serde(skip)]
    output_dir: PathBuf,
}

impl Context {
    /// Starts a context with the four keys every run requires.
    pub fn builder<T, O, N, S>(
        template_dir: T,
        output_dir: O,
        project_name: N,
        project_slug: S,
    ) -> ContextBuilder
    where
        T: AsRef<Path>,
        O: AsRef<Path>,
        N: Into<String>,
        S: Into<String>,
    {
        ContextBuilder {
            template_dir: template_dir.as_ref().to_path_buf(),
            output_dir: output_dir.as_ref().to_path_buf(),
            project_name: project_name.into(),
            project_slug: project_slug.into(),
            extra: IndexMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn template_dir(&self) -> &Path {
        &self.template_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Collects context values before they are frozen into a [`Context`].
#[derive(Debug)]
pub struct ContextBuilder {
    template_dir: PathBuf,
    output_dir: PathBuf,
    project_name: String,
    project_slug: String,
    extra: IndexMap<String, String>,
}

impl ContextBuilder {
    /// Adds a free-form variable. Required keys cannot be overridden.
    pub fn with<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn extend<I, K, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.extra.extend(values.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn build(self) -> Context {
        let mut values = IndexMap::new();
        let template_dir = self.template_dir.to_string_lossy().into_owned();
        let output_dir = self.output_dir.to_string_lossy().into_owned();
        values.insert(TEMPLATE_DIR.to_string(), template_dir);
        values.insert(OUTPUT_DIR.to_string(), output_dir);
        values.insert(PROJECT_NAME.to_string(), self.project_name);
        values.insert(PROJECT_SLUG.to_string(), self.project_slug);
        for (key, value) in self.extra {
            if values.contains_key(&key) {
                debug!("Ignoring extra variable '{key}', it is a reserved key");
                continue;
            }
            values.insert(key, value);
        }
        Context { values, template_dir: self.template_dir, output_dir: self.output_dir }
    }
}

/// Resolves `path` against `working_dir` and normalizes it lexically.
///
/// `.` components are dropped, `..` removes the previous component and a
/// trailing separator is trimmed. Symlinks are not resolved.
pub fn absolutize<P: AsRef<Path>, W: AsRef<Path>>(path: P, working_dir: W) -> PathBuf {
    let path = path.as_ref();
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        working_dir.as_ref().join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Parses a `KEY=VALUE` pair given on the command line.
pub fn parse_var(raw: &str) -> Result<(String, String)> {
    match raw.split_once('=') {
        Some((key, value)) if is_identifier(key.trim()) => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(Error::ContextError(format!(
            "invalid variable '{raw}', expected KEY=VALUE with KEY a valid identifier"
        ))),
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parses the contents of a context file.
///
/// The content is tried as JSON first and as YAML second. It must be a flat
/// object whose values are strings, numbers or booleans.
pub fn parse_context_file(content: &str) -> Result<IndexMap<String, String>> {
    let raw: IndexMap<String, serde_json::Value> = match serde_json::from_str(content) {
        Ok(v) => v,
        Err(_) => serde_yaml::from_str(content).map_err(|e| {
            Error::ContextError(format!("invalid context file format: {e}"))
        })?,
    };

    let mut values = IndexMap::new();
    for (key, value) in raw {
        if !is_identifier(&key) {
            return Err(Error::ContextError(format!("invalid variable name '{key}'")));
        }
        let value = match value {
            serde_json::Value::String(s) => s,
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            other => {
                return Err(Error::ContextError(format!(
                    "variable '{key}' must be a string, number or boolean, got {other}"
                )))
            }
        };
        values.insert(key, value);
    }
    Ok(values)
}

/// Reads and parses a context file.
pub fn load_context_file<P: AsRef<Path>>(path: P) -> Result<IndexMap<String, String>> {
    let path = path.as_ref();
    debug!("Loading context from {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, path, e))?;
    parse_context_file(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_keys_win_over_extra() {
        let context = Context::builder("/t", "/o", "Demo", "demo")
            .with("project_name", "Other")
            .with("project_version", "2.0.0")
            .build();
        assert_eq!(context.get(PROJECT_NAME), Some("Demo"));
        assert_eq!(context.get("project_version"), Some("2.0.0"));
        assert_eq!(context.template_dir(), Path::new("/t"));
        assert_eq!(context.output_dir(), Path::new("/o"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_directories_are_kept() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let template_dir = Path::new("/work").join(OsStr::from_bytes(b"tpl\xff"));
        let context = Context::builder(&template_dir, "/work/out", "Demo", "demo").build();
        assert_eq!(context.template_dir(), template_dir);
        assert_eq!(context.get(TEMPLATE_DIR), Some("/work/tpl\u{FFFD}"));
    }

    #[test]
    fn test_absolutize() {
        assert_eq!(absolutize("./template", "/work"), PathBuf::from("/work/template"));
        assert_eq!(absolutize("out/", "/work"), PathBuf::from("/work/out"));
        assert_eq!(absolutize("../x/./y", "/work/dir"), PathBuf::from("/work/x/y"));
        assert_eq!(absolutize("/abs/path", "/work"), PathBuf::from("/abs/path"));
    }

    #[test]
    fn test_parse_var() {
        assert_eq!(
            parse_var("license=MIT").unwrap(),
            ("license".to_string(), "MIT".to_string())
        );
        assert_eq!(parse_var("url=a=b").unwrap().1, "a=b");
        assert!(parse_var("novalue").is_err());
        assert!(parse_var("1key=x").is_err());
        assert!(parse_var("=x").is_err());
    }

    #[test]
    fn test_parse_context_file_json_and_yaml() {
        let json = parse_context_file(r#"{"author": "Jane", "year": 2024, "private": true}"#)
            .unwrap();
        assert_eq!(json["author"], "Jane");
        assert_eq!(json["year"], "2024");
        assert_eq!(json["private"], "true");

        let yaml = parse_context_file("author: Jane\nyear: 2024\n").unwrap();
        assert_eq!(yaml["author"], "Jane");
        assert_eq!(yaml["year"], "2024");
    }

    #[test]
    fn test_parse_context_file_rejects_nested_values() {
        let err = parse_context_file(r#"{"authors": ["a", "b"]}"#).unwrap_err();
        assert!(matches!(err, Error::ContextError(_)));
    }
}
