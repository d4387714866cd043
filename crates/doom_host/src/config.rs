//! Launch configuration for [`crate::load`].
//
// Every field is optional. Defaults are applied when the loader resolves the config,
// not at construction, so a config read from TOML and one built in code behave the same.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::output::{default_print, default_print_err, OutputSink};

/// File name of the compiled engine inside the asset directory.
pub const ENGINE_ARTIFACT: &str = "doom.wasm";

/// How to instantiate the engine.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LaunchConfig {
    /// Directory holding `doom.wasm` and the engine's data files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets_path: Option<PathBuf>,

    /// Engine `argv`, program name included.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Vec<String>>,

    /// Skip running the engine's entry point at load time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_initial_run: Option<bool>,

    /// Engine stdout, one call per line. Unset logs each line through `tracing`, which
    /// prints nothing until a subscriber is installed (see [`crate::logging::init`]).
    #[serde(skip)]
    pub print: Option<OutputSink>,

    /// Engine stderr, same defaults as `print`.
    #[serde(skip)]
    pub print_err: Option<OutputSink>,
}

impl LaunchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assets_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.assets_path = Some(path.into());
        self
    }

    pub fn arguments<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments = Some(args.into_iter().map(Into::into).collect());
        self
    }

    pub fn no_initial_run(mut self, suppress: bool) -> Self {
        self.no_initial_run = Some(suppress);
        self
    }

    pub fn print(mut self, sink: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.print = Some(std::sync::Arc::new(sink));
        self
    }

    pub fn print_err(mut self, sink: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.print_err = Some(std::sync::Arc::new(sink));
        self
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// The asset directory, defaulting to the directory of the running executable.
    pub fn resolved_assets_path(&self) -> PathBuf {
        match &self.assets_path {
            Some(path) => path.clone(),
            None => default_assets_path(),
        }
    }

    /// Engine `argv`, defaulting to just the program name.
    pub fn resolved_arguments(&self) -> Vec<String> {
        self.arguments
            .clone()
            .unwrap_or_else(|| vec![doom_api::PROGRAM_NAME.to_string()])
    }

    /// Whether the entry point is held back at load time. Unset means held back.
    pub fn suppresses_initial_run(&self) -> bool {
        self.no_initial_run.unwrap_or(true)
    }

    pub fn resolved_print(&self) -> OutputSink {
        self.print.clone().unwrap_or_else(default_print)
    }

    pub fn resolved_print_err(&self) -> OutputSink {
        self.print_err.clone().unwrap_or_else(default_print_err)
    }

    /// Where a file the engine asks for lives on disk.
    pub fn locate_file(&self, filename: &str) -> PathBuf {
        self.resolved_assets_path().join(filename)
    }
}

impl fmt::Debug for LaunchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LaunchConfig")
            .field("assets_path", &self.assets_path)
            .field("arguments", &self.arguments)
            .field("no_initial_run", &self.no_initial_run)
            .field("print", &self.print.as_ref().map(|_| "<sink>"))
            .field("print_err", &self.print_err.as_ref().map(|_| "<sink>"))
            .finish()
    }
}

fn default_assets_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_run_suppressed_by_default() {
        assert!(LaunchConfig::new().suppresses_initial_run());
        assert!(LaunchConfig::new().no_initial_run(true).suppresses_initial_run());
        assert!(!LaunchConfig::new().no_initial_run(false).suppresses_initial_run());
    }

    #[test]
    fn test_default_arguments() {
        assert_eq!(LaunchConfig::new().resolved_arguments(), vec!["doom"]);
        let config = LaunchConfig::new().arguments(doom_api::build_args(Some(1), None, None));
        assert_eq!(config.resolved_arguments(), vec!["doom", "-scaling", "3", "-episode", "1"]);
    }

    #[test]
    fn test_locate_file_joins_assets_path() {
        let config = LaunchConfig::new().assets_path("/opt/doom");
        assert_eq!(config.locate_file("doom.wasm"), PathBuf::from("/opt/doom/doom.wasm"));
        assert_eq!(config.locate_file("doom1.wad"), PathBuf::from("/opt/doom/doom1.wad"));
    }

    #[test]
    fn test_default_assets_path_is_executable_dir() {
        let exe_dir = std::env::current_exe().unwrap().parent().unwrap().to_path_buf();
        assert_eq!(LaunchConfig::new().resolved_assets_path(), exe_dir);
    }

    #[test]
    fn test_from_toml() {
        let config = LaunchConfig::from_toml_str(
            r#"
            assets_path = "/srv/doom"
            arguments = ["doom", "-scaling", "2"]
            no_initial_run = false
            "#,
        )
        .unwrap();

        assert_eq!(config.assets_path, Some(PathBuf::from("/srv/doom")));
        assert_eq!(config.resolved_arguments(), vec!["doom", "-scaling", "2"]);
        assert!(!config.suppresses_initial_run());
        assert!(config.print.is_none());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = LaunchConfig::from_toml_str("").unwrap();
        assert!(config.suppresses_initial_run());
        assert_eq!(config.resolved_arguments(), vec!["doom"]);
    }

    #[test]
    fn test_toml_rejects_unknown_keys() {
        let err = LaunchConfig::from_toml_str("noInitialRun = true").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_missing_file() {
        let err = LaunchConfig::from_toml_file("/definitely/not/here/doom.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_debug_hides_sinks() {
        let config = LaunchConfig::new().print(|_| {});
        let debug = format!("{:?}", config);
        assert!(debug.contains("<sink>"));
    }
}
