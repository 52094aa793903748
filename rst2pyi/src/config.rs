//! Run configuration, assembled from the command line.

use std::path::PathBuf;

/// Where MicroPython keeps its library `.rst` pages.
pub const DEFAULT_BASE_URL: &str =
    "https://raw.githubusercontent.com/micropython/micropython/master/docs/library/";

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the stubs are written to.
    pub output_dir: PathBuf,
    /// Prefix every page name is appended to; always ends with `/`.
    pub base_url: String,
    /// Generators to run; empty means all of them.
    pub modules: Vec<String>,
    /// Renderer name, see [`crate::render::create_renderer`].
    pub format: String,
}

impl Config {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Config {
            output_dir: output_dir.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            modules: Vec::new(),
            format: "pyi".to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }

    #[must_use]
    pub fn with_modules(mut self, modules: Vec<String>) -> Self {
        self.modules = modules;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: &str) -> Self {
        self.format = format.to_string();
        self
    }

    pub fn wants(&self, module: &str) -> bool {
        self.modules.is_empty() || self.modules.iter().any(|m| m == module)
    }
}

/// Append the `/` that page names are joined with, unless already present.
pub fn normalize_base_url(base_url: &str) -> String {
    if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{}/", base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        assert_eq!(normalize_base_url("docs/library"), "docs/library/");
        assert_eq!(normalize_base_url("docs/library/"), "docs/library/");
        assert!(DEFAULT_BASE_URL.ends_with('/'));
    }

    #[test]
    fn empty_module_list_selects_everything() {
        let config = Config::new("out");
        assert!(config.wants("gc"));
        let config = config.with_modules(vec!["array".into()]);
        assert!(config.wants("array"));
        assert!(!config.wants("gc"));
    }
}
