//! Renderer module — trait-based format dispatch.

pub mod json;
pub mod pyi;

use crate::error::Result;
use crate::model::Pyi;
use anyhow::anyhow;

/// Trait for rendering a stub module into a specific output format.
pub trait Renderer {
    fn render(&self, pyi: &Pyi) -> Result<String>;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> anyhow::Result<Box<dyn Renderer>> {
    match format {
        "pyi" => Ok(Box::new(pyi::PyiRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use pyi or json", format)),
    }
}

/// Drop whitespace-only lines from both ends of `text`; inner lines keep their indentation.
pub(crate) fn trim_blank_lines(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let Some(start) = lines.iter().position(|l| !l.trim().is_empty()) else {
        return String::new();
    };
    let end = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .unwrap_or(start);
    lines[start..=end].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_only_blank_edge_lines() {
        assert_eq!(trim_blank_lines("\n  \n   a\n\n  b  \n \n"), "   a\n\n  b  ");
        assert_eq!(trim_blank_lines(" \n\n"), "");
        assert_eq!(trim_blank_lines(""), "");
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(create_renderer("pyi").is_ok());
        assert_eq!(create_renderer("json").unwrap().file_extension(), "json");
        assert!(create_renderer("markdown").is_err());
    }
}
