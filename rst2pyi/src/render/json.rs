//! JSON renderer — structured dump of the document tree.
//!
//! Useful when a generator misbehaves: it shows which section every scraped line landed in
//! without the stub layout in the way.

use crate::error::{ParseError, Result};
use crate::model::Pyi;
use crate::render::Renderer;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, pyi: &Pyi) -> Result<String> {
        if pyi
            .classes
            .iter()
            .any(|class| class.class_def.trim().is_empty())
        {
            return Err(ParseError::MissingClassDefinition);
        }
        let mut out = serde_json::to_string_pretty(pyi)?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
