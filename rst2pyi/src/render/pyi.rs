//! `.pyi` stub renderer.
//!
//! Layout: module docstring, module declarations, then classes. Blocks are separated by one
//! blank line, classes by two; blank lines at the edges of every section are dropped.

use super::{trim_blank_lines, Renderer};
use crate::error::{ParseError, Result};
use crate::model::*;

pub struct PyiRenderer;

const QUOTES: &str = "\"\"\"";

impl Renderer for PyiRenderer {
    fn render(&self, pyi: &Pyi) -> Result<String> {
        let mut out = String::new();

        out.push_str(QUOTES);
        out.push('\n');
        let doc = trim_blank_lines(&pyi.doc.join("\n"));
        if !doc.is_empty() {
            out.push_str(&doc);
            out.push('\n');
        }
        out.push_str(QUOTES);
        out.push('\n');

        let decls = render_declarations(&pyi.imports_vars_defs);
        if !decls.is_empty() {
            out.push('\n');
            out.push_str(&decls);
            out.push('\n');
        }

        for class in &pyi.classes {
            out.push_str("\n\n");
            out.push_str(&render_class(class)?);
            out.push('\n');
        }

        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "pyi"
    }
}

fn render_class(class: &ClassRecord) -> Result<String> {
    let class_def = class.class_def.trim_end();
    if class_def.trim().is_empty() {
        return Err(ParseError::MissingClassDefinition);
    }

    let mut lines: Vec<String> = Vec::new();
    if let Some(pre) = non_blank(class.pre.as_deref()) {
        lines.push(pre.to_string());
    }
    lines.push(class_def.to_string());
    lines.push(format!("   {}", QUOTES));
    let doc = trim_blank_lines(&class.doc.join("\n"));
    lines.extend(doc.lines().map(clean_line));
    lines.push(format!("   {}", QUOTES));

    let mut out = lines.join("\n");
    for section in [&class.imports_vars, &class.defs] {
        let rendered = render_declarations(section);
        if !rendered.is_empty() {
            out.push_str("\n\n");
            out.push_str(&rendered);
        }
    }
    Ok(out)
}

fn render_declarations(decls: &[Declaration]) -> String {
    decls
        .iter()
        .map(render_declaration)
        .filter(|block| !block.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_declaration(decl: &Declaration) -> String {
    match decl {
        Declaration::Raw(text) => trim_blank_lines(text),
        Declaration::Function(func) => render_function(func),
        Declaration::Constant(constant) => render_constant(constant),
    }
}

fn render_function(func: &FunctionDecl) -> String {
    let pad = " ".repeat(func.indent);
    let mut lines: Vec<String> = Vec::new();

    if let Some(pre) = non_blank(func.pre.as_deref()) {
        lines.push(format!("{}{}", pad, pre));
    }
    if func.overload {
        lines.push(format!("{}@overload", pad));
    }
    let signature = trim_blank_lines(&func.signature);
    let signature = if func.overload {
        signature.trim_start().to_string()
    } else {
        signature
    };
    lines.extend(signature.lines().map(|l| padded(&pad, l)));
    if let Some(last) = lines.last_mut() {
        last.push(':');
    }

    lines.push(format!("{}   {}", pad, QUOTES));
    let doc = trim_blank_lines(&func.doc.join("\n"));
    lines.extend(doc.lines().map(|l| padded(&pad, l)));
    lines.push(format!("{}   {}", pad, QUOTES));

    lines.join("\n")
}

fn render_constant(constant: &ConstantDecl) -> String {
    let pad = " ".repeat(constant.indent);
    let mut lines = vec![
        format!("{}{}: {} = ...", pad, constant.name, constant.type_hint),
        format!("{}{}", pad, QUOTES),
    ];
    let doc = trim_blank_lines(&constant.doc.join("\n"));
    lines.extend(doc.lines().map(clean_line));
    lines.push(format!("{}{}", pad, QUOTES));
    lines.join("\n")
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

fn padded(pad: &str, line: &str) -> String {
    if line.trim().is_empty() {
        String::new()
    } else {
        format!("{}{}", pad, line.trim_end())
    }
}

fn clean_line(line: &str) -> String {
    line.trim_end().to_string()
}
