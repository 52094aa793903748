//! Documentation body accumulation shared by every declaration parser.

use super::{is_blank, is_heading_underline, Rst2Pyi, DEFINITIONS};
use crate::error::{ParseError, Result};

impl Rst2Pyi {
    /// Pull documentation lines until any of `ends` matches or the cursor runs dry.
    ///
    /// An underlined sub-heading met on the way is dropped along with the blank line above it,
    /// and the paragraph that follows is skipped up to the next definition.
    pub(crate) fn collect_doc(&mut self, ends: &[Option<&str>]) -> Result<Vec<String>> {
        let mut doc = Vec::new();
        while let Ok(line) = self.cursor.pull() {
            if ends.iter().any(|end| self.is_end(&line, *end)) {
                break;
            }
            if is_heading_underline(&line) {
                drop_sub_heading(&mut doc)?;
                self.skip_heading_paragraph()?;
                continue;
            }
            doc.push(line);
        }
        if doc.iter().all(|line| is_blank(line)) {
            return Err(ParseError::EmptyDocumentation {
                end: describe_ends(ends),
            });
        }
        Ok(doc)
    }

    fn skip_heading_paragraph(&mut self) -> Result<()> {
        while let Ok(line) = self.cursor.pull() {
            if self.is_end(&line, Some(DEFINITIONS)) {
                return Ok(());
            }
        }
        Err(ParseError::marker(
            "a definition after the sub-heading paragraph",
        ))
    }

    /// Lines up to `end`, each indented by `indent`, after `first_line`.
    ///
    /// `None` reads to the end of the cursor; a marker that never appears is an error.
    pub(crate) fn extras(
        &mut self,
        indent: usize,
        end: Option<&str>,
        first_line: &str,
    ) -> Result<Vec<String>> {
        let pad = " ".repeat(indent);
        let mut extras = vec![first_line.to_string()];
        loop {
            let Ok(line) = self.cursor.pull() else {
                if let Some(end) = end {
                    return Err(ParseError::marker(format!("end line `{}`", end)));
                }
                return Ok(extras);
            };
            if self.is_end(&line, end) {
                return Ok(extras);
            }
            extras.push(format!("{}{}", pad, line));
        }
    }

    /// Raw documentation up to `end`, for attaching to a later declaration.
    pub fn extra_docs(&mut self, indent: usize, end: Option<&str>) -> Result<Vec<String>> {
        self.require_module()?;
        self.extras(indent, end, "")
    }

    /// Notes up to `end`, indented into a class body.
    pub fn extra_notes(&mut self, end: Option<&str>, first_line: &str) -> Result<Vec<String>> {
        self.require_module()?;
        self.extras(3, end, first_line)
    }
}

/// Remove the heading text and the blank line above it from the tail of `doc`.
pub(crate) fn drop_sub_heading(doc: &mut Vec<String>) -> Result<()> {
    match doc.pop() {
        Some(heading) if !is_blank(&heading) => {}
        Some(_) => {
            return Err(ParseError::MalformedHeading {
                detail: "expected heading text above the underline, got a blank line".into(),
            })
        }
        None => {
            return Err(ParseError::MalformedHeading {
                detail: "underline with no heading text above it".into(),
            })
        }
    }
    match doc.pop() {
        Some(blank) if is_blank(&blank) => Ok(()),
        Some(other) => Err(ParseError::MalformedHeading {
            detail: format!("expected a blank line above the heading, got `{}`", other),
        }),
        None => Err(ParseError::MalformedHeading {
            detail: "heading at the very start of the documentation".into(),
        }),
    }
}

/// Strip leading blank lines, append `extra_docs` and line up the indentation.
pub(crate) fn finish_doc(
    mut doc: Vec<String>,
    extra_docs: &[String],
    extra_doc_indent: usize,
) -> Vec<String> {
    let leading = doc.iter().take_while(|line| is_blank(line)).count();
    doc.drain(..leading);
    let pad = " ".repeat(extra_doc_indent);
    doc.extend(extra_docs.iter().map(|line| {
        if is_blank(line) {
            String::new()
        } else {
            format!("{}{}", pad, line)
        }
    }));
    correct_indentation(&mut doc);
    doc
}

/// Pad every non-blank line that is indented less than the first non-blank line up to it.
///
/// Applying this twice changes nothing the second time.
pub fn correct_indentation(lines: &mut [String]) {
    let Some(reference) = lines
        .iter()
        .find(|line| !is_blank(line))
        .map(|line| leading_spaces(line))
    else {
        return;
    };
    for line in lines.iter_mut() {
        if is_blank(line) {
            continue;
        }
        let indent = leading_spaces(line);
        if indent < reference {
            line.insert_str(0, &" ".repeat(reference - indent));
        }
    }
}

fn leading_spaces(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

fn describe_ends(ends: &[Option<&str>]) -> String {
    let named: Vec<String> = ends
        .iter()
        .flatten()
        .map(|end| format!("`{}`", end))
        .collect();
    if named.is_empty() {
        "end-of-file".to_string()
    } else {
        named.join(" or ")
    }
}
