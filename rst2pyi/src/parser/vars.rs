//! `.. data::` constant declarations.

use super::docs::finish_doc;
use super::{is_blank, Rst2Pyi, DEFINITIONS};
use crate::error::{ParseError, Result};
use crate::model::{ClassId, ConstantDecl, Declaration, VarKind};
use regex::Regex;
use std::sync::LazyLock;

static RE_DATA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)\.\.\s+data::\s*(.*)$").unwrap());

static RE_ETC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^etc\.?$").unwrap());

/// Directive option under the declaration, e.g. `   :noindex:`.
static RE_OPTION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s+:[\w-]+:").unwrap());

/// Width of `.. data:: `, the margin continuation lines are aligned to.
const DATA_PREFIX_WIDTH: usize = 10;

/// Arguments of [`Rst2Pyi::vars`].
#[derive(Debug, Clone)]
pub struct VarsArgs<'a> {
    /// Expected names, in page order, e.g. `[".. data:: Pin.IN", "Pin.OUT"]`.
    pub old: Vec<String>,
    pub type_: &'a str,
    pub kind: VarKind,
    pub final_: bool,
    pub extra_docs: Vec<String>,
    /// `None` reads to the end of the page, and tolerates the page ending before any
    /// declaration.
    pub end: Option<&'a str>,
    pub class: Option<ClassId>,
}

impl<'a> VarsArgs<'a> {
    pub fn new<S: AsRef<str>>(old: &[S]) -> Self {
        VarsArgs {
            old: old.iter().map(|s| s.as_ref().to_string()).collect(),
            type_: "int",
            kind: VarKind::Class,
            final_: false,
            extra_docs: Vec::new(),
            end: Some(DEFINITIONS),
            class: None,
        }
    }

    #[must_use]
    pub fn type_(mut self, type_: &'a str) -> Self {
        self.type_ = type_;
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: VarKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn final_(mut self, final_: bool) -> Self {
        self.final_ = final_;
        self
    }

    #[must_use]
    pub fn extra_docs(mut self, extra_docs: Vec<String>) -> Self {
        self.extra_docs = extra_docs;
        self
    }

    #[must_use]
    pub fn end(mut self, end: impl Into<Option<&'a str>>) -> Self {
        self.end = end.into();
        self
    }

    #[must_use]
    pub fn class(mut self, class: ClassId) -> Self {
        self.class = Some(class);
        self
    }
}

impl Rst2Pyi {
    /// Emit one typed constant per name of the next `.. data::` block.
    ///
    /// Only blank lines may precede the block. The names on the page must equal `old` exactly;
    /// returns how many constants were emitted.
    pub fn vars(&mut self, args: VarsArgs<'_>) -> Result<usize> {
        self.require_module()?;
        let expected = data_names(&args.old);

        let (indent, first) = loop {
            let Ok(line) = self.cursor.pull() else {
                if args.end.is_none() {
                    tracing::debug!(?expected, "no data declaration before end of page");
                    return Ok(0);
                }
                return Err(ParseError::marker("a `.. data::` declaration"));
            };
            if is_blank(&line) {
                continue;
            }
            if let Some(caps) = RE_DATA.captures(&line) {
                break (caps[1].len(), caps[2].to_string());
            }
            if !self.is_end(&line, args.end) {
                self.cursor.push_line(line.as_str());
            }
            return Err(ParseError::unexpected("a `.. data::` declaration", line));
        };

        let margin = indent + DATA_PREFIX_WIDTH;
        let mut declared = vec![first];
        while let Ok(line) = self.cursor.pull() {
            if is_blank(&line) {
                break;
            }
            if RE_OPTION.is_match(&line) {
                continue;
            }
            let continued = match RE_DATA.captures(&line) {
                Some(caps) if caps[1].len() == indent => Some(caps[2].to_string()),
                _ if leading_spaces(&line) >= margin => Some(line.trim().to_string()),
                _ => None,
            };
            match continued {
                Some(names) => declared.push(names),
                None => {
                    self.cursor.push_line(line);
                    break;
                }
            }
        }
        let found = data_names(&declared);
        if found != expected {
            return Err(ParseError::NameMismatch { expected, found });
        }

        let doc = self.collect_doc(&[Some(DEFINITIONS), args.end])?;
        let doc = finish_doc(doc, &args.extra_docs, 0);
        let type_hint = args.kind.type_hint(args.type_, args.final_);
        let decls: Vec<Declaration> = found
            .iter()
            .map(|qualified| {
                Declaration::Constant(ConstantDecl {
                    name: qualified.rsplit('.').next().unwrap_or(qualified).to_string(),
                    type_hint: type_hint.clone(),
                    indent: args.kind.indent(),
                    doc: doc.clone(),
                })
            })
            .collect();
        let emitted = decls.len();
        tracing::trace!(names = ?found, "constants");
        match args.kind {
            VarKind::Module => self.pyi.imports_vars_defs.extend(decls),
            VarKind::Class | VarKind::Instance => self
                .class_target(args.class, "constants")?
                .imports_vars
                .extend(decls),
        }
        Ok(emitted)
    }
}

/// Declared names with the directive, `etc.` placeholders and option tokens removed.
fn data_names<S: AsRef<str>>(entries: &[S]) -> Vec<String> {
    entries
        .iter()
        .flat_map(|entry| {
            let entry = entry.as_ref();
            let body = RE_DATA
                .captures(entry)
                .and_then(|caps| caps.get(2))
                .map_or(entry, |m| m.as_str());
            body.split(',')
                .map(str::trim)
                .filter(|token| {
                    !token.is_empty() && !RE_ETC.is_match(token) && !token.starts_with(':')
                })
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}

fn leading_spaces(line: &str) -> usize {
    line.len() - line.trim_start().len()
}
