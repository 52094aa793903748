//! Class declarations, from a per-class page or written out by the generator.

use super::{is_blank, is_heading_underline, is_underline, Rst2Pyi, TITLE_UNDERLINE};
use crate::error::{ParseError, Result};
use crate::model::{ClassId, ClassRecord, Declaration};

/// Arguments of [`Rst2Pyi::class_from_file`].
#[derive(Debug, Clone, Default)]
pub struct ClassFileArgs<'a> {
    pub pre_str: Option<&'a str>,
    /// Toctree entry naming the class page, e.g. `machine.Pin.rst`.
    pub old: &'a str,
    /// Base class or generic parameters, rendered as `class Name(super_class):`.
    pub super_class: Option<&'a str>,
    pub extra_docs: Vec<String>,
    /// Placed first among the class's declarations.
    pub post_doc: &'a str,
    pub end: Option<&'a str>,
}

impl<'a> ClassFileArgs<'a> {
    pub fn new(old: &'a str) -> Self {
        ClassFileArgs {
            old,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn pre_str(mut self, pre_str: &'a str) -> Self {
        self.pre_str = Some(pre_str);
        self
    }

    #[must_use]
    pub fn super_class(mut self, super_class: &'a str) -> Self {
        self.super_class = Some(super_class);
        self
    }

    #[must_use]
    pub fn extra_docs(mut self, extra_docs: Vec<String>) -> Self {
        self.extra_docs = extra_docs;
        self
    }

    #[must_use]
    pub fn post_doc(mut self, post_doc: &'a str) -> Self {
        self.post_doc = post_doc;
        self
    }

    #[must_use]
    pub fn end(mut self, end: impl Into<Option<&'a str>>) -> Self {
        self.end = end.into();
        self
    }
}

/// Arguments of [`Rst2Pyi::class_`].
#[derive(Debug, Clone, Default)]
pub struct ClassArgs<'a> {
    pub pre_str: Option<&'a str>,
    /// Class signature without the `class ` keyword, e.g. `Partition` or `Timer(Generic[T])`.
    pub name: &'a str,
    pub extra_docs: Vec<String>,
    pub end: Option<&'a str>,
}

impl<'a> ClassArgs<'a> {
    pub fn new(name: &'a str, end: impl Into<Option<&'a str>>) -> Self {
        ClassArgs {
            name,
            end: end.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn pre_str(mut self, pre_str: &'a str) -> Self {
        self.pre_str = Some(pre_str);
        self
    }

    #[must_use]
    pub fn extra_docs(mut self, extra_docs: Vec<String>) -> Self {
        self.extra_docs = extra_docs;
        self
    }
}

impl Rst2Pyi {
    /// Declare a class documented on its own page.
    ///
    /// Lines are skipped up to the toctree entry `old`, whose page is then loaded on top of the
    /// remaining input. The page's prose up to `end` (or its first sub-heading) becomes the
    /// class docstring.
    pub fn class_from_file(&mut self, args: ClassFileArgs<'_>) -> Result<ClassId> {
        self.require_module()?;
        let file = args.old.trim();

        let mut found = false;
        while let Ok(line) = self.cursor.pull() {
            if line.trim_start().starts_with(file) {
                found = true;
                break;
            }
        }
        if !found {
            return Err(ParseError::marker(format!("class file `{}`", file)));
        }
        let url = format!("{}{}", self.base_url, file);
        self.cursor.push_url(self.fetcher.as_ref(), &url)?;

        let name = class_name_from_file(file)?;
        let signature = match args.super_class {
            Some(super_class) => format!("{}({})", name, super_class),
            None => name.to_string(),
        };

        self.consume_line(
            |s| !s.is_empty() && is_underline(s, TITLE_UNDERLINE),
            "the class title underline",
            true,
        )?;
        self.consume_blank_line(false)?;

        let mut doc = Vec::new();
        while let Ok(line) = self.cursor.pull() {
            if self.is_end(&line, args.end) {
                break;
            }
            if is_heading_underline(&line) {
                super::docs::drop_sub_heading(&mut doc)?;
                break;
            }
            doc.push(format!("   {}", line));
        }
        if doc.iter().all(|line| is_blank(line)) {
            return Err(ParseError::EmptyDocumentation {
                end: format!("the first sub-heading of `{}`", file),
            });
        }
        doc.extend(args.extra_docs);

        let mut class = ClassRecord::new(format!("class {}:", signature));
        class.pre = args.pre_str.map(str::to_string);
        class.doc = doc;
        if !args.post_doc.trim().is_empty() {
            class
                .imports_vars
                .push(Declaration::Raw(args.post_doc.to_string()));
        }
        tracing::debug!(class = %signature, %url, "declared class from file");
        Ok(self.pyi.push_class(class))
    }

    /// Declare a class whose documentation is the notes up to `end`.
    pub fn class_(&mut self, args: ClassArgs<'_>) -> Result<ClassId> {
        self.require_module()?;
        let mut doc = self.extras(3, args.end, "")?;
        doc.extend(args.extra_docs);

        let mut class = ClassRecord::new(format!("class {}:", args.name));
        class.pre = args.pre_str.map(str::to_string);
        class.doc = doc;
        tracing::debug!(class = args.name, "declared class");
        Ok(self.pyi.push_class(class))
    }
}

/// `machine.Pin.rst` → `Pin`.
fn class_name_from_file(file: &str) -> Result<&str> {
    let parts: Vec<&str> = file.split('.').collect();
    match parts.as_slice() {
        [_, name, _, ..] if !name.is_empty() => Ok(*name),
        _ => Err(ParseError::BadClassFile(file.to_string())),
    }
}
