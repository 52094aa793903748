//! The RST → stub engine — a pushback line scanner driven by generator code.
//!
//! A generator declares, in page order, what it expects to find:
//!
//! 1. [`Rst2Pyi::module`] loads `<base>/<name>.rst` and takes the synopsis and module prose.
//! 2. Free functions, classes, methods and constants follow via [`Rst2Pyi::def_`],
//!    [`Rst2Pyi::class_from_file`], [`Rst2Pyi::class_`],
//!    [`Rst2Pyi::defs_with_common_description`] and [`Rst2Pyi::vars`], with the `consume_*`
//!    family stepping over anything that has no stub counterpart.
//! 3. [`Rst2Pyi::write`] checks every line was accounted for, writes the stub and resets.
//!
//! Every block ends at an *end marker*; the line that matched is pushed back so the next
//! operation sees it. Any drift between the generator and the page is a [`ParseError`].

pub mod classes;
pub mod defs;
pub mod docs;
pub mod vars;

pub use classes::{ClassArgs, ClassFileArgs};
pub use defs::{CommonDefsArgs, DefArgs};
pub use vars::VarsArgs;

use crate::config::{Config, DEFAULT_BASE_URL};
use crate::cursor::LineCursor;
use crate::error::{ParseError, Result};
use crate::fetch::{DefaultFetcher, Fetch};
use crate::model::{ClassId, ClassRecord, Declaration, Pyi};
use crate::render::{self, Renderer};
use std::fs;
use std::path::PathBuf;

/// Default end marker: the start of any directive.
pub const DEFINITIONS: &str = ".. ";
/// Directives that belong to the block they appear in and never end it.
pub const NOTE: &str = ".. note::";
pub const ADMONITION: &str = ".. admonition::";

const TITLE_UNDERLINE: char = '=';
const HEADER_UNDERLINE: char = '-';
const SUB_HEADER_UNDERLINE: char = '~';

/// Written at the top of every stub's declarations.
pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const COPYRIGHT: &str = concat!("Copyright ", env!("CARGO_PKG_AUTHORS"));
pub const LICENSE: &str = env!("CARGO_PKG_LICENSE");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Remaining lines quoted when a module is written before its page is fully consumed.
const UNCONSUMED_PREVIEW: usize = 20;

pub struct Rst2Pyi {
    output_dir: PathBuf,
    base_url: String,
    name: Option<String>,
    pyi: Pyi,
    cursor: LineCursor,
    fetcher: Box<dyn Fetch>,
    renderer: Box<dyn Renderer>,
}

/// Arguments of [`Rst2Pyi::module`].
#[derive(Debug, Clone)]
pub struct ModuleArgs<'a> {
    /// Page name, e.g. `gc` for `gc.rst`.
    pub name: &'a str,
    /// Text of the synopsis line.
    pub old: &'a str,
    /// Replacement for the synopsis in the docstring.
    pub new: Option<&'a str>,
    /// Imports and aliases the stub needs.
    pub post_doc: &'a str,
    pub end: Option<&'a str>,
}

impl<'a> ModuleArgs<'a> {
    pub fn new(name: &'a str, old: &'a str) -> Self {
        ModuleArgs {
            name,
            old,
            new: None,
            post_doc: "",
            end: Some(DEFINITIONS),
        }
    }

    #[must_use]
    pub fn new_synopsis(mut self, new: &'a str) -> Self {
        self.new = Some(new);
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

impl Rst2Pyi {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Rst2Pyi {
            output_dir: output_dir.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            name: None,
            pyi: Pyi::default(),
            cursor: LineCursor::new(),
            fetcher: Box::new(DefaultFetcher),
            renderer: Box::new(render::pyi::PyiRenderer),
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Rst2Pyi::new(config.output_dir.clone())
            .with_base_url(&config.base_url)
            .with_renderer(render::create_renderer(&config.format)?))
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = crate::config::normalize_base_url(base_url);
        self
    }

    #[must_use]
    pub fn with_fetcher(mut self, fetcher: Box<dyn Fetch>) -> Self {
        self.fetcher = fetcher;
        self
    }

    #[must_use]
    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Name of the open module, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn pyi(&self) -> &Pyi {
        &self.pyi
    }

    pub fn pyi_mut(&mut self) -> &mut Pyi {
        &mut self.pyi
    }

    pub fn cursor(&self) -> &LineCursor {
        &self.cursor
    }

    /// For fixing up pages that are easier to repair than to parse.
    pub fn cursor_mut(&mut self) -> &mut LineCursor {
        &mut self.cursor
    }

    // -- End markers ------------------------------------------------------------

    /// Test `line` against `end`, pushing it back when it matches.
    ///
    /// Leading whitespace is ignored and `end` only has to be a prefix. `None` never matches,
    /// and notes and admonitions never end a block.
    pub fn is_end(&mut self, line: &str, end: Option<&str>) -> bool {
        let Some(end) = end else {
            return false;
        };
        let stripped = line.trim_start();
        if stripped.starts_with(NOTE) || stripped.starts_with(ADMONITION) {
            return false;
        }
        if stripped.starts_with(end) {
            self.cursor.push_line(line);
            return true;
        }
        false
    }

    // -- Consumers --------------------------------------------------------------

    /// Consume one line satisfying `test`.
    ///
    /// With `and_preceding_lines` any number of non-matching lines are skipped first;
    /// otherwise the very next line must match.
    pub fn consume_line(
        &mut self,
        test: impl Fn(&str) -> bool,
        msg: &str,
        and_preceding_lines: bool,
    ) -> Result<()> {
        if and_preceding_lines {
            while let Ok(line) = self.cursor.pull() {
                if test(&line) {
                    tracing::trace!(line = %line, "consumed {}", msg);
                    return Ok(());
                }
            }
            return Err(ParseError::marker(msg));
        }
        let line = self.cursor.pull().map_err(|_| ParseError::marker(msg))?;
        if !test(&line) {
            return Err(ParseError::unexpected(msg, line));
        }
        Ok(())
    }

    pub fn consume_title_line(&mut self, and_preceding_lines: bool) -> Result<()> {
        self.require_module()?;
        self.consume_line(
            |s| is_underline(s, TITLE_UNDERLINE),
            "a title-underline line",
            and_preceding_lines,
        )
    }

    /// `-` underline.
    pub fn consume_header_line(&mut self, and_preceding_lines: bool) -> Result<()> {
        self.require_module()?;
        self.consume_line(
            |s| is_underline(s, HEADER_UNDERLINE),
            "a header-underline line",
            and_preceding_lines,
        )
    }

    /// `~` underline, the third heading level.
    pub fn consume_sub_header_line(&mut self, and_preceding_lines: bool) -> Result<()> {
        self.require_module()?;
        self.consume_line(
            |s| is_underline(s, SUB_HEADER_UNDERLINE),
            "a sub-header-underline line",
            and_preceding_lines,
        )
    }

    pub fn consume_blank_line(&mut self, and_preceding_lines: bool) -> Result<()> {
        self.require_module()?;
        self.consume_line(is_blank, "a blank line", and_preceding_lines)
    }

    pub fn consume_containing_line(&mut self, text: &str, and_preceding_lines: bool) -> Result<()> {
        self.require_module()?;
        let msg = format!("a line containing `{}`", text);
        self.consume_line(|s| s.contains(text), &msg, and_preceding_lines)
    }

    pub fn consume_synopsis_line(&mut self, synopsis: &str, and_preceding_lines: bool) -> Result<()> {
        let msg = format!("synopsis `{}`", synopsis);
        self.consume_line(|s| s.contains(synopsis), &msg, and_preceding_lines)
    }

    /// Skip lines up to, but not including, `end`.
    pub fn consume_up_to(&mut self, end: &str) -> Result<()> {
        self.require_module()?;
        while let Ok(line) = self.cursor.pull() {
            if self.is_end(&line, Some(end)) {
                return Ok(());
            }
        }
        Err(ParseError::marker(format!("end line `{}`", end)))
    }

    // -- Module lifecycle -------------------------------------------------------

    /// Open a module: load its page, take the synopsis and the prose up to `end`.
    pub fn module(&mut self, args: ModuleArgs<'_>) -> Result<()> {
        if let Some(open) = &self.name {
            return Err(ParseError::ModuleOpen(open.clone()));
        }
        let url = format!("{}{}.rst", self.base_url, args.name);
        tracing::debug!(module = args.name, %url, "opening module");
        self.cursor.push_url(self.fetcher.as_ref(), &url)?;
        self.name = Some(args.name.to_string());

        self.consume_synopsis_line(args.old, true)?;
        let mut prose = Vec::new();
        while let Ok(line) = self.cursor.pull() {
            if self.is_end(&line, args.end) {
                break;
            }
            prose.push(line);
        }

        let new = args.new.unwrap_or(args.old);
        self.pyi.doc.extend([
            new.to_string(),
            String::new(),
            "Descriptions taken from:".to_string(),
            format!("`{}`, etc.", url),
            String::new(),
        ]);
        self.pyi
            .doc
            .extend(prose.join("\n").trim().lines().map(str::to_string));
        self.pyi
            .imports_vars_defs
            .push(Declaration::Raw(preamble(args.post_doc)));
        Ok(())
    }

    /// Render the current module without writing or resetting it.
    pub fn preview(&self) -> Result<String> {
        self.renderer.render(&self.pyi)
    }

    /// Write `<name>.<ext>` (and `u<name>.<ext>` when `u_also`), then reset for the next
    /// module. Fails if any input line is left unconsumed.
    pub fn write(&mut self, u_also: bool) -> Result<Vec<PathBuf>> {
        let name = self.require_module()?.to_string();
        if !self.cursor.is_empty() {
            return Err(ParseError::UnconsumedInput {
                module: name,
                remaining: self.cursor.upcoming(UNCONSUMED_PREVIEW),
            });
        }

        let text = self.renderer.render(&self.pyi)?;
        let ext = self.renderer.file_extension();
        let mut paths = vec![self.output_dir.join(format!("{}.{}", name, ext))];
        if u_also {
            paths.push(self.output_dir.join(format!("u{}.{}", name, ext)));
        }
        for path in &paths {
            fs::write(path, &text).map_err(|source| ParseError::Io {
                path: path.clone(),
                source,
            })?;
            tracing::info!(module = %name, path = %path.display(), "wrote stub");
        }

        self.name = None;
        self.pyi.clear();
        Ok(paths)
    }

    // -- Hand-written additions -------------------------------------------------

    /// Append lines to the module docstring.
    pub fn push_module_doc(&mut self, lines: Vec<String>) -> Result<()> {
        self.require_module()?;
        self.pyi.doc.extend(lines);
        Ok(())
    }

    /// Append a verbatim block to the module declarations.
    pub fn push_module_text(&mut self, text: &str) -> Result<()> {
        self.require_module()?;
        self.pyi
            .imports_vars_defs
            .push(Declaration::Raw(text.to_string()));
        Ok(())
    }

    /// Append lines to a class docstring.
    pub fn push_class_doc(&mut self, class: ClassId, lines: Vec<String>) -> Result<()> {
        self.require_module()?;
        self.class_target(Some(class), "documentation")?
            .doc
            .extend(lines);
        Ok(())
    }

    /// Append a verbatim block to a class's methods.
    pub fn push_class_text(&mut self, class: ClassId, text: &str) -> Result<()> {
        self.require_module()?;
        self.class_target(Some(class), "methods")?
            .defs
            .push(Declaration::Raw(text.to_string()));
        Ok(())
    }

    // -- Internals --------------------------------------------------------------

    fn require_module(&self) -> Result<&str> {
        self.name.as_deref().ok_or(ParseError::NoModule)
    }

    /// `class`, or the most recently declared class.
    fn class_target(&mut self, class: Option<ClassId>, what: &str) -> Result<&mut ClassRecord> {
        let no_class = || ParseError::NoClass {
            what: what.to_string(),
        };
        let id = class.or_else(|| self.pyi.last_class()).ok_or_else(no_class)?;
        self.pyi.class_mut(id).ok_or_else(no_class)
    }
}

fn preamble(post_doc: &str) -> String {
    format!(
        "__author__ = \"{}\"\n__copyright__ = \"{}\"\n__license__ = \"{}\"\n__version__ = \"{}\"\n\n\n{}",
        AUTHOR, COPYRIGHT, LICENSE, VERSION, post_doc
    )
}

/// Every character is `c`; vacuously true for an empty line.
fn is_underline(line: &str, c: char) -> bool {
    line.chars().all(|ch| ch == c)
}

/// A non-empty `-` or `~` underline marking a sub-heading.
fn is_heading_underline(line: &str) -> bool {
    !line.is_empty()
        && (is_underline(line, HEADER_UNDERLINE) || is_underline(line, SUB_HEADER_UNDERLINE))
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::fetch::MemoryFetcher;
    use tempfile::TempDir;

    pub(crate) const BASE: &str = "mem://docs/";

    /// Engine over in-memory pages, writing into a fresh temporary directory.
    pub(crate) fn engine(pages: &[(&str, &str)]) -> (Rst2Pyi, TempDir) {
        let dir = TempDir::new().unwrap();
        let mut fetcher = MemoryFetcher::new();
        for (name, body) in pages {
            fetcher.insert(format!("{}{}", BASE, name), *body);
        }
        let engine = Rst2Pyi::new(dir.path())
            .with_base_url(BASE)
            .with_fetcher(Box::new(fetcher));
        (engine, dir)
    }

    const DEMO: &str = "\
.. module:: demo
   :synopsis: a demo module

A demo module.

.. function:: foo(x)

   Computes foo of x.

.. ";

    #[test]
    fn end_marker_pushes_back_on_match() {
        let (mut shed, _dir) = engine(&[]);
        assert!(shed.is_end("   .. method:: x()", Some(DEFINITIONS)));
        assert_eq!(shed.cursor().peek(), "   .. method:: x()");
        assert!(!shed.is_end("plain text", Some(DEFINITIONS)));
        assert_eq!(shed.cursor().len(), 1);
        assert!(!shed.is_end(".. method:: x()", None));
        assert_eq!(shed.cursor().len(), 1);
    }

    #[test]
    fn end_marker_test_is_repeatable() {
        let (mut shed, _dir) = engine(&[]);
        let line = "Methods";
        assert!(shed.is_end(line, Some("Methods")));
        let pulled = shed.cursor_mut().pull().unwrap();
        assert!(shed.is_end(&pulled, Some("Methods")));
        assert_eq!(shed.cursor().upcoming(5), vec!["Methods"]);
    }

    #[test]
    fn notes_and_admonitions_never_end_a_block() {
        let (mut shed, _dir) = engine(&[]);
        assert!(!shed.is_end("   .. note::", Some(DEFINITIONS)));
        assert!(!shed.is_end(".. note:: careful", Some(".. note")));
        assert!(!shed.is_end(".. admonition:: Difference to CPython", Some(DEFINITIONS)));
        assert!(shed.cursor().is_empty());
    }

    #[test]
    fn operations_before_module_fail() {
        let (mut shed, _dir) = engine(&[]);
        assert!(matches!(
            shed.consume_blank_line(false),
            Err(ParseError::NoModule)
        ));
        assert!(matches!(shed.write(false), Err(ParseError::NoModule)));
    }

    #[test]
    fn module_twice_without_write_fails() {
        let (mut shed, _dir) = engine(&[("demo.rst", DEMO)]);
        shed.module(ModuleArgs::new("demo", "a demo module")).unwrap();
        let err = shed
            .module(ModuleArgs::new("demo", "a demo module"))
            .unwrap_err();
        assert!(matches!(err, ParseError::ModuleOpen(ref name) if name == "demo"));
    }

    #[test]
    fn module_takes_synopsis_and_prose() {
        let (mut shed, _dir) = engine(&[("demo.rst", DEMO)]);
        shed.module(
            ModuleArgs::new("demo", "a demo module")
                .post_doc("from typing import Any")
                .end(".."),
        )
        .unwrap();
        let doc = shed.pyi().doc.join("\n");
        assert!(doc.starts_with("a demo module\n"));
        assert!(doc.contains("`mem://docs/demo.rst`, etc."));
        assert!(doc.ends_with("A demo module."));
        assert_eq!(shed.cursor().peek(), ".. function:: foo(x)");
        match &shed.pyi().imports_vars_defs[0] {
            Declaration::Raw(text) => {
                assert!(text.starts_with("__author__ = \""));
                assert!(text.ends_with("from typing import Any"));
            }
            other => panic!("expected preamble, got {:?}", other),
        }
    }

    #[test]
    fn missing_synopsis_is_fatal() {
        let (mut shed, _dir) = engine(&[("demo.rst", DEMO)]);
        let err = shed
            .module(ModuleArgs::new("demo", "not the synopsis"))
            .unwrap_err();
        assert!(err.to_string().contains("not the synopsis"));
    }

    #[test]
    fn consumers_check_the_next_line() {
        let (mut shed, _dir) = engine(&[("demo.rst", DEMO)]);
        shed.module(ModuleArgs::new("demo", "a demo module")).unwrap();
        shed.cursor_mut().push_lines(&["Title", "=====", "", "Heading", "~~~~~~~", "-----"]);
        assert!(matches!(
            shed.consume_title_line(false),
            Err(ParseError::UnexpectedLine { .. })
        ));
        shed.consume_title_line(false).unwrap();
        shed.consume_blank_line(false).unwrap();
        shed.consume_sub_header_line(true).unwrap();
        shed.consume_header_line(false).unwrap();
        shed.consume_containing_line("foo(x)", true).unwrap();
        assert_eq!(shed.cursor().peek(), "");
    }

    #[test]
    fn hand_written_class_additions() {
        let (mut shed, _dir) = engine(&[("demo.rst", DEMO)]);
        shed.module(ModuleArgs::new("demo", "a demo module")).unwrap();
        let demo = shed
            .pyi_mut()
            .push_class(crate::model::ClassRecord::new("class Demo:"));
        shed.push_class_doc(demo, vec!["   Added by hand.".into()])
            .unwrap();
        shed.push_class_text(demo, "   def __len__(self) -> int: ...")
            .unwrap();

        let class = shed.pyi().class(demo).unwrap();
        assert_eq!(class.doc, vec!["   Added by hand.".to_string()]);
        assert!(matches!(&class.defs[..], [Declaration::Raw(text)] if text.contains("__len__")));
    }

    #[test]
    fn consume_up_to_stops_before_end() {
        let (mut shed, _dir) = engine(&[("demo.rst", DEMO)]);
        shed.module(ModuleArgs::new("demo", "a demo module")).unwrap();
        shed.consume_up_to("Computes").unwrap();
        assert_eq!(shed.cursor().peek(), "   Computes foo of x.");
        assert!(matches!(
            shed.consume_up_to("Nowhere"),
            Err(ParseError::MarkerNotFound { .. })
        ));
    }

    #[test]
    fn write_refuses_unconsumed_lines() {
        let (mut shed, dir) = engine(&[("demo.rst", DEMO)]);
        shed.module(ModuleArgs::new("demo", "a demo module")).unwrap();
        let err = shed.write(false).unwrap_err();
        match err {
            ParseError::UnconsumedInput { module, remaining } => {
                assert_eq!(module, "demo");
                assert_eq!(remaining[0], ".. function:: foo(x)");
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(!dir.path().join("demo.pyi").exists());
    }

    #[test]
    fn end_to_end_demo_module() {
        let (mut shed, dir) = engine(&[("demo.rst", DEMO)]);
        shed.module(ModuleArgs::new("demo", "a demo module").end(".."))
            .unwrap();
        shed.def_(
            DefArgs::new(".. function:: foo(x)", "def foo(x: int) -> int")
                .indent(0)
                .end(".."),
        )
        .unwrap();
        assert_eq!(shed.cursor().peek(), ".. ");
        shed.consume_containing_line("..", false).unwrap();

        let written = shed.write(true).unwrap();
        assert_eq!(written.len(), 2);
        let stub = fs::read_to_string(dir.path().join("demo.pyi")).unwrap();
        let alias = fs::read_to_string(dir.path().join("udemo.pyi")).unwrap();
        assert_eq!(stub, alias);
        assert!(stub.starts_with("\"\"\"\na demo module\n"));
        assert!(stub.contains("A demo module.\n\"\"\"\n"));
        assert!(stub.contains(
            "def foo(x: int) -> int:\n   \"\"\"\n   Computes foo of x.\n   \"\"\"\n"
        ));

        assert_eq!(shed.name(), None);
        assert!(shed.pyi().is_empty());
        assert!(shed.cursor().is_empty());
    }

    #[test]
    fn engine_is_reusable_after_write() {
        let (mut shed, dir) = engine(&[("demo.rst", DEMO)]);
        for _ in 0..2 {
            shed.module(ModuleArgs::new("demo", "a demo module")).unwrap();
            shed.consume_up_to(".. ").unwrap();
            shed.consume_containing_line(".. ", true).unwrap();
            shed.consume_containing_line(".. ", true).unwrap();
            shed.write(false).unwrap();
        }
        assert!(dir.path().join("demo.pyi").exists());
    }

    #[test]
    fn preview_does_not_reset() {
        let (mut shed, _dir) = engine(&[("demo.rst", DEMO)]);
        shed.module(ModuleArgs::new("demo", "a demo module")).unwrap();
        let text = shed.preview().unwrap();
        assert!(text.contains("A demo module."));
        assert_eq!(shed.name(), Some("demo"));
    }

    #[test]
    fn underline_helpers() {
        assert!(is_underline("=====", TITLE_UNDERLINE));
        assert!(is_underline("", TITLE_UNDERLINE));
        assert!(!is_underline("==-==", TITLE_UNDERLINE));
        assert!(is_heading_underline("---"));
        assert!(is_heading_underline("~~~"));
        assert!(!is_heading_underline(""));
        assert!(!is_heading_underline("-~-"));
    }
}
