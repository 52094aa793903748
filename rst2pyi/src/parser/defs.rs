//! Function and method declarations.

use super::docs::finish_doc;
use super::{is_blank, Rst2Pyi, DEFINITIONS};
use crate::error::{ParseError, Result};
use crate::model::{ClassId, Declaration, FunctionDecl, Signatures};
use std::collections::HashMap;

/// Arguments of [`Rst2Pyi::def_`].
#[derive(Debug, Clone)]
pub struct DefArgs<'a> {
    pub pre_str: Option<&'a str>,
    /// Marker line of the declaration, e.g. `.. method:: Pin.value([x])`.
    pub old: &'a str,
    pub new: Signatures,
    pub extra_docs: Vec<String>,
    /// 0 for a free function, otherwise a method of `class`.
    pub indent: usize,
    pub extra_doc_indent: usize,
    pub end: Option<&'a str>,
    /// Target class; the last declared class when `None`.
    pub class: Option<ClassId>,
}

impl<'a> DefArgs<'a> {
    pub fn new(old: &'a str, new: impl Into<Signatures>) -> Self {
        DefArgs {
            pre_str: None,
            old,
            new: new.into(),
            extra_docs: Vec::new(),
            indent: 3,
            extra_doc_indent: 0,
            end: Some(DEFINITIONS),
            class: None,
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

    #[must_use]
    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn extra_doc_indent(mut self, extra_doc_indent: usize) -> Self {
        self.extra_doc_indent = extra_doc_indent;
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

/// Arguments of [`Rst2Pyi::defs_with_common_description`].
#[derive(Debug, Clone)]
pub struct CommonDefsArgs<'a> {
    pub pre_str: Option<&'a str>,
    /// Prefix of every line in the run, e.g. `.. method:: Pin.`.
    pub cmd: &'a str,
    /// Text after `cmd` → signature(s). An empty value suppresses that declaration.
    pub old2new: HashMap<String, Signatures>,
    pub end: Option<&'a str>,
    pub indent: usize,
    pub extra_doc_indent: usize,
    pub class: Option<ClassId>,
}

impl<'a> CommonDefsArgs<'a> {
    pub fn new<K, V>(cmd: &'a str, old2new: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Signatures>,
    {
        CommonDefsArgs {
            pre_str: None,
            cmd,
            old2new: old2new
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            end: None,
            indent: 3,
            extra_doc_indent: 0,
            class: None,
        }
    }

    #[must_use]
    pub fn pre_str(mut self, pre_str: &'a str) -> Self {
        self.pre_str = Some(pre_str);
        self
    }

    #[must_use]
    pub fn end(mut self, end: impl Into<Option<&'a str>>) -> Self {
        self.end = end.into();
        self
    }

    #[must_use]
    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn extra_doc_indent(mut self, extra_doc_indent: usize) -> Self {
        self.extra_doc_indent = extra_doc_indent;
        self
    }

    #[must_use]
    pub fn class(mut self, class: ClassId) -> Self {
        self.class = Some(class);
        self
    }
}

impl Rst2Pyi {
    /// Emit one function or method (or one overload set) from its documentation block.
    ///
    /// Returns the number of declarations emitted: one per signature, none when `new` is empty.
    pub fn def_(&mut self, args: DefArgs<'_>) -> Result<usize> {
        self.require_module()?;
        self.consume_containing_line(args.old.trim(), true)?;
        self.consume_line(
            |s| is_blank(s) || s.trim_start().starts_with(":noindex:"),
            "a blank line or `:noindex:` line",
            false,
        )?;
        let doc = self.collect_doc(&[args.end])?;
        let doc = finish_doc(doc, &args.extra_docs, args.extra_doc_indent);
        if args.new.is_suppressed() {
            tracing::debug!(old = args.old.trim(), "declaration suppressed");
            return Ok(0);
        }
        self.add_defs(args.pre_str, &args.new, args.indent, doc, args.class)
    }

    /// Emit a run of declarations sharing one description.
    ///
    /// Every line of the run starts with `cmd` (continuation lines are aligned under it) and
    /// the run ends at the first blank line.
    pub fn defs_with_common_description(&mut self, args: CommonDefsArgs<'_>) -> Result<usize> {
        self.require_module()?;
        let cmd = args.cmd;

        let first = loop {
            let line = self
                .cursor
                .pull()
                .map_err(|_| ParseError::marker(format!("a `{}` line", cmd)))?;
            if !is_blank(&line) {
                break line;
            }
        };
        if !first.starts_with(cmd) {
            return Err(ParseError::unexpected(format!("a `{}` line", cmd), first));
        }
        self.cursor.push_line(first);

        let mut signatures: Vec<&Signatures> = Vec::new();
        while let Ok(line) = self.cursor.pull() {
            if is_blank(&line) {
                break;
            }
            let key = line.get(cmd.len()..).unwrap_or_default().trim_end();
            let new = args
                .old2new
                .get(key)
                .ok_or_else(|| ParseError::UnknownDeclaration {
                    cmd: cmd.to_string(),
                    name: key.to_string(),
                })?;
            tracing::trace!(name = key, "common-description declaration");
            if !new.is_suppressed() {
                signatures.push(new);
            }
        }
        if signatures.is_empty() {
            return Err(ParseError::NoSignatures {
                cmd: cmd.to_string(),
            });
        }

        let doc = self.collect_doc(&[args.end])?;
        let doc = finish_doc(doc, &[], args.extra_doc_indent);
        let mut emitted = 0;
        for new in signatures {
            emitted += self.add_defs(args.pre_str, new, args.indent, doc.clone(), args.class)?;
        }
        Ok(emitted)
    }

    fn add_defs(
        &mut self,
        pre_str: Option<&str>,
        new: &Signatures,
        indent: usize,
        doc: Vec<String>,
        class: Option<ClassId>,
    ) -> Result<usize> {
        let pre = pre_str.map(str::to_string);
        let decls: Vec<Declaration> = match new {
            Signatures::One(signature) => vec![Declaration::Function(FunctionDecl {
                pre,
                signature: signature.clone(),
                overload: false,
                indent,
                doc,
            })],
            Signatures::Overloads(signatures) => signatures
                .iter()
                .map(|signature| {
                    Declaration::Function(FunctionDecl {
                        pre: pre.clone(),
                        signature: signature.clone(),
                        overload: true,
                        indent,
                        doc: doc.clone(),
                    })
                })
                .collect(),
        };
        let emitted = decls.len();
        if indent == 0 {
            self.pyi.imports_vars_defs.extend(decls);
        } else {
            self.class_target(class, "methods")?.defs.extend(decls);
        }
        Ok(emitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tests::engine;
    use crate::parser::{ClassArgs, ModuleArgs};
    use pretty_assertions::assert_eq;

    const PAGE: &str = "\
.. module:: demo
   :synopsis: a demo module

Functions
---------
";

    fn opened(body: &[&str]) -> (Rst2Pyi, tempfile::TempDir) {
        let (mut shed, dir) = engine(&[("demo.rst", PAGE)]);
        shed.module(ModuleArgs::new("demo", "a demo module").end("Functions"))
            .unwrap();
        shed.consume_header_line(true).unwrap();
        shed.cursor_mut().push_lines(body);
        (shed, dir)
    }

    fn functions(decls: &[Declaration]) -> Vec<&FunctionDecl> {
        decls
            .iter()
            .filter_map(|d| match d {
                Declaration::Function(f) => Some(f),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn overload_list_fans_out_with_shared_doc() {
        let (mut shed, _dir) = opened(&[
            ".. function:: threshold([amount])",
            "",
            "   Set or query the threshold.",
        ]);
        let emitted = shed
            .def_(
                DefArgs::new(
                    ".. function:: threshold([amount])",
                    ["def threshold() -> int", "def threshold(amount: int) -> None"],
                )
                .indent(0),
            )
            .unwrap();
        assert_eq!(emitted, 2);
        let defs = functions(&shed.pyi().imports_vars_defs);
        assert_eq!(defs.len(), 2);
        assert!(defs.iter().all(|f| f.overload));
        assert_eq!(defs[0].doc, defs[1].doc);
        assert_eq!(defs[0].doc, vec!["   Set or query the threshold."]);
        assert_eq!(defs[1].signature, "def threshold(amount: int) -> None");
    }

    #[test]
    fn method_goes_to_target_class() {
        let (mut shed, _dir) = opened(&[
            "",
            ".. method:: Foo.bar(x)",
            "   :noindex:",
            "",
            "   Bars.",
            "",
            ".. method:: Foo.baz()",
        ]);
        let foo = shed.class_(ClassArgs::new("Foo", ".. method::")).unwrap();
        shed.class_(ClassArgs::new("Other", ".. method::")).unwrap();
        shed.def_(
            DefArgs::new(".. method:: Foo.bar(x)", "def bar(self, x: int) -> None")
                .pre_str("# noinspection PyMethodMayBeStatic")
                .class(foo),
        )
        .unwrap();
        let defs = functions(&shed.pyi().class(foo).unwrap().defs);
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].indent, 3);
        assert_eq!(defs[0].pre.as_deref(), Some("# noinspection PyMethodMayBeStatic"));
        assert_eq!(defs[0].doc, vec!["   Bars.", ""]);
        assert_eq!(shed.cursor().peek(), ".. method:: Foo.baz()");
    }

    #[test]
    fn extra_docs_are_appended_and_aligned() {
        let (mut shed, _dir) = opened(&[
            ".. function:: f()",
            "",
            "   Does f.",
            ".. end",
        ]);
        shed.def_(
            DefArgs::new(".. function:: f()", "def f() -> None")
                .indent(0)
                .extra_docs(vec!["See g.".into()])
                .extra_doc_indent(3),
        )
        .unwrap();
        let defs = functions(&shed.pyi().imports_vars_defs);
        assert_eq!(defs[0].doc, vec!["   Does f.", "   See g."]);
    }

    #[test]
    fn method_without_class_is_an_error() {
        let (mut shed, _dir) = opened(&[".. method:: m()", "", "   M."]);
        let err = shed
            .def_(DefArgs::new(".. method:: m()", "def m(self) -> None"))
            .unwrap_err();
        assert!(matches!(err, ParseError::NoClass { .. }));
    }

    #[test]
    fn def_without_documentation_fails() {
        let (mut shed, _dir) = opened(&[".. function:: f()", "", ".. function:: g()"]);
        let err = shed
            .def_(DefArgs::new(".. function:: f()", "def f() -> None").indent(0))
            .unwrap_err();
        assert!(matches!(err, ParseError::EmptyDocumentation { .. }));
    }

    #[test]
    fn def_requires_blank_or_noindex_after_marker() {
        let (mut shed, _dir) = opened(&[".. function:: f()", "   Text straight away."]);
        let err = shed
            .def_(DefArgs::new(".. function:: f()", "def f() -> None").indent(0))
            .unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedLine { .. }));
    }

    #[test]
    fn empty_signature_consumes_but_emits_nothing() {
        let (mut shed, _dir) = opened(&[".. function:: f()", "", "   Gone."]);
        let emitted = shed
            .def_(DefArgs::new(".. function:: f()", "").indent(0))
            .unwrap();
        assert_eq!(emitted, 0);
        assert!(functions(&shed.pyi().imports_vars_defs).is_empty());
        assert!(shed.cursor().is_empty());
    }

    #[test]
    fn common_description_suppresses_empty_entries() {
        let (mut shed, _dir) = opened(&[
            ".. function:: a()",
            ".. function:: b()",
            "",
            "   Shared description.",
        ]);
        let emitted = shed
            .defs_with_common_description(
                CommonDefsArgs::new(
                    ".. function:: ",
                    [("a()", "def a() -> None"), ("b()", "")],
                )
                .indent(0),
            )
            .unwrap();
        assert_eq!(emitted, 1);
        let defs = functions(&shed.pyi().imports_vars_defs);
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].signature, "def a() -> None");
        assert_eq!(defs[0].doc, vec!["   Shared description."]);
    }

    #[test]
    fn common_description_accepts_aligned_continuation_lines() {
        let (mut shed, _dir) = opened(&[
            ".. method:: Pin.low()",
            "            Pin.high()",
            "",
            "   Set the pin level.",
        ]);
        let pin = shed.class_(ClassArgs::new("Pin", ".. method::")).unwrap();
        let emitted = shed
            .defs_with_common_description(
                CommonDefsArgs::new(
                    ".. method:: Pin.",
                    [
                        ("low()", Signatures::from("def low(self) -> None")),
                        ("high()", Signatures::from("def high(self) -> None")),
                    ],
                )
                .class(pin),
            )
            .unwrap();
        assert_eq!(emitted, 2);
        let defs = functions(&shed.pyi().class(pin).unwrap().defs);
        assert!(defs.iter().all(|f| !f.overload));
        assert_eq!(defs[1].signature, "def high(self) -> None");
    }

    #[test]
    fn common_description_fans_out_overloads_with_pre_text() {
        let (mut shed, _dir) = opened(&[
            ".. method:: WLAN.config('param')",
            ".. method:: WLAN.config(param=value, ...)",
            "",
            "   Get or set general network interface parameters.",
            "",
            "   Only one parameter can be queried at a time.",
        ]);
        let wlan = shed.class_(ClassArgs::new("WLAN", ".. method::")).unwrap();
        let emitted = shed
            .defs_with_common_description(
                CommonDefsArgs::new(
                    ".. method:: WLAN.",
                    [
                        (
                            "config('param')",
                            Signatures::from([
                                "def config(self, param: str, /) -> Any",
                                "def config(self, param: bytes, /) -> Any",
                            ]),
                        ),
                        (
                            "config(param=value, ...)",
                            Signatures::from(["def config(self, **kwargs: Any) -> None"]),
                        ),
                    ],
                )
                .pre_str("# noinspection PyShadowingNames")
                .class(wlan),
            )
            .unwrap();
        assert_eq!(emitted, 3);
        assert!(shed.cursor().is_empty());

        let defs = functions(&shed.pyi().class(wlan).unwrap().defs);
        assert_eq!(defs.len(), 3);
        assert!(defs.iter().all(|f| f.overload));
        assert!(defs
            .iter()
            .all(|f| f.pre.as_deref() == Some("# noinspection PyShadowingNames")));
        assert_eq!(defs[1].signature, "def config(self, param: bytes, /) -> Any");
        assert_eq!(defs[2].signature, "def config(self, **kwargs: Any) -> None");
        assert_eq!(
            defs[2].doc,
            vec![
                "   Get or set general network interface parameters.",
                "",
                "   Only one parameter can be queried at a time.",
            ]
        );
        assert_eq!(defs[0].doc, defs[2].doc);
    }

    #[test]
    fn common_description_stops_at_end_marker() {
        let (mut shed, _dir) = opened(&[
            "",
            ".. function:: a()",
            ".. function:: b()",
            "",
            "   Shared.",
            "",
            "Constants",
            "---------",
        ]);
        shed.defs_with_common_description(
            CommonDefsArgs::new(
                ".. function:: ",
                [("a()", "def a() -> None"), ("b()", "def b() -> None")],
            )
            .indent(0)
            .end("Constants"),
        )
        .unwrap();
        assert_eq!(shed.cursor().peek(), "Constants");
        let defs = functions(&shed.pyi().imports_vars_defs);
        assert_eq!(defs[0].doc, vec!["   Shared.", ""]);
    }

    #[test]
    fn unknown_name_in_run_is_drift() {
        let (mut shed, _dir) = opened(&[".. function:: c()", "", "   Text."]);
        let err = shed
            .defs_with_common_description(
                CommonDefsArgs::new(".. function:: ", [("a()", "def a() -> None")]).indent(0),
            )
            .unwrap_err();
        match err {
            ParseError::UnknownDeclaration { name, .. } => assert_eq!(name, "c()"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn run_of_only_suppressed_entries_fails() {
        let (mut shed, _dir) = opened(&[".. function:: b()", "", "   Text."]);
        let err = shed
            .defs_with_common_description(
                CommonDefsArgs::new(".. function:: ", [("b()", "")]).indent(0),
            )
            .unwrap_err();
        assert!(matches!(err, ParseError::NoSignatures { .. }));
    }
}
