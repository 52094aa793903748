//! Document tree for one generated stub module — format-agnostic.
//!
//! Declarations stay structured (signature, doc lines, scope) until a renderer turns them into
//! text; hand-written additions are carried as [`Declaration::Raw`].

use serde::Serialize;

/// Handle to a class inside a [`Pyi`], returned when the class is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassId(pub(crate) usize);

impl ClassId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One generated stub module.
#[derive(Debug, Default, Clone, Serialize)]
pub struct Pyi {
    /// Module docstring lines.
    pub doc: Vec<String>,
    /// Imports, module constants and free functions, in emission order.
    #[serde(rename = "declarations")]
    pub imports_vars_defs: Vec<Declaration>,
    /// Classes in declaration order.
    pub classes: Vec<ClassRecord>,
}

impl Pyi {
    pub fn push_class(&mut self, class: ClassRecord) -> ClassId {
        self.classes.push(class);
        ClassId(self.classes.len() - 1)
    }

    pub fn class(&self, id: ClassId) -> Option<&ClassRecord> {
        self.classes.get(id.0)
    }

    pub fn class_mut(&mut self, id: ClassId) -> Option<&mut ClassRecord> {
        self.classes.get_mut(id.0)
    }

    /// The most recently declared class, if any.
    pub fn last_class(&self) -> Option<ClassId> {
        self.classes.len().checked_sub(1).map(ClassId)
    }

    pub fn clear(&mut self) {
        self.doc.clear();
        self.imports_vars_defs.clear();
        self.classes.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.doc.is_empty() && self.imports_vars_defs.is_empty() && self.classes.is_empty()
    }
}

/// One class block.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ClassRecord {
    /// Emitted verbatim on the line before the class definition.
    pub pre: Option<String>,
    /// e.g. `class Pin:`; must be set before rendering.
    pub class_def: String,
    /// Docstring lines, already indented into the class body.
    pub doc: Vec<String>,
    /// Class constants and inner aliases.
    pub imports_vars: Vec<Declaration>,
    /// Methods.
    pub defs: Vec<Declaration>,
}

impl ClassRecord {
    pub fn new(class_def: impl Into<String>) -> Self {
        ClassRecord {
            class_def: class_def.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Declaration {
    /// Text inserted as-is.
    Raw(String),
    Function(FunctionDecl),
    Constant(ConstantDecl),
}

/// A free function or method: one signature plus its docstring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionDecl {
    pub pre: Option<String>,
    pub signature: String,
    /// One of several signatures sharing a docstring.
    pub overload: bool,
    /// Leading spaces; 0 for module scope.
    pub indent: usize,
    pub doc: Vec<String>,
}

/// A typed constant plus its docstring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstantDecl {
    pub name: String,
    /// Fully wrapped annotation, e.g. `ClassVar[int]`.
    pub type_hint: String,
    pub indent: usize,
    pub doc: Vec<String>,
}

/// Where a constant lives and how it is annotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VarKind {
    /// Class-scoped, annotated `ClassVar[T]`.
    #[default]
    Class,
    /// Class-scoped, annotated `T`.
    Instance,
    /// File-scoped, annotated `T`.
    Module,
}

impl VarKind {
    pub fn type_hint(self, type_: &str, final_: bool) -> String {
        if final_ {
            return format!("Final[{}]", type_);
        }
        match self {
            VarKind::Class => format!("ClassVar[{}]", type_),
            VarKind::Instance | VarKind::Module => type_.to_string(),
        }
    }

    pub fn indent(self) -> usize {
        match self {
            VarKind::Module => 0,
            VarKind::Class | VarKind::Instance => 3,
        }
    }
}

/// The rendered signature(s) for one documented declaration.
///
/// A list renders as `@overload` variants sharing the same docstring; an empty value means the
/// declaration is deliberately not emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signatures {
    One(String),
    Overloads(Vec<String>),
}

impl Signatures {
    pub fn is_suppressed(&self) -> bool {
        match self {
            Signatures::One(sig) => sig.trim().is_empty(),
            Signatures::Overloads(sigs) => sigs.is_empty(),
        }
    }
}

impl From<&str> for Signatures {
    fn from(sig: &str) -> Self {
        Signatures::One(sig.to_string())
    }
}

impl From<String> for Signatures {
    fn from(sig: String) -> Self {
        Signatures::One(sig)
    }
}

impl From<Vec<String>> for Signatures {
    fn from(sigs: Vec<String>) -> Self {
        Signatures::Overloads(sigs)
    }
}

impl From<Vec<&str>> for Signatures {
    fn from(sigs: Vec<&str>) -> Self {
        Signatures::Overloads(sigs.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Signatures {
    fn from(sigs: [&str; N]) -> Self {
        Signatures::Overloads(sigs.iter().map(|s| s.to_string()).collect())
    }
}
