//! rst2pyi — generate typed `.pyi` stubs from MicroPython's reStructuredText library docs.
//!
//! The [`Rst2Pyi`] engine walks a page line by line, guided by a per-module generator in
//! [`modules`] that states which declarations it expects and what their typed signatures are.
//! Anything on the page the generator does not account for aborts the run.

pub mod config;
pub mod cursor;
pub mod error;
pub mod fetch;
pub mod model;
pub mod modules;
pub mod parser;
pub mod render;

pub use config::Config;
pub use cursor::LineCursor;
pub use error::{Exhausted, ParseError};
pub use fetch::{DefaultFetcher, Fetch, MemoryFetcher};
pub use model::{ClassId, Pyi, Signatures, VarKind};
pub use parser::{
    ClassArgs, ClassFileArgs, CommonDefsArgs, DefArgs, ModuleArgs, Rst2Pyi, VarsArgs,
};
