//! Go Source AST
//!
//! Generated method bodies are built as data, not text, so that nested
//! builders can compose fragments (a list loop wrapping whatever the element
//! rule produced) and the printer decides layout once at the end.
//!
//! # Modules
//!
//! - [`ast`]: expressions, statements, function and file declarations
//! - [`emitter`]: output abstraction (in-memory string)
//! - [`printer`]: gofmt-style rendering with import collection
//!
//! Types inside the AST are [`genconv_types::Ty`] values; the printer renders
//! them relative to the output package, qualifying foreign named types and
//! collecting their import paths.

pub mod ast;
pub mod emitter;
pub mod printer;

pub use ast::{BinaryOp, Decl, Expr, File, FuncDecl, Param, Stmt};
pub use emitter::{Emitter, StringEmitter};
pub use printer::{print_file, print_func, Printer};
