//! Type model for genconv.
//!
//! Conversions are synthesized from the *structure* of Go types, so this
//! crate models exactly the shapes the builder dispatches on:
//!
//! - [`Ty`]: a type expression (basic, named, slice, array, map, pointer, struct)
//! - [`TypeTable`]: the loaded packages; maps named types to their underlying
//!   definitions and records package-level functions for delegate lookup
//! - [`TypeView`]: a read-only descriptor pairing a `Ty` with its table, answering
//!   shape queries (`is_list`, `element_type`, `is_struct`, ...) through named types
//!
//! # Identity
//!
//! A type's identity is its canonical string form (`Display` on [`Ty`]). Named
//! types render as `path.Name`, everything else structurally. Registries key on
//! this string; it never depends on how the type was written in source.

mod ident;
mod table;
mod ty;
mod view;

pub use ident::{is_exported, lower_first, package_name, upper_first};
pub use table::{FuncSig, Object, TypeTable};
pub use ty::{BasicKind, Field, NamedType, StructType, Ty};
pub use view::TypeView;
