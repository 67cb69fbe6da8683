//! Type-directed conversion rules.
//!
//! A conversion between two types is built by the first [`Rule`] in
//! [`RULES`] whose `matches` accepts the pair. Rules never look at nested
//! types themselves: they destructure one level and hand every inner pair
//! back to a [`Dispatch`], which may reuse a conversion method, extract a new
//! one, or run the rules again.
//!
//! # Architecture
//!
//! - [`Namer`]: unique identifiers, per method body and per generation run
//! - [`MethodContext`]: per-method state (local names, field mapping, ignores)
//! - [`ExprHandle`]: a built expression plus whether it may be re-evaluated
//! - [`Rule`] implementations, one per structural shape, in [`rules`]
//! - [`RuleRegistry`]: ordered lookup over the static rule instances
//!
//! The dispatcher itself lives with the method registry in `genconv`, which
//! is why rules see it only through the [`Dispatch`] trait.

mod context;
mod handle;
mod namer;
mod registry;
pub mod rules;

pub use context::MethodContext;
pub use handle::ExprHandle;
pub use namer::Namer;
pub use registry::{build_with_rules, RuleRegistry, RULES};

use genconv_ast::Stmt;
use genconv_diagnostic::BuildError;
use genconv_types::TypeView;

/// Statements to run before the result expression is valid, and the result.
pub type Built = (Vec<Stmt>, ExprHandle);

/// Outcome of building one conversion.
pub type BuildResult = Result<Built, BuildError>;

/// The recursive entry point rules call for inner type pairs.
pub trait Dispatch {
    /// Convert `source`, of type `source_ty`, into `target_ty`.
    fn build(
        &mut self,
        ctx: &mut MethodContext,
        source: ExprHandle,
        source_ty: TypeView<'_>,
        target_ty: TypeView<'_>,
    ) -> BuildResult;
}

/// Strategy for one structural shape.
///
/// Rules are zero-sized and stored as `&'static dyn Rule`; see [`RULES`] for
/// the order they are tried in. Order matters: the first match wins.
pub trait Rule: Send + Sync {
    /// Short name used in trace output.
    fn name(&self) -> &'static str;

    /// Whether this rule converts `source` into `target`. Pure.
    fn matches(&self, source: TypeView<'_>, target: TypeView<'_>) -> bool;

    /// Emit the conversion, recursing through `dispatch` for inner types.
    ///
    /// Only called after `matches` returned true for the same pair.
    fn build(
        &self,
        dispatch: &mut dyn Dispatch,
        ctx: &mut MethodContext,
        source: ExprHandle,
        source_ty: TypeView<'_>,
        target_ty: TypeView<'_>,
    ) -> BuildResult;
}

#[cfg(test)]
mod test_helpers;
