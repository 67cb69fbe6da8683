//! Same-kind primitives.

use genconv_ast::Expr;
use genconv_types::TypeView;

use crate::{BuildResult, Dispatch, ExprHandle, MethodContext, Rule};

/// `int -> int`, `type ID int -> int`, `string -> type Name string`.
///
/// Unnamed to unnamed passes the source through untouched. As soon as either
/// side is named a Go conversion `Target(source)` is required.
pub struct BasicRule;

impl Rule for BasicRule {
    fn name(&self) -> &'static str {
        "basic"
    }

    fn matches(&self, source: TypeView<'_>, target: TypeView<'_>) -> bool {
        match (source.basic_kind(), target.basic_kind()) {
            (Some(source), Some(target)) => source == target,
            _ => false,
        }
    }

    fn build(
        &self,
        _dispatch: &mut dyn Dispatch,
        _ctx: &mut MethodContext,
        source: ExprHandle,
        source_ty: TypeView<'_>,
        target_ty: TypeView<'_>,
    ) -> BuildResult {
        if !source_ty.is_named() && !target_ty.is_named() {
            return Ok((Vec::new(), source));
        }
        let converted = Expr::conversion(target_ty.ty().clone(), source.into_expr());
        Ok((Vec::new(), ExprHandle::other(converted)))
    }
}
