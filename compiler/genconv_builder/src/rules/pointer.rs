//! Pointers on one or both sides.

use genconv_ast::{Expr, Stmt};
use genconv_diagnostic::{type_mismatch, PathFrame};
use genconv_types::TypeView;

use crate::{BuildResult, Dispatch, ExprHandle, MethodContext, Rule};

/// `*S -> *T`. A nil source pointer yields a nil target pointer.
///
/// ```go
/// var pT *T
/// if source != nil {
///     t := <convert *source>
///     pT = &t
/// }
/// ```
pub struct PointerRule;

impl Rule for PointerRule {
    fn name(&self) -> &'static str {
        "pointer"
    }

    fn matches(&self, source: TypeView<'_>, target: TypeView<'_>) -> bool {
        source.is_pointer() && target.is_pointer()
    }

    #[tracing::instrument(level = "trace", skip_all, fields(source = %source_ty, target = %target_ty))]
    fn build(
        &self,
        dispatch: &mut dyn Dispatch,
        ctx: &mut MethodContext,
        source: ExprHandle,
        source_ty: TypeView<'_>,
        target_ty: TypeView<'_>,
    ) -> BuildResult {
        let (Some(source_inner), Some(target_inner)) =
            (source_ty.pointee_type(), target_ty.pointee_type())
        else {
            return Err(type_mismatch(source_ty, target_ty));
        };

        let outer = ctx.name(&target_ty.id());
        let source_expr = source.into_expr();
        let pointee = ExprHandle::other(source_expr.clone().deref());
        let (mut block, inner) = dispatch
            .build(ctx, pointee, source_inner, target_inner)
            .map_err(|err| {
                err.lift(PathFrame::new(
                    "*",
                    source_inner.to_string(),
                    target_inner.to_string(),
                ))
            })?;

        if inner.is_variable() {
            block.push(Stmt::assign(Expr::ident(&outer), inner.into_expr().addr()));
        } else {
            let temp = ctx.name(&target_inner.id());
            block.push(Stmt::define(&temp, inner.into_expr()));
            block.push(Stmt::assign(Expr::ident(&outer), Expr::ident(temp).addr()));
        }

        let stmts = vec![
            Stmt::var(&outer, target_ty.ty().clone()),
            Stmt::if_then(source_expr.ne(Expr::Nil), block),
        ];
        Ok((stmts, ExprHandle::variable(Expr::ident(outer))))
    }
}

/// `S -> *T`: convert to `T`, bind, and take the address.
///
/// The result is always bound to a fresh local first so the target never
/// aliases memory reachable from the source.
pub struct TargetPointerRule;

impl Rule for TargetPointerRule {
    fn name(&self) -> &'static str {
        "target-pointer"
    }

    fn matches(&self, source: TypeView<'_>, target: TypeView<'_>) -> bool {
        !source.is_pointer() && target.is_pointer()
    }

    #[tracing::instrument(level = "trace", skip_all, fields(source = %source_ty, target = %target_ty))]
    fn build(
        &self,
        dispatch: &mut dyn Dispatch,
        ctx: &mut MethodContext,
        source: ExprHandle,
        source_ty: TypeView<'_>,
        target_ty: TypeView<'_>,
    ) -> BuildResult {
        let Some(target_inner) = target_ty.pointee_type() else {
            return Err(type_mismatch(source_ty, target_ty));
        };

        let (mut stmts, inner) = dispatch
            .build(ctx, source, source_ty, target_inner)
            .map_err(|err| {
                err.lift(PathFrame::new(
                    "*",
                    source_ty.to_string(),
                    target_inner.to_string(),
                ))
            })?;

        let temp = ctx.name(&target_inner.id());
        stmts.push(Stmt::define(&temp, inner.into_expr()));
        Ok((stmts, ExprHandle::other(Expr::ident(temp).addr())))
    }
}
