//! Maps.

use genconv_ast::{Expr, Stmt};
use genconv_diagnostic::{type_mismatch, PathFrame};
use genconv_types::TypeView;

use crate::{BuildResult, Dispatch, ExprHandle, MethodContext, Rule};

/// `map[K1]V1 -> map[K2]V2`, entry by entry. A nil map stays nil.
pub struct MapRule;

impl Rule for MapRule {
    fn name(&self) -> &'static str {
        "map"
    }

    fn matches(&self, source: TypeView<'_>, target: TypeView<'_>) -> bool {
        source.is_map() && target.is_map()
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
        let (Some(source_key), Some(source_value), Some(target_key), Some(target_value)) = (
            source_ty.key_type(),
            source_ty.value_type(),
            target_ty.key_type(),
            target_ty.value_type(),
        ) else {
            return Err(type_mismatch(source_ty, target_ty));
        };

        let target_map = ctx.name(&target_ty.id());
        let (key, value) = ctx.map_names();

        let (mut block, new_key) = dispatch
            .build(
                ctx,
                ExprHandle::variable(Expr::ident(&key)),
                source_key,
                target_key,
            )
            .map_err(|err| {
                err.lift(PathFrame::new(
                    "[key]",
                    source_key.to_string(),
                    target_key.to_string(),
                ))
            })?;
        let (value_stmts, new_value) = dispatch
            .build(
                ctx,
                ExprHandle::variable(Expr::ident(&value)),
                source_value,
                target_value,
            )
            .map_err(|err| {
                err.lift(PathFrame::new(
                    "[value]",
                    source_value.to_string(),
                    target_value.to_string(),
                ))
            })?;
        block.extend(value_stmts);
        block.push(Stmt::assign(
            Expr::ident(&target_map).index(new_key.into_expr()),
            new_value.into_expr(),
        ));

        let source_expr = source.into_expr();
        let target_type = target_ty.ty().clone();
        let allocate = Expr::make(target_type.clone(), vec![Expr::len(source_expr.clone())]);
        let stmts = vec![
            Stmt::var(&target_map, target_type),
            Stmt::if_then(
                source_expr.clone().ne(Expr::Nil),
                vec![
                    Stmt::assign(Expr::ident(&target_map), allocate),
                    Stmt::for_range(key, value, source_expr, block),
                ],
            ),
        ];
        Ok((stmts, ExprHandle::variable(Expr::ident(target_map))))
    }
}
