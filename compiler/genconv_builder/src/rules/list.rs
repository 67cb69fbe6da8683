//! Slices and arrays into slices.

use genconv_ast::{Expr, Stmt};
use genconv_diagnostic::{type_mismatch, PathFrame};
use genconv_types::TypeView;

use crate::{BuildResult, Dispatch, ExprHandle, MethodContext, Rule};

/// `[]S -> []T` and `[N]S -> []T`, element by element.
///
/// ```go
/// var tList []T
/// if source != nil {
///     tList = make([]T, len(source))
/// }
/// for i := 0; i < len(source); i++ {
///     tList[i] = <convert source[i]>
/// }
/// ```
///
/// A nil slice stays nil. Arrays are never nil, so the target is allocated
/// directly at the array's length.
pub struct ListRule;

impl Rule for ListRule {
    fn name(&self) -> &'static str {
        "list"
    }

    fn matches(&self, source: TypeView<'_>, target: TypeView<'_>) -> bool {
        source.is_list() && target.is_list() && !target.is_fixed_length()
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
        let (Some(source_elem), Some(target_elem)) =
            (source_ty.element_type(), target_ty.element_type())
        else {
            return Err(type_mismatch(source_ty, target_ty));
        };

        let target_slice = ctx.name(&target_ty.id());
        let index = ctx.index();
        let source_expr = source.into_expr();
        let indexed = ExprHandle::variable(source_expr.clone().index(Expr::ident(&index)));

        let (mut body, element) = dispatch
            .build(ctx, indexed, source_elem, target_elem)
            .map_err(|err| {
                err.lift(PathFrame::new(
                    "[]",
                    source_elem.to_string(),
                    target_elem.to_string(),
                ))
            })?;
        body.push(Stmt::assign(
            Expr::ident(&target_slice).index(Expr::ident(&index)),
            element.into_expr(),
        ));

        let target_type = target_ty.ty().clone();
        let allocate = Expr::make(target_type.clone(), vec![Expr::len(source_expr.clone())]);
        let mut stmts = if source_ty.is_fixed_length() {
            vec![Stmt::define(&target_slice, allocate)]
        } else {
            vec![
                Stmt::var(&target_slice, target_type),
                Stmt::if_then(
                    source_expr.clone().ne(Expr::Nil),
                    vec![Stmt::assign(Expr::ident(&target_slice), allocate)],
                ),
            ]
        };
        stmts.push(Stmt::for_index(index, Expr::len(source_expr), body));

        Ok((stmts, ExprHandle::variable(Expr::ident(target_slice))))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::test_helpers::{render, source, CallDispatch, InlineDispatch};
    use genconv_types::{Field, Ty, TypeTable};
    use pretty_assertions::assert_eq;

    #[test]
    fn slice_is_nil_preserving() {
        let table = TypeTable::new();
        let (s, t) = (Ty::slice(Ty::INT), Ty::slice(Ty::INT));
        let mut ctx = MethodContext::new("[]int");
        let built = ListRule
            .build(
                &mut InlineDispatch::default(),
                &mut ctx,
                source(),
                table.view(&s),
                table.view(&t),
            )
            .unwrap();
        assert!(built.1.is_variable());
        assert_eq!(
            render(&built),
            "var intList []int\n\
             if source != nil {\n\
             \tintList = make([]int, len(source))\n\
             }\n\
             for i := 0; i < len(source); i++ {\n\
             \tintList[i] = source[i]\n\
             }\n\
             => intList"
        );
    }

    #[test]
    fn array_source_allocates_directly() {
        let table = TypeTable::new();
        let (s, t) = (Ty::array(4, Ty::INT), Ty::slice(Ty::INT));
        let mut ctx = MethodContext::new("[]int");
        let built = ListRule
            .build(
                &mut InlineDispatch::default(),
                &mut ctx,
                source(),
                table.view(&s),
                table.view(&t),
            )
            .unwrap();
        let text = render(&built);
        assert!(!text.contains("nil"));
        assert_eq!(
            text,
            "intList := make([]int, len(source))\n\
             for i := 0; i < len(source); i++ {\n\
             \tintList[i] = source[i]\n\
             }\n\
             => intList"
        );
    }

    #[test]
    fn element_conversion_is_dispatched() {
        let mut table = TypeTable::new();
        let foo = table.define("app", "Foo", Ty::structure(vec![Field::new("A", Ty::INT)]));
        let bar = table.define("app", "Bar", Ty::structure(vec![Field::new("A", Ty::INT)]));
        let (s, t) = (Ty::slice(foo), Ty::slice(bar));
        let mut ctx = MethodContext::new("[]app.Bar");
        let built = ListRule
            .build(&mut CallDispatch, &mut ctx, source(), table.view(&s), table.view(&t))
            .unwrap();
        assert_eq!(
            render(&built),
            "var barList []app.Bar\n\
             if source != nil {\n\
             \tbarList = make([]app.Bar, len(source))\n\
             }\n\
             for i := 0; i < len(source); i++ {\n\
             \tbarList[i] = c.FooToBar(source[i])\n\
             }\n\
             => barList"
        );
    }

    #[test]
    fn nested_lists_use_fresh_names() {
        let table = TypeTable::new();
        let s = Ty::slice(Ty::slice(Ty::INT));
        let mut ctx = MethodContext::new("[][]int");
        let mut dispatch = InlineDispatch::default();
        let built = ListRule
            .build(&mut dispatch, &mut ctx, source(), table.view(&s), table.view(&s))
            .unwrap();
        let text = render(&built);
        assert!(text.contains("for j := 0; j < len(source[i]); j++ {"));
        assert!(text.contains("intList[j] = source[i][j]"));
        assert!(text.contains("intListList[i] = intList"));
        assert_eq!(dispatch.calls.len(), 2);
    }

    #[test]
    fn element_mismatch_is_lifted() {
        let table = TypeTable::new();
        let (s, t) = (Ty::slice(Ty::INT), Ty::slice(Ty::STRING));
        let mut ctx = MethodContext::new("[]string");
        let err = ListRule
            .build(
                &mut InlineDispatch::default(),
                &mut ctx,
                source(),
                table.view(&s),
                table.view(&t),
            )
            .unwrap_err();
        assert_eq!(err.breadcrumb(), "[] : int -> string");
        assert_eq!(err.kind.to_string(), "TypeMismatch: Cannot convert int to string");
    }

    #[test]
    fn fixed_target_does_not_match() {
        let table = TypeTable::new();
        let (s, t) = (Ty::slice(Ty::INT), Ty::array(3, Ty::INT));
        assert!(!ListRule.matches(table.view(&s), table.view(&t)));
        assert!(ListRule.matches(table.view(&t), table.view(&s)));
    }
}
