//! Structs, field by field.

use genconv_ast::{Expr, Stmt};
use genconv_diagnostic::{missing_source_field, unexported_field, PathFrame};
use genconv_types::{is_exported, TypeView};

use crate::{BuildResult, Dispatch, ExprHandle, MethodContext, Rule};

/// Struct to struct. Every exported target field must be fed by a source
/// field of the same name, or by the source field the method maps onto it,
/// unless the method ignores it.
///
/// ```go
/// var bar Bar
/// bar.Name = source.Name
/// bar.ID = source.Identifier
/// ```
pub struct StructRule;

impl Rule for StructRule {
    fn name(&self) -> &'static str {
        "struct"
    }

    fn matches(&self, source: TypeView<'_>, target: TypeView<'_>) -> bool {
        source.is_struct() && target.is_struct()
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
        let name = ctx.name(&target_ty.id());
        let source_expr = source.into_expr();
        let table = target_ty.table();
        let mut stmts = vec![Stmt::var(&name, target_ty.ty().clone())];

        for target_field in target_ty.fields() {
            if ctx.is_ignored(&target_field.name) {
                tracing::trace!(field = %target_field.name, "ignored");
                continue;
            }
            if !is_exported(&target_field.name) {
                return Err(unexported_field(&target_field.name, target_ty));
            }

            let source_name = ctx.source_field_for(&target_field.name).to_string();
            let Some((source_field, source_field_ty)) = source_ty.field(&source_name) else {
                return Err(missing_source_field(&target_field.name, source_ty));
            };
            let target_field_ty = table.view(&target_field.ty);

            let selector = ExprHandle::variable(source_expr.clone().dot(&source_field.name));
            let (field_stmts, value) = dispatch
                .build(ctx, selector, source_field_ty, target_field_ty)
                .map_err(|err| {
                    err.lift(PathFrame::between(
                        &source_field.name,
                        source_field_ty.to_string(),
                        &target_field.name,
                        target_field_ty.to_string(),
                    ))
                })?;
            stmts.extend(field_stmts);
            stmts.push(Stmt::assign(
                Expr::ident(&name).dot(&target_field.name),
                value.into_expr(),
            ));
        }

        Ok((stmts, ExprHandle::variable(Expr::ident(name))))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::test_helpers::{render, source, InlineDispatch};
    use genconv_diagnostic::BuildErrorKind;
    use genconv_types::{Field, Ty, TypeTable};
    use pretty_assertions::assert_eq;

    fn person_table() -> (TypeTable, Ty, Ty) {
        let mut table = TypeTable::new();
        let input = table.define(
            "app/in",
            "Person",
            Ty::structure(vec![
                Field::new("Name", Ty::STRING),
                Field::new("Identifier", Ty::INT),
                Field::new("Tags", Ty::slice(Ty::STRING)),
            ]),
        );
        let output = table.define(
            "app/out",
            "Person",
            Ty::structure(vec![
                Field::new("Name", Ty::STRING),
                Field::new("ID", Ty::INT),
                Field::new("Tags", Ty::slice(Ty::STRING)),
                Field::new("Audit", Ty::STRING),
            ]),
        );
        (table, input, output)
    }

    #[test]
    fn fields_by_name_mapping_and_ignore() {
        let (table, input, output) = person_table();
        let mut ctx = MethodContext::new("app/out.Person")
            .with_mapping([("Identifier", "ID")])
            .with_ignored(["Audit"]);
        let built = StructRule
            .build(
                &mut InlineDispatch::default(),
                &mut ctx,
                source(),
                table.view(&input),
                table.view(&output),
            )
            .unwrap();
        assert_eq!(
            render(&built),
            "var person out.Person\n\
             person.Name = source.Name\n\
             person.ID = source.Identifier\n\
             var stringList []string\n\
             if source.Tags != nil {\n\
             \tstringList = make([]string, len(source.Tags))\n\
             }\n\
             for i := 0; i < len(source.Tags); i++ {\n\
             \tstringList[i] = source.Tags[i]\n\
             }\n\
             person.Tags = stringList\n\
             => person"
        );
    }

    #[test]
    fn missing_source_field_is_reported() {
        let (table, input, output) = person_table();
        let mut ctx = MethodContext::new("app/out.Person").with_ignored(["Audit"]);
        let err = StructRule
            .build(
                &mut InlineDispatch::default(),
                &mut ctx,
                source(),
                table.view(&input),
                table.view(&output),
            )
            .unwrap_err();
        assert_eq!(
            err.kind,
            BuildErrorKind::MissingSourceField {
                field: "ID".to_string(),
                source: "app/in.Person".to_string(),
            }
        );
    }

    #[test]
    fn unexported_target_field() {
        let mut table = TypeTable::new();
        let input = table.define("app", "In", Ty::structure(vec![Field::new("secret", Ty::INT)]));
        let output = table.define("app", "Out", Ty::structure(vec![Field::new("secret", Ty::INT)]));
        let mut ctx = MethodContext::new("app.Out");
        let err = StructRule
            .build(
                &mut InlineDispatch::default(),
                &mut ctx,
                source(),
                table.view(&input),
                table.view(&output),
            )
            .unwrap_err();
        assert!(matches!(err.kind, BuildErrorKind::UnexportedField { .. }));

        let mut ctx = MethodContext::new("app.Out").with_ignored(["secret"]);
        let built = StructRule
            .build(
                &mut InlineDispatch::default(),
                &mut ctx,
                source(),
                table.view(&input),
                table.view(&output),
            )
            .unwrap();
        assert_eq!(render(&built), "var out app.Out\n=> out");
    }

    #[test]
    fn field_mismatch_frames_carry_both_names() {
        let mut table = TypeTable::new();
        let input = table.define("app", "In", Ty::structure(vec![Field::new("Old", Ty::INT)]));
        let output = table.define("app", "Out", Ty::structure(vec![Field::new("New", Ty::STRING)]));
        let mut ctx = MethodContext::new("app.Out").with_mapping([("Old", "New")]);
        let err = StructRule
            .build(
                &mut InlineDispatch::default(),
                &mut ctx,
                source(),
                table.view(&input),
                table.view(&output),
            )
            .unwrap_err();
        assert_eq!(err.breadcrumb(), "Old -> New : int -> string");
    }

    #[test]
    fn unnamed_structs_match() {
        let table = TypeTable::new();
        let s = Ty::structure(vec![Field::new("A", Ty::INT)]);
        assert!(StructRule.matches(table.view(&s), table.view(&s)));
        assert!(!StructRule.matches(table.view(&s), table.view(&Ty::INT)));
    }
}
