//! Dispatch doubles for exercising rules in isolation.

use genconv_ast::{Expr, Printer, StringEmitter};
use genconv_types::{upper_first, TypeView};

use crate::{build_with_rules, BuildResult, Built, Dispatch, ExprHandle, MethodContext};

/// Recurses through the rule table for every pair, never extracting methods.
#[derive(Default)]
pub struct InlineDispatch {
    /// `(source, target)` identities in the order they were dispatched.
    pub calls: Vec<(String, String)>,
}

impl Dispatch for InlineDispatch {
    fn build(
        &mut self,
        ctx: &mut MethodContext,
        source: ExprHandle,
        source_ty: TypeView<'_>,
        target_ty: TypeView<'_>,
    ) -> BuildResult {
        self.calls
            .push((source_ty.identity(), target_ty.identity()));
        build_with_rules(self, ctx, source, source_ty, target_ty)
    }
}

/// Answers every pair with a method call, like a registry hit would.
#[derive(Default)]
pub struct CallDispatch;

impl Dispatch for CallDispatch {
    fn build(
        &mut self,
        _ctx: &mut MethodContext,
        source: ExprHandle,
        source_ty: TypeView<'_>,
        target_ty: TypeView<'_>,
    ) -> BuildResult {
        let method = format!("{}To{}", source_ty.id(), upper_first(&target_ty.id()));
        let call = Expr::ident("c").dot(method).call(vec![source.into_expr()]);
        Ok((Vec::new(), ExprHandle::other(call)))
    }
}

/// Print built statements followed by `=> <result>`.
pub fn render(built: &Built) -> String {
    let (stmts, result) = built;
    let mut emitter = StringEmitter::new();
    let mut printer = Printer::new(&mut emitter, "generated");
    for stmt in stmts {
        printer.stmt(stmt);
    }
    let tail = printer.expr(result.expr());
    format!("{}=> {tail}", emitter.output())
}

pub fn source() -> ExprHandle {
    ExprHandle::variable(Expr::ident("source"))
}
