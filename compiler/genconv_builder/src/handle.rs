//! Built expressions.

use genconv_ast::Expr;

/// How often an expression may be evaluated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ExprKind {
    /// A bare reference (`source`, `source[i]`, `s.Name`): free of side
    /// effects, may be repeated.
    Variable,
    /// Anything else (`c.FooToBar(source)`, `*source`, `ID(source)`): bind it
    /// before using it twice or taking its address.
    Other,
}

/// An expression produced by a rule, tagged with whether it is a bare
/// variable reference or must be bound before reuse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExprHandle {
    expr: Expr,
    kind: ExprKind,
}

impl ExprHandle {
    /// A reference that may be evaluated any number of times.
    pub fn variable(expr: Expr) -> Self {
        ExprHandle {
            expr,
            kind: ExprKind::Variable,
        }
    }

    /// A call, conversion or dereference; evaluate it once.
    pub fn other(expr: Expr) -> Self {
        ExprHandle {
            expr,
            kind: ExprKind::Other,
        }
    }

    /// Whether the expression is a plain variable reference.
    pub fn is_variable(&self) -> bool {
        self.kind == ExprKind::Variable
    }

    /// The expression, borrowed.
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// The expression, consuming the handle.
    pub fn into_expr(self) -> Expr {
        self.expr
    }
}
