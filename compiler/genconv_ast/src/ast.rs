//! AST node definitions.
//!
//! Only the Go constructs the conversion builders emit are modelled.

use std::collections::BTreeSet;

use genconv_stack::ensure_sufficient_stack;
use genconv_types::Ty;

/// Binary operators used by generated code.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    /// `!=`
    Ne,
}

impl BinaryOp {
    /// Go spelling of the operator.
    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Ne => "!=",
        }
    }
}

/// Expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Ident(String),
    /// Package-level identifier in `path` (delegate functions).
    Qualified { path: String, name: String },
    Nil,
    Int(u64),
    /// `base[index]`
    Index { base: Box<Expr>, index: Box<Expr> },
    /// `base.field`
    Selector { base: Box<Expr>, field: String },
    /// `func(args...)`
    Call { func: Box<Expr>, args: Vec<Expr> },
    /// `T(expr)`
    Conversion { ty: Ty, expr: Box<Expr> },
    /// `make(T, args...)`
    Make { ty: Ty, args: Vec<Expr> },
    /// `len(expr)`
    Len(Box<Expr>),
    /// `*expr`
    Deref(Box<Expr>),
    /// `&expr`
    AddrOf(Box<Expr>),
    Binary {
        lhs: Box<Expr>,
        op: BinaryOp,
        rhs: Box<Expr>,
    },
}

impl Expr {
    /// Local or unqualified name.
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }

    /// `pkg.Name` for a package-level object; printed bare when `path` is
    /// the output package.
    pub fn qualified(path: impl Into<String>, name: impl Into<String>) -> Self {
        Expr::Qualified {
            path: path.into(),
            name: name.into(),
        }
    }

    /// `self[index]`.
    #[must_use]
    pub fn index(self, index: Expr) -> Self {
        Expr::Index {
            base: Box::new(self),
            index: Box::new(index),
        }
    }

    /// `self.field`, a field or method selector.
    #[must_use]
    pub fn dot(self, field: impl Into<String>) -> Self {
        Expr::Selector {
            base: Box::new(self),
            field: field.into(),
        }
    }

    /// `self(args...)`.
    #[must_use]
    pub fn call(self, args: Vec<Expr>) -> Self {
        Expr::Call {
            func: Box::new(self),
            args,
        }
    }

    /// `T(expr)`.
    pub fn conversion(ty: Ty, expr: Expr) -> Self {
        Expr::Conversion {
            ty,
            expr: Box::new(expr),
        }
    }

    /// `make(T, args...)`.
    pub fn make(ty: Ty, args: Vec<Expr>) -> Self {
        Expr::Make { ty, args }
    }

    /// `len(expr)`.
    pub fn len(expr: Expr) -> Self {
        Expr::Len(Box::new(expr))
    }

    /// `*self`.
    #[must_use]
    pub fn deref(self) -> Self {
        Expr::Deref(Box::new(self))
    }

    /// `&self`.
    #[must_use]
    pub fn addr(self) -> Self {
        Expr::AddrOf(Box::new(self))
    }

    /// `self != rhs`.
    #[must_use]
    pub fn ne(self, rhs: Expr) -> Self {
        Expr::Binary {
            lhs: Box::new(self),
            op: BinaryOp::Ne,
            rhs: Box::new(rhs),
        }
    }

    /// Unary and binary forms need parentheses as the operand of a
    /// postfix (`(*p).Field`, `(*p)[i]`).
    pub fn needs_parens_as_operand(&self) -> bool {
        matches!(self, Expr::Deref(_) | Expr::AddrOf(_) | Expr::Binary { .. })
    }

    fn collect_imports(&self, imports: &mut BTreeSet<String>) {
        ensure_sufficient_stack(|| self.collect_imports_inner(imports));
    }

    fn collect_imports_inner(&self, imports: &mut BTreeSet<String>) {
        match self {
            Expr::Ident(_) | Expr::Nil | Expr::Int(_) => {}
            Expr::Qualified { path, .. } => {
                imports.insert(path.clone());
            }
            Expr::Index { base, index } => {
                base.collect_imports(imports);
                index.collect_imports(imports);
            }
            Expr::Selector { base, .. } => base.collect_imports(imports),
            Expr::Call { func, args } => {
                func.collect_imports(imports);
                for arg in args {
                    arg.collect_imports(imports);
                }
            }
            Expr::Conversion { ty, expr } => {
                collect_ty_imports(ty, imports);
                expr.collect_imports(imports);
            }
            Expr::Make { ty, args } => {
                collect_ty_imports(ty, imports);
                for arg in args {
                    arg.collect_imports(imports);
                }
            }
            Expr::Len(inner) | Expr::Deref(inner) | Expr::AddrOf(inner) => {
                inner.collect_imports(imports);
            }
            Expr::Binary { lhs, rhs, .. } => {
                lhs.collect_imports(imports);
                rhs.collect_imports(imports);
            }
        }
    }
}

/// Statement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stmt {
    /// `var name T`
    Var { name: String, ty: Ty },
    /// `name := value`
    Define { name: String, value: Expr },
    /// `target = value`
    Assign { target: Expr, value: Expr },
    /// `if cond { body }`
    If { cond: Expr, body: Vec<Stmt> },
    /// `for index := 0; index < bound; index++ { body }`
    ForIndex {
        index: String,
        bound: Expr,
        body: Vec<Stmt>,
    },
    /// `for key, value := range over { body }`
    ForRange {
        key: String,
        value: String,
        over: Expr,
        body: Vec<Stmt>,
    },
    Return(Expr),
}

impl Stmt {
    /// `var name T`, the zero value of `T`.
    pub fn var(name: impl Into<String>, ty: Ty) -> Self {
        Stmt::Var {
            name: name.into(),
            ty,
        }
    }

    /// `name := value`.
    pub fn define(name: impl Into<String>, value: Expr) -> Self {
        Stmt::Define {
            name: name.into(),
            value,
        }
    }

    pub fn assign(target: Expr, value: Expr) -> Self {
        Stmt::Assign { target, value }
    }

    pub fn if_then(cond: Expr, body: Vec<Stmt>) -> Self {
        Stmt::If { cond, body }
    }

    pub fn for_index(index: impl Into<String>, bound: Expr, body: Vec<Stmt>) -> Self {
        Stmt::ForIndex {
            index: index.into(),
            bound,
            body,
        }
    }

    pub fn for_range(
        key: impl Into<String>,
        value: impl Into<String>,
        over: Expr,
        body: Vec<Stmt>,
    ) -> Self {
        Stmt::ForRange {
            key: key.into(),
            value: value.into(),
            over,
            body,
        }
    }

    pub fn ret(value: Expr) -> Self {
        Stmt::Return(value)
    }

    fn collect_imports(&self, imports: &mut BTreeSet<String>) {
        match self {
            Stmt::Var { ty, .. } => collect_ty_imports(ty, imports),
            Stmt::Define { value, .. } | Stmt::Return(value) => value.collect_imports(imports),
            Stmt::Assign { target, value } => {
                target.collect_imports(imports);
                value.collect_imports(imports);
            }
            Stmt::If { cond, body } => {
                cond.collect_imports(imports);
                collect_block_imports(body, imports);
            }
            Stmt::ForIndex { bound, body, .. } => {
                bound.collect_imports(imports);
                collect_block_imports(body, imports);
            }
            Stmt::ForRange { over, body, .. } => {
                over.collect_imports(imports);
                collect_block_imports(body, imports);
            }
        }
    }
}

/// Function parameter or receiver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: Ty,
}

impl Param {
    /// Parameter `name` of type `ty`.
    pub fn new(name: impl Into<String>, ty: Ty) -> Self {
        Param {
            name: name.into(),
            ty,
        }
    }
}

/// `func (receiver) name(params) result { body }`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FuncDecl {
    pub receiver: Option<Param>,
    pub name: String,
    pub params: Vec<Param>,
    pub result: Ty,
    pub body: Vec<Stmt>,
}

/// Top-level declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decl {
    /// `type name T`
    Type { name: String, ty: Ty },
    Func(FuncDecl),
}

/// A Go source file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct File {
    /// Leading comment line, printed verbatim after `// `.
    pub header: Option<String>,
    pub package_name: String,
    /// Import path of the package being generated; types from it are not
    /// qualified and it is never imported.
    pub package_path: String,
    pub decls: Vec<Decl>,
}

impl File {
    /// Import paths referenced by any declaration, sorted.
    pub fn imports(&self) -> BTreeSet<String> {
        let mut imports = BTreeSet::new();
        for decl in &self.decls {
            match decl {
                Decl::Type { ty, .. } => collect_ty_imports(ty, &mut imports),
                Decl::Func(func) => {
                    for param in func.receiver.iter().chain(&func.params) {
                        collect_ty_imports(&param.ty, &mut imports);
                    }
                    collect_ty_imports(&func.result, &mut imports);
                    collect_block_imports(&func.body, &mut imports);
                }
            }
        }
        imports.remove(&self.package_path);
        imports.remove("");
        imports
    }
}

fn collect_ty_imports(ty: &Ty, imports: &mut BTreeSet<String>) {
    ty.for_each_named(&mut |named| {
        imports.insert(named.path.clone());
    });
}

fn collect_block_imports(body: &[Stmt], imports: &mut BTreeSet<String>) {
    ensure_sufficient_stack(|| {
        for stmt in body {
            stmt.collect_imports(imports);
        }
    });
}
