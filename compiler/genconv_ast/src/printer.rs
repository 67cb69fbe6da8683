//! gofmt-style printer.
//!
//! Statements go through the [`Emitter`] line by line with tab indentation;
//! expressions and types are rendered to strings first. Every recursive walk
//! goes through `ensure_sufficient_stack`, since nesting follows the depth of
//! the converted types.

use genconv_stack::ensure_sufficient_stack;
use genconv_types::{package_name, Ty};

use crate::ast::{Decl, Expr, File, FuncDecl, Param, Stmt};
use crate::emitter::{Emitter, StringEmitter};

/// Prints AST nodes relative to one output package.
pub struct Printer<'e, E: Emitter> {
    emitter: &'e mut E,
    /// Named types and qualified identifiers from this path print unqualified.
    package_path: &'e str,
    level: usize,
}

impl<'e, E: Emitter> Printer<'e, E> {
    /// Printer writing to `emitter` for the package at `package_path`.
    pub fn new(emitter: &'e mut E, package_path: &'e str) -> Self {
        Printer {
            emitter,
            package_path,
            level: 0,
        }
    }

    fn qualify(&self, path: &str, name: &str) -> String {
        if path.is_empty() || path == self.package_path {
            name.to_string()
        } else {
            format!("{}.{name}", package_name(path))
        }
    }

    /// Type in Go syntax.
    pub fn ty(&self, ty: &Ty) -> String {
        ensure_sufficient_stack(|| self.ty_inner(ty))
    }

    fn ty_inner(&self, ty: &Ty) -> String {
        match ty {
            Ty::Basic(kind) => kind.name().to_string(),
            Ty::Named(named) => self.qualify(&named.path, &named.name),
            Ty::Slice(elem) => format!("[]{}", self.ty(elem)),
            Ty::Array { len, elem } => format!("[{len}]{}", self.ty(elem)),
            Ty::Map { key, value } => format!("map[{}]{}", self.ty(key), self.ty(value)),
            Ty::Pointer(inner) => format!("*{}", self.ty(inner)),
            Ty::Struct(st) if st.fields.is_empty() => "struct{}".to_string(),
            Ty::Struct(st) => {
                let fields: Vec<String> = st
                    .fields
                    .iter()
                    .map(|field| format!("{} {}", field.name, self.ty(&field.ty)))
                    .collect();
                format!("struct{{ {} }}", fields.join("; "))
            }
        }
    }

    /// Expression in Go syntax.
    pub fn expr(&self, expr: &Expr) -> String {
        ensure_sufficient_stack(|| self.expr_inner(expr))
    }

    fn expr_inner(&self, expr: &Expr) -> String {
        match expr {
            Expr::Ident(name) => name.clone(),
            Expr::Qualified { path, name } => self.qualify(path, name),
            Expr::Nil => "nil".to_string(),
            Expr::Int(value) => value.to_string(),
            Expr::Index { base, index } => {
                format!("{}[{}]", self.operand(base), self.expr(index))
            }
            Expr::Selector { base, field } => format!("{}.{field}", self.operand(base)),
            Expr::Call { func, args } => {
                format!("{}({})", self.operand(func), self.args(args))
            }
            Expr::Conversion { ty, expr } => {
                let ty_text = self.ty(ty);
                if matches!(ty, Ty::Pointer(_)) {
                    format!("({ty_text})({})", self.expr(expr))
                } else {
                    format!("{ty_text}({})", self.expr(expr))
                }
            }
            Expr::Make { ty, args } => {
                if args.is_empty() {
                    format!("make({})", self.ty(ty))
                } else {
                    format!("make({}, {})", self.ty(ty), self.args(args))
                }
            }
            Expr::Len(inner) => format!("len({})", self.expr(inner)),
            Expr::Deref(inner) => format!("*{}", self.unary_operand(inner)),
            Expr::AddrOf(inner) => format!("&{}", self.unary_operand(inner)),
            Expr::Binary { lhs, op, rhs } => format!(
                "{} {} {}",
                self.unary_operand(lhs),
                op.as_symbol(),
                self.unary_operand(rhs)
            ),
        }
    }

    fn operand(&self, expr: &Expr) -> String {
        if expr.needs_parens_as_operand() {
            format!("({})", self.expr(expr))
        } else {
            self.expr(expr)
        }
    }

    fn unary_operand(&self, expr: &Expr) -> String {
        if matches!(expr, Expr::Binary { .. }) {
            format!("({})", self.expr(expr))
        } else {
            self.expr(expr)
        }
    }

    fn args(&self, args: &[Expr]) -> String {
        args.iter()
            .map(|arg| self.expr(arg))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn line(&mut self, text: &str) {
        self.emitter.emit_indent(self.level);
        self.emitter.emit(text);
        self.emitter.emit_newline();
    }

    fn block(&mut self, opener: &str, body: &[Stmt]) {
        self.line(&format!("{opener} {{"));
        self.level += 1;
        for stmt in body {
            self.stmt(stmt);
        }
        self.level -= 1;
        self.line("}");
    }

    /// Print one statement, and any block it opens, at the current level.
    pub fn stmt(&mut self, stmt: &Stmt) {
        ensure_sufficient_stack(|| self.stmt_inner(stmt));
    }

    fn stmt_inner(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Var { name, ty } => {
                let text = format!("var {name} {}", self.ty(ty));
                self.line(&text);
            }
            Stmt::Define { name, value } => {
                let text = format!("{name} := {}", self.expr(value));
                self.line(&text);
            }
            Stmt::Assign { target, value } => {
                let text = format!("{} = {}", self.expr(target), self.expr(value));
                self.line(&text);
            }
            Stmt::If { cond, body } => {
                let opener = format!("if {}", self.expr(cond));
                self.block(&opener, body);
            }
            Stmt::ForIndex { index, bound, body } => {
                let opener = format!(
                    "for {index} := 0; {index} < {}; {index}++",
                    self.expr(bound)
                );
                self.block(&opener, body);
            }
            Stmt::ForRange {
                key,
                value,
                over,
                body,
            } => {
                let opener = format!("for {key}, {value} := range {}", self.expr(over));
                self.block(&opener, body);
            }
            Stmt::Return(value) => {
                let text = format!("return {}", self.expr(value));
                self.line(&text);
            }
        }
    }

    fn param(&self, param: &Param) -> String {
        format!("{} {}", param.name, self.ty(&param.ty))
    }

    /// Print a function or method declaration.
    pub fn func(&mut self, func: &FuncDecl) {
        let receiver = func
            .receiver
            .as_ref()
            .map(|recv| format!("({}) ", self.param(recv)))
            .unwrap_or_default();
        let params: Vec<String> = func.params.iter().map(|p| self.param(p)).collect();
        let opener = format!(
            "func {receiver}{}({}) {}",
            func.name,
            params.join(", "),
            self.ty(&func.result)
        );
        self.block(&opener, &func.body);
    }

    /// Print header, package clause, imports and declarations.
    pub fn file(&mut self, file: &File) {
        if let Some(header) = &file.header {
            self.line(&format!("// {header}"));
            self.emitter.emit_newline();
        }
        self.line(&format!("package {}", file.package_name));

        let imports = file.imports();
        match imports.len() {
            0 => {}
            1 => {
                self.emitter.emit_newline();
                for path in &imports {
                    self.line(&format!("import \"{path}\""));
                }
            }
            _ => {
                self.emitter.emit_newline();
                self.line("import (");
                self.level += 1;
                for path in &imports {
                    self.line(&format!("\"{path}\""));
                }
                self.level -= 1;
                self.line(")");
            }
        }

        for decl in &file.decls {
            self.emitter.emit_newline();
            match decl {
                Decl::Type { name, ty } => {
                    let text = format!("type {name} {}", self.ty(ty));
                    self.line(&text);
                }
                Decl::Func(func) => self.func(func),
            }
        }
    }
}

/// Print a whole file.
pub fn print_file(file: &File) -> String {
    let mut emitter = StringEmitter::with_capacity(4096);
    Printer::new(&mut emitter, &file.package_path).file(file);
    emitter.finish_with_newline();
    emitter.output()
}

/// Print one function as it would appear in a file of `package_path`.
pub fn print_func(func: &FuncDecl, package_path: &str) -> String {
    let mut emitter = StringEmitter::new();
    Printer::new(&mut emitter, package_path).func(func);
    emitter.output()
}
