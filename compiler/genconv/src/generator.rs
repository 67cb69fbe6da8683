//! Method registry and dispatcher.
//!
//! The [`Generator`] owns every conversion method of one run. Resolving a
//! type pair tries, in order:
//!
//! 1. an existing method for the pair: emit `c.Name(source)`
//! 2. extraction: if either side is a named, non-basic type, create a method
//!    for the pair, register it, build its body, then retry (now step 1)
//! 3. the rule table, inline
//!
//! Registering the method *before* building its body is what makes cyclic
//! types terminate: when the body of `NodeToTargetNode` reaches
//! `[]Node -> []TargetNode`, the element pair already resolves to a call.

use rustc_hash::FxHashMap;

use genconv_ast::{print_file, Decl, Expr, File, FuncDecl, Param, Stmt};
use genconv_builder::{
    build_with_rules, BuildResult, Dispatch, ExprHandle, MethodContext, Namer,
};
use genconv_diagnostic::{BuildError, PathFrame};
use genconv_stack::ensure_sufficient_stack;
use genconv_types::{package_name, upper_first, NamedType, Object, Ty, TypeTable, TypeView};

use crate::{
    DuplicatePolicy, GenerateError, GeneratorConfig, Method, MethodRequest, Signature,
};

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "Code generated by genconv. DO NOT EDIT.";

/// Receiver name of every generated method.
const RECEIVER: &str = "c";

/// Parameter name of every generated method.
const PARAM: &str = "source";

/// Registry of conversion methods for one generation run.
pub struct Generator<'t> {
    table: &'t TypeTable,
    config: GeneratorConfig,
    /// Method names; scoped to the run.
    namer: Namer,
    /// Names of packages a body may qualify types or delegates with. Locals
    /// must not shadow them.
    imported_names: Vec<String>,
    methods: FxHashMap<Signature, Method>,
}

impl<'t> Generator<'t> {
    /// Empty registry over `table`. Nothing is registered or built yet.
    pub fn new(table: &'t TypeTable, config: GeneratorConfig) -> Self {
        let mut imported_names: Vec<String> = table
            .package_paths()
            .into_iter()
            .chain([config.source_package.as_str()])
            .filter(|path| !path.is_empty() && *path != config.package_path)
            .map(|path| package_name(path).to_string())
            .collect();
        imported_names.sort_unstable();
        imported_names.dedup();
        Generator {
            table,
            config,
            namer: Namer::new(),
            imported_names,
            methods: FxHashMap::default(),
        }
    }

    /// Validate a requested conversion and add it to the registry.
    ///
    /// Nothing is built yet; see [`Generator::build_all`].
    #[tracing::instrument(level = "debug", skip_all, fields(method = %request.name))]
    pub fn register(&mut self, request: MethodRequest) -> Result<(), GenerateError> {
        let MethodRequest {
            name,
            params,
            results,
            mapping,
            ignored,
            delegate,
        } = request;

        let (source, target) = match (params.as_slice(), results.as_slice()) {
            ([source], [target]) => (source.clone(), target.clone()),
            _ => {
                return Err(GenerateError::Signature {
                    method: name,
                    params: params.len(),
                    results: results.len(),
                });
            }
        };

        let delegate = match delegate {
            Some(delegate) => Some(self.resolve_delegate(&name, delegate)?),
            None => None,
        };

        let signature = Signature::new(&source, &target);
        if let Some(existing) = self.methods.get(&signature) {
            match self.config.duplicate_policy {
                DuplicatePolicy::Reject => {
                    return Err(GenerateError::DuplicateSignature {
                        method: name,
                        existing: existing.name.clone(),
                        source_type: signature.source,
                        target_type: signature.target,
                    });
                }
                DuplicatePolicy::Overwrite => {
                    tracing::debug!(replaced = %existing.name, %signature, "overwriting conversion");
                }
            }
        }

        tracing::debug!(method = %name, %signature, "registered");
        self.namer.register(name.clone());
        self.methods.insert(
            signature,
            Method {
                name,
                source,
                target,
                mapping,
                ignored,
                delegate,
                body: None,
            },
        );
        Ok(())
    }

    fn resolve_delegate(&self, method: &str, delegate: String) -> Result<NamedType, GenerateError> {
        let package = &self.config.source_package;
        match self.table.lookup(package, &delegate) {
            Some(Object::Func(_)) => Ok(NamedType::new(package.clone(), delegate)),
            Some(Object::Type(_)) => Err(GenerateError::DelegateNotFunction {
                method: method.to_string(),
                delegate,
            }),
            None => Err(GenerateError::DelegateNotFound {
                method: method.to_string(),
                delegate,
            }),
        }
    }

    /// Build every method that has no body yet, in name order, until none
    /// are left. Methods extracted while building are built on the spot.
    pub fn build_all(&mut self) -> Result<(), GenerateError> {
        loop {
            let mut pending: Vec<(String, Signature)> = self
                .methods
                .iter()
                .filter(|(_, method)| !method.is_built())
                .map(|(signature, method)| (method.name.clone(), signature.clone()))
                .collect();
            if pending.is_empty() {
                return Ok(());
            }
            pending.sort();

            for (_, signature) in pending {
                self.build_method(&signature)
                    .map_err(|err| self.method_error(&signature, err))?;
            }
        }
    }

    /// Attach the method's own `source -> target` frame.
    #[cold]
    fn method_error(&self, signature: &Signature, err: BuildError) -> GenerateError {
        let (method, frame) = match self.methods.get(signature) {
            Some(method) => (
                method.name.clone(),
                PathFrame::between(
                    PARAM,
                    method.source.to_string(),
                    "target",
                    method.target.to_string(),
                ),
            ),
            None => (
                signature.to_string(),
                PathFrame::between(PARAM, &signature.source, "target", &signature.target),
            ),
        };
        GenerateError::Build {
            method,
            path: err.lift(frame).render(),
        }
    }

    /// Build the body of the method registered under `signature`, once.
    #[tracing::instrument(level = "debug", skip_all, fields(signature = %signature))]
    fn build_method(&mut self, signature: &Signature) -> Result<(), BuildError> {
        let Some(method) = self.methods.get(signature) else {
            return Ok(());
        };
        if method.is_built() {
            return Ok(());
        }
        let name = method.name.clone();
        let source = method.source.clone();
        let target = method.target.clone();
        let delegate = method.delegate.clone();
        let mut ctx = MethodContext::new(target.identity())
            .with_reserved(self.imported_names.iter().cloned())
            .with_mapping(method.mapping.clone())
            .with_ignored(method.ignored.clone());

        let body = if let Some(delegate) = delegate {
            let forward = Expr::qualified(delegate.path, delegate.name)
                .call(vec![Expr::ident(RECEIVER), Expr::ident(PARAM)]);
            vec![Stmt::ret(forward)]
        } else {
            let table = self.table;
            let (mut stmts, result) = build_with_rules(
                self,
                &mut ctx,
                ExprHandle::variable(Expr::ident(PARAM)),
                table.view(&source),
                table.view(&target),
            )?;
            stmts.push(Stmt::ret(result.into_expr()));
            stmts
        };

        tracing::debug!(method = %name, "built");
        let func = FuncDecl {
            receiver: Some(Param::new(RECEIVER, Ty::pointer(self.converter_type()))),
            name,
            params: vec![Param::new(PARAM, source)],
            result: target,
            body,
        };
        if let Some(method) = self.methods.get_mut(signature) {
            method.body = Some(func);
        }
        Ok(())
    }

    fn resolve(
        &mut self,
        ctx: &mut MethodContext,
        source: ExprHandle,
        source_ty: TypeView<'_>,
        target_ty: TypeView<'_>,
    ) -> BuildResult {
        let signature = Signature::of(source_ty, target_ty);
        if let Some(method) = self.methods.get(&signature) {
            let call = Expr::ident(RECEIVER)
                .dot(&method.name)
                .call(vec![source.into_expr()]);
            return Ok((Vec::new(), ExprHandle::other(call)));
        }

        if is_extractable(source_ty) || is_extractable(target_ty) {
            let name = self
                .namer
                .suggest(&format!("{}To{}", source_ty.id(), upper_first(&target_ty.id())));
            tracing::debug!(method = %name, %signature, "extracting method");
            let method = Method::extracted(name, source_ty.ty().clone(), target_ty.ty().clone());
            self.methods.insert(signature.clone(), method);
            self.build_method(&signature)?;
            return self.resolve(ctx, source, source_ty, target_ty);
        }

        build_with_rules(self, ctx, source, source_ty, target_ty)
    }

    fn converter_type(&self) -> Ty {
        Ty::named(self.config.package_path.clone(), self.config.name.clone())
    }

    /// The method registered for `signature`, requested or extracted.
    pub fn get(&self, signature: &Signature) -> Option<&Method> {
        self.methods.get(signature)
    }

    /// All methods, sorted by name.
    pub fn methods(&self) -> Vec<&Method> {
        let mut methods: Vec<&Method> = self.methods.values().collect();
        methods.sort_by(|a, b| a.name.cmp(&b.name));
        methods
    }

    /// Number of registered methods, extracted ones included.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// The generated file. Methods without a body are left out; call
    /// [`Generator::build_all`] first.
    pub fn file(&self) -> File {
        let mut decls = vec![Decl::Type {
            name: self.config.name.clone(),
            ty: Ty::structure(Vec::new()),
        }];
        decls.extend(
            self.methods()
                .into_iter()
                .filter_map(Method::func)
                .cloned()
                .map(Decl::Func),
        );
        File {
            header: Some(GENERATED_HEADER.to_string()),
            package_name: self.config.package_name.clone(),
            package_path: self.config.package_path.clone(),
            decls,
        }
    }

    /// Build everything and print the generated Go file.
    pub fn render(&mut self) -> Result<String, GenerateError> {
        self.build_all()?;
        Ok(print_file(&self.file()))
    }
}

impl Dispatch for Generator<'_> {
    #[tracing::instrument(
        level = "trace",
        skip_all,
        fields(method = ctx.base_id(), source = %source_ty, target = %target_ty)
    )]
    fn build(
        &mut self,
        ctx: &mut MethodContext,
        source: ExprHandle,
        source_ty: TypeView<'_>,
        target_ty: TypeView<'_>,
    ) -> BuildResult {
        ensure_sufficient_stack(|| self.resolve(ctx, source, source_ty, target_ty))
    }
}

/// Named non-basic types get their own method instead of being inlined.
fn is_extractable(ty: TypeView<'_>) -> bool {
    ty.is_named() && !ty.is_basic()
}
