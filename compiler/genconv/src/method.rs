//! Requested and extracted conversion methods.

use std::fmt;

use genconv_ast::FuncDecl;
use genconv_types::{NamedType, Ty, TypeView};

/// Registry key: the identities of a conversion's source and target types.
///
/// Ordered: `A -> B` and `B -> A` are different conversions.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature {
    pub source: String,
    pub target: String,
}

impl Signature {
    /// Key for converting `source` into `target`.
    pub fn new(source: &Ty, target: &Ty) -> Self {
        Signature {
            source: source.identity(),
            target: target.identity(),
        }
    }

    /// Same as [`Signature::new`], from descriptors.
    pub fn of(source: TypeView<'_>, target: TypeView<'_>) -> Self {
        Self::new(source.ty(), target.ty())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// A conversion declared by the user, as handed over by the front end.
///
/// Mirrors a Go interface method: `params` and `results` are validated on
/// registration rather than here so malformed declarations can be reported
/// with their name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MethodRequest {
    pub name: String,
    pub params: Vec<Ty>,
    pub results: Vec<Ty>,
    /// `(source field, target field)` renames.
    pub mapping: Vec<(String, String)>,
    /// Target fields left at their zero value.
    pub ignored: Vec<String>,
    /// Function in the source package that replaces the generated body.
    pub delegate: Option<String>,
}

impl MethodRequest {
    /// `name(source) target`.
    pub fn new(name: impl Into<String>, source: Ty, target: Ty) -> Self {
        MethodRequest {
            name: name.into(),
            params: vec![source],
            results: vec![target],
            ..Self::default()
        }
    }

    /// Fill target field `target_field` from source field `source_field`.
    #[must_use]
    pub fn map(mut self, source_field: impl Into<String>, target_field: impl Into<String>) -> Self {
        self.mapping.push((source_field.into(), target_field.into()));
        self
    }

    /// Leave `target_field` at its zero value.
    #[must_use]
    pub fn ignore(mut self, target_field: impl Into<String>) -> Self {
        self.ignored.push(target_field.into());
        self
    }

    /// Forward to `function` in the source package instead of generating a body.
    #[must_use]
    pub fn delegate(mut self, function: impl Into<String>) -> Self {
        self.delegate = Some(function.into());
        self
    }
}

/// A conversion method owned by the generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Method {
    pub name: String,
    pub source: Ty,
    pub target: Ty,
    pub mapping: Vec<(String, String)>,
    pub ignored: Vec<String>,
    pub delegate: Option<NamedType>,
    pub(crate) body: Option<FuncDecl>,
}

impl Method {
    /// Method the dispatcher creates for a named pair it has no method for.
    pub(crate) fn extracted(name: String, source: Ty, target: Ty) -> Self {
        Method {
            name,
            source,
            target,
            mapping: Vec::new(),
            ignored: Vec::new(),
            delegate: None,
            body: None,
        }
    }

    /// Whether the body has been generated.
    pub fn is_built(&self) -> bool {
        self.body.is_some()
    }

    /// The generated function, once built.
    pub fn func(&self) -> Option<&FuncDecl> {
        self.body.as_ref()
    }
}
