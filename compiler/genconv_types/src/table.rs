//! Package table: named type definitions and package-level functions.
//!
//! Loading packages from source is the front end's job; the table is what it
//! hands over. Named types are stored by their qualified name and resolved
//! lazily, so definitions may reference each other in any order and cyclically.

use rustc_hash::FxHashMap;

use crate::{NamedType, Ty, TypeView};

/// Signature of a package-level function.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FuncSig {
    pub params: Vec<Ty>,
    pub results: Vec<Ty>,
}

/// A package-scope object found by [`TypeTable::lookup`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Object<'a> {
    /// A declared type; carries its definition.
    Type(&'a Ty),
    /// A function.
    Func(&'a FuncSig),
}

/// Loaded packages.
#[derive(Clone, Debug, Default)]
pub struct TypeTable {
    /// Named type -> its definition (the right-hand side of `type N <def>`).
    types: FxHashMap<NamedType, Ty>,
    /// Package-level functions, keyed like types.
    funcs: FxHashMap<NamedType, FuncSig>,
}

impl TypeTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `type <name> <definition>` in package `path` and return a
    /// reference to the new named type.
    ///
    /// Redeclaring a name replaces the previous definition.
    pub fn define(&mut self, path: &str, name: &str, definition: Ty) -> Ty {
        let named = NamedType::new(path, name);
        self.types.insert(named.clone(), definition);
        Ty::Named(named)
    }

    /// Declare a package-level function.
    pub fn define_func(&mut self, path: &str, name: &str, sig: FuncSig) {
        self.funcs.insert(NamedType::new(path, name), sig);
    }

    /// Find the object declared as `name` in package `path`.
    ///
    /// Types and functions share a scope in Go; a type wins if both were
    /// registered under the same name.
    pub fn lookup(&self, path: &str, name: &str) -> Option<Object<'_>> {
        let key = NamedType::new(path, name);
        if let Some(def) = self.types.get(&key) {
            return Some(Object::Type(def));
        }
        self.funcs.get(&key).map(Object::Func)
    }

    /// Distinct package paths declaring a type or function, sorted.
    pub fn package_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self
            .types
            .keys()
            .chain(self.funcs.keys())
            .map(|named| named.path.as_str())
            .collect();
        paths.sort_unstable();
        paths.dedup();
        paths
    }

    /// The underlying (non-named) type of `named`, following chains of
    /// named-over-named definitions.
    ///
    /// Returns `None` for undeclared names and for definition cycles
    /// (`type A B; type B A`), which have no underlying type.
    pub fn underlying(&self, named: &NamedType) -> Option<&Ty> {
        let mut current = self.types.get(named)?;
        let mut steps = 0usize;
        while let Ty::Named(next) = current {
            if steps > self.types.len() {
                return None;
            }
            current = self.types.get(next)?;
            steps += 1;
        }
        Some(current)
    }

    /// Descriptor over `ty` resolved against this table.
    pub fn view<'a>(&'a self, ty: &'a Ty) -> TypeView<'a> {
        TypeView::new(self, ty)
    }

    /// Number of declared named types. Functions are not counted.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no named type has been declared.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
