//! Per-method build state.

use rustc_hash::{FxHashMap, FxHashSet};

use genconv_types::lower_first;

use crate::Namer;

/// Names a generated body must never shadow or reuse: the receiver and
/// parameter of every conversion method.
const RESERVED_LOCALS: [&str; 2] = ["c", "source"];

/// Loop index names, tried in order before falling back to `index`.
const INDEX_NAMES: [&str; 8] = ["i", "j", "k", "l", "m", "n", "o", "p"];

/// Go keywords and predeclared identifiers. Locals derived from type names
/// (`type Type struct{}`, a temporary of type `int`) would otherwise be
/// syntax errors or shadow builtins the body still needs.
const GO_RESERVED: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else",
    "fallthrough", "for", "func", "go", "goto", "if", "import", "interface",
    "map", "package", "range", "return", "select", "struct", "switch", "type",
    "var", "bool", "byte", "complex64", "complex128", "error", "float32",
    "float64", "int", "int8", "int16", "int32", "int64", "rune", "string",
    "uint", "uint8", "uint16", "uint32", "uint64", "uintptr", "true", "false",
    "iota", "nil", "append", "cap", "close", "complex", "copy", "delete",
    "imag", "len", "make", "new", "panic", "print", "println", "real",
    "recover",
];

/// State for building one method body.
///
/// Field mappings are declared source name to target name; the struct rule
/// asks the opposite question, so they are also indexed by target name.
#[derive(Clone, Debug)]
pub struct MethodContext {
    namer: Namer,
    /// Identity of the method's target type; seeds diagnostics.
    base_id: String,
    mapping: FxHashMap<String, String>,
    by_target: FxHashMap<String, String>,
    ignored: FxHashSet<String>,
}

impl MethodContext {
    /// Empty context for the method converting into `base_id`, with the
    /// receiver and parameter names already taken.
    pub fn new(base_id: impl Into<String>) -> Self {
        let mut namer = Namer::new();
        for name in RESERVED_LOCALS {
            namer.register(name);
        }
        MethodContext {
            namer,
            base_id: base_id.into(),
            mapping: FxHashMap::default(),
            by_target: FxHashMap::default(),
            ignored: FxHashSet::default(),
        }
    }

    /// Map source field `source` onto target field `target`.
    #[must_use]
    pub fn with_mapping<I, S, T>(mut self, mapping: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        for (source, target) in mapping {
            let (source, target) = (source.into(), target.into());
            self.by_target.insert(target.clone(), source.clone());
            self.mapping.insert(source, target);
        }
        self
    }

    /// Target fields to leave at their zero value.
    #[must_use]
    pub fn with_ignored<I, S>(mut self, ignored: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored.extend(ignored.into_iter().map(Into::into));
        self
    }

    /// Keep generated locals off `names`, typically the package names the
    /// body qualifies types with. A local `user` would shadow package `user`.
    #[must_use]
    pub fn with_reserved<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.namer.register(name);
        }
        self
    }

    /// Identity of the method's target type.
    pub fn base_id(&self) -> &str {
        &self.base_id
    }

    /// Declared field renames, source name to target name.
    pub fn mapping(&self) -> &FxHashMap<String, String> {
        &self.mapping
    }

    /// Name of the source field that feeds `target_field`.
    pub fn source_field_for<'a>(&'a self, target_field: &'a str) -> &'a str {
        self.by_target
            .get(target_field)
            .map_or(target_field, String::as_str)
    }

    /// Whether `target_field` is left at its zero value.
    pub fn is_ignored(&self, target_field: &str) -> bool {
        self.ignored.contains(target_field)
    }

    /// Fresh local derived from a type id (`FooList` becomes `fooList`).
    pub fn name(&mut self, id: &str) -> String {
        let base = lower_first(id);
        if GO_RESERVED.contains(&base.as_str()) {
            self.namer.suggest(&format!("x{base}"))
        } else {
            self.namer.suggest(&base)
        }
    }

    /// Fresh loop index.
    pub fn index(&mut self) -> String {
        for candidate in INDEX_NAMES {
            if !self.namer.is_taken(candidate) {
                self.namer.register(candidate);
                return candidate.to_string();
            }
        }
        self.namer.suggest("index")
    }

    /// Fresh key and value names for a map range loop.
    pub fn map_names(&mut self) -> (String, String) {
        (self.namer.suggest("key"), self.namer.suggest("value"))
    }
}
