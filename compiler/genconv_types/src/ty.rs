//! Type expressions.

use std::fmt;

/// Go's predeclared basic types.
///
/// `byte` and `rune` are aliases and map onto `Uint8` / `Int32`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BasicKind {
    Bool,
    String,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
}

impl BasicKind {
    /// The predeclared Go name.
    pub fn name(self) -> &'static str {
        match self {
            BasicKind::Bool => "bool",
            BasicKind::String => "string",
            BasicKind::Int => "int",
            BasicKind::Int8 => "int8",
            BasicKind::Int16 => "int16",
            BasicKind::Int32 => "int32",
            BasicKind::Int64 => "int64",
            BasicKind::Uint => "uint",
            BasicKind::Uint8 => "uint8",
            BasicKind::Uint16 => "uint16",
            BasicKind::Uint32 => "uint32",
            BasicKind::Uint64 => "uint64",
            BasicKind::Uintptr => "uintptr",
            BasicKind::Float32 => "float32",
            BasicKind::Float64 => "float64",
            BasicKind::Complex64 => "complex64",
            BasicKind::Complex128 => "complex128",
        }
    }

    /// Look up a predeclared basic type by name, including the `byte` and
    /// `rune` aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "bool" => BasicKind::Bool,
            "string" => BasicKind::String,
            "int" => BasicKind::Int,
            "int8" => BasicKind::Int8,
            "int16" => BasicKind::Int16,
            "int32" | "rune" => BasicKind::Int32,
            "int64" => BasicKind::Int64,
            "uint" => BasicKind::Uint,
            "uint8" | "byte" => BasicKind::Uint8,
            "uint16" => BasicKind::Uint16,
            "uint32" => BasicKind::Uint32,
            "uint64" => BasicKind::Uint64,
            "uintptr" => BasicKind::Uintptr,
            "float32" => BasicKind::Float32,
            "float64" => BasicKind::Float64,
            "complex64" => BasicKind::Complex64,
            "complex128" => BasicKind::Complex128,
            _ => return None,
        };
        Some(kind)
    }
}

/// A declared type name, qualified by the import path of its package.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamedType {
    pub path: String,
    pub name: String,
}

impl NamedType {
    /// Type `name` declared in the package at import path `path`.
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        NamedType {
            path: path.into(),
            name: name.into(),
        }
    }

    /// Package name used to qualify the type in source: the last path segment.
    pub fn package_name(&self) -> &str {
        crate::package_name(&self.path)
    }
}

impl fmt::Display for NamedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.path, self.name)
        }
    }
}

/// A struct field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Field {
    pub name: String,
    pub ty: Ty,
}

impl Field {
    /// Field `name` of type `ty`.
    pub fn new(name: impl Into<String>, ty: Ty) -> Self {
        Field {
            name: name.into(),
            ty,
        }
    }
}

/// Field list of a struct type, in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct StructType {
    pub fields: Vec<Field>,
}

impl StructType {
    /// Field declared as `name`.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// A Go type expression.
///
/// Named types are references into a [`TypeTable`](crate::TypeTable); their
/// structure lives in the table, which is what lets cyclic types
/// (`type Node struct { Children []Node }`) be represented without cycles here.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Ty {
    Basic(BasicKind),
    Named(NamedType),
    /// `[]T`
    Slice(Box<Ty>),
    /// `[N]T`
    Array { len: u64, elem: Box<Ty> },
    /// `map[K]V`
    Map { key: Box<Ty>, value: Box<Ty> },
    /// `*T`
    Pointer(Box<Ty>),
    /// `struct{...}`
    Struct(StructType),
}

impl Ty {
    pub const BOOL: Ty = Ty::Basic(BasicKind::Bool);
    pub const STRING: Ty = Ty::Basic(BasicKind::String);
    pub const INT: Ty = Ty::Basic(BasicKind::Int);
    pub const INT64: Ty = Ty::Basic(BasicKind::Int64);
    pub const FLOAT64: Ty = Ty::Basic(BasicKind::Float64);

    /// Reference to type `name` declared in package `path`.
    pub fn named(path: impl Into<String>, name: impl Into<String>) -> Self {
        Ty::Named(NamedType::new(path, name))
    }

    /// `[]elem`.
    pub fn slice(elem: Ty) -> Self {
        Ty::Slice(Box::new(elem))
    }

    /// `[len]elem`.
    pub fn array(len: u64, elem: Ty) -> Self {
        Ty::Array {
            len,
            elem: Box::new(elem),
        }
    }

    /// `map[key]value`.
    pub fn map(key: Ty, value: Ty) -> Self {
        Ty::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// `*inner`.
    pub fn pointer(inner: Ty) -> Self {
        Ty::Pointer(Box::new(inner))
    }

    /// Unnamed `struct{...}` with `fields` in order.
    pub fn structure(fields: Vec<Field>) -> Self {
        Ty::Struct(StructType { fields })
    }

    /// Canonical identity string. Equal for structurally identical types.
    pub fn identity(&self) -> String {
        self.to_string()
    }

    /// Visit every named type referenced by this expression (not through
    /// the table, only what is spelled here).
    pub fn for_each_named(&self, f: &mut impl FnMut(&NamedType)) {
        match self {
            Ty::Basic(_) => {}
            Ty::Named(named) => f(named),
            Ty::Slice(elem) | Ty::Array { elem, .. } | Ty::Pointer(elem) => elem.for_each_named(f),
            Ty::Map { key, value } => {
                key.for_each_named(f);
                value.for_each_named(f);
            }
            Ty::Struct(st) => {
                for field in &st.fields {
                    field.ty.for_each_named(f);
                }
            }
        }
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Basic(kind) => write!(f, "{}", kind.name()),
            Ty::Named(named) => write!(f, "{named}"),
            Ty::Slice(elem) => write!(f, "[]{elem}"),
            Ty::Array { len, elem } => write!(f, "[{len}]{elem}"),
            Ty::Map { key, value } => write!(f, "map[{key}]{value}"),
            Ty::Pointer(inner) => write!(f, "*{inner}"),
            Ty::Struct(st) => {
                write!(f, "struct{{")?;
                for (i, field) in st.fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{} {}", field.name, field.ty)?;
                }
                write!(f, "}}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn identity_forms() {
        assert_eq!(Ty::INT.identity(), "int");
        assert_eq!(Ty::slice(Ty::STRING).identity(), "[]string");
        assert_eq!(Ty::array(4, Ty::INT).identity(), "[4]int");
        assert_eq!(Ty::map(Ty::STRING, Ty::INT).identity(), "map[string]int");
        assert_eq!(Ty::pointer(Ty::BOOL).identity(), "*bool");
        assert_eq!(
            Ty::named("example.com/app/model", "Foo").identity(),
            "example.com/app/model.Foo"
        );
        assert_eq!(
            Ty::structure(vec![Field::new("A", Ty::INT), Field::new("B", Ty::STRING)]).identity(),
            "struct{A int; B string}"
        );
        assert_eq!(Ty::structure(vec![]).identity(), "struct{}");
    }

    #[test]
    fn identity_distinguishes_packages() {
        let a = Ty::named("example.com/a", "Foo");
        let b = Ty::named("example.com/b", "Foo");
        assert_ne!(a.identity(), b.identity());
    }

    #[test]
    fn aliases_resolve_to_same_kind() {
        assert_eq!(BasicKind::from_name("byte"), Some(BasicKind::Uint8));
        assert_eq!(BasicKind::from_name("rune"), Some(BasicKind::Int32));
        assert_eq!(BasicKind::from_name("Foo"), None);
        assert_eq!(
            Ty::Basic(BasicKind::from_name("byte").unwrap_or(BasicKind::Bool)).identity(),
            "uint8"
        );
    }

    #[test]
    fn package_name_is_last_segment() {
        assert_eq!(NamedType::new("example.com/app/model", "Foo").package_name(), "model");
        assert_eq!(NamedType::new("model", "Foo").package_name(), "model");
    }

    #[test]
    fn collects_named_references() {
        let ty = Ty::map(
            Ty::named("a", "K"),
            Ty::slice(Ty::pointer(Ty::named("b", "V"))),
        );
        let mut seen = Vec::new();
        ty.for_each_named(&mut |named| seen.push(named.to_string()));
        assert_eq!(seen, vec!["a.K".to_string(), "b.V".to_string()]);
    }
}
