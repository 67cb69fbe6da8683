//! Type descriptors.

use std::fmt;

use crate::{upper_first, BasicKind, Field, StructType, Ty, TypeTable};

/// Read-only structural view over a [`Ty`].
///
/// Shape queries look through named types: a `type IDs []int` view answers
/// `is_named() == true` *and* `is_list() == true`. Two views are equal when
/// their identities are equal, regardless of which `Ty` instance they wrap.
#[derive(Copy, Clone)]
pub struct TypeView<'a> {
    table: &'a TypeTable,
    ty: &'a Ty,
    /// Structural form: `ty` itself, or the definition behind a named type.
    /// `None` for undeclared named types.
    underlying: Option<&'a Ty>,
}

impl<'a> TypeView<'a> {
    /// View `ty`, resolving named types against `table`.
    pub fn new(table: &'a TypeTable, ty: &'a Ty) -> Self {
        let underlying = match ty {
            Ty::Named(named) => table.underlying(named),
            other => Some(other),
        };
        TypeView {
            table,
            ty,
            underlying,
        }
    }

    /// The wrapped type expression.
    pub fn ty(&self) -> &'a Ty {
        self.ty
    }

    /// Table the view resolves named types against.
    pub fn table(&self) -> &'a TypeTable {
        self.table
    }

    /// Canonical identity; the registry key.
    pub fn identity(&self) -> String {
        self.ty.identity()
    }

    /// Declared type (`app.Foo`), whatever its definition.
    pub fn is_named(&self) -> bool {
        matches!(self.ty, Ty::Named(_))
    }

    /// Primitive-like: a basic type, or a named type over one. Never worth a
    /// standalone conversion method.
    pub fn is_basic(&self) -> bool {
        self.basic_kind().is_some()
    }

    /// Kind of the underlying basic type, if any.
    pub fn basic_kind(&self) -> Option<BasicKind> {
        match self.underlying {
            Some(Ty::Basic(kind)) => Some(*kind),
            _ => None,
        }
    }

    /// Slice or array.
    pub fn is_list(&self) -> bool {
        matches!(self.underlying, Some(Ty::Slice(_) | Ty::Array { .. }))
    }

    /// Array (`[N]T`): never nil, length known statically.
    pub fn is_fixed_length(&self) -> bool {
        self.fixed_length().is_some()
    }

    /// Length of an array; `None` for slices and everything else.
    pub fn fixed_length(&self) -> Option<u64> {
        match self.underlying {
            Some(Ty::Array { len, .. }) => Some(*len),
            _ => None,
        }
    }

    /// Element of a slice or array.
    pub fn element_type(&self) -> Option<TypeView<'a>> {
        match self.underlying {
            Some(Ty::Slice(elem) | Ty::Array { elem, .. }) => Some(self.table.view(elem)),
            _ => None,
        }
    }

    /// `map[K]V`, directly or behind a named type.
    pub fn is_map(&self) -> bool {
        matches!(self.underlying, Some(Ty::Map { .. }))
    }

    /// Key type of a map.
    pub fn key_type(&self) -> Option<TypeView<'a>> {
        match self.underlying {
            Some(Ty::Map { key, .. }) => Some(self.table.view(key)),
            _ => None,
        }
    }

    /// Value type of a map.
    pub fn value_type(&self) -> Option<TypeView<'a>> {
        match self.underlying {
            Some(Ty::Map { value, .. }) => Some(self.table.view(value)),
            _ => None,
        }
    }

    /// `*T`, directly or behind a named type.
    pub fn is_pointer(&self) -> bool {
        matches!(self.underlying, Some(Ty::Pointer(_)))
    }

    /// The `T` of `*T`.
    pub fn pointee_type(&self) -> Option<TypeView<'a>> {
        match self.underlying {
            Some(Ty::Pointer(inner)) => Some(self.table.view(inner)),
            _ => None,
        }
    }

    /// Struct, directly or behind a named type.
    pub fn is_struct(&self) -> bool {
        self.struct_type().is_some()
    }

    pub fn struct_type(&self) -> Option<&'a StructType> {
        match self.underlying {
            Some(Ty::Struct(st)) => Some(st),
            _ => None,
        }
    }

    /// Fields in declaration order; empty for non-structs.
    pub fn fields(&self) -> &'a [Field] {
        self.struct_type().map_or(&[], |st| st.fields.as_slice())
    }

    /// Look up a field by name and view its type.
    pub fn field(&self, name: &str) -> Option<(&'a Field, TypeView<'a>)> {
        let field = self.struct_type()?.field(name)?;
        Some((field, self.table.view(&field.ty)))
    }

    /// Identifier base used to suggest names for methods and locals derived
    /// from this type: `Foo`, `int`, `FooList`, `mapStringInt`, `pFoo`.
    pub fn id(&self) -> String {
        match self.ty {
            Ty::Named(named) => named.name.clone(),
            Ty::Basic(kind) => kind.name().to_string(),
            Ty::Slice(elem) => format!("{}List", self.table.view(elem).id()),
            Ty::Array { elem, .. } => format!("{}Array", self.table.view(elem).id()),
            Ty::Map { key, value } => format!(
                "map{}{}",
                upper_first(&self.table.view(key).id()),
                upper_first(&self.table.view(value).id())
            ),
            Ty::Pointer(inner) => format!("p{}", upper_first(&self.table.view(inner).id())),
            Ty::Struct(_) => "unnamedStruct".to_string(),
        }
    }
}

impl PartialEq for TypeView<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty
    }
}

impl Eq for TypeView<'_> {}

impl fmt::Display for TypeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ty)
    }
}

impl fmt::Debug for TypeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeView({})", self.ty)
    }
}
