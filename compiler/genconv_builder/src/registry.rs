//! Ordered rule lookup.

use genconv_diagnostic::type_mismatch;
use genconv_types::TypeView;

use crate::rules::{BasicRule, ListRule, MapRule, PointerRule, StructRule, TargetPointerRule};
use crate::{BuildResult, Dispatch, ExprHandle, MethodContext, Rule};

// Static rule instances for 'static lifetime references
static BASIC: BasicRule = BasicRule;
static POINTER: PointerRule = PointerRule;
static TARGET_POINTER: TargetPointerRule = TargetPointerRule;
static LIST: ListRule = ListRule;
static MAP: MapRule = MapRule;
static STRUCT: StructRule = StructRule;

/// Every rule, in the order they are tried.
///
/// `Pointer` must precede `TargetPointer` (a `*T -> *U` pair matches both),
/// and nothing may precede `Basic`, whose result can be the source itself.
pub static RULES: [&dyn Rule; 6] = [&BASIC, &POINTER, &TARGET_POINTER, &LIST, &MAP, &STRUCT];

/// Lookup over [`RULES`].
///
/// All rules are ZSTs with static lifetime, so this struct has zero overhead.
pub struct RuleRegistry {
    // Marker field to prevent external construction
    _private: (),
}

impl RuleRegistry {
    /// Registry over the static rule table.
    pub fn new() -> Self {
        RuleRegistry { _private: () }
    }

    /// First rule that accepts the pair.
    pub fn find(&self, source: TypeView<'_>, target: TypeView<'_>) -> Option<&'static dyn Rule> {
        RULES
            .iter()
            .copied()
            .find(|rule| rule.matches(source, target))
    }

    /// Rule names in priority order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        RULES.iter().map(|rule| rule.name())
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        RULES.len()
    }

    /// Always `false`; the table is static and non-empty.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Build inline with the first matching rule, without consulting any
/// method registry for the pair itself.
///
/// Fails with a type mismatch when no rule matches.
pub fn build_with_rules(
    dispatch: &mut dyn Dispatch,
    ctx: &mut MethodContext,
    source: ExprHandle,
    source_ty: TypeView<'_>,
    target_ty: TypeView<'_>,
) -> BuildResult {
    match RuleRegistry::new().find(source_ty, target_ty) {
        Some(rule) => {
            tracing::trace!(rule = rule.name(), source = %source_ty, target = %target_ty, "rule selected");
            rule.build(dispatch, ctx, source, source_ty, target_ty)
        }
        None => Err(type_mismatch(source_ty, target_ty)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genconv_types::{Field, Ty, TypeTable};
    use pretty_assertions::assert_eq;

    fn selected(table: &TypeTable, source: &Ty, target: &Ty) -> Option<&'static str> {
        RuleRegistry::new()
            .find(table.view(source), table.view(target))
            .map(|rule| rule.name())
    }

    #[test]
    fn registry_order() {
        let registry = RuleRegistry::new();
        assert_eq!(registry.len(), 6);
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["basic", "pointer", "target-pointer", "list", "map", "struct"]
        );
    }

    #[test]
    fn first_match_wins() {
        let mut table = TypeTable::new();
        let id = table.define("app", "ID", Ty::INT);
        let foo = table.define("app", "Foo", Ty::structure(vec![Field::new("A", Ty::INT)]));

        assert_eq!(selected(&table, &Ty::INT, &Ty::INT), Some("basic"));
        assert_eq!(selected(&table, &id, &Ty::INT), Some("basic"));
        assert_eq!(
            selected(&table, &Ty::pointer(Ty::INT), &Ty::pointer(Ty::INT)),
            Some("pointer")
        );
        assert_eq!(selected(&table, &Ty::INT, &Ty::pointer(Ty::INT)), Some("target-pointer"));
        assert_eq!(
            selected(&table, &Ty::array(2, Ty::INT), &Ty::slice(Ty::INT)),
            Some("list")
        );
        assert_eq!(
            selected(&table, &Ty::map(Ty::INT, Ty::INT), &Ty::map(Ty::INT, Ty::INT)),
            Some("map")
        );
        assert_eq!(selected(&table, &foo, &foo), Some("struct"));
    }

    #[test]
    fn no_rule_for_incompatible_pairs() {
        let table = TypeTable::new();
        assert_eq!(selected(&table, &Ty::INT, &Ty::STRING), None);
        assert_eq!(selected(&table, &Ty::slice(Ty::INT), &Ty::array(2, Ty::INT)), None);
        assert_eq!(selected(&table, &Ty::pointer(Ty::INT), &Ty::INT), None);
        assert_eq!(selected(&table, &Ty::named("app", "Missing"), &Ty::INT), None);
    }
}
