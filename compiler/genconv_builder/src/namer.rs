//! Unique identifier allocation.

use rustc_hash::FxHashSet;

/// Allocates identifiers that are unique within one scope.
///
/// A generation run owns one `Namer` for method names; every method body
/// gets its own for locals.
#[derive(Clone, Debug, Default)]
pub struct Namer {
    taken: FxHashSet<String>,
}

impl Namer {
    /// A scope with nothing taken.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `name` as used for the rest of this scope.
    pub fn register(&mut self, name: impl Into<String>) {
        self.taken.insert(name.into());
    }

    /// Whether `name` was registered or suggested in this scope.
    pub fn is_taken(&self, name: &str) -> bool {
        self.taken.contains(name)
    }

    /// Return `base` if free, otherwise the first free `base1`, `base2`, ...
    /// The returned name is registered before returning.
    pub fn suggest(&mut self, base: &str) -> String {
        if !self.taken.contains(base) {
            self.taken.insert(base.to_string());
            return base.to_string();
        }
        let mut suffix = 1usize;
        loop {
            let candidate = format!("{base}{suffix}");
            if !self.taken.contains(&candidate) {
                self.taken.insert(candidate.clone());
                return candidate;
            }
            suffix += 1;
        }
    }

    /// Number of names taken so far.
    pub fn len(&self) -> usize {
        self.taken.len()
    }

    /// Whether no name has been taken.
    pub fn is_empty(&self) -> bool {
        self.taken.is_empty()
    }
}
