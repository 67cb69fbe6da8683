//! Identifier helpers shared by the type descriptors and the namer.

/// Uppercase the first character (`fooList` -> `FooList`).
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase the first character (`FooList` -> `fooList`).
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Go export rule: an identifier is exported iff it starts with an uppercase letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Name a package is referred to by in source: the last segment of its
/// import path (`example.com/user` -> `user`).
pub fn package_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
