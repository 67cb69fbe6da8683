//! Generator configuration.

use genconv_types::package_name;

/// What to do when two requests share a source/target pair.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DuplicatePolicy {
    /// The later request replaces the earlier one.
    #[default]
    Overwrite,
    /// Registration fails with [`GenerateError::DuplicateSignature`](crate::GenerateError::DuplicateSignature).
    Reject,
}

/// Output naming and registration behavior.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GeneratorConfig {
    /// Name of the generated converter struct; every method hangs off it.
    pub name: String,
    /// `package` clause of the generated file.
    pub package_name: String,
    /// Import path of the generated package. Types declared there print
    /// unqualified.
    pub package_path: String,
    /// Import path of the package declaring the requested conversions.
    /// Delegate names are resolved in its scope.
    pub source_package: String,
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            name: "ConverterImpl".to_string(),
            package_name: "generated".to_string(),
            package_path: "generated".to_string(),
            source_package: String::new(),
            duplicate_policy: DuplicatePolicy::Overwrite,
        }
    }
}

impl GeneratorConfig {
    /// Set the name of the generated converter type.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set both the import path and the package name (its last segment).
    #[must_use]
    pub fn with_package(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.package_name = package_name(&path).to_string();
        self.package_path = path;
        self
    }

    /// Set the package searched for delegate functions.
    #[must_use]
    pub fn with_source_package(mut self, path: impl Into<String>) -> Self {
        self.source_package = path.into();
        self
    }

    /// Choose what a second request for an already registered pair does.
    #[must_use]
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.name, "ConverterImpl");
        assert_eq!(config.package_name, "generated");
        assert_eq!(config.package_path, "generated");
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Overwrite);
    }

    #[test]
    fn package_name_is_last_segment() {
        let config = GeneratorConfig::default().with_package("example.com/app/generated/conv");
        assert_eq!(config.package_name, "conv");
        assert_eq!(config.package_path, "example.com/app/generated/conv");
    }
}
