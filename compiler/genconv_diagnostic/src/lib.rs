//! Build errors for conversion synthesis.
//!
//! A failure deep inside a nested conversion is useless without knowing how
//! the builder got there. [`BuildError`] carries the original cause plus a
//! breadcrumb trail of [`PathFrame`]s: each enclosing builder that forwards
//! the error attaches one frame for its own level via [`BuildError::lift`].
//!
//! ```text
//! source -> target : app.Input -> app.Output
//! Items : []int -> []string
//! [] : int -> string
//!
//! TypeMismatch: Cannot convert int to string
//! ```
//!
//! Frames are pushed while unwinding (innermost first) and rendered outermost
//! first. Lifting never touches the cause.

use std::fmt;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuildErrorKind {
    /// No rule and no method extraction applies to the pair.
    TypeMismatch { source: String, target: String },
    /// A target struct field has no counterpart on the source struct.
    MissingSourceField { field: String, source: String },
    /// A target struct field is not exported and cannot be assigned.
    UnexportedField { field: String, target: String },
}

impl fmt::Display for BuildErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeMismatch { source, target } => {
                write!(f, "TypeMismatch: Cannot convert {source} to {target}")
            }
            Self::MissingSourceField { field, source } => write!(
                f,
                "Cannot set value for field {field} because it does not exist on the source entry {source}."
            ),
            Self::UnexportedField { field, target } => {
                write!(f, "Cannot set value for unexported field \"{field}\" of {target}.")
            }
        }
    }
}

/// One breadcrumb: how one nesting level reached the next.
///
/// `source_id`/`target_id` name the step (`"[]"`, `"[key]"`, `"*"`, a field
/// name); the type strings are the types at the far side of the step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathFrame {
    pub source_id: String,
    pub source_type: String,
    pub target_id: String,
    pub target_type: String,
}

impl PathFrame {
    /// Frame whose step has the same label on both sides.
    pub fn new(
        label: impl Into<String>,
        source_type: impl Into<String>,
        target_type: impl Into<String>,
    ) -> Self {
        let label = label.into();
        PathFrame {
            source_id: label.clone(),
            source_type: source_type.into(),
            target_id: label,
            target_type: target_type.into(),
        }
    }

    /// Frame for a step whose labels differ per side (mapped struct fields,
    /// the root `source -> target` frame).
    pub fn between(
        source_id: impl Into<String>,
        source_type: impl Into<String>,
        target_id: impl Into<String>,
        target_type: impl Into<String>,
    ) -> Self {
        PathFrame {
            source_id: source_id.into(),
            source_type: source_type.into(),
            target_id: target_id.into(),
            target_type: target_type.into(),
        }
    }
}

impl fmt::Display for PathFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.source_id == self.target_id {
            write!(f, "{}", self.source_id)?;
        } else {
            write!(f, "{} -> {}", self.source_id, self.target_id)?;
        }
        write!(f, " : {} -> {}", self.source_type, self.target_type)
    }
}

/// A conversion build failure with its breadcrumb trail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildError {
    pub kind: BuildErrorKind,
    /// Frames in the order they were attached: innermost first.
    frames: Vec<PathFrame>,
}

impl BuildError {
    /// Error with cause `kind` and no frames yet.
    pub fn from_kind(kind: BuildErrorKind) -> Self {
        BuildError {
            kind,
            frames: Vec::new(),
        }
    }

    /// Attach the frame for the enclosing level.
    #[must_use]
    pub fn lift(mut self, frame: PathFrame) -> Self {
        self.frames.push(frame);
        self
    }

    /// Frames outermost first.
    pub fn path(&self) -> impl Iterator<Item = &PathFrame> {
        self.frames.iter().rev()
    }

    /// One line per frame, outermost first.
    pub fn breadcrumb(&self) -> String {
        self.path()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Breadcrumb followed by the cause.
    pub fn render(&self) -> String {
        if self.frames.is_empty() {
            return self.kind.to_string();
        }
        format!("{}\n\n{}", self.breadcrumb(), self.kind)
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl std::error::Error for BuildError {}

/// No rule converts `source` into `target`.
#[cold]
pub fn type_mismatch(source: impl fmt::Display, target: impl fmt::Display) -> BuildError {
    BuildError::from_kind(BuildErrorKind::TypeMismatch {
        source: source.to_string(),
        target: target.to_string(),
    })
}

/// Target field `field` has no source counterpart on `source`.
#[cold]
pub fn missing_source_field(field: &str, source: impl fmt::Display) -> BuildError {
    BuildError::from_kind(BuildErrorKind::MissingSourceField {
        field: field.to_string(),
        source: source.to_string(),
    })
}

/// Target field `field` of `target` is unexported.
#[cold]
pub fn unexported_field(field: &str, target: impl fmt::Display) -> BuildError {
    BuildError::from_kind(BuildErrorKind::UnexportedField {
        field: field.to_string(),
        target: target.to_string(),
    })
}

#[cfg(test)]
mod tests;
