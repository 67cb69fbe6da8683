//! Stack growth guard for the conversion builder and printer.
//!
//! Building a conversion recurses once per nesting level of the types being
//! converted (`[][][]map[string]*T` is five levels before the element rule
//! even starts). Unnamed types are inlined rather than extracted, so the
//! generated statements and expressions nest as deeply as the type does, and
//! so does printing them.
//!
//! Guarded walks: the dispatcher entry, the printer's statement, expression
//! and type walks, and import collection. Helpers that recurse over a single
//! type (identity, clone, drop) are not guarded; they run inside the red
//! zone, which is sized to hold them for the depths the guarded walks reach.
//!
//! Wrap a recursive entry point with [`ensure_sufficient_stack`]:
//!
//! ```text
//! fn build(&mut self, ...) -> Result<Built, BuildError> {
//!     ensure_sufficient_stack(|| self.build_inner(...))
//! }
//! ```

/// Remaining stack below which a new segment is allocated (1MB).
const RED_ZONE: usize = 1024 * 1024;

/// Size of each newly allocated stack segment (8MB).
const SEGMENT_SIZE: usize = 8 * 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack; call through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
