//! Rule implementations, one per structural shape.
//!
//! Each rule destructures exactly one level of the type pair and dispatches
//! the inner pairs. A failure coming back from an inner pair is lifted with
//! one frame describing the step taken (`[]`, `[key]`, `*`, a field name).

mod basic;
mod list;
mod map;
mod pointer;
mod structure;

pub use basic::BasicRule;
pub use list::ListRule;
pub use map::MapRule;
pub use pointer::{PointerRule, TargetPointerRule};
pub use structure::StructRule;
