//! Generator of Go conversion methods.
//!
//! Given a set of requested conversions (`Convert(source In) Out`), genconv
//! synthesizes one Go method per conversion by walking the structure of both
//! types: fields by name, slices element by element, maps entry by entry,
//! pointers through their pointees. Nested named types get methods of their
//! own, so every conversion between two named types is written exactly once
//! and cyclic types terminate.
//!
//! ```text
//! let mut table = TypeTable::new();
//! let foo = table.define("example.com/in", "Foo", ...);
//! let bar = table.define("example.com/out", "Bar", ...);
//! let source = generate(
//!     &table,
//!     GeneratorConfig::default(),
//!     [MethodRequest::new("Convert", Ty::slice(foo), Ty::slice(bar))],
//! )?;
//! ```
//!
//! # Crates
//!
//! - `genconv_types`: type model and descriptors
//! - `genconv_builder`: the rules and per-method naming
//! - `genconv_ast`: Go AST and printer
//! - `genconv_diagnostic`: build errors with breadcrumb paths
//!
//! Loading Go packages and parsing the conversion interface is the caller's
//! job; this crate starts from a [`TypeTable`] and [`MethodRequest`]s.

mod config;
mod error;
mod generator;
mod method;

use std::sync::Once;

pub use config::{DuplicatePolicy, GeneratorConfig};
pub use error::GenerateError;
pub use generator::{Generator, GENERATED_HEADER};
pub use method::{Method, MethodRequest, Signature};

pub use genconv_types::TypeTable;

/// Environment variable holding the log filter; `RUST_LOG` is the fallback.
pub const LOG_ENV: &str = "GENCONV_LOG";

static TRACING_INIT: Once = Once::new();

/// Initialize the tracing subscriber.
///
/// Only installs a subscriber when `GENCONV_LOG` or `RUST_LOG` holds a valid
/// filter, so library users who bring their own subscriber are unaffected.
/// Safe to call more than once.
///
/// ```bash
/// GENCONV_LOG=genconv=debug ...
/// GENCONV_LOG=genconv_builder=trace ...
/// ```
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        let filter =
            EnvFilter::try_from_env(LOG_ENV).or_else(|_| EnvFilter::try_from_default_env());
        if let Ok(filter) = filter {
            let layer = HierarchicalLayer::new(2)
                .with_targets(true)
                .with_bracketed_fields(true);
            // Another subscriber may already be installed.
            let _ = tracing_subscriber::registry()
                .with(layer)
                .with(filter)
                .try_init();
        }
    });
}

/// Register `requests`, build every method and print the generated file.
pub fn generate(
    table: &TypeTable,
    config: GeneratorConfig,
    requests: impl IntoIterator<Item = MethodRequest>,
) -> Result<String, GenerateError> {
    let mut generator = Generator::new(table, config);
    for request in requests {
        generator.register(request)?;
    }
    generator.render()
}
