//! Library half of the `tortue` command-line tool.
//!
//! The binary only parses arguments; everything it does lives here so the
//! handlers can be tested against in-memory input and output.

pub mod commands;
mod error;

use std::sync::Once;

pub use error::CliError;

static TRACING_INIT: Once = Once::new();

/// Install a hierarchical tracing subscriber, filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset, and nothing after the first call.
/// Try `RUST_LOG=tortue_grammar=trace` to watch rules match.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(EnvFilter::from_default_env())
                .with(
                    HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .init();
        }
    });
}
