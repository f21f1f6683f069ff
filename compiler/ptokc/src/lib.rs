//! ptok scanner driver.
//!
//! Wires [`ptok_lexer_core::Scanner`] to a paged source [`listing`] and runs
//! the top-level [`driver`] loop that stops at the period terminator.

pub mod driver;
pub mod listing;
pub mod source;

pub use driver::{tokenize, Outcome, Summary};
pub use listing::{Listing, ListingConfig};
pub use source::{open_source, OpenError};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing subscriber for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=ptok_lexer_core=debug` or `RUST_LOG=trace`.
/// Log output goes to stderr so it never mixes with the listing.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Without RUST_LOG the scanner runs with no subscriber at all.
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
