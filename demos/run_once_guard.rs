//! # Run-Once Guard Example
//!
//! Applies a page mutation at most once, keyed on a root-element marker.
//! Re-running the same script (SPA navigation, double-injected tags) finds
//! the marker and skips the mutation.
//!
//! ## Run
//! ```bash
//! cargo run --example run_once_guard
//! ```

use std::sync::Arc;

use rendergate::{Config, Document, FakePage, Gate};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let page = Arc::new(FakePage::new());
    let gate = Gate::builder(Config::default(), Arc::clone(&page) as Arc<dyn Document>).build();

    // The script runs three times; the mutation applies on the first pass.
    for pass in 1..=3 {
        let ran = gate.run_variant("promo-2-applied", || {
            println!(" ├─► pass {pass}: mutation applied");
        });
        if !ran {
            println!(" ├─► pass {pass}: marker found, skipped");
        }
    }
    println!(" └─► done");
    Ok(())
}
