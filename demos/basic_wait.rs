//! # Basic Wait Example
//!
//! Defers a page mutation until its selectors exist.
//!
//! The example:
//! - Simulates a page that grows its elements over ~300ms
//! - Registers a wait for "#hero" and ".cta"
//! - Applies the render once both exist
//!
//! ## Run
//! ```bash
//! cargo run --example basic_wait
//! ```

use std::sync::Arc;
use std::time::Duration;

use rendergate::{Condition, Config, Document, FakePage, Gate, ReadyState, WaitSpec};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let page = Arc::new(FakePage::new());
    let gate = Gate::builder(Config::default(), Arc::clone(&page) as Arc<dyn Document>).build();

    // Simulate the page loading around the waiting session.
    let simulated = Arc::clone(&page);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(120)).await;
        simulated.set_ready_state(ReadyState::Interactive);
        simulated.add_element("#hero");
        tokio::time::sleep(Duration::from_millis(180)).await;
        simulated.add_element(".cta");
        simulated.set_ready_state(ReadyState::Complete);
    });

    println!("waiting for #hero and .cta ...");
    let mut session = gate.wait_for_exist(
        WaitSpec::new([Condition::selector("#hero"), Condition::selector(".cta")])
            .with_variant("hero-1"),
        || {
            println!(" ├─► rendering: moving the call-to-action above the fold");
            Ok(())
        },
        || println!(" ├─► session registered"),
        |notice| eprintln!(" ├─► rejected: {notice}"),
    );

    let outcome = session.finished().await;
    println!(" └─► outcome: {outcome:?}");
    Ok(())
}
