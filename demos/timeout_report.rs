//! # Timeout Report Example
//!
//! Shows the timeout path: the page completes but the selector never
//! appears, so the deadline closes the session and reports it.
//!
//! The built-in [`ConsoleWriter`] subscriber prints the event stream,
//! including the `[selector-timeout]` line with the full message.
//!
//! ## Run
//! ```bash
//! cargo run --example timeout_report --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use rendergate::{
    Config, ConsoleWriter, Document, FakePage, Gate, ReadyState, Subscribe, WaitSpec,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let mut cfg = Config::default();
    cfg.poll_interval = Duration::from_millis(50);

    let page = Arc::new(FakePage::with_state(ReadyState::Complete));
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(ConsoleWriter::new())];
    let gate = Gate::builder(cfg, Arc::clone(&page) as Arc<dyn Document>)
        .with_subscribers(subs)
        .build();

    let mut session = gate.wait_for_exist(
        WaitSpec::selectors(["#promo-banner"])
            .with_variant("promo-2")
            .with_timeout(Duration::from_millis(400)),
        || Ok(()),
        || {},
        |notice| eprintln!("reject callback: {notice}"),
    );

    let outcome = session.finished().await;
    println!("outcome: {outcome:?}");

    // Give the console subscriber a moment to drain its queue.
    tokio::time::sleep(Duration::from_millis(100)).await;
    Ok(())
}
