//! Event Registry Demonstration
//!
//! This example wires an [`EventRegistry`] to `tracing` output and walks
//! through the lifecycle of a pair of login listeners: registration,
//! one-shot dispatch, silent mode, and removal.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example login_events_demo --package beacon-core
//! ```

use beacon_core::{EmitResult, EventRegistry, Listener, TracingSink};
use serde_json::{json, Value};
use std::sync::Arc;

fn main() -> EmitResult<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let registry: EventRegistry = EventRegistry::with_sink(Arc::new(TracingSink));

    let on_login = Listener::new(|payload: &Value| {
        println!("login: {payload}");
        Ok(())
    });
    let greet_first_login = Listener::new(|payload: &Value| {
        println!("welcome aboard, {}!", payload["name"]);
        Ok(())
    });

    registry
        .on("login", &on_login)
        .once("login", &greet_first_login);

    registry.emit("login", &json!({"name": "ada", "success": true}))?;

    // The greeting ran once; only the persistent listener remains.
    registry.emit("login", &json!({"name": "ada", "success": true}))?;

    // Silent mode drops events without touching the listener table.
    registry.set_silent(true);
    registry.emit("login", &json!({"name": "ghost"}))?;
    registry.set_silent(false);

    let removed = registry.off("login", &on_login);
    println!("removed login listener: {}", removed.is_some());

    // No listeners left; this emit is a no-op.
    registry.emit("login", &json!({"name": "nobody"}))?;

    Ok(())
}
