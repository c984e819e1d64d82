//! Wait Basics Example
//!
//! Demonstrates the core waiting primitives:
//! - WaitConfig (timeout, polling interval, ignored error kinds)
//! - Waiter::until with custom closures
//! - Timeout diagnostics (elapsed time, last observed error)
//! - Immediate propagation of non-ignored errors
//!
//! # Running
//!
//! ```bash
//! cargo run --example wait_basics -p esperar
//! ```

use esperar::prelude::*;
use std::time::Duration;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("esperar=debug")),
        )
        .init();

    println!("=== Esperar Wait Basics Example ===\n");

    demo_config();
    demo_success_after_polling();
    demo_timeout_diagnostics();
    demo_unexpected_error();

    println!("\n=== Wait Basics Example Complete ===");
}

fn demo_config() {
    println!("--- WaitConfig ---");
    let config = WaitConfig::new(Duration::from_secs(2))
        .with_poll_interval(Duration::from_millis(100))
        .ignoring(ErrorKind::Stale);
    println!("timeout:       {:?}", config.timeout);
    println!("poll interval: {:?}", config.poll_interval);
    println!("ignores stale: {}\n", config.is_ignored(ErrorKind::Stale));
}

fn demo_success_after_polling() {
    println!("--- Success after polling ---");
    let page = MockPage::new();
    let background = page.clone();
    std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(150));
        background.set_title("Loaded");
    });

    let waiter = Waiter::with_config(
        &page,
        WaitConfig::new(Duration::from_secs(1)).with_poll_interval(Duration::from_millis(50)),
    );
    let title = waiter
        .until_fn(
            |s: &MockPage| {
                let t = s.title()?;
                Ok((t == "Loaded").then_some(t))
            },
            "title to become 'Loaded'",
        )
        .expect("title should flip within the timeout");
    println!("observed title: {title:?}\n");
}

fn demo_timeout_diagnostics() {
    println!("--- Timeout diagnostics ---");
    let page = MockPage::new();
    let config = WaitConfig::new(Duration::from_millis(200))
        .with_poll_interval(Duration::from_millis(50))
        .ignoring(ErrorKind::NotFound);
    let waiter = Waiter::with_config(&page, config);
    let err = waiter
        .until_fn(
            |s: &MockPage| s.find(&Locator::id("never-there")).map(Some),
            "presence of #never-there",
        )
        .expect_err("element never appears");
    println!("error: {err}");
    if let Some(last) = err.last_error() {
        println!("last transient error kind: {}\n", last.kind);
    }
}

fn demo_unexpected_error() {
    println!("--- Unexpected error propagation ---");
    let page = MockPage::new();
    page.inject_failure(QueryError::new(ErrorKind::SessionClosed, "browser crashed"));
    let waiter = Waiter::with_config(&page, WaitConfig::slow());
    let err = waiter
        .until_fn(|s: &MockPage| s.title().map(Some), "any title")
        .expect_err("session failure is not retried");
    println!("propagated without polling: {err}");
}
