//! Expected Conditions Example
//!
//! Demonstrates the ready-made condition library:
//! - presence / visibility / clickability of elements
//! - title and url conditions
//! - combinators (and / or / not)
//! - retry_on_stale for actions racing a re-render
//!
//! # Running
//!
//! ```bash
//! cargo run --example expected_conditions -p esperar
//! ```

use esperar::prelude::*;
use std::time::Duration;

fn fast_config() -> WaitConfig {
    WaitConfig::new(Duration::from_millis(500)).with_poll_interval(Duration::from_millis(20))
}

fn main() {
    println!("=== Esperar Expected Conditions Example ===\n");

    demo_presence_and_clickability();
    demo_document_conditions();
    demo_combinators();
    demo_retry_on_stale();

    println!("\n=== Expected Conditions Example Complete ===");
}

fn demo_presence_and_clickability() {
    println!("--- Presence and clickability ---");
    let page = MockPage::new();
    let button = page.insert_element(Locator::css("button#submit"));
    button.set_enabled(false);

    let enabler = button.clone();
    std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(100));
        enabler.set_enabled(true);
    });

    let waiter = Waiter::with_config(&page, fast_config());
    let found = waiter
        .until(expected::presence_of_element(Locator::css("button#submit")))
        .expect("present immediately");
    println!("present, enabled={}", found.is_enabled().unwrap());

    let clickable = waiter
        .until(expected::element_clickable(Locator::css("button#submit")))
        .expect("enabled by the background thread");
    println!("clickable, enabled={}\n", clickable.is_enabled().unwrap());
}

fn demo_document_conditions() {
    println!("--- Title and URL conditions ---");
    let page = MockPage::new();
    page.set_title("Orders - Example Shop");
    page.set_url("https://shop.example/orders/42");

    let waiter = Waiter::with_config(&page, fast_config());
    let title = waiter.until(expected::title_contains("Orders")).unwrap();
    let url = waiter.until(expected::url_contains("/orders/")).unwrap();
    println!("title: {title:?}");
    println!("url:   {url:?}\n");
}

fn demo_combinators() {
    println!("--- Combinators ---");
    let page = MockPage::new();
    page.set_title("Dashboard");
    page.insert_element(Locator::id("chart"));

    let waiter = Waiter::with_config(&page, fast_config());
    let (title, _chart) = waiter
        .until(
            expected::title_is("Dashboard")
                .and(expected::visibility_of_element(Locator::id("chart"))),
        )
        .expect("both hold");
    println!("and-condition satisfied with title {title:?}");

    let spinner_gone = waiter
        .until(not(expected::presence_of_element(Locator::id("spinner"))))
        .expect("spinner was never inserted");
    println!("spinner absent: {spinner_gone}\n");
}

fn demo_retry_on_stale() {
    println!("--- retry_on_stale ---");
    let page = MockPage::new();
    let first = page.insert_element(Locator::id("row"));
    first.set_text("draft");

    // simulate a re-render after the first read: old handle goes stale,
    // a fresh element takes its place
    let rerender = page.clone();
    std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(50));
        rerender.remove_elements(&Locator::id("row"));
        let fresh = rerender.insert_element(Locator::id("row"));
        fresh.set_text("saved");
    });

    std::thread::sleep(Duration::from_millis(100));
    let text = retry_on(
        &[ErrorKind::Stale],
        RetryPolicy::new(3).with_backoff(Duration::from_millis(20)),
        || page.find(&Locator::id("row"))?.text(),
    )
    .map(|(text, report)| {
        println!("read succeeded after {} attempt(s)", report.attempts);
        text
    })
    .expect("fresh element readable");
    println!("row text: {text:?}");
}
