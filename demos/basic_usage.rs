//! Basic logger usage example
//!
//! Demonstrates both output formats, levels, derived loggers and groups.
//!
//! Run with: cargo run --example basic_usage

use rust_structured_logger::prelude::*;
use rust_structured_logger::{info, warn};
use std::time::Duration;

#[derive(Debug)]
struct Secret(&'static str);

impl LogValuer for Secret {
    fn log_value(&self) -> Value {
        Value::String(format!("{}...", &self.0[..3]))
    }
}

fn main() -> Result<()> {
    println!("=== Rust Structured Logger - Basic Usage Example ===\n");

    println!("1. Text format on stdout:");
    let text = Logger::builder()
        .text()
        .min_level(LogLevel::DEBUG)
        .writer(std::io::stdout())
        .build()?;
    text.debug("This is a debug message");
    text.info("This is an info message");
    text.warn("This is a warning message");
    text.error("This is an error message");

    println!("\n2. JSON format with attributes:");
    let json = Logger::json(std::io::stdout(), None)?;
    json.log_attrs(
        LogLevel::INFO,
        "payment processed",
        vec![
            Attr::string("user_id", "1"),
            Attr::int("amount", 500),
            Attr::duration("latency", Duration::from_millis(15)),
            Attr::bool("retry", false),
        ],
    );

    println!("\n3. Derived loggers:");
    let request = json
        .with_group("request")
        .with_attrs(&[Attr::string("id", "req-123"), Attr::string("path", "/api/users")]);
    info!(request, "Request accepted"; "method" => "GET");
    warn!(request, "Slow response"; "latency" => Duration::from_millis(850));

    let request_text = text.with_group("request").with_attrs(&[Attr::string("id", "req-123")]);
    info!(request_text, "Request accepted"; "method" => "GET");

    println!("\n4. Groups, opaque and lazy values:");
    json.log_attrs(
        LogLevel::INFO,
        "user created",
        vec![
            Attr::group(
                "user",
                [
                    Attr::string("name", "alice"),
                    Attr::any("roles", vec!["admin", "dev"]),
                    Attr::new("token", Value::lazy(Secret("abcdef123456"))),
                ],
            ),
            Attr::string("empty", ""),
            Attr::int("", 1),
        ],
    );

    println!("\n5. Minimum level filtering:");
    let quiet = Logger::builder()
        .json()
        .min_level(LogLevel::WARN)
        .writer(std::io::stdout())
        .build()?;
    quiet.info("This will not be printed");
    quiet.warn("Only warnings and above");

    println!("\n=== Example completed successfully ===");
    Ok(())
}
