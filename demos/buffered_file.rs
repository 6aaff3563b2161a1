//! Buffered file logging example
//!
//! Demonstrates buffered output with a background flusher, loggers shared
//! across threads, and sink metrics.
//!
//! Run with: cargo run --example buffered_file

use rust_structured_logger::prelude::*;
use std::fs::{self, File};
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Rust Structured Logger - Buffered File Example ===\n");

    let log_path = std::env::temp_dir().join("structured_logger_demo.log");
    let file = File::create(&log_path)?;

    let config = Config::new()
        .with_min_level(LogLevel::DEBUG)
        .with_buffered_output(true)
        .with_flush_interval(Duration::from_millis(200));
    let logger = Logger::json(file, Some(config))?.with_attrs(&[Attr::string("service", "demo")]);

    println!("1. Logging from 4 worker threads...");
    let handles: Vec<_> = (0..4u64)
        .map(|id| {
            let worker = logger.with_group("worker").with_attrs(&[Attr::uint("id", id)]);
            thread::spawn(move || {
                for job in 0..25u64 {
                    worker.log_attrs(LogLevel::DEBUG, "job done", vec![Attr::uint("job", job)]);
                }
            })
        })
        .collect();

    for handle in handles {
        if handle.join().is_err() {
            eprintln!("worker thread panicked");
        }
    }

    println!("2. Waiting for the background flusher...");
    thread::sleep(Duration::from_millis(300));

    logger.shutdown()?;

    let metrics = logger.metrics();
    println!("\n3. Sink metrics:");
    println!("   records written: {}", metrics.records_written());
    println!("   bytes written:   {}", metrics.bytes_written());
    println!("   flushes:         {}", metrics.flushes());
    println!("   write failures:  {}", metrics.write_failures());

    let content = fs::read_to_string(&log_path)?;
    println!("\n4. First lines of {}:", log_path.display());
    for line in content.lines().take(3) {
        println!("   {}", line);
    }

    println!("\n=== Example completed successfully ===");
    Ok(())
}
