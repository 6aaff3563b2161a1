//! Shared output sink
//!
//! Every logger derived from the same root writes through one `Sink`. Writes
//! are serialized by a mutex held for exactly one `write_all`, so the bytes of
//! one record are never interleaved with another's. Encoding happens before the
//! lock is taken.
//!
//! When buffering is enabled the destination is wrapped in a `BufWriter` and a
//! background thread flushes it on a fixed interval. The thread is stopped by
//! [`Sink::shutdown`] or when the sink is dropped.

use super::config::Config;
use super::error::{LoggerError, Result};
use super::metrics::SinkMetrics;
use crossbeam_channel::{bounded, select, tick, Sender};
use parking_lot::Mutex;
use std::io::{self, BufWriter, Write};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Destination handed to the sink
pub type Destination = Box<dyn Write + Send>;

enum SinkWriter {
    Direct(Destination),
    Buffered(BufWriter<Destination>),
}

impl Write for SinkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            SinkWriter::Direct(w) => w.write(buf),
            SinkWriter::Buffered(w) => w.write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            SinkWriter::Direct(w) => w.write_all(buf),
            SinkWriter::Buffered(w) => w.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            SinkWriter::Direct(w) => w.flush(),
            SinkWriter::Buffered(w) => w.flush(),
        }
    }
}

struct SinkInner {
    writer: Mutex<SinkWriter>,
    metrics: SinkMetrics,
}

impl SinkInner {
    fn flush(&self) -> io::Result<()> {
        let result = self.writer.lock().flush();
        match result {
            Ok(()) => self.metrics.record_flush(),
            Err(_) => {
                self.metrics.record_flush_failure();
            }
        }
        result
    }

    /// Flush from the background thread; failures only reach stderr.
    fn flush_in_background(&self) {
        if let Err(e) = self.flush() {
            let failures = self.metrics.flush_failures();
            // Report the first failure and every 1000th after it
            if failures == 1 || failures % 1000 == 0 {
                eprintln!(
                    "[LOGGER ERROR] Background flush failed ({} failures so far): {}",
                    failures, e
                );
            }
        }
    }
}

struct Flusher {
    stop: Sender<()>,
    handle: thread::JoinHandle<()>,
}

pub struct Sink {
    inner: Arc<SinkInner>,
    flusher: Mutex<Option<Flusher>>,
    buffered: bool,
}

impl Sink {
    /// Unbuffered sink: every record goes straight to `writer`
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self::from_writer(SinkWriter::Direct(Box::new(writer)), false)
    }

    /// Buffered sink with a background flusher running every `interval`
    pub fn buffered<W: Write + Send + 'static>(
        writer: W,
        capacity: usize,
        interval: Duration,
    ) -> Result<Self> {
        if capacity == 0 || interval.is_zero() {
            return Err(LoggerError::config(
                "Sink",
                "buffer capacity and flush interval must be non-zero",
            ));
        }

        let destination: Destination = Box::new(writer);
        let sink = Self::from_writer(
            SinkWriter::Buffered(BufWriter::with_capacity(capacity, destination)),
            true,
        );
        let flusher = Self::spawn_flusher(Arc::clone(&sink.inner), interval)?;
        *sink.flusher.lock() = Some(flusher);
        Ok(sink)
    }

    /// Build the sink described by `config`
    pub fn from_config<W: Write + Send + 'static>(writer: W, config: &Config) -> Result<Self> {
        config.validate()?;
        if config.buffered_output {
            Self::buffered(writer, config.buffer_capacity, config.flush_interval())
        } else {
            Ok(Self::new(writer))
        }
    }

    fn from_writer(writer: SinkWriter, buffered: bool) -> Self {
        Self {
            inner: Arc::new(SinkInner {
                writer: Mutex::new(writer),
                metrics: SinkMetrics::new(),
            }),
            flusher: Mutex::new(None),
            buffered,
        }
    }

    fn spawn_flusher(inner: Arc<SinkInner>, interval: Duration) -> Result<Flusher> {
        let (stop, stop_rx) = bounded::<()>(0);
        let ticker = tick(interval);

        let handle = thread::Builder::new()
            .name("log-flusher".to_string())
            .spawn(move || loop {
                let stopped = select! {
                    recv(ticker) -> _ => {
                        inner.flush_in_background();
                        false
                    }
                    // Fires once the sender is dropped
                    recv(stop_rx) -> _ => true,
                };
                if stopped {
                    break;
                }
            })
            .map_err(|e| LoggerError::io_operation("spawning flusher", "thread creation failed", e))?;

        Ok(Flusher { stop, handle })
    }

    /// Write one fully encoded record
    pub fn write(&self, bytes: &[u8]) -> Result<()> {
        let result = self.inner.writer.lock().write_all(bytes);
        match result {
            Ok(()) => {
                self.inner.metrics.record_written(bytes.len());
                Ok(())
            }
            Err(e) => {
                self.inner.metrics.record_write_failure();
                Err(LoggerError::io_operation(
                    "writing record",
                    format!("{} bytes lost", bytes.len()),
                    e,
                ))
            }
        }
    }

    /// Flush buffered bytes to the destination
    pub fn flush(&self) -> Result<()> {
        self.inner
            .flush()
            .map_err(|e| LoggerError::io_operation("flushing sink", "destination flush failed", e))
    }

    #[inline]
    pub fn is_buffered(&self) -> bool {
        self.buffered
    }

    /// True while the background flusher is running
    pub fn has_flusher(&self) -> bool {
        self.flusher.lock().is_some()
    }

    pub fn metrics(&self) -> &SinkMetrics {
        &self.inner.metrics
    }

    /// Stop the background flusher and flush what is left.
    ///
    /// The sink stays usable afterwards; buffered bytes then reach the
    /// destination on explicit flushes, on buffer overflow, or on drop.
    pub fn shutdown(&self) -> Result<()> {
        let flusher = self.flusher.lock().take();
        if let Some(Flusher { stop, handle }) = flusher {
            drop(stop);
            if handle.join().is_err() {
                eprintln!("[LOGGER ERROR] Flusher thread panicked during shutdown");
            }
        }
        self.flush()
    }
}

impl Drop for Sink {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }
    }
}

impl std::fmt::Debug for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sink")
            .field("buffered", &self.buffered)
            .field("metrics", &self.inner.metrics)
            .finish()
    }
}
