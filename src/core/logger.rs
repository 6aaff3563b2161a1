//! Main logger implementation
//!
//! A `Logger` is an immutable value: a shared sink, a severity threshold, the
//! encoder, and whatever attributes and groups were bound by derivation.
//! [`Logger::with_attrs`] and [`Logger::with_group`] return new loggers and
//! leave the receiver untouched, so parents and children can be used from
//! different threads at once; they only meet at the sink's mutex.

use super::{
    attr::Attr,
    config::Config,
    error::{LoggerError, Result},
    log_level::LogLevel,
    metrics::SinkMetrics,
    output_format::OutputFormat,
    record::Record,
    sink::{Destination, Sink},
};
use crate::encoders::{ColorPalette, Encoder, GroupPrefix};
use std::cell::RefCell;
use std::io::Write;
use std::sync::Arc;

/// Encode buffers larger than this are released after use
const MAX_RETAINED_BUFFER: usize = 64 * 1024;

// Per-thread scratch buffer for encoding, so steady-state logging does not allocate
thread_local! {
    static ENCODE_BUFFER: RefCell<String> = const { RefCell::new(String::new()) };
}

fn with_encode_buffer<R>(f: impl FnOnce(&mut String) -> R) -> R {
    ENCODE_BUFFER.with(|cell| match cell.try_borrow_mut() {
        Ok(mut buf) => {
            buf.clear();
            let result = f(&mut buf);
            if buf.capacity() > MAX_RETAINED_BUFFER {
                *buf = String::new();
            }
            result
        }
        // Re-entrant call, e.g. a LogValuer that logs while being resolved
        Err(_) => f(&mut String::new()),
    })
}

#[derive(Debug, Clone)]
pub struct Logger {
    sink: Arc<Sink>,
    min_level: LogLevel,
    encoder: Arc<dyn Encoder>,
    /// Attributes bound by `with_attrs`, already encoded
    precomputed: Arc<str>,
    /// Groups entered by `with_group`, in encoder form
    prefix: Arc<GroupPrefix>,
}

impl Logger {
    /// Root logger over an existing sink
    pub fn new(sink: Arc<Sink>, min_level: LogLevel, encoder: Arc<dyn Encoder>) -> Self {
        Self {
            sink,
            min_level,
            encoder,
            precomputed: Arc::from(""),
            prefix: Arc::new(GroupPrefix::new()),
        }
    }

    /// JSON logger writing to `writer`; `None` config means defaults
    pub fn json<W: Write + Send + 'static>(writer: W, config: Option<Config>) -> Result<Self> {
        Self::builder()
            .json()
            .writer(writer)
            .config(config.unwrap_or_default())
            .build()
    }

    /// Colorized text logger writing to `writer`; `None` config means defaults
    pub fn text<W: Write + Send + 'static>(writer: W, config: Option<Config>) -> Result<Self> {
        Self::builder()
            .text()
            .writer(writer)
            .config(config.unwrap_or_default())
            .build()
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use rust_structured_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .json()
    ///     .min_level(LogLevel::DEBUG)
    ///     .writer(std::io::sink())
    ///     .build()
    ///     .unwrap();
    /// logger.debug("ready");
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Derive a logger that adds `attrs` to every record.
    ///
    /// The attributes are encoded once, here, under the current group prefix.
    #[must_use]
    pub fn with_attrs(&self, attrs: &[Attr]) -> Logger {
        if attrs.is_empty() {
            return self.clone();
        }

        let mut fragment = String::with_capacity(self.precomputed.len() + 32 * attrs.len());
        fragment.push_str(&self.precomputed);
        self.encoder.precompute_attrs(&mut fragment, &self.prefix, attrs);

        Logger {
            precomputed: Arc::from(fragment),
            ..self.clone()
        }
    }

    /// Derive a logger that places later attributes under group `name`.
    ///
    /// An empty name returns an equivalent logger.
    #[must_use]
    pub fn with_group(&self, name: &str) -> Logger {
        if name.is_empty() {
            return self.clone();
        }

        Logger {
            prefix: Arc::new(self.encoder.group_prefix(&self.prefix, name)),
            ..self.clone()
        }
    }

    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    /// Encode and write one record.
    ///
    /// Records below the threshold return `Ok(())` without any work. Sink
    /// failures are returned to the caller; the convenience methods below
    /// swallow them instead.
    pub fn handle(&self, record: &Record) -> Result<()> {
        if !self.enabled(record.level) {
            return Ok(());
        }

        with_encode_buffer(|buf| {
            self.encoder
                .encode_record(buf, record, &self.precomputed, &self.prefix);
            self.sink.write(buf.as_bytes())
        })
    }

    /// Log with attributes; never fails.
    pub fn log_attrs(&self, level: LogLevel, message: impl Into<String>, attrs: Vec<Attr>) {
        if !self.enabled(level) {
            return;
        }

        let record = Record {
            attrs,
            ..Record::new(level, message)
        };
        if let Err(e) = self.handle(&record) {
            self.report_failure(&e);
        }
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.log_attrs(level, message, Vec::new());
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::DEBUG, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::INFO, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::WARN, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::ERROR, message);
    }

    fn report_failure(&self, error: &LoggerError) {
        let failures = self.sink.metrics().write_failures();
        // Alert on first failure and periodically thereafter
        if failures <= 1 || failures % 1000 == 0 {
            eprintln!(
                "[LOGGER ERROR] Dropped log record ({} dropped so far): {}",
                failures, error
            );
        }
    }

    pub fn flush(&self) -> Result<()> {
        self.sink.flush()
    }

    /// Stop the sink's background flusher and flush.
    ///
    /// Affects every logger sharing the sink.
    pub fn shutdown(&self) -> Result<()> {
        self.sink.shutdown()
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn sink(&self) -> &Arc<Sink> {
        &self.sink
    }

    pub fn metrics(&self) -> &SinkMetrics {
        self.sink.metrics()
    }

    pub fn encoder(&self) -> &dyn Encoder {
        self.encoder.as_ref()
    }

    /// The encoded fragment of all bound attributes
    pub fn precomputed_attrs(&self) -> &str {
        &self.precomputed
    }

    pub fn group_prefix(&self) -> &GroupPrefix {
        &self.prefix
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_structured_logger::prelude::*;
/// use std::time::Duration;
///
/// let logger = Logger::builder()
///     .text()
///     .config(Config::new().with_buffered_output(true).with_flush_interval(Duration::from_millis(250)))
///     .min_level(LogLevel::WARN)
///     .writer(std::io::sink())
///     .build()
///     .unwrap();
/// logger.warn("disk almost full");
/// ```
pub struct LoggerBuilder {
    config: Config,
    format: OutputFormat,
    palette: ColorPalette,
    writer: Option<Destination>,
    encoder: Option<Arc<dyn Encoder>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            format: OutputFormat::default(),
            palette: ColorPalette::default(),
            writer: None,
            encoder: None,
        }
    }

    /// Replace the whole configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.config.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn buffered(mut self, buffered: bool) -> Self {
        self.config.buffered_output = buffered;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn json(self) -> Self {
        self.format(OutputFormat::Json)
    }

    #[must_use = "builder methods return a new value"]
    pub fn text(self) -> Self {
        self.format(OutputFormat::Text)
    }

    /// Colors for the text format
    #[must_use = "builder methods return a new value"]
    pub fn palette(mut self, palette: ColorPalette) -> Self {
        self.palette = palette;
        self
    }

    /// Destination of the encoded records. Defaults to stderr.
    #[must_use = "builder methods return a new value"]
    pub fn writer<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.writer = Some(Box::new(writer));
        self
    }

    /// Use a custom encoder instead of one of the built-in formats
    #[must_use = "builder methods return a new value"]
    pub fn encoder<E: Encoder + 'static>(mut self, encoder: E) -> Self {
        self.encoder = Some(Arc::new(encoder));
        self
    }

    /// Build the Logger
    pub fn build(self) -> Result<Logger> {
        self.config.validate()?;

        let writer = self
            .writer
            .unwrap_or_else(|| Box::new(std::io::stderr()));
        let sink = Sink::from_config(writer, &self.config)?;
        let encoder = self
            .encoder
            .unwrap_or_else(|| self.format.encoder(&self.config, self.palette));

        Ok(Logger::new(Arc::new(sink), self.config.min_level, encoder))
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoders::{JsonEncoder, TextEncoder};
    use chrono::{TimeZone, Utc};
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use std::io;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn json_logger(min_level: LogLevel) -> (Logger, SharedBuf) {
        let out = SharedBuf::default();
        let logger = Logger::new(
            Arc::new(Sink::new(out.clone())),
            min_level,
            Arc::new(JsonEncoder::new()),
        );
        (logger, out)
    }

    fn record(level: LogLevel, attrs: Vec<Attr>) -> Record {
        let time = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .expect("valid datetime");
        Record::new(level, "msg").with_time(time).with_attrs(attrs)
    }

    #[test]
    fn test_builder_defaults() {
        let logger = Logger::builder().writer(io::sink()).build().expect("logger");
        assert_eq!(logger.min_level(), LogLevel::INFO);
        assert_eq!(logger.encoder().name(), "text");
        assert!(!logger.sink().is_buffered());
    }

    #[test]
    fn test_builder_rejects_bad_config() {
        let result = Logger::builder()
            .config(Config::new().with_buffered_output(true).with_buffer_capacity(0))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_custom_encoder() {
        let logger = Logger::builder()
            .json()
            .encoder(TextEncoder::default())
            .writer(io::sink())
            .build()
            .expect("logger");
        assert_eq!(logger.encoder().name(), "text");
    }

    #[test]
    fn test_below_threshold_writes_nothing() {
        let (logger, out) = json_logger(LogLevel::WARN);
        logger.info("quiet");
        logger.handle(&record(LogLevel::DEBUG, vec![])).expect("handled");

        assert_eq!(out.contents(), "");
        assert_eq!(logger.metrics().records_written(), 0);
    }

    #[test]
    fn test_handle_writes_line() {
        let (logger, out) = json_logger(LogLevel::INFO);
        logger
            .handle(&record(LogLevel::ERROR, vec![Attr::int("code", 7)]))
            .expect("handled");

        assert_eq!(
            out.contents(),
            "{\"time\":\"2024-01-01 00:00:00\",\"level\":\"ERROR\",\"msg\":\"msg\",\"code\":7}\n"
        );
        assert_eq!(logger.metrics().records_written(), 1);
    }

    #[test]
    fn test_derivation_leaves_parent_untouched() {
        let (root, out) = json_logger(LogLevel::INFO);
        let child = root.with_group("req").with_attrs(&[Attr::string("id", "r1")]);

        assert_eq!(root.precomputed_attrs(), "");
        assert!(root.group_prefix().is_empty());
        assert_eq!(child.precomputed_attrs(), r#""id":"r1""#);
        assert_eq!(child.group_prefix().depth(), 1);

        root.handle(&record(LogLevel::INFO, vec![])).expect("handled");
        child.handle(&record(LogLevel::INFO, vec![])).expect("handled");

        let contents = out.contents();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(r#""msg":"msg"}"#));
        assert!(lines[1].ends_with(r#""msg":"msg","req":{"id":"r1"}}"#));
    }

    #[test]
    fn test_chained_with_attrs_concatenate() {
        let (root, out) = json_logger(LogLevel::INFO);
        let logger = root
            .with_attrs(&[Attr::int("a", 1)])
            .with_attrs(&[])
            .with_attrs(&[Attr::int("b", 2)]);

        logger
            .handle(&record(LogLevel::INFO, vec![Attr::int("c", 3)]))
            .expect("handled");
        assert!(out
            .contents()
            .ends_with("\"msg\":\"msg\",\"a\":1,\"b\":2,\"c\":3}\n"));
    }

    #[test]
    fn test_empty_group_name_is_noop() {
        let (root, _out) = json_logger(LogLevel::INFO);
        let same = root.with_group("");
        assert!(same.group_prefix().is_empty());
        assert!(Arc::ptr_eq(same.sink(), root.sink()));
    }

    #[test]
    fn test_text_group_and_attrs() {
        let out = SharedBuf::default();
        let logger = Logger::new(
            Arc::new(Sink::new(out.clone())),
            LogLevel::DEBUG,
            Arc::new(TextEncoder::new(ColorPalette::new(None, None, None))),
        );
        let derived = logger
            .with_group("g1")
            .with_group("g2")
            .with_attrs(&[Attr::string("k", "v")]);

        assert_eq!(derived.precomputed_attrs(), " g1.g2.k\x1b[0m=v\x1b[0m");
        derived.handle(&record(LogLevel::DEBUG, vec![])).expect("handled");
        assert!(out.contents().contains("g1.g2.k"));
    }

    struct Failing;

    impl Write for Failing {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "refused"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_errors_do_not_escape_convenience_calls() {
        let logger = Logger::json(Failing, None).expect("logger");
        logger.info("lost");
        logger.error("lost too");
        assert_eq!(logger.metrics().write_failures(), 2);

        assert!(logger.handle(&record(LogLevel::INFO, vec![])).is_err());
    }
}
