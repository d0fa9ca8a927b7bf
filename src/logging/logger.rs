use std::{
    io::Write,
    sync::{
        mpsc::{sync_channel, SyncSender},
        PoisonError, RwLock,
    },
    thread::{self, JoinHandle},
};

use crate::ensure;

use super::{
    formatters::LineFormatter,
    sinks::{FileSink, StdoutSink, WriterSink},
    Level, LogSink,
};

/// A running logger: the send side of a rendezvous channel plus the consumer
/// thread draining it. Emitting a line blocks the caller until the consumer
/// takes it; callers are throttled to consumer speed.
pub struct Logger {
    min_level: i32,
    formatter: LineFormatter,
    tx: Option<SyncSender<String>>,
    consumer: Option<JoinHandle<()>>,
}

impl Logger {
    /// Formats and emits one line at `level` (a [`Level`] or a raw integer).
    /// Lines below the configured minimum are dropped before formatting.
    pub fn log<L: Into<i32>>(&self, level: L, src: &str, msg: &str) {
        let level = level.into();
        if level < self.min_level {
            return;
        }
        let line = self.formatter.format(level, src, msg);
        if let Some(tx) = &self.tx {
            // Rendezvous send: blocks until the consumer is ready.
            let _ = tx.send(line);
        }
    }

    pub fn debug(&self, src: &str, msg: &str) {
        self.log(Level::Debug, src, msg);
    }

    pub fn info(&self, src: &str, msg: &str) {
        self.log(Level::Info, src, msg);
    }

    pub fn warn(&self, src: &str, msg: &str) {
        self.log(Level::Warn, src, msg);
    }

    pub fn error(&self, src: &str, msg: &str) {
        self.log(Level::Error, src, msg);
    }

    pub fn fatal(&self, src: &str, msg: &str) {
        self.log(Level::Fatal, src, msg);
    }

    /// Closes the channel, joins the consumer and flushes the sink.
    pub fn shutdown(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        drop(self.tx.take());
        if let Some(consumer) = self.consumer.take() {
            let _ = consumer.join();
        }
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.teardown();
    }
}

type SinkConstructor = Box<dyn FnOnce() -> eyre::Result<Box<dyn LogSink>>>;

/// Configures and starts a [`Logger`]. Defaults: minimum level INFO,
/// stdout sink with ANSI color.
///
/// NOTE: a file opened by the caller and handed to [`Builder::with_writer`]
/// should be opened in append mode if the log must survive restarts.
pub struct Builder {
    min_level: i32,
    constructor: SinkConstructor,
    use_ansi: bool,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            min_level: Level::Info.into(),
            constructor: Box::new(|| Ok(Box::new(StdoutSink::new()))),
            use_ansi: true,
        }
    }

    /// Minimal allowed logging level, a [`Level`] or a raw integer. An
    /// integer above FATAL silences every named level.
    pub fn with_level(self, level: impl Into<i32>) -> Self {
        Self {
            min_level: level.into(),
            ..self
        }
    }

    /// Replaces the sink with a caller-supplied writer, wrapped in a buffered
    /// adapter. Only the default stdout sink gets color, so a writer that
    /// happens to wrap stdout still produces plain text.
    pub fn with_writer(self, writer: impl Write + Send + 'static) -> Self {
        Self {
            constructor: Box::new(move || Ok(Box::new(WriterSink::new(writer)))),
            use_ansi: false,
            ..self
        }
    }

    /// Replaces the sink with an append-mode file at `path`.
    pub fn with_file(self, path: impl Into<String>) -> Self {
        let path: String = path.into();
        Self {
            constructor: Box::new(move || {
                let sink = FileSink::new(path)?;
                Ok(Box::new(sink))
            }),
            use_ansi: false,
            ..self
        }
    }

    /// Builds the sink and spawns the single consumer thread. The consumer
    /// loops over the channel until the logger is dropped or shut down, then
    /// flushes whatever the sink buffered.
    pub fn build(self) -> eyre::Result<Logger> {
        let mut sink = (self.constructor)()?;
        let (tx, rx) = sync_channel::<String>(0);
        let consumer = thread::spawn(move || {
            for line in rx {
                let _ = sink.write_line(&line);
            }
            sink.flush();
        });

        Ok(Logger {
            min_level: self.min_level,
            formatter: LineFormatter::new(self.use_ansi),
            tx: Some(tx),
            consumer: Some(consumer),
        })
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

// Process-wide logger used by the free functions below. Installed once by
// init(), torn down by shutdown(); re-initializing replaces the previous
// logger and joins its consumer.
static GLOBAL: RwLock<Option<Logger>> = RwLock::new(None);

/// Builds `builder` and installs the result as the process-wide logger.
pub fn init(builder: Builder) -> eyre::Result<()> {
    let logger = builder.build()?;
    let mut slot = GLOBAL.write().unwrap_or_else(PoisonError::into_inner);
    *slot = Some(logger);
    Ok(())
}

/// Tears down the process-wide logger, draining and joining its consumer.
/// Logging afterwards is a silent no-op again.
pub fn shutdown() {
    let logger = GLOBAL
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .take();
    if let Some(logger) = logger {
        logger.shutdown();
    }
}

/// Logs `msg` from `src` through the process-wide logger in the format
/// `[HH:MM:SS] [lvl] src: msg`. A silent no-op if [`init`] was never called.
pub fn log<L: Into<i32>>(level: L, src: &str, msg: &str) {
    let slot = GLOBAL.read().unwrap_or_else(PoisonError::into_inner);
    if !ensure::not_nil(&*slot) {
        return;
    }
    if let Some(logger) = slot.as_ref() {
        logger.log(level, src, msg);
    }
}

/// Logs `msg` from `src` with DEBUG level through the process-wide logger.
pub fn debug(src: &str, msg: &str) {
    log(Level::Debug, src, msg);
}

/// Logs `msg` from `src` with INFO level through the process-wide logger.
pub fn info(src: &str, msg: &str) {
    log(Level::Info, src, msg);
}

/// Logs `msg` from `src` with WARN level through the process-wide logger.
pub fn warn(src: &str, msg: &str) {
    log(Level::Warn, src, msg);
}

/// Logs `msg` from `src` with ERROR level through the process-wide logger.
pub fn error(src: &str, msg: &str) {
    log(Level::Error, src, msg);
}

/// Logs `msg` from `src` with FATAL level through the process-wide logger.
pub fn fatal(src: &str, msg: &str) {
    log(Level::Fatal, src, msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn assert_line_format(line: &str, level: &str, src: &str, msg: &str) {
        let bytes = line.as_bytes();
        assert_eq!(bytes[0], b'[');
        assert_eq!(bytes[9], b']');
        assert_eq!(bytes[3], b':');
        assert_eq!(bytes[6], b':');
        for i in [1, 2, 4, 5, 7, 8] {
            assert!(bytes[i].is_ascii_digit(), "bad timestamp in {line:?}");
        }
        assert_eq!(&line[10..], format!(" [{level}] {src}: {msg}"));
    }

    #[test]
    fn lines_below_minimum_level_are_dropped() {
        let buf = SharedBuf::default();
        let logger = Builder::new()
            .with_level(Level::Warn)
            .with_writer(buf.clone())
            .build()
            .unwrap();

        logger.info("src", "quiet");
        logger.debug("src", "quieter");
        logger.error("src", "msg");
        logger.shutdown();

        let out = buf.contents();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 1, "expected one line, got {out:?}");
        assert_line_format(lines[0], "ERROR", "src", "msg");
        assert!(!out.contains('\x1b'), "non-stdout sink must stay plain");
    }

    #[test]
    fn consumer_preserves_emission_order() {
        let buf = SharedBuf::default();
        let logger = Builder::new()
            .with_level(Level::Debug)
            .with_writer(buf.clone())
            .build()
            .unwrap();

        for i in 0..20 {
            logger.info("seq", &format!("message {i}"));
        }
        logger.shutdown();

        let out = buf.contents();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 20);
        for (i, line) in lines.iter().enumerate() {
            assert!(line.ends_with(&format!("seq: message {i}")), "{line:?}");
        }
    }

    #[test]
    fn raw_integer_levels_compare_and_format_numerically() {
        let buf = SharedBuf::default();
        let logger = Builder::new()
            .with_level(Level::Warn)
            .with_writer(buf.clone())
            .build()
            .unwrap();

        logger.log(1, "raw", "filtered");
        logger.log(9, "raw", "emitted");
        logger.shutdown();

        let out = buf.contents();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 1);
        assert_line_format(lines[0], "LEVEL:9", "raw", "emitted");
    }

    #[test]
    fn integer_minimum_above_fatal_silences_everything() {
        let buf = SharedBuf::default();
        let logger = Builder::new()
            .with_level(5)
            .with_writer(buf.clone())
            .build()
            .unwrap();

        logger.fatal("src", "dropped");
        logger.log(4, "src", "also dropped");
        logger.log(5, "src", "emitted");
        logger.shutdown();

        let out = buf.contents();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 1, "got {out:?}");
        assert_line_format(lines[0], "LEVEL:5", "src", "emitted");
    }

    #[test]
    fn file_sink_appends_across_loggers() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("kitbag-log-{}", std::process::id()));
        let path = path.to_str().unwrap().to_string();
        let _ = std::fs::remove_file(&path);

        let first = Builder::new().with_file(path.clone()).build().unwrap();
        first.info("boot", "first run");
        first.shutdown();

        let second = Builder::new().with_file(path.clone()).build().unwrap();
        second.info("boot", "second run");
        second.shutdown();

        let out = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("boot: first run"));
        assert!(lines[1].ends_with("boot: second run"));
        let _ = std::fs::remove_file(&path);
    }

    // The free functions share one process-wide slot, so the whole global
    // lifecycle lives in a single test.
    #[test]
    fn global_logger_lifecycle() {
        // Never initialized: every call is a silent no-op.
        info("early", "nobody listening");
        log(3, "early", "still nobody");

        let buf = SharedBuf::default();
        init(
            Builder::new()
                .with_level(Level::Info)
                .with_writer(buf.clone()),
        )
        .unwrap();

        debug("app", "filtered");
        info("app", "hello");
        fatal("app", "goodbye");

        // Re-initializing replaces the installed logger: the first one is
        // shut down (its consumer joined, its sink flushed) before the slot
        // holds the new one, and later lines land only on the new sink.
        let second = SharedBuf::default();
        init(
            Builder::new()
                .with_level(Level::Info)
                .with_writer(second.clone()),
        )
        .unwrap();

        let out = buf.contents();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2, "got {out:?}");
        assert_line_format(lines[0], "INFO", "app", "hello");
        assert_line_format(lines[1], "FATAL", "app", "goodbye");

        info("app", "round two");
        shutdown();

        assert_eq!(buf.contents().lines().count(), 2, "old sink must not grow");
        let out = second.contents();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 1, "got {out:?}");
        assert_line_format(lines[0], "INFO", "app", "round two");

        // Shut down again: back to silent no-ops, and shutdown is idempotent.
        warn("late", "nobody listening");
        shutdown();
    }
}
