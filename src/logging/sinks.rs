use std::{
    fs::File,
    io::{BufWriter, LineWriter, Stdout, Write},
};

use eyre::Context;

use super::LogSink;

/// Default sink: the process's stdout. The only sink that gets ANSI color.
pub struct StdoutSink {
    handle: Stdout,
}

impl StdoutSink {
    pub fn new() -> Self {
        Self {
            handle: std::io::stdout(),
        }
    }
}

impl LogSink for StdoutSink {
    fn write_line(&mut self, line: &str) -> eyre::Result<()> {
        let mut out = self.handle.lock();
        writeln!(out, "{line}")?;
        out.flush().context("can't flush stdout")
    }

    fn flush(&mut self) {
        let _ = self.handle.lock().flush();
    }
}

/// Caller-supplied writer behind a buffered adapter. Lines accumulate in the
/// buffer and reach the writer on flush, which the consumer performs at
/// shutdown.
pub struct WriterSink {
    writer: BufWriter<Box<dyn Write + Send>>,
}

impl WriterSink {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: BufWriter::new(Box::new(writer)),
        }
    }
}

impl LogSink for WriterSink {
    fn write_line(&mut self, line: &str) -> eyre::Result<()> {
        writeln!(self.writer, "{line}")?;
        Ok(())
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}

/// Append-mode file sink; each completed line goes to disk as it is written.
pub struct FileSink {
    file: LineWriter<File>,
}

impl FileSink {
    pub fn new(path: impl Into<String>) -> eyre::Result<Self> {
        let path: &str = &path.into();
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed opening or creating log file {}", path))?;

        Ok(Self {
            file: LineWriter::new(file),
        })
    }
}

impl LogSink for FileSink {
    fn write_line(&mut self, line: &str) -> eyre::Result<()> {
        writeln!(self.file, "{line}")?;
        Ok(())
    }

    fn flush(&mut self) {
        let _ = self.file.flush();
    }
}
