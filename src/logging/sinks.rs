use std::{
    fmt,
    fs::File,
    io::{IsTerminal, LineWriter, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

use crate::error::{Error, Result};

use super::{level::Severity, LogFormatter, LogSink, Record};

#[derive(Debug, Clone)]
pub enum Destination {
    Console(ConsoleTarget),
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct SinkConfig {
    pub minimum_level: Severity,
    pub destination: Destination,
}

/// Shared in-memory byte buffer that a console sink can write into.
#[derive(Debug, Clone, Default)]
pub struct MemoryBuffer(Arc<Mutex<Vec<u8>>>);

impl MemoryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    fn append(&self, line: &str) {
        let mut bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        bytes.extend_from_slice(line.as_bytes());
        bytes.push(b'\n');
    }
}

#[derive(Debug, Clone, Default)]
pub enum ConsoleTarget {
    #[default]
    Stdout,
    Stderr,
    Memory(MemoryBuffer),
}

impl ConsoleTarget {
    pub fn is_terminal(&self) -> bool {
        match self {
            ConsoleTarget::Stdout => std::io::stdout().is_terminal(),
            ConsoleTarget::Stderr => std::io::stderr().is_terminal(),
            ConsoleTarget::Memory(_) => false,
        }
    }
}

impl fmt::Display for ConsoleTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleTarget::Stdout => f.write_str("stdout"),
            ConsoleTarget::Stderr => f.write_str("stderr"),
            ConsoleTarget::Memory(_) => f.write_str("memory"),
        }
    }
}

pub struct FileSink {
    file: Mutex<LineWriter<File>>,
    file_path: PathBuf,
    config: SinkConfig,
    formatter: Box<dyn LogFormatter>,
}

impl FileSink {
    pub fn open(
        path: impl Into<PathBuf>,
        minimum_level: Severity,
        formatter: Box<dyn LogFormatter>,
    ) -> Result<Self> {
        let path: PathBuf = path.into();
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|err| Error::io(&path, err))?;

        Ok(Self {
            file: Mutex::new(LineWriter::new(file)),
            config: SinkConfig {
                minimum_level,
                destination: Destination::File(path.clone()),
            },
            file_path: path,
            formatter,
        })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl LogSink for FileSink {
    fn config(&self) -> &SinkConfig {
        &self.config
    }

    fn write_log(&self, record: &Record) -> Result<()> {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(file, "{}", self.formatter.format(record))
            .and_then(|_| file.flush())
            .map_err(|err| Error::io(self.path(), err))
    }

    fn flush(&self) {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = file.flush();
    }
}

pub struct ConsoleSink {
    target: ConsoleTarget,
    config: SinkConfig,
    formatter: Box<dyn LogFormatter>,
}

impl ConsoleSink {
    pub fn new(
        target: ConsoleTarget,
        minimum_level: Severity,
        formatter: Box<dyn LogFormatter>,
    ) -> Self {
        Self {
            config: SinkConfig {
                minimum_level,
                destination: Destination::Console(target.clone()),
            },
            target,
            formatter,
        }
    }

    fn write_line(&self, line: &str) -> std::io::Result<()> {
        match &self.target {
            ConsoleTarget::Stdout => {
                let mut writer = std::io::stdout().lock();
                writeln!(writer, "{}", line)?;
                writer.flush()
            }
            ConsoleTarget::Stderr => {
                let mut writer = std::io::stderr().lock();
                writeln!(writer, "{}", line)?;
                writer.flush()
            }
            ConsoleTarget::Memory(buffer) => {
                buffer.append(line);
                Ok(())
            }
        }
    }
}

impl LogSink for ConsoleSink {
    fn config(&self) -> &SinkConfig {
        &self.config
    }

    fn write_log(&self, record: &Record) -> Result<()> {
        self.write_line(&self.formatter.format(record))
            .map_err(|err| Error::io(self.target.to_string(), err))
    }

    fn flush(&self) {
        let _ = match self.target {
            ConsoleTarget::Stdout => std::io::stdout().flush(),
            ConsoleTarget::Stderr => std::io::stderr().flush(),
            ConsoleTarget::Memory(_) => Ok(()),
        };
    }
}
