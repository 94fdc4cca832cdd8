// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Browser console reporting, for our own messages and for `tracing` events
//! from the controller crates.

use std::io::{self, Write};

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;

pub(crate) fn debug(message: &str) {
    web_sys::console::debug_1(&JsValue::from_str(message));
}

pub(crate) fn info(message: &str) {
    web_sys::console::info_1(&JsValue::from_str(message));
}

pub(crate) fn warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

/// Log `message` with the raw JS error attached for inspection.
pub(crate) fn error(message: &str, err: &JsValue) {
    web_sys::console::error_2(&JsValue::from_str(message), err);
}

/// Human-readable text of a thrown JS value.
pub(crate) fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// Console method an event of a given level is written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Error,
    Warn,
    Info,
    Debug,
}

impl Method {
    fn for_level(level: Level) -> Self {
        match level {
            Level::ERROR => Self::Error,
            Level::WARN => Self::Warn,
            Level::INFO => Self::Info,
            _ => Self::Debug,
        }
    }

    fn emit(self, line: &str) {
        let line = JsValue::from_str(line);
        match self {
            Self::Error => web_sys::console::error_1(&line),
            Self::Warn => web_sys::console::warn_1(&line),
            Self::Info => web_sys::console::info_1(&line),
            Self::Debug => web_sys::console::debug_1(&line),
        }
    }
}

/// Formatted `tracing` output, routed to the console method matching each
/// event's level.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ConsoleWriter;

/// One formatted event, flushed to the console when dropped.
pub(crate) struct ConsoleLine {
    method: Method,
    buf: Vec<u8>,
}

impl ConsoleLine {
    const fn new(method: Method) -> Self {
        Self {
            method,
            buf: Vec::new(),
        }
    }

    /// Buffered text without the formatter's trailing newline; `None` when
    /// there is nothing worth printing.
    fn take_line(&mut self) -> Option<String> {
        let text = String::from_utf8_lossy(&self.buf).trim_end().to_string();
        self.buf.clear();
        (!text.is_empty()).then_some(text)
    }
}

impl Write for ConsoleLine {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(line) = self.take_line() {
            self.method.emit(&line);
        }
        Ok(())
    }
}

impl Drop for ConsoleLine {
    fn drop(&mut self) {
        if let Some(line) = self.take_line() {
            self.method.emit(&line);
        }
    }
}

impl<'a> MakeWriter<'a> for ConsoleWriter {
    type Writer = ConsoleLine;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleLine::new(Method::Info)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleLine::new(Method::for_level(*meta.level()))
    }
}

/// Install the console subscriber once per page. A second `boot` keeps the
/// first subscriber.
pub(crate) fn install_tracing() {
    let installed = tracing_subscriber::fmt()
        .with_writer(ConsoleWriter)
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .without_time()
        .try_init();
    if installed.is_err() {
        debug("tracing subscriber already installed");
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_map_to_console_methods() {
        assert_eq!(Method::for_level(Level::ERROR), Method::Error);
        assert_eq!(Method::for_level(Level::WARN), Method::Warn);
        assert_eq!(Method::for_level(Level::INFO), Method::Info);
        assert_eq!(Method::for_level(Level::DEBUG), Method::Debug);
        assert_eq!(Method::for_level(Level::TRACE), Method::Debug);
    }

    #[test]
    fn formatter_chunks_become_one_line() {
        let mut line = ConsoleLine::new(Method::Warn);
        line.write_all(b" WARN storefront_carousel::rotating: ").unwrap();
        line.write_all(b"indicator without a slide index=7\n").unwrap();
        assert_eq!(
            line.take_line().as_deref(),
            Some(" WARN storefront_carousel::rotating: indicator without a slide index=7")
        );
        assert_eq!(line.take_line(), None);
    }

    #[test]
    fn blank_output_is_not_printed() {
        let mut line = ConsoleLine::new(Method::Debug);
        line.write_all(b"\n  \n").unwrap();
        assert_eq!(line.take_line(), None);
    }
}
