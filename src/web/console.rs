//! `tracing` output for the browser devtools console.

use std::io;
use tracing::{Level, Metadata};
use tracing_subscriber::{
    EnvFilter, Registry, fmt::{self, MakeWriter}, layer::SubscriberExt,
};
use wasm_bindgen::JsValue;

/// Buffers one formatted event and hands it to the console on drop.
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buffer);
        let line = line.trim_end();
        if line.is_empty() {
            return;
        }
        let message = JsValue::from_str(line);
        match self.level {
            Level::ERROR => web_sys::console::error_1(&message),
            Level::WARN => web_sys::console::warn_1(&message),
            Level::INFO => web_sys::console::info_1(&message),
            _ => web_sys::console::debug_1(&message),
        }
    }
}

pub struct MakeConsoleWriter;

impl<'a> MakeWriter<'a> for MakeConsoleWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: Level::INFO,
            buffer: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buffer: Vec::new(),
        }
    }
}

/// Installs the console subscriber. The filter comes from
/// `LOGIN_FORM_LOG` at build time and defaults to `info`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already set.
pub fn init() -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let fmt_layer = fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_writer(MakeConsoleWriter);

    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .parse_lossy(option_env!("LOGIN_FORM_LOG").unwrap_or_default());

    let subscriber = Registry::default().with(fmt_layer).with(filter);
    tracing::subscriber::set_global_default(subscriber)
}
