#![cfg(any(test, feature = "test"))]

use crate::primitives::{
    bytes,
    Bytes,
};

use parking_lot::Mutex;
use std::{
    io,
    sync::Arc,
};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

/// Creation code of a contract whose runtime is a single `STOP`.
pub const ACCEPTING_CODE: Bytes = bytes!("600180600b6000396000f300");

/// Formatted log output collected by a subscriber installed with [`capture_logs`].
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock()).into_owned()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.contents().contains(needle)
    }
}

pub struct CapturedLogsWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl io::Write for CapturedLogsWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.lock().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogsWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CapturedLogsWriter {
            buf: self.buf.clone(),
        }
    }
}

/// Installs a thread-local subscriber writing into the returned buffer.
/// Only events on the current thread are captured, so use it from `#[tokio::test]`'s
/// default current-thread runtime.
pub fn capture_logs() -> (CapturedLogs, DefaultGuard) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();

    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}
