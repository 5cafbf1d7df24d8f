//! Console buffer that tests can read while a driver is still running.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crate::github::GithubReporter;

#[derive(Debug, Clone, Default)]
pub struct SharedConsole(Arc<Mutex<Vec<u8>>>);

impl SharedConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// A reporter writing into this console, with outputs as `::set-output`.
    pub fn reporter(&self) -> Arc<GithubReporter<SharedConsole>> {
        Arc::new(GithubReporter::new(self.clone(), None))
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedConsole {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
