//! Fixtures shared by the unit tests.

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::error::RenderError;
use crate::pdf::Converter;

pub const FAKE_PDF: &[u8] = b"%PDF-1.4\n%fake\n%%EOF\n";

/// Write `content` to `name` inside a scratch directory.
pub trait WriteFile {
    fn write(&self, name: &str, content: impl AsRef<[u8]>) -> PathBuf;
}

impl WriteFile for TempDir {
    fn write(&self, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }
}

/// Converter returning `FAKE_PDF` and remembering the HTML it was given.
#[derive(Default)]
pub struct FakeConverter {
    seen: RefCell<Vec<String>>,
}

impl FakeConverter {
    pub fn seen(&self) -> Vec<String> {
        self.seen.borrow().clone()
    }
}

impl Converter for FakeConverter {
    fn convert(&self, html: &str) -> Result<Vec<u8>, RenderError> {
        self.seen.borrow_mut().push(html.to_string());
        Ok(FAKE_PDF.to_vec())
    }
}
