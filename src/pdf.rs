use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use crate::error::RenderError;
use crate::invoices::InvoiceRecord;
use crate::templates;

/// Turns a rendered HTML document into PDF bytes.
pub trait Converter {
    fn convert(&self, html: &str) -> Result<Vec<u8>, RenderError>;
}

impl<C: Converter + ?Sized> Converter for &C {
    fn convert(&self, html: &str) -> Result<Vec<u8>, RenderError> {
        (**self).convert(html)
    }
}

/// Converter backed by the `wkhtmltopdf` executable, HTML in on stdin and
/// the PDF read back from stdout.
#[derive(Debug, Clone)]
pub struct WkHtmlToPdf {
    binary: PathBuf,
}

impl WkHtmlToPdf {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Converter for WkHtmlToPdf {
    fn convert(&self, html: &str) -> Result<Vec<u8>, RenderError> {
        log::debug!("Converting {} bytes of HTML", html.len());
        let mut child = Command::new(&self.binary)
            .args(["--quiet", "--encoding", "utf-8", "-", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RenderError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        // The converter may exit before draining stdin, its status and
        // stderr are still collected.
        let stdin = child.stdin.take();
        let (written, output) = thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(html.as_bytes()),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            let written = writer.join().unwrap_or_else(|_| {
                Err(io::Error::new(
                    io::ErrorKind::Other,
                    "stdin writer panicked",
                ))
            });
            (written, output)
        });

        let output = output?;
        if !output.status.success() {
            return Err(RenderError::Conversion {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr)
                    .trim()
                    .to_string(),
            });
        }
        if output.stdout.is_empty() {
            return Err(RenderError::EmptyOutput);
        }
        written?;
        Ok(output.stdout)
    }
}

/// Fills the invoice template and writes `<invoice number>.pdf`.
pub struct Renderer<C> {
    template: PathBuf,
    output_dir: PathBuf,
    converter: C,
}

impl<C: Converter> Renderer<C> {
    pub fn new(
        template: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        converter: C,
    ) -> Self {
        Self {
            template: template.into(),
            output_dir: output_dir.into(),
            converter,
        }
    }

    pub fn pdf_path(&self, record: &InvoiceRecord) -> PathBuf {
        pdf_path(&self.output_dir, record)
    }

    /// Render and write the PDF, replacing any earlier file for the same
    /// invoice number.
    pub fn render(&self, record: &InvoiceRecord) -> Result<PathBuf, RenderError> {
        log::info!("Rendering {}", self.template.display());
        let html = templates::invoice_html(&self.template, record)?;
        let pdf = self.converter.convert(&html)?;

        let path = self.pdf_path(record);
        fs::write(&path, pdf).map_err(|source| RenderError::Write {
            path: path.clone(),
            source,
        })?;
        log::info!("Wrote {}", path.display());
        Ok(path)
    }
}

pub fn pdf_path(output_dir: &Path, record: &InvoiceRecord) -> PathBuf {
    output_dir.join(record.pdf_file_name())
}
