use std::path::Path;

use askama::Template;
use tera::{Context, Tera};

use crate::error::RenderError;
use crate::invoices::InvoiceRecord;

const INVOICE_TEMPLATE: &str = "invoice.html";

#[derive(Template)]
#[template(source = "{{ month }} Invoice - {{ name }}", ext = "txt")]
pub struct EmailSubject<'a> {
    pub month: &'a str,
    pub name: &'a str,
}

#[derive(Template)]
#[template(path = "email_body.txt")]
pub struct EmailBody<'a> {
    pub month: &'a str,
    pub name: &'a str,
}

/// Render the invoice template at `path` with the fields of `record`.
///
/// The template is registered as `invoice.html` whatever its file name, so
/// HTML escaping always applies. Placeholders naming a field the record does
/// not have fail the render.
pub fn invoice_html(
    path: &Path,
    record: &InvoiceRecord,
) -> Result<String, RenderError> {
    if !path.is_file() {
        return Err(RenderError::TemplateNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut tera = Tera::default();
    tera.add_template_file(path, Some(INVOICE_TEMPLATE))?;
    let context = Context::from_serialize(record)?;
    Ok(tera.render(INVOICE_TEMPLATE, &context)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::config;
    use crate::testing::WriteFile;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn record() -> InvoiceRecord {
        let now = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        InvoiceRecord::build(&config(), now)
    }

    #[test]
    fn subject() {
        let subject = EmailSubject {
            month: "March",
            name: "Jane Doe",
        };
        assert_eq!(subject.to_string(), "March Invoice - Jane Doe");
    }

    #[test]
    fn body() {
        let body = EmailBody {
            month: "March",
            name: "Jane Doe",
        }
        .to_string();
        assert!(body.starts_with("Dear Accounts Team,\n\n"));
        assert!(body.contains("attached invoice for March."));
        assert!(body.trim_end().ends_with("Jane Doe"));
    }

    #[test]
    fn renders_fields() -> Result<(), RenderError> {
        let dir = tempdir().unwrap();
        let path = dir.write(
            "invoice.html",
            "<h1>Invoice {{ invoice_number }}</h1>\
             <p>{{ month_range }}</p><p>{{ amount }}</p>\
             <p>{{ bill_to }}</p><p>{{ days_in_month }}</p>",
        );

        let html = invoice_html(&path, &record())?;
        assert_eq!(
            html,
            "<h1>Invoice E123202403</h1>\
             <p>March 1, 2024 - March 31, 2024</p><p>$2,500.00</p>\
             <p>Innotech</p><p>31</p>"
        );
        Ok(())
    }

    #[test]
    fn escapes_html() -> Result<(), RenderError> {
        let dir = tempdir().unwrap();
        let path = dir.write("template.htm", "{{ bill_to }}");
        let mut record = record();
        record.bill_to = "Smith & <Sons>".to_string();

        let html = invoice_html(&path, &record)?;
        assert_eq!(html, "Smith &amp; &lt;Sons&gt;");
        Ok(())
    }

    #[test]
    fn shipped_template() -> Result<(), RenderError> {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("invoice.html");
        let html = invoice_html(&path, &record())?;
        assert!(html.contains("<title>Invoice E123202403</title>"));
        assert!(html.contains("Apt 4<br>"));
        assert!(html.contains("FBNKLKLX"));
        Ok(())
    }

    #[test]
    fn missing_template() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invoice.html");
        let err = invoice_html(&path, &record()).unwrap_err();
        assert!(matches!(err, RenderError::TemplateNotFound { .. }));
    }

    #[test]
    fn undeclared_field() {
        let dir = tempdir().unwrap();
        let path = dir.write("invoice.html", "{{ tax_id }}");
        let err = invoice_html(&path, &record()).unwrap_err();
        assert!(matches!(err, RenderError::Template { .. }));
    }

    #[test]
    fn unparsable_template() {
        let dir = tempdir().unwrap();
        let path = dir.write("invoice.html", "{% if amount %}<p>open");
        let err = invoice_html(&path, &record()).unwrap_err();
        assert!(matches!(err, RenderError::Template { .. }));
    }
}
