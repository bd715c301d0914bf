use std::fs;
use std::path::Path;

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, Message, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{SmtpTransport, Transport};

use crate::config::{Config, Smtp};
use crate::error::DispatchError;
use crate::invoices::InvoiceRecord;

pub fn smtp_transport(smtp: &Smtp) -> Result<SmtpTransport, DispatchError> {
    Ok(SmtpTransport::starttls_relay(&smtp.host)?
        .port(smtp.port)
        .credentials(Credentials::new(smtp.user.clone(), smtp.pass.clone()))
        .build())
}

/// Sends a rendered invoice to the configured recipients.
pub struct Dispatcher<T> {
    transport: T,
    from: Mailbox,
    recipients: Vec<Mailbox>,
}

impl Dispatcher<SmtpTransport> {
    pub fn smtp(config: &Config) -> Result<Self, DispatchError> {
        Ok(Self::new(
            smtp_transport(&config.smtp)?,
            config.sender.clone(),
            config.recipients.clone(),
        ))
    }
}

impl<T> Dispatcher<T>
where
    T: Transport,
    T::Error: std::error::Error + Send + Sync + 'static,
{
    pub fn new(transport: T, from: Mailbox, recipients: Vec<Mailbox>) -> Self {
        Self {
            transport,
            from,
            recipients,
        }
    }

    pub fn recipients(&self) -> &[Mailbox] {
        &self.recipients
    }

    /// Build the invoice email with `pdf` attached.
    ///
    /// Fails before touching the transport if `pdf` does not exist.
    pub fn compose(
        &self,
        record: &InvoiceRecord,
        pdf: &Path,
    ) -> Result<Message, DispatchError> {
        if !pdf.is_file() {
            return Err(DispatchError::NotFound {
                path: pdf.to_path_buf(),
            });
        }
        let content = fs::read(pdf).map_err(|source| DispatchError::Read {
            path: pdf.to_path_buf(),
            source,
        })?;

        let attachment = Attachment::new(record.pdf_file_name())
            .body(content, ContentType::parse("application/pdf")?);

        let builder = self
            .recipients
            .iter()
            .fold(Message::builder().from(self.from.clone()), |b, to| {
                b.to(to.clone())
            });

        Ok(builder.subject(record.email_title.as_str()).multipart(
            MultiPart::mixed()
                .singlepart(SinglePart::plain(record.email_body.clone()))
                .singlepart(attachment),
        )?)
    }

    pub fn send(
        &self,
        record: &InvoiceRecord,
        pdf: &Path,
    ) -> Result<(), DispatchError> {
        let message = self.compose(record, pdf)?;
        log::info!(
            "Sending {} to {} recipient(s)",
            record.pdf_file_name(),
            self.recipients.len()
        );
        self.transport
            .send(&message)
            .map_err(|e| DispatchError::Delivery {
                source: Box::new(e),
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::{config, config_with};
    use crate::testing::{WriteFile, FAKE_PDF};
    use chrono::NaiveDate;
    use lettre::transport::stub::StubTransport;
    use tempfile::tempdir;

    fn record() -> InvoiceRecord {
        let now = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        InvoiceRecord::build(&config(), now)
    }

    fn dispatcher(
        config: &Config,
        transport: &StubTransport,
    ) -> Dispatcher<StubTransport> {
        Dispatcher::new(
            transport.clone(),
            config.sender.clone(),
            config.recipients.clone(),
        )
    }

    #[test]
    fn sends_to_every_recipient() -> Result<(), DispatchError> {
        let dir = tempdir().unwrap();
        let pdf = dir.write("E123202403.pdf", FAKE_PDF);
        let transport = StubTransport::new_ok();
        let config = config();

        dispatcher(&config, &transport).send(&record(), &pdf)?;

        let sent = transport.messages();
        assert_eq!(sent.len(), 1);
        let (envelope, raw) = &sent[0];
        let to: Vec<String> =
            envelope.to().iter().map(|a| a.to_string()).collect();
        assert_eq!(to, vec!["a@x.com", "b@x.com"]);
        assert_eq!(
            envelope.from().map(|a| a.to_string()),
            Some("jane@example.com".to_string())
        );
        assert!(raw.contains("Subject: March Invoice - Jane Doe"));
        assert!(raw.contains("Content-Type: application/pdf"));
        assert!(raw.contains("E123202403.pdf"));
        Ok(())
    }

    #[test]
    fn missing_pdf_is_not_sent() {
        let dir = tempdir().unwrap();
        let transport = StubTransport::new_ok();
        let config = config();

        let err = dispatcher(&config, &transport)
            .send(&record(), &dir.path().join("E123202403.pdf"))
            .unwrap_err();

        assert!(matches!(err, DispatchError::NotFound { .. }));
        assert!(err.to_string().starts_with("PDF file not found"));
        assert!(transport.messages().is_empty());
    }

    #[test]
    fn delivery_failure_is_wrapped() {
        let dir = tempdir().unwrap();
        let pdf = dir.write("E123202403.pdf", FAKE_PDF);
        let transport = StubTransport::new_error();
        let config = config();

        let err = dispatcher(&config, &transport)
            .send(&record(), &pdf)
            .unwrap_err();

        assert!(matches!(err, DispatchError::Delivery { .. }));
        assert!(err.to_string().starts_with("Error while sending email"));
    }

    #[test]
    fn single_recipient() -> Result<(), DispatchError> {
        let dir = tempdir().unwrap();
        let pdf = dir.write("E123202403.pdf", FAKE_PDF);
        let transport = StubTransport::new_ok();
        let config =
            config_with(&[("RECIPIENTS", Some("accounts@x.com"))]).unwrap();

        let dispatcher = dispatcher(&config, &transport);
        assert_eq!(dispatcher.recipients().len(), 1);
        dispatcher.send(&record(), &pdf)?;

        assert_eq!(transport.messages()[0].0.to().len(), 1);
        Ok(())
    }

    #[test]
    fn smtp_transport_builds() {
        let config = config();
        assert!(Dispatcher::smtp(&config).is_ok());
    }
}
