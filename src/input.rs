use inquire::{error::InquireError, Confirm};

use crate::invoices::InvoiceRecord;

type InputResult<T> = Result<T, InquireError>;

pub fn confirm_send(record: &InvoiceRecord, recipients: usize) -> InputResult<bool> {
    Confirm::new(&format!(
        "Send {} to {} recipient(s)?",
        record.pdf_file_name(),
        recipients
    ))
    .with_default(true)
    .prompt()
}
