use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::calendar::BillingMonth;
use crate::config::Config;
use crate::templates::{EmailBody, EmailSubject};

/// Every field the invoice template and the email can refer to.
#[derive(Serialize, Debug, PartialEq, Clone)]
pub struct InvoiceRecord {
    pub month_range: String,
    pub current_date_formatted: String,
    pub days_in_month: u32,
    pub current_date_time_formatted: String,
    pub invoice_number: String,
    pub amount: String,
    pub email_title: String,
    pub email_body: String,
    pub address_line_1: String,
    pub address_line_2: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub name: String,
    pub bill_to: String,
    pub bill_to_address: String,
    pub bank: String,
    pub bank_branch: String,
    pub account_no: String,
    pub swift_code: String,
    pub bank_code: String,
    pub branch_code: String,
}

impl InvoiceRecord {
    /// Build the record for the month containing `now`.
    ///
    /// The invoice number only depends on the employee number and the
    /// month, so every run within a month produces the same file name.
    pub fn build(config: &Config, now: NaiveDateTime) -> Self {
        let month = BillingMonth::containing(now.date())
            .expect("wall clock date is within chrono's range");
        let month_name = month.name();
        let name = config.payee.name.as_str();

        Self {
            month_range: month.to_string(),
            current_date_formatted: now.format("%d.%m.%Y").to_string(),
            days_in_month: month.days(),
            current_date_time_formatted: now
                .format("%-m/%-d/%Y %H:%M:%S")
                .to_string(),
            invoice_number: invoice_number(
                &config.employee_number,
                &month,
            ),
            amount: config.amount.to_string(),
            email_title: EmailSubject {
                month: &month_name,
                name,
            }
            .to_string(),
            email_body: EmailBody {
                month: &month_name,
                name,
            }
            .to_string(),
            address_line_1: config.payee.address_line_1.clone(),
            address_line_2: config.payee.address_line_2.clone(),
            city: config.payee.city.clone(),
            postal_code: config.payee.postal_code.clone(),
            country: config.payee.country.clone(),
            name: name.to_string(),
            bill_to: config.bill_to.name.clone(),
            bill_to_address: config.bill_to.address.clone(),
            bank: config.bank.bank.clone(),
            bank_branch: config.bank.branch.clone(),
            account_no: config.bank.account_no.clone(),
            swift_code: config.bank.swift_code.clone(),
            bank_code: config.bank.bank_code.clone(),
            branch_code: config.bank.branch_code.clone(),
        }
    }

    /// File name of the rendered invoice.
    pub fn pdf_file_name(&self) -> String {
        format!("{}.pdf", self.invoice_number)
    }
}

pub fn invoice_number(employee_number: &str, month: &BillingMonth) -> String {
    format!("{}{}", employee_number, month.year_month())
}

impl fmt::Display for InvoiceRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Invoice: #{}\n\
             Date: {}\n\
             Period: {} ({} days)\n\
             Amount: {}\n\n",
            self.invoice_number,
            self.current_date_formatted,
            self.month_range,
            self.days_in_month,
            self.amount,
        )?;

        writeln!(f, "From:\n{}\n{}", self.name, self.address_line_1)?;
        if !self.address_line_2.is_empty() {
            writeln!(f, "{}", self.address_line_2)?;
        }
        writeln!(
            f,
            "{} {}\n{}\n",
            self.city, self.postal_code, self.country
        )?;
        writeln!(f, "Bill To:\n{}\n{}\n", self.bill_to, self.bill_to_address)?;
        writeln!(
            f,
            "Payment:\n{}, {} (bank code {}, branch code {})\n\
             Account: {}\nSWIFT: {}\n",
            self.bank,
            self.bank_branch,
            self.bank_code,
            self.branch_code,
            self.account_no,
            self.swift_code,
        )?;
        write!(f, "Subject: {}\n\n{}", self.email_title, self.email_body)
    }
}
