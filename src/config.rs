use std::env;
use std::path::Path;
use std::str::FromStr;

use lettre::message::Mailbox;
use rust_decimal::Decimal;
use strum_macros::{AsRefStr, Display};

use crate::billing::{Currency, Money};
use crate::error::ConfigError;

/// Port for authenticated SMTP submission, upgraded with STARTTLS.
pub const SUBMISSION_PORT: u16 = 587;

#[derive(Display, AsRefStr, Debug, PartialEq, Clone, Copy)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EnvKey {
    SmtpUser,
    SmtpPass,
    SmtpHost,
    Recipients,
    EmployeeNumber,
    Amount,
    Currency,
    #[strum(serialize = "ADDRESS_LINE_1")]
    AddressLine1,
    #[strum(serialize = "ADDRESS_LINE_2")]
    AddressLine2,
    City,
    PostalCode,
    Country,
    Name,
    BillTo,
    BillToAddress,
    Bank,
    BankBranch,
    AccountNo,
    SwiftCode,
    BankCode,
    BranchCode,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Smtp {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
}

/// The person issuing the invoice.
#[derive(Debug, PartialEq, Clone)]
pub struct Payee {
    pub name: String,
    pub address_line_1: String,
    pub address_line_2: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

#[derive(Debug, PartialEq, Clone)]
pub struct BillTo {
    pub name: String,
    pub address: String,
}

#[derive(Debug, PartialEq, Clone)]
pub struct BankDetails {
    pub bank: String,
    pub branch: String,
    pub account_no: String,
    pub swift_code: String,
    pub bank_code: String,
    pub branch_code: String,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Config {
    pub smtp: Smtp,
    pub sender: Mailbox,
    pub recipients: Vec<Mailbox>,
    pub employee_number: String,
    pub amount: Money,
    pub payee: Payee,
    pub bill_to: BillTo,
    pub bank: BankDetails,
}

/// Load variables from an env file into the process environment.
///
/// A missing or unreadable file is not an error, the variables may already
/// be set by the caller.
pub fn load_env_file(path: &Path) {
    match dotenvy::from_path(path) {
        Ok(()) => log::info!("Loaded environment from {}", path.display()),
        Err(e) => log::warn!("Error loading {}: {}", path.display(), e),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from `lookup`, reporting every missing
    /// variable at once.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: EnvKey| {
            lookup(key.as_ref()).filter(|v| !v.trim().is_empty())
        };
        let mut missing = Vec::new();
        let mut required = |key: EnvKey| {
            optional(key).unwrap_or_else(|| {
                missing.push(key);
                String::new()
            })
        };

        let smtp = Smtp {
            host: required(EnvKey::SmtpHost),
            port: SUBMISSION_PORT,
            user: required(EnvKey::SmtpUser),
            pass: required(EnvKey::SmtpPass),
        };
        let recipients = required(EnvKey::Recipients);
        let employee_number = required(EnvKey::EmployeeNumber);
        let amount = required(EnvKey::Amount);
        let payee = Payee {
            name: required(EnvKey::Name),
            address_line_1: required(EnvKey::AddressLine1),
            address_line_2: optional(EnvKey::AddressLine2).unwrap_or_default(),
            city: required(EnvKey::City),
            postal_code: required(EnvKey::PostalCode),
            country: required(EnvKey::Country),
        };
        let bill_to = BillTo {
            name: required(EnvKey::BillTo),
            address: required(EnvKey::BillToAddress),
        };
        let bank = BankDetails {
            bank: required(EnvKey::Bank),
            branch: required(EnvKey::BankBranch),
            account_no: required(EnvKey::AccountNo),
            swift_code: required(EnvKey::SwiftCode),
            bank_code: required(EnvKey::BankCode),
            branch_code: required(EnvKey::BranchCode),
        };

        if !missing.is_empty() {
            return Err(ConfigError::Missing { keys: missing });
        }

        let currency = match optional(EnvKey::Currency) {
            None => Currency::default(),
            Some(value) => Currency::from_str(value.trim()).map_err(|_| {
                ConfigError::InvalidCurrency {
                    key: EnvKey::Currency,
                    value,
                }
            })?,
        };

        Ok(Self {
            sender: parse_mailbox(EnvKey::SmtpUser, &smtp.user)?,
            recipients: parse_recipients(&recipients)?,
            amount: parse_amount(&amount, currency)?,
            smtp,
            employee_number,
            payee,
            bill_to,
            bank,
        })
    }
}

fn parse_amount(value: &str, currency: Currency) -> Result<Money, ConfigError> {
    Decimal::from_str(value.trim())
        .ok()
        .and_then(|amount| Money::new(currency, amount))
        .ok_or_else(|| ConfigError::InvalidAmount {
            key: EnvKey::Amount,
            value: value.to_string(),
        })
}

fn parse_mailbox(key: EnvKey, value: &str) -> Result<Mailbox, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|source| ConfigError::InvalidAddress {
            key,
            value: value.to_string(),
            source,
        })
}

/// Split a comma separated list, ignoring blank entries.
pub fn parse_recipients(value: &str) -> Result<Vec<Mailbox>, ConfigError> {
    let recipients = value
        .split(',')
        .filter(|r| !r.trim().is_empty())
        .map(|r| parse_mailbox(EnvKey::Recipients, r))
        .collect::<Result<Vec<_>, _>>()?;

    if recipients.is_empty() {
        return Err(ConfigError::NoRecipients {
            key: EnvKey::Recipients,
        });
    }
    Ok(recipients)
}
