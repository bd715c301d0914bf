use std::error::Error as StdError;
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use crate::config::EnvKey;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable(s): {}", join_keys(.keys))]
    Missing { keys: Vec<EnvKey> },

    #[error("{key} is not a valid amount: '{value}'")]
    InvalidAmount { key: EnvKey, value: String },

    #[error("{key} is not a supported currency: '{value}' (CAD, USD or EUR)")]
    InvalidCurrency { key: EnvKey, value: String },

    #[error("{key} contains an invalid address '{value}': {source}")]
    InvalidAddress {
        key: EnvKey,
        value: String,
        source: lettre::address::AddressError,
    },

    #[error("{key} does not list any recipients")]
    NoRecipients { key: EnvKey },
}

fn join_keys(keys: &[EnvKey]) -> String {
    keys.iter()
        .map(|k| k.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Template not found: {}", .path.display())]
    TemplateNotFound { path: PathBuf },

    #[error("Template Error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },

    #[error("Could not start {}: {source}", .binary.display())]
    Spawn { binary: PathBuf, source: io::Error },

    #[error("PDF conversion failed ({status}): {stderr}")]
    Conversion { status: ExitStatus, stderr: String },

    #[error("PDF conversion produced no output")]
    EmptyOutput,

    #[error("IO Error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    #[error("Could not write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("PDF file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Could not read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Invalid attachment content type: {source}")]
    ContentType {
        #[from]
        source: lettre::message::header::ContentTypeErr,
    },

    #[error("Failed to build email: {source}")]
    Message {
        #[from]
        source: lettre::error::Error,
    },

    #[error("Failed to create SMTP transport: {source}")]
    Transport {
        #[from]
        source: lettre::transport::smtp::Error,
    },

    #[error("Error while sending email: {source}")]
    Delivery {
        source: Box<dyn StdError + Send + Sync>,
    },
}
