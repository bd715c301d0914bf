use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

/* Argument Stucture
 *
 * [run [--confirm] | render | send [--confirm] | show]
 *
 * With no subcommand the full run is performed: render the PDF for the
 * current month, then email it.
 */

#[derive(Parser)]
#[clap(version, about = "Render this month's invoice to PDF and email it")]
pub struct Opts {
    /// Environment file loaded before reading the configuration
    #[clap(short, long, default_value = ".env",
        value_hint = ValueHint::FilePath)]
    pub env_file: PathBuf,

    /// HTML template the invoice is rendered from
    #[clap(short, long, default_value = "invoice.html",
        value_hint = ValueHint::FilePath)]
    pub template: PathBuf,

    /// Directory the PDF is written to and read back from
    #[clap(short, long, default_value = ".",
        value_hint = ValueHint::DirPath)]
    pub output_dir: PathBuf,

    /// wkhtmltopdf executable used to convert HTML to PDF
    #[clap(long, default_value = "wkhtmltopdf",
        value_hint = ValueHint::CommandName)]
    pub wkhtmltopdf: PathBuf,

    #[clap(subcommand)]
    pub subcommand: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Clone, Copy)]
pub enum Command {
    /// Render the invoice PDF and email it
    Run {
        /// Ask before sending the email
        #[clap(long)]
        confirm: bool,
    },

    /// Render the invoice PDF without sending it
    Render,

    /// Email an invoice PDF that was already rendered this month
    Send {
        /// Ask before sending the email
        #[clap(long)]
        confirm: bool,
    },

    /// Show the invoice fields for the current month
    Show,
}

impl Default for Command {
    fn default() -> Self {
        Command::Run { confirm: false }
    }
}
