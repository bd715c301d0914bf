/*
 * Monthly invoice mailer
 *
 * Once a month:
 * - Read the payee, payer, bank and SMTP details from the environment
 *   (optionally loaded from a .env file) and validate them up front
 * - Build the invoice record for the current month
 *   - Invoice number: employee number + YYYYMM, so reruns overwrite
 * - Fill the HTML template and convert it to <invoice number>.pdf
 * - Email the PDF to every recipient over SMTP submission (587)
 *
 * Any failure stops the run and exits with 1.
 */

mod billing;
mod calendar;
mod cli;
mod config;
mod error;
mod input;
mod invoices;
mod mail;
mod pdf;
mod run;
mod templates;

#[cfg(test)]
mod testing;

use std::process;

use clap::Parser;
use env_logger::Env;

use crate::cli::Opts;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let opts = Opts::parse();

    if let Err(error) = run::run_cmd_with_opts(opts) {
        eprintln!("{}", error);
        process::exit(1);
    }
}
