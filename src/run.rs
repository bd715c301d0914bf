use chrono::Local;
use lettre::Transport;
use thiserror::Error;

use crate::cli::{Command, Opts};
use crate::config::{self, Config};
use crate::error::{ConfigError, DispatchError, RenderError};
use crate::input;
use crate::invoices::InvoiceRecord;
use crate::mail::Dispatcher;
use crate::pdf::{Converter, Renderer, WkHtmlToPdf};

type RunResult = Result<(), RunError>;

pub fn run_cmd_with_opts(opts: Opts) -> RunResult {
    config::load_env_file(&opts.env_file);
    let config = Config::from_env()?;
    let record = InvoiceRecord::build(&config, Local::now().naive_local());

    let pipeline = Pipeline {
        renderer: Renderer::new(
            opts.template,
            opts.output_dir,
            WkHtmlToPdf::new(opts.wkhtmltopdf),
        ),
        dispatcher: Dispatcher::smtp(&config)?,
    };
    pipeline.run_cmd(opts.subcommand.unwrap_or_default(), &record)
}

/// Render, then send. Each stage only runs if the previous one succeeded.
pub struct Pipeline<C, T> {
    pub renderer: Renderer<C>,
    pub dispatcher: Dispatcher<T>,
}

impl<C, T> Pipeline<C, T>
where
    C: Converter,
    T: Transport,
    T::Error: std::error::Error + Send + Sync + 'static,
{
    pub fn run_cmd(&self, cmd: Command, record: &InvoiceRecord) -> RunResult {
        match cmd {
            Command::Run { confirm } => {
                self.render(record)?;
                self.send(record, confirm)
            }
            Command::Render => self.render(record),
            Command::Send { confirm } => self.send(record, confirm),
            Command::Show => show(record),
        }
    }

    fn render(&self, record: &InvoiceRecord) -> RunResult {
        let path = self.renderer.render(record)?;
        println!("Invoice written to {}", path.display());
        Ok(())
    }

    fn send(&self, record: &InvoiceRecord, confirm: bool) -> RunResult {
        let recipients = self.dispatcher.recipients().len();
        if confirm && !input::confirm_send(record, recipients)? {
            println!("Not sending {}", record.pdf_file_name());
            return Ok(());
        }

        let pdf = self.renderer.pdf_path(record);
        self.dispatcher.send(record, &pdf)?;
        println!("Email sent successfully!");
        Ok(())
    }
}

fn show(record: &InvoiceRecord) -> RunResult {
    println!("{}", record);
    Ok(())
}


#[derive(Debug, Error)]
pub enum RunError {
    #[error("Configuration Error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Failed to generate PDF: {source}")]
    Render {
        #[from]
        source: RenderError,
    },

    #[error("Failed to send email: {source}")]
    Dispatch {
        #[from]
        source: DispatchError,
    },

    #[error("Input Error: {source}")]
    Input {
        #[from]
        source: inquire::error::InquireError,
    },
}
