//! Report sink for the `--output text|json` switch
//!
//! Command handlers build a report value and hand it to an [`OutputWriter`],
//! which owns the destination stream. The binary writes to stdout; tests
//! write into a `Vec<u8>` and inspect it with [`OutputWriter::into_inner`].

use std::io::{IsTerminal, Stdout, Write};

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Human-readable rendering of a report.
///
/// Every report also implements `Serialize` for `--output json`.
pub trait Render {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()>;
}

/// Writes reports to a sink in the selected format.
pub struct OutputWriter<W: Write = Stdout> {
    format: OutputFormat,
    sink: W,
}

impl OutputWriter<Stdout> {
    /// Writer bound to stdout.
    ///
    /// ANSI colors are turned off for JSON output and when stdout is not a
    /// terminal, so piped text stays free of escape codes.
    pub fn stdout(format: OutputFormat) -> Self {
        let sink = std::io::stdout();
        if format == OutputFormat::Json || !sink.is_terminal() {
            colored::control::set_override(false);
        }
        Self { format, sink }
    }
}

impl<W: Write> OutputWriter<W> {
    /// Writer bound to an arbitrary sink.
    ///
    /// # Examples
    ///
    /// ```
    /// use snyktix_cli::cli::OutputFormat;
    /// use snyktix_cli::output::OutputWriter;
    ///
    /// let writer = OutputWriter::new(OutputFormat::Json, Vec::new());
    /// assert_eq!(writer.format(), OutputFormat::Json);
    /// assert!(writer.into_inner().is_empty());
    /// ```
    pub fn new(format: OutputFormat, sink: W) -> Self {
        Self { format, sink }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Emit one report. JSON reports are pretty-printed and end with a newline.
    pub fn render<T: Render + Serialize>(&mut self, report: &T) -> Result<(), CliError> {
        match self.format {
            OutputFormat::Text => report.render_text(&mut self.sink)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut self.sink, report)?;
                writeln!(self.sink)?;
            }
        }
        self.sink.flush()?;
        Ok(())
    }

    /// Consume the writer and return the sink.
    pub fn into_inner(self) -> W {
        self.sink
    }
}
