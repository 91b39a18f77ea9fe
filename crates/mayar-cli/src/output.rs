//! Output formatting and writing utilities
//!
//! This module renders response envelopes and other results in the
//! selected format (human-readable, JSON, pretty JSON or YAML).

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::logging::redaction;
use colored::Colorize;
use mayar_core::{ApiResponse, ApiVersion, Resource};
use serde::Serialize;
use serde_json::{json, Value};
use std::io::{self, Write};
use tracing::{debug, trace};

/// Trait for formatting output with specialized support for envelopes
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a response envelope
    fn format_envelope(&self, response: &ApiResponse) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            // Pretty JSON is the readable fallback for arbitrary values
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    fn format_envelope(&self, response: &ApiResponse) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_envelope_human(response, false)),
            _ => self.format(&response.to_value()),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer on stdout
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self::with_writer(format, use_color, quiet, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer,
        }
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        if tracing::enabled!(tracing::Level::TRACE) {
            let mut logged = serde_json::to_value(value)?;
            redaction::redact_json_value(&mut logged);
            trace!(data = %logged, "Writing data");
        }

        let formatted = self.format.format(value)?;
        self.write_formatted(&formatted)
    }

    /// Write a response envelope
    ///
    /// Envelopes are results, so they are written even in quiet mode.
    pub fn envelope(&mut self, response: &ApiResponse) -> Result<()> {
        let formatted = match self.format {
            OutputFormat::Human => format_envelope_human(response, self.use_color),
            format => format.format_envelope(response)?,
        };
        self.write_formatted(&formatted)
    }

    /// Write the resources registered for a version
    pub fn resources(&mut self, version: ApiVersion, resources: &[Resource]) -> Result<()> {
        if self.format != OutputFormat::Human {
            let names: Vec<&str> = resources.iter().map(Resource::name).collect();
            return self.data(&json!({ "version": version, "resources": names }));
        }

        let title = format!("Resources for {}", version);
        if self.use_color {
            self.writeln(&title.bold().to_string())?;
        } else {
            self.writeln(&title)?;
        }

        if resources.is_empty() {
            return self.warning("No resources are registered for this version");
        }
        for resource in resources {
            self.writeln(&format!("  {}", resource.name()))?;
        }
        Ok(())
    }

    fn write_formatted(&mut self, formatted: &str) -> Result<()> {
        if formatted.ends_with('\n') {
            self.write(formatted)
        } else {
            self.writeln(formatted)
        }
    }
}

/// Format an envelope for human reading
fn format_envelope_human(response: &ApiResponse, use_color: bool) -> String {
    let mut output = String::new();

    let (marker, label) = if response.is_success() {
        ("✓", "OK")
    } else {
        ("✗", "FAILED")
    };
    let status_line = format!("{} {} [{}] {}", marker, label, response.status_code(), response.message());
    let status_line = match (use_color, response.is_success()) {
        (true, true) => status_line.green().bold().to_string(),
        (true, false) => status_line.red().bold().to_string(),
        (false, _) => status_line,
    };
    output.push_str(&status_line);
    output.push('\n');

    let pagination = response.pagination().entries();
    if !pagination.is_empty() {
        let fields: Vec<String> = pagination
            .iter()
            .map(|(key, value)| format!("{}={}", key, format_scalar(value)))
            .collect();
        output.push_str(&format!("Pagination: {}\n", fields.join(" ")));
    }

    if !response.data().is_null() {
        output.push_str(&serde_json::to_string_pretty(response.data()).unwrap_or_default());
        output.push('\n');
    }

    output
}

fn format_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
