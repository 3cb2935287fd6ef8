//! Event sinks for run reporting.
//!
//! The runner pushes every lifecycle event to an [`Output`]. The two
//! implementations render the same events for different consumers: colored
//! console lines for a human, newline-delimited wire JSON for a machine.
//! They are interchangeable; the runner does not know which one it drives.

use colored::Colorize;
use std::io::{self, Write};
use std::time::Duration;

use crate::protocol::Report;

/// Sink for the begin/progress/finish event stream of a run.
///
/// Events arrive in strict emission order from a single thread; per
/// (task, size) pair that is exactly one `begin`, at least one `progress`,
/// and exactly one `finish`.
pub trait Output {
    fn begin(&mut self, task: &str, size: usize) -> io::Result<()>;
    fn progress(&mut self, task: &str, size: usize, elapsed: Duration) -> io::Result<()>;
    fn finish(&mut self, task: &str, size: usize, elapsed: Duration) -> io::Result<()>;
}

/// Formats a duration with a human-readable unit.
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();

    if nanos < 1_000 {
        format!("{}ns", nanos)
    } else if nanos < 1_000_000 {
        format!("{:.2}µs", nanos as f64 / 1_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.2}ms", nanos as f64 / 1_000_000.0)
    } else {
        format!("{:.2}s", nanos as f64 / 1_000_000_000.0)
    }
}

/// Human-readable console rendering: a header per (task, size) pair, a
/// dimmed line per iteration, and a highlighted minimum on finish.
pub struct PrettyOutput<W: Write> {
    writer: W,
}

impl<W: Write> PrettyOutput<W> {
    pub fn new(writer: W) -> PrettyOutput<W> {
        PrettyOutput { writer }
    }
}

impl PrettyOutput<io::Stdout> {
    pub fn stdout() -> PrettyOutput<io::Stdout> {
        PrettyOutput::new(io::stdout())
    }
}

impl<W: Write> Output for PrettyOutput<W> {
    fn begin(&mut self, task: &str, size: usize) -> io::Result<()> {
        writeln!(
            self.writer,
            "{} {} (size {})",
            "BENCH".green().bold(),
            task.cyan(),
            size.to_string().bold()
        )
    }

    fn progress(&mut self, _task: &str, _size: usize, elapsed: Duration) -> io::Result<()> {
        writeln!(
            self.writer,
            "        {}",
            format_duration(elapsed).dimmed()
        )
    }

    fn finish(&mut self, _task: &str, _size: usize, elapsed: Duration) -> io::Result<()> {
        writeln!(
            self.writer,
            "        {} {}",
            "min:".bold(),
            format_duration(elapsed).green().bold()
        )?;
        self.writer.flush()
    }
}

/// Wire rendering: one [`Report`] value per line, flushed per event so a
/// streaming consumer observes events as they happen.
pub struct JsonOutput<W: Write> {
    writer: W,
}

impl<W: Write> JsonOutput<W> {
    pub fn new(writer: W) -> JsonOutput<W> {
        JsonOutput { writer }
    }

    fn emit(&mut self, report: &Report) -> io::Result<()> {
        let line = serde_json::to_string(report)?;
        writeln!(self.writer, "{}", line)?;
        self.writer.flush()
    }
}

impl JsonOutput<io::Stdout> {
    pub fn stdout() -> JsonOutput<io::Stdout> {
        JsonOutput::new(io::stdout())
    }
}

impl<W: Write> Output for JsonOutput<W> {
    fn begin(&mut self, task: &str, size: usize) -> io::Result<()> {
        self.emit(&Report::Begin {
            task: task.to_string(),
            size,
        })
    }

    fn progress(&mut self, task: &str, size: usize, elapsed: Duration) -> io::Result<()> {
        self.emit(&Report::Progress {
            task: task.to_string(),
            size,
            time: elapsed.as_secs_f64(),
        })
    }

    fn finish(&mut self, task: &str, size: usize, elapsed: Duration) -> io::Result<()> {
        self.emit(&Report::Finish {
            task: task.to_string(),
            size,
            time: elapsed.as_secs_f64(),
        })
    }
}
