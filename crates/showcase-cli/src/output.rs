//! Output formatting

use console::{style, Term};

/// Styled line writer for command results
#[derive(Debug)]
pub struct Reporter {
    out: Term,
    err: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Print a section header
    pub fn header(&self, title: &str) {
        if self.quiet {
            return;
        }

        let styled = if self.use_color {
            style(title).bold().underlined().to_string()
        } else {
            format!("=== {title} ===")
        };
        let _ = self.out.write_line(&styled);
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "OK".to_string()
        };
        let _ = self.out.write_line(&format!("{prefix} {message}"));
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("⚠").yellow().bold().to_string()
        } else {
            "WARN".to_string()
        };
        let _ = self.err.write_line(&format!("{prefix} {message}"));
    }

    /// Print a failure message, even in quiet mode
    pub fn failure(&self, message: &str) {
        let prefix = if self.use_color {
            style("✗").red().bold().to_string()
        } else {
            "FAIL".to_string()
        };
        let _ = self.err.write_line(&format!("{prefix} {message}"));
    }

    /// Print one timer firing: time, task label and detail
    pub fn event(&self, at_ms: u64, label: &str, detail: &str) {
        if self.quiet {
            return;
        }

        let time = format!("{at_ms:>6} ms");
        let line = if self.use_color {
            format!(
                "{} {} {detail}",
                style(time).dim(),
                style(format!("{label:<16}")).cyan()
            )
        } else {
            format!("{time} {label:<16} {detail}")
        };
        let _ = self.out.write_line(line.trim_end());
    }

    /// Print a key/value line
    pub fn field(&self, key: &str, value: &str) {
        if self.quiet {
            return;
        }

        let key = if self.use_color {
            style(format!("{key}:")).bold().to_string()
        } else {
            format!("{key}:")
        };
        let _ = self.out.write_line(&format!("  {key} {value}"));
    }

    /// Print a plain line
    pub fn line(&self, text: &str) {
        if self.quiet {
            return;
        }
        let _ = self.out.write_line(text);
    }

    /// Print machine-readable output; never suppressed
    pub fn raw(&self, text: &str) {
        let _ = self.out.write_line(text);
    }
}
