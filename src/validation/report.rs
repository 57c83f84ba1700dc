use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

/// Outcome of a single dataset check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Check passed
    Ok,
    /// Check passed, but something looks off
    Warning(String),
    /// Check failed; the dataset must not be saved
    Failed(String),
}

/// A named check and its outcome
#[derive(Debug, Clone)]
pub struct ValidationCheck {
    /// What was checked
    pub name: String,
    /// How it went
    pub status: CheckStatus,
}

impl ValidationCheck {
    pub(crate) fn ok(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Ok,
        }
    }

    pub(crate) fn warning(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Warning(message.into()),
        }
    }

    pub(crate) fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Failed(message.into()),
        }
    }
}

/// All checks run against one dataset
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// Dataset the checks were run on
    pub subject: String,
    /// Individual check results, in the order they ran
    pub checks: Vec<ValidationCheck>,
}

impl ValidationReport {
    /// Start an empty report for `subject`
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            checks: Vec::new(),
        }
    }

    /// Record a check result
    pub fn add_check(&mut self, check: ValidationCheck) {
        self.checks.push(check);
    }

    /// Whether any check failed
    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    /// Whether any check warned
    pub fn has_warnings(&self) -> bool {
        self.warning_count() > 0
    }

    /// Number of passed checks
    pub fn success_count(&self) -> usize {
        self.count(|s| matches!(s, CheckStatus::Ok))
    }

    /// Number of warnings
    pub fn warning_count(&self) -> usize {
        self.count(|s| matches!(s, CheckStatus::Warning(_)))
    }

    /// Number of failures
    pub fn failure_count(&self) -> usize {
        self.count(|s| matches!(s, CheckStatus::Failed(_)))
    }

    /// Failure messages joined into one line
    pub fn failure_summary(&self) -> String {
        self.checks
            .iter()
            .filter_map(|c| match &c.status {
                CheckStatus::Failed(msg) => Some(format!("{}: {}", c.name, msg)),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn count(&self, predicate: impl Fn(&CheckStatus) -> bool) -> usize {
        self.checks.iter().filter(|c| predicate(&c.status)).count()
    }

    fn verdict(&self) -> &'static str {
        if self.has_failures() {
            "Validation FAILED"
        } else if self.has_warnings() {
            "Validation PASSED with warnings"
        } else {
            "Validation PASSED"
        }
    }

    /// Render the report with terminal colors (plain text without the
    /// `colorized_output` feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            let mut output = String::new();
            output.push_str(&format!("{}\n", style("Dataset Validation Report").bold().cyan()));
            output.push_str(&format!("{}: {}\n\n", style("Dataset").bold(), self.subject));

            for check in &self.checks {
                let line = match &check.status {
                    CheckStatus::Ok => format!("[{}] {}", style("OK").green(), check.name),
                    CheckStatus::Warning(msg) => {
                        format!("[{}] {} - {}", style("WARN").yellow(), check.name, msg)
                    }
                    CheckStatus::Failed(msg) => {
                        format!("[{}] {} - {}", style("FAIL").red().bold(), check.name, msg)
                    }
                };
                output.push_str(&line);
                output.push('\n');
            }

            output.push_str(&format!(
                "\n{}: {} passed, {} warnings, {} failed\n",
                style("Summary").bold(),
                style(self.success_count()).green(),
                style(self.warning_count()).yellow(),
                style(self.failure_count()).red()
            ));
            let verdict = if self.has_failures() {
                style(self.verdict()).red().bold()
            } else if self.has_warnings() {
                style(self.verdict()).yellow().bold()
            } else {
                style(self.verdict()).green().bold()
            };
            output.push_str(&format!("{}\n", verdict));
            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            self.to_string()
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dataset Validation Report")?;
        writeln!(f, "Dataset: {}", self.subject)?;
        writeln!(f)?;

        for check in &self.checks {
            match &check.status {
                CheckStatus::Ok => writeln!(f, "[OK] {}", check.name)?,
                CheckStatus::Warning(msg) => writeln!(f, "[WARN] {} - {}", check.name, msg)?,
                CheckStatus::Failed(msg) => writeln!(f, "[FAIL] {} - {}", check.name, msg)?,
            }
        }

        writeln!(f)?;
        writeln!(
            f,
            "Summary: {} passed, {} warnings, {} failed",
            self.success_count(),
            self.warning_count(),
            self.failure_count()
        )?;
        writeln!(f, "{}", self.verdict())
    }
}
