use std::fmt;

use yansi::Paint;

use crate::Severity;

/// A single log statement, built per call and dropped after dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<'a> {
    severity: Severity,
    item_name: Option<&'a str>,
    prefixes: &'a [&'a str],
    message: String,
}

impl<'a> Record<'a> {
    pub fn new(
        severity: Severity,
        item_name: Option<&'a str>,
        prefixes: &'a [&'a str],
        args: fmt::Arguments<'_>,
    ) -> Self {
        Self {
            severity,
            item_name: item_name.filter(|name| !name.is_empty()),
            prefixes,
            message: fmt::format(args),
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn item_name(&self) -> Option<&'a str> {
        self.item_name
    }

    pub fn prefixes(&self) -> &'a [&'a str] {
        self.prefixes
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Header assembly progress, reported to self-diagnostics as segments are added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'a> {
    Label { line: &'a str },
    ItemName { name: &'a str, line: &'a str },
    Prefix { prefix: &'a str, line: &'a str },
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFormatter {
    use_ansi: bool,
}

impl DefaultFormatter {
    pub fn new(use_ansi: bool) -> Self {
        Self { use_ansi }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn format(&self, record: &Record<'_>) -> String {
        self.format_traced(record, &mut |_| {})
    }

    /// Renders `record` as `[ label ] [ item ] [ prefix ]... message`.
    pub fn format_traced(&self, record: &Record<'_>, trace: &mut dyn FnMut(Step<'_>)) -> String {
        let mut line = segment(&self.format_level(record.severity));
        trace(Step::Label { line: &line });

        if let Some(name) = record.item_name {
            line.push_str(&segment(name));
            trace(Step::ItemName { name, line: &line });
        }

        for &prefix in record.prefixes {
            line.push_str(&segment(prefix));
            trace(Step::Prefix { prefix, line: &line });
        }

        line.push_str(&record.message);
        line
    }

    fn format_level(&self, severity: Severity) -> String {
        let label = severity.label();
        if !self.use_ansi {
            return label.to_string();
        }

        match severity {
            Severity::Debug => label.rgb(220, 100, 220).to_string(),
            Severity::Info => label.rgb(100, 210, 210).to_string(),
            Severity::Warning => label.rgb(220, 220, 100).to_string(),
            Severity::Error => label.rgb(255, 0, 0).to_string(),
            Severity::Fatal => label.rgb(255, 0, 0).bold().to_string(),
            Severity::All => label.to_string(),
        }
    }
}

fn segment(text: impl fmt::Display) -> String {
    format!("[ {} ] ", text)
}
