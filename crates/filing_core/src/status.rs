/// Tone of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub message: String,
    pub severity: Severity,
}

/// Single-slot, last-write-wins user notice.
///
/// Advisory only: nothing in the state machine reads it back.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusReporter {
    slot: Option<StatusLine>,
}

impl StatusReporter {
    pub fn set(&mut self, message: impl Into<String>, severity: Severity) {
        self.slot = Some(StatusLine {
            message: message.into(),
            severity,
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.set(message, Severity::Info);
    }

    pub fn report(&mut self, error: &crate::ClientError) {
        self.set(error.to_string(), error.severity());
    }

    pub fn current(&self) -> Option<&StatusLine> {
        self.slot.as_ref()
    }
}
