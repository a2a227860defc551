#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Lex,
    Parse,
}

/// A problem to report to the user, tagged with the stage that produced it.
/// The message text is the contract; this type only carries it to a printer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn lex(message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Lex, message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Parse, message)
    }
}

pub fn format_diagnostic(d: &Diagnostic) -> String {
    let kind_str = match d.kind {
        DiagnosticKind::Lex => "lex",
        DiagnosticKind::Parse => "parse",
    };
    format!("{} error: {}", kind_str, d.message)
}
