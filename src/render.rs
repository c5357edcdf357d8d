//! Rendered output lines, the unit every command handler produces.
//!
//! The dispatcher's contract is "never raises, always produces zero or more
//! rendered lines"; `LineKind` is the only presentation hint a handler may
//! attach. Frontends decide what a kind looks like.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Regular command output.
    Output,
    /// The prompt + submitted line, echoed back into the log.
    CommandEcho,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub kind: LineKind,
    pub text: String,
}

impl RenderedLine {
    pub fn out(text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Output,
            text: text.into(),
        }
    }

    pub fn echo(text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::CommandEcho,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Error,
            text: text.into(),
        }
    }

    /// Splits multi-line handler output into one `RenderedLine` per line,
    /// preserving the kind.
    pub fn split_lines(&self) -> impl Iterator<Item = RenderedLine> + '_ {
        let kind = self.kind;
        self.text.split('\n').map(move |l| RenderedLine {
            kind,
            text: l.to_string(),
        })
    }
}
