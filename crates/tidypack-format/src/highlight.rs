//! Header highlighting strategies.

/// Decorates the header line of a formatted message.
///
/// Implementations must be pure text decoration: the formatter calls this
/// once per message and never inspects the result beyond joining it back in.
pub trait Highlight {
    /// Return the decorated form of `line`.
    fn highlight(&self, line: &str) -> String;
}

impl<F> Highlight for F
where
    F: Fn(&str) -> String,
{
    fn highlight(&self, line: &str) -> String {
        self(line)
    }
}

/// Leaves the header untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Plain;

impl Highlight for Plain {
    fn highlight(&self, line: &str) -> String {
        line.to_string()
    }
}

/// Reverse-video ANSI styling, as terminals show a selected line.
///
/// Styling is always emitted; callers decide whether colour is wanted
/// before picking this highlighter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inverse;

impl Highlight for Inverse {
    fn highlight(&self, line: &str) -> String {
        console::style(line).reverse().force_styling(true).to_string()
    }
}
