//! Terminal user interface
//!
//! The workflow talks to the operator only through [`Console`]. The
//! production implementation is [`TerminalConsole`], a set of ratatui dialogs
//! on the alternate screen.

pub mod console;
pub mod terminal;

pub use console::TerminalConsole;

use std::io;

/// Blocking operator dialogs
///
/// Dismissing a dialog (Esc) is reported as `None`, or `false` for
/// [`Console::confirm`]. An `Err` means the console itself failed.
pub trait Console {
    /// Choose one of `items`, returning its index
    fn menu(&mut self, title: &str, items: &[String]) -> io::Result<Option<usize>>;

    /// Free text input, pre-filled with `default`
    fn prompt(&mut self, title: &str, default: &str) -> io::Result<Option<String>>;

    /// Masked text input
    fn password(&mut self, title: &str) -> io::Result<Option<String>>;

    fn confirm(&mut self, question: &str) -> io::Result<bool>;

    /// Choose any number of `items`, returning their indices in ascending order
    fn checklist(&mut self, title: &str, items: &[String]) -> io::Result<Option<Vec<usize>>>;

    /// Show a message and wait for acknowledgement
    fn alert(&mut self, message: &str) -> io::Result<()>;
}
