pub mod tagged;
pub mod terminal;

pub use terminal::TerminalReporter;
