mod diff;
pub mod presenter;
pub mod terminal;

pub use diff::{diff, Change, Changeset};
pub use presenter::*;
pub use terminal::{LogImageLoader, TerminalGrid};
