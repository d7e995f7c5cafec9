// Application layer: ways of showing catalogue data to a user.

pub mod export;
pub mod terminal;

pub use terminal::{DetailsView, TerminalRenderer};
