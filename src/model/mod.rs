//! Document model: coordinates, the text buffer, and edit history.

pub mod buffer;
pub mod command;
pub mod position;
pub mod undo;
