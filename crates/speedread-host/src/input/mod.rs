//! Host command sources.

mod stdin;

pub use stdin::StdinCommands;
