//! Host-side collaborators for the speedread core: document extraction, page
//! preview geometry, settings storage, command input, terminal rendering and
//! the HTTP upload endpoint.

pub mod extract;
pub mod input;
pub mod network;
pub mod preview;
pub mod render;
pub mod storage;
