//! Command implementations

pub mod lsp;
pub mod trust;
