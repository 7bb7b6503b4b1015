//! Command implementations for dynarr-cmd

pub mod growth;
pub mod scenario;
pub mod stack;
