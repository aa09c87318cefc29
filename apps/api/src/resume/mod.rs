//! Resume export: assembly, localization and PDF rendering.

pub mod assembler;
pub mod document;
pub mod handlers;
pub mod language;
pub mod profile;
pub mod render;
