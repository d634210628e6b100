// copyme shared type definitions
// Each submodule defines types used across the crate.

pub mod clip;
pub mod errors;
pub mod notification;
pub mod settings;
