//! Library entry for tongues: translation tables and key resolution.

pub mod i18n;
pub mod util;
