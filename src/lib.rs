#[macro_use]
extern crate rust_i18n;

pub mod components;
pub mod config;
pub mod error;
pub mod notices;
pub mod render;

// Initialize i18n
i18n!("locales", fallback = "en");
