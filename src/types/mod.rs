//! Tipos compartilhados do Wordscope.

pub mod config;
pub mod errors;
pub mod record;
pub mod word;

pub use record::{Category, CategoryResult, Definition, Titles, Translation, WordRecord};
pub use word::NormalizedWord;
