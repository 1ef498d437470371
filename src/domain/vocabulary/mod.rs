pub mod catalog;
pub mod error;
pub mod model;

pub use catalog::{builtin_sets, find_builtin};
pub use error::VocabularyError;
pub use model::{LanguageCode, Speed, VocabularyItem, VocabularySet};
