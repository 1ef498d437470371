pub mod shared;
pub mod synthesis;
pub mod vocabulary;
