pub mod analyzer;
pub mod char_filter;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::{Analyzer, PostAnalyzer, SourceAnalyzer};
pub use token_filter::MIN_TOKEN_SIZE;
