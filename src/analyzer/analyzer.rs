use crate::analyzer::char_filter::{CharFilter, CodeBlockCharFilter, WholeTextCharFilter};
use crate::analyzer::token_filter::{MinLengthTokenFilter, TokenFilter};
use crate::analyzer::tokenizer::{Tokenizer, WhitespaceTokenizer};

#[derive(Debug)]
pub struct Analyzer<C: CharFilter, T: TokenFilter, I: Tokenizer> {
    char_filter: C,
    token_filter: T,
    tokenizer: I,
}

/// Analyzer for the reference source file: every token of the file.
pub type SourceAnalyzer = Analyzer<WholeTextCharFilter, MinLengthTokenFilter, WhitespaceTokenizer>;

/// Analyzer for post bodies: only tokens inside code blocks.
pub type PostAnalyzer = Analyzer<CodeBlockCharFilter, MinLengthTokenFilter, WhitespaceTokenizer>;

impl<C, T, I> Analyzer<C, T, I>
where
    C: CharFilter,
    T: TokenFilter,
    I: Tokenizer,
{
    pub fn new(char_filter: C, token_filter: T, tokenizer: I) -> Self {
        Analyzer {
            char_filter,
            token_filter,
            tokenizer,
        }
    }

    pub fn analyze<'s, 'a: 's>(&'s self, text: &'a str) -> impl Iterator<Item = &'a str> + 's {
        self.char_filter
            .filter(text)
            .flat_map(move |region| self.tokenizer.tokenize(region))
            .filter_map(move |token| self.token_filter.filter(token))
    }
}

impl SourceAnalyzer {
    pub fn source() -> Self {
        Analyzer::new(
            WholeTextCharFilter::new(),
            MinLengthTokenFilter::default(),
            WhitespaceTokenizer::new(),
        )
    }
}

impl PostAnalyzer {
    pub fn post() -> Self {
        Analyzer::new(
            CodeBlockCharFilter::new(),
            MinLengthTokenFilter::default(),
            WhitespaceTokenizer::new(),
        )
    }
}
