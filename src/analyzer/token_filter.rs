/// Tokens shorter than this (in characters) never take part in scoring.
pub const MIN_TOKEN_SIZE: usize = 3;

pub trait TokenFilter {
    fn filter<'a>(&self, token: &'a str) -> Option<&'a str>;
}

#[derive(Debug)]
pub struct MinLengthTokenFilter {
    min_len: usize,
}

impl MinLengthTokenFilter {
    pub fn new(min_len: usize) -> Self {
        MinLengthTokenFilter { min_len }
    }
}

impl Default for MinLengthTokenFilter {
    fn default() -> Self {
        MinLengthTokenFilter::new(MIN_TOKEN_SIZE)
    }
}

impl TokenFilter for MinLengthTokenFilter {
    #[inline]
    fn filter<'a>(&self, token: &'a str) -> Option<&'a str> {
        // byte length is an upper bound on the char count
        if token.len() < self.min_len || token.chars().count() < self.min_len {
            return None;
        }

        Some(token)
    }
}
