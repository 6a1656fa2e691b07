pub type Tokens<'a> = Box<dyn Iterator<Item = &'a str> + 'a>;

pub trait Tokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Tokens<'a>;
}

/// Splits on ASCII whitespace (space, `\t`, `\n`, `\r`, form feed). No case folding.
#[derive(Debug, Default)]
pub struct WhitespaceTokenizer {}

impl WhitespaceTokenizer {
    pub fn new() -> Self {
        WhitespaceTokenizer {}
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Tokens<'a> {
        Box::new(text.split_ascii_whitespace())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_every_ascii_whitespace_class() {
        let tokens: Vec<&str> = WhitespaceTokenizer::new()
            .tokenize("  int\tmain(void)\r\n{\x0creturn 0;}  ")
            .collect();
        assert_eq!(tokens, vec!["int", "main(void)", "{", "return", "0;}"]);
    }

    #[test]
    fn keeps_case() {
        let tokens: Vec<&str> = WhitespaceTokenizer::new().tokenize("Foo foo FOO").collect();
        assert_eq!(tokens, vec!["Foo", "foo", "FOO"]);
    }
}
