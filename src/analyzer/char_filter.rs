use lazy_static::lazy_static;
use regex::Regex;

pub const CODE_OPEN_TAG: &str = "<code>";
pub const CODE_CLOSE_TAG: &str = "</code>";

lazy_static! {
    static ref CODE_BLOCK: Regex = Regex::new(&format!(
        "{}(.+?){}",
        regex::escape(CODE_OPEN_TAG),
        regex::escape(CODE_CLOSE_TAG)
    ))
    .unwrap();
}

pub type Regions<'a> = Box<dyn Iterator<Item = &'a str> + 'a>;

/// Selects the parts of a text that are handed to the tokenizer.
pub trait CharFilter {
    fn filter<'a>(&self, text: &'a str) -> Regions<'a>;
}

/// The whole text is a single region. Used for the reference source file.
#[derive(Debug, Default)]
pub struct WholeTextCharFilter {}

impl WholeTextCharFilter {
    pub fn new() -> Self {
        WholeTextCharFilter {}
    }
}

impl CharFilter for WholeTextCharFilter {
    fn filter<'a>(&self, text: &'a str) -> Regions<'a> {
        Box::new(std::iter::once(text))
    }
}

/// Yields the inner text of every `<code>...</code>` block. Matching is non-greedy,
/// so a block ends at the first closing tag after its opening tag.
#[derive(Debug, Default)]
pub struct CodeBlockCharFilter {}

impl CodeBlockCharFilter {
    pub fn new() -> Self {
        CodeBlockCharFilter {}
    }
}

impl CharFilter for CodeBlockCharFilter {
    fn filter<'a>(&self, text: &'a str) -> Regions<'a> {
        Box::new(
            CODE_BLOCK
                .captures_iter(text)
                .filter_map(|caps| caps.get(1))
                .map(|m| m.as_str()),
        )
    }
}
