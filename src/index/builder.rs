use crate::analyzer::char_filter::CharFilter;
use crate::analyzer::token_filter::TokenFilter;
use crate::analyzer::tokenizer::Tokenizer;
use crate::analyzer::Analyzer;
use crate::index::reference::ReferenceIndex;
use crate::index::Result;
use std::collections::BTreeMap;

pub type BuildingTermDictionary = BTreeMap<String, u64>;

/// Counts the tokens of the reference file. Frozen into a [`ReferenceIndex`] by `finish`.
#[derive(Debug)]
pub struct Builder<C, T, I>
where
    C: CharFilter,
    T: TokenFilter,
    I: Tokenizer,
{
    analyzer: Analyzer<C, T, I>,
    dict: BuildingTermDictionary,
    token_num: u64,
}

impl<C, T, I> Builder<C, T, I>
where
    C: CharFilter,
    T: TokenFilter,
    I: Tokenizer,
{
    pub fn new(analyzer: Analyzer<C, T, I>) -> Self {
        Builder {
            analyzer,
            dict: BuildingTermDictionary::new(),
            token_num: 0,
        }
    }

    pub fn add_text(&mut self, text: &str) {
        for term in self.analyzer.analyze(text) {
            self.token_num += 1;
            match self.dict.get_mut(term) {
                None => {
                    self.dict.insert(term.to_string(), 1);
                }
                Some(count) => *count += 1,
            }
        }
    }

    pub fn clear(&mut self) {
        self.dict.clear();
        self.token_num = 0;
    }

    #[inline]
    pub fn term_num(&self) -> usize {
        self.dict.len()
    }

    pub fn finish(&mut self) -> Result<ReferenceIndex> {
        let mut fst_builder = fst::MapBuilder::memory();

        // BTreeMap iterates in byte order, which is what fst requires
        for (term, count) in self.dict.iter() {
            fst_builder.insert(term, *count)?;
        }

        let map = fst::Map::new(fst_builder.into_inner()?)?;
        let index = ReferenceIndex::new(map, self.token_num);
        self.clear();

        Ok(index)
    }
}
