use crate::index::ReferenceIndex;
use std::fmt;

pub trait TermWeight {
    fn weight(&self, term: &str) -> u64;
}

impl TermWeight for ReferenceIndex {
    #[inline(always)]
    fn weight(&self, term: &str) -> u64 {
        self.get(term)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredPost {
    pub title: String,
    pub score: u64,
}

impl fmt::Display for ScoredPost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.title, self.score)
    }
}

/// Scores a post from every token emitted for its title.
///
/// A token seen X times in the reference and Y times in the post adds X * Y:
/// each of the Y emissions adds the reference count once, so duplicates must
/// not be collapsed before calling `aggregate`.
#[derive(Debug)]
pub struct Aggregator<'i, W: TermWeight> {
    weights: &'i W,
}

impl<'i, W: TermWeight> Aggregator<'i, W> {
    pub fn new(weights: &'i W) -> Self {
        Aggregator { weights }
    }

    pub fn score<'t, I>(&self, tokens: I) -> u64
    where
        I: IntoIterator<Item = &'t str>,
    {
        tokens
            .into_iter()
            .fold(0u64, |acc, token| acc.saturating_add(self.weights.weight(token)))
    }

    pub fn aggregate<'t, I>(&self, title: &str, tokens: I) -> ScoredPost
    where
        I: IntoIterator<Item = &'t str>,
    {
        ScoredPost {
            title: title.to_string(),
            score: self.score(tokens),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_is_reference_count_times_post_count() {
        let index = ReferenceIndex::build("foo foo bar").unwrap();
        let aggregator = Aggregator::new(&index);
        let post = aggregator.aggregate("Q1", vec!["foo", "foo", "foo"]);
        assert_eq!(post, ScoredPost { title: "Q1".to_string(), score: 6 });
    }

    #[test]
    fn unknown_tokens_count_zero() {
        let index = ReferenceIndex::build("foo foo bar").unwrap();
        let aggregator = Aggregator::new(&index);
        assert_eq!(aggregator.score(vec!["nope", "bar", "zzz"]), 1);
        assert_eq!(aggregator.score(Vec::<&str>::new()), 0);
    }

    #[test]
    fn additive_over_concatenation() {
        let index = ReferenceIndex::build("int main return int int value").unwrap();
        let aggregator = Aggregator::new(&index);
        let a = vec!["int", "main", "other"];
        let b = vec!["int", "return", "value", "value"];
        let both: Vec<&str> = a.iter().chain(b.iter()).copied().collect();
        assert_eq!(
            aggregator.score(both),
            aggregator.score(a.clone()) + aggregator.score(b.clone())
        );
    }

    #[test]
    fn order_does_not_matter() {
        let index = ReferenceIndex::build("alpha beta beta gamma gamma gamma").unwrap();
        let aggregator = Aggregator::new(&index);
        let tokens = vec!["gamma", "alpha", "beta", "gamma"];
        let mut reversed = tokens.clone();
        reversed.reverse();
        assert_eq!(aggregator.score(tokens), aggregator.score(reversed));
    }

    #[test]
    fn displays_as_tab_separated_line() {
        let post = ScoredPost { title: "How to sort".to_string(), score: 42 };
        assert_eq!(post.to_string(), "How to sort\t42");
    }
}
