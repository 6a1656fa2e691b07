use crate::analyzer::PostAnalyzer;
use crate::record::RecordParser;

/// One `(title, token)` pair produced by the map phase.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TokenEmission {
    pub title: String,
    pub token: String,
}

impl TokenEmission {
    pub fn new(title: &str, token: &str) -> Self {
        TokenEmission {
            title: title.to_string(),
            token: token.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapOutcome {
    /// Parsed fine; carries the number of emitted tokens (possibly 0).
    Mapped(usize),
    NoBody,
    NoTitle,
}

/// Turns raw post records into `(title, token)` pairs. Stateless between records.
#[derive(Debug)]
pub struct Mapper {
    parser: RecordParser,
    analyzer: PostAnalyzer,
}

impl Default for Mapper {
    fn default() -> Self {
        Mapper::new(RecordParser::default(), PostAnalyzer::post())
    }
}

impl Mapper {
    pub fn new(parser: RecordParser, analyzer: PostAnalyzer) -> Self {
        Mapper { parser, analyzer }
    }

    /// Calls `emit(title, token)` once per qualifying token in the record's code blocks.
    pub fn map<E>(&self, raw: &str, mut emit: E) -> MapOutcome
    where
        E: FnMut(&str, &str),
    {
        let record = self.parser.parse(raw);

        let body = match record.body() {
            Some(body) => body,
            None => return MapOutcome::NoBody,
        };
        let title = match record.title() {
            Some(title) => title,
            None => return MapOutcome::NoTitle,
        };

        let mut emitted = 0usize;
        for token in self.analyzer.analyze(body) {
            emit(title, token);
            emitted += 1;
        }

        MapOutcome::Mapped(emitted)
    }

    pub fn map_record(&self, raw: &str) -> Vec<TokenEmission> {
        let mut emissions = Vec::new();
        self.map(raw, |title, token| emissions.push(TokenEmission::new(title, token)));
        emissions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::testing::post_record;

    #[test]
    fn emits_one_pair_per_token() {
        let mapper = Mapper::default();
        let emissions = mapper.map_record(&post_record("<code>foo foo foo</code>", Some("Q1")));
        assert_eq!(emissions, vec![TokenEmission::new("Q1", "foo"); 3]);
    }

    #[test]
    fn short_tokens_are_never_emitted() {
        let mapper = Mapper::default();
        let emissions = mapper.map_record(&post_record("<code>a = b + foo;</code>", Some("T")));
        assert_eq!(emissions, vec![TokenEmission::new("T", "foo;")]);
        assert!(emissions.iter().all(|e| e.token.chars().count() >= 3));
    }

    #[test]
    fn tokens_span_every_code_block() {
        let mapper = Mapper::default();
        let body = "<code>int main</code> text between <code>return main</code>";
        let tokens: Vec<String> = mapper
            .map_record(&post_record(body, Some("T")))
            .into_iter()
            .map(|e| e.token)
            .collect();
        assert_eq!(tokens, vec!["int", "main", "return", "main"]);
    }

    #[test]
    fn body_without_code_emits_nothing() {
        let mapper = Mapper::default();
        let line = post_record("how do I print in C?", Some("Q2"));
        assert_eq!(mapper.map(&line, |_, _| panic!("unexpected emission")), MapOutcome::Mapped(0));
    }

    #[test]
    fn missing_title_is_skipped() {
        let mapper = Mapper::default();
        let line = post_record("<code>foo bar baz</code>", None);
        assert_eq!(mapper.map(&line, |_, _| panic!("unexpected emission")), MapOutcome::NoTitle);
    }

    #[test]
    fn missing_body_is_skipped() {
        let mapper = Mapper::default();
        assert_eq!(mapper.map("\"only\",\"two\"", |_, _| ()), MapOutcome::NoBody);
        assert_eq!(mapper.map("", |_, _| ()), MapOutcome::NoBody);
    }
}
