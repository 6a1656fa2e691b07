use std::borrow::Cow;

pub const FIELD_SEPARATOR: char = ',';
pub const QUOTE: char = '"';

/// 0-based index of the post body among the quoted fields of a record.
pub const BODY_FIELD: usize = 7;
/// 0-based index of the post title among the quoted fields of a record.
pub const TITLE_FIELD: usize = 14;

/// One post, borrowed from the raw record where possible.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PostRecord<'a> {
    pub title: Option<Cow<'a, str>>,
    pub body: Option<Cow<'a, str>>,
}

impl<'a> PostRecord<'a> {
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between quoted fields. Unquoted text and separators are skipped.
    Normal,
    /// Inside a quoted field that started at `start`.
    Quoted { start: usize },
    /// A quote was read inside a quoted field; the next char decides what it was.
    QuoteInQuoted { start: usize, quote: usize },
}

/// Parses the fixed layout of the post dump: quoted fields separated by `,`,
/// `""` standing for a literal quote inside a field. Only terminated quoted
/// fields advance the field index.
#[derive(Debug, Clone, Copy)]
pub struct RecordParser {
    body_field: usize,
    title_field: usize,
}

impl Default for RecordParser {
    fn default() -> Self {
        RecordParser::new(BODY_FIELD, TITLE_FIELD)
    }
}

impl RecordParser {
    pub fn new(body_field: usize, title_field: usize) -> Self {
        RecordParser {
            body_field,
            title_field,
        }
    }

    /// Never fails: a malformed record just leaves `title` and/or `body` empty.
    pub fn parse<'a>(&self, raw: &'a str) -> PostRecord<'a> {
        let mut record = PostRecord::default();
        let mut field = 0usize;
        let mut state = State::Normal;

        for (i, c) in raw.char_indices() {
            state = match (state, c) {
                (State::Normal, QUOTE) => State::Quoted { start: i + 1 },
                (State::Normal, _) => State::Normal,
                (State::Quoted { start }, QUOTE) => State::QuoteInQuoted { start, quote: i },
                (State::Quoted { .. }, _) => state,
                (State::QuoteInQuoted { start, quote }, FIELD_SEPARATOR) => {
                    self.close_field(&mut record, field, &raw[start..quote]);
                    field += 1;
                    if self.is_complete(&record) {
                        return record;
                    }
                    State::Normal
                }
                (State::QuoteInQuoted { start, .. }, QUOTE) => State::Quoted { start },
                // a lone quote followed by text opens the field anew
                (State::QuoteInQuoted { quote, .. }, _) => State::Quoted { start: quote + 1 },
            };
        }

        if let State::QuoteInQuoted { start, quote } = state {
            self.close_field(&mut record, field, &raw[start..quote]);
        }

        record
    }

    fn close_field<'a>(&self, record: &mut PostRecord<'a>, field: usize, value: &'a str) {
        if field == self.body_field {
            record.body = Some(unescape(value));
        } else if field == self.title_field {
            record.title = Some(unescape(value));
        }
    }

    #[inline]
    fn is_complete(&self, record: &PostRecord) -> bool {
        record.body.is_some() && record.title.is_some()
    }
}

fn unescape(value: &str) -> Cow<'_, str> {
    if value.contains("\"\"") {
        Cow::Owned(value.replace("\"\"", "\""))
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::testing::{post_record, quoted_record};

    fn raw(body: &str, title: &str) -> String {
        post_record(body, Some(title))
    }

    #[test]
    fn finds_body_and_title() {
        let line = raw("<code>foo foo foo</code>", "Q1");
        let record = RecordParser::default().parse(&line);
        assert_eq!(record.body(), Some("<code>foo foo foo</code>"));
        assert_eq!(record.title(), Some("Q1"));
    }

    #[test]
    fn separators_inside_quotes_are_content() {
        let line = raw("a, b, c", "x,y");
        let record = RecordParser::default().parse(&line);
        assert_eq!(record.body(), Some("a, b, c"));
        assert_eq!(record.title(), Some("x,y"));
    }

    #[test]
    fn doubled_quote_is_literal() {
        let line = raw("printf(\"hi\");", "say \"hi\"");
        let record = RecordParser::default().parse(&line);
        assert_eq!(record.body(), Some("printf(\"hi\");"));
        assert_eq!(record.title(), Some("say \"hi\""));
        assert!(matches!(record.body, Some(Cow::Owned(_))));
    }

    #[test]
    fn plain_fields_are_borrowed() {
        let line = raw("body", "title");
        let record = RecordParser::default().parse(&line);
        assert!(matches!(record.title, Some(Cow::Borrowed("title"))));
    }

    #[test]
    fn doubled_quote_before_separator_inside_field() {
        // field value is `a",b`
        let line = raw("a\",b", "t");
        let record = RecordParser::default().parse(&line);
        assert_eq!(record.body(), Some("a\",b"));
        assert_eq!(record.title(), Some("t"));
    }

    #[test]
    fn empty_quoted_field_counts() {
        let line = raw("", "t");
        let record = RecordParser::default().parse(&line);
        assert_eq!(record.body(), Some(""));
        assert_eq!(record.title(), Some("t"));
    }

    #[test]
    fn unquoted_fields_do_not_advance_index() {
        let mut line = String::from("123,456,");
        line.push_str(&raw("b", "t"));
        let record = RecordParser::default().parse(&line);
        assert_eq!(record.body(), Some("b"));
        assert_eq!(record.title(), Some("t"));
    }

    #[test]
    fn field_at_end_of_record() {
        let fields: Vec<String> = (0..=TITLE_FIELD).map(|i| format!("f{}", i)).collect();
        let line = quoted_record(&fields.iter().map(String::as_str).collect::<Vec<_>>());
        assert!(line.ends_with("\"f14\""));
        let record = RecordParser::default().parse(&line);
        assert_eq!(record.title(), Some("f14"));
        assert_eq!(record.body(), Some("f7"));
    }

    #[test]
    fn trailing_doubled_quote_at_end_of_record() {
        let fields: Vec<String> = (0..=TITLE_FIELD)
            .map(|i| if i == TITLE_FIELD { "end\"".to_string() } else { format!("f{}", i) })
            .collect();
        let line = quoted_record(&fields.iter().map(String::as_str).collect::<Vec<_>>());
        assert!(line.ends_with("\"end\"\"\""));
        let record = RecordParser::default().parse(&line);
        assert_eq!(record.title(), Some("end\""));
    }

    #[test]
    fn too_few_fields_has_no_title() {
        let line = quoted_record(&["a", "b", "c", "d", "e", "f", "g", "<code>body</code>", "i"]);
        let record = RecordParser::default().parse(&line);
        assert_eq!(record.body(), Some("<code>body</code>"));
        assert_eq!(record.title(), None);
    }

    #[test]
    fn unterminated_quote_is_dropped() {
        let mut line = quoted_record(&["a", "b", "c", "d", "e", "f", "g"]);
        line.push_str(",\"never closed");
        let record = RecordParser::default().parse(&line);
        assert_eq!(record, PostRecord::default());
    }

    #[test]
    fn empty_and_garbage_input() {
        assert_eq!(RecordParser::default().parse(""), PostRecord::default());
        assert_eq!(RecordParser::default().parse("no quotes, at all"), PostRecord::default());
    }

    #[test]
    fn stray_quote_restarts_field() {
        let parser = RecordParser::new(0, 1);
        let record = parser.parse("\"ab\"cd\",\"t\"");
        assert_eq!(record.body(), Some("cd"));
        assert_eq!(record.title(), Some("t"));
    }
}
