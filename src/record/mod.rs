pub mod parser;

pub use parser::{PostRecord, RecordParser, BODY_FIELD, TITLE_FIELD};
