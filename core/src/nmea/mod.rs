pub mod parser;

pub use parser::{NmeaParser, SentenceEvent};
