//! Inverted-index construction core: per-document posting extraction and
//! the term-grouping stage that turns the posting stream into an index.

pub mod aggregate;
pub mod docid;
pub mod extract;
pub mod posting;
pub mod tokenizer;
pub mod wire;

pub use aggregate::{group_by_term, TermPostings};
pub use docid::DocId;
pub use extract::{Extractor, ExtractorConfig};
pub use posting::{FieldType, Posting, NO_WEIGHT};
