use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::docid::DocId;

/// Weight carried by presence-only postings (every field except body text).
pub const NO_WEIGHT: f32 = -1.0;

/// Which structural field of the document a posting was extracted from.
///
/// The integer codes are the output-boundary representation; inside the
/// pipeline the field is always this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FieldType {
    Raw = 0,
    Url = 1,
    Meta = 2,
    Anchor = 3,
    Title = 4,
}

impl FieldType {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(FieldType::Raw),
            1 => Some(FieldType::Url),
            2 => Some(FieldType::Meta),
            3 => Some(FieldType::Anchor),
            4 => Some(FieldType::Title),
            _ => None,
        }
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        FieldType::from_code(code)
            .ok_or_else(|| de::Error::custom(format!("unknown field type code {code}")))
    }
}

/// One occurrence record for a term: created once by the extractor,
/// immutable afterwards, grouped (never edited) by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    pub term: String,
    pub doc_id: DocId,
    pub weight: f32,
    pub positions: Vec<u32>,
    pub field: FieldType,
}

impl Posting {
    /// Body-text posting: term-frequency weight plus every token offset at
    /// which the stemmed term occurs.
    pub fn raw(term: String, doc_id: DocId, weight: f32, positions: Vec<u32>) -> Self {
        Posting { term, doc_id, weight, positions, field: FieldType::Raw }
    }

    /// Presence-only posting for the URL, META, or TITLE field of the
    /// document being scanned.
    pub fn presence(term: String, doc_id: DocId, field: FieldType) -> Self {
        Posting { term, doc_id, weight: NO_WEIGHT, positions: Vec::new(), field }
    }

    /// Anchor-text posting credited to the *link target's* identifier.
    ///
    /// This is the single channel through which a posting is attributed to
    /// a document other than the one being scanned.
    pub fn attributed(term: String, target: DocId) -> Self {
        Posting::presence(term, target, FieldType::Anchor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_codes_round_trip() {
        for f in [
            FieldType::Raw,
            FieldType::Url,
            FieldType::Meta,
            FieldType::Anchor,
            FieldType::Title,
        ] {
            assert_eq!(FieldType::from_code(f.code()), Some(f));
        }
        assert_eq!(FieldType::from_code(5), None);
    }

    #[test]
    fn presence_postings_carry_sentinel() {
        let p = Posting::presence("term".into(), DocId::from_url("http://x/"), FieldType::Meta);
        assert_eq!(p.weight, NO_WEIGHT);
        assert!(p.positions.is_empty());
    }
}
