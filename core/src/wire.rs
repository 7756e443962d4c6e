//! Textual posting-line codec for the stream between the extraction and
//! grouping stages: `term <TAB> doc_id <TAB> weight <TAB> positions <TAB>
//! field-code`, positions comma-joined, an empty list as an empty field.
//! `encode` and `decode` are inverses for every representable posting.

use anyhow::{anyhow, Context, Result};

use crate::docid::DocId;
use crate::posting::{FieldType, Posting};

pub fn encode(posting: &Posting) -> String {
    let positions = posting
        .positions
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "{}\t{}\t{}\t{}\t{}",
        posting.term,
        posting.doc_id,
        posting.weight,
        positions,
        posting.field.code()
    )
}

pub fn decode(line: &str) -> Result<Posting> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != 5 {
        return Err(anyhow!("expected 5 fields, got {}", fields.len()));
    }
    let weight: f32 = fields[2].parse().with_context(|| format!("bad weight {:?}", fields[2]))?;
    let positions = if fields[3].is_empty() {
        Vec::new()
    } else {
        fields[3]
            .split(',')
            .map(|p| p.parse::<u32>().with_context(|| format!("bad position {p:?}")))
            .collect::<Result<Vec<_>>>()?
    };
    let code: u8 = fields[4].parse().with_context(|| format!("bad field code {:?}", fields[4]))?;
    let field = FieldType::from_code(code).ok_or_else(|| anyhow!("unknown field code {code}"))?;
    Ok(Posting {
        term: fields[0].to_string(),
        doc_id: DocId::from(fields[1].to_string()),
        weight,
        positions,
        field,
    })
}
