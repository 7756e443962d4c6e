use std::collections::HashMap;

use crate::posting::Posting;

/// A term together with every posting that carried it.
#[derive(Debug, Clone, PartialEq)]
pub struct TermPostings {
    pub term: String,
    pub postings: Vec<Posting>,
}

/// Group a posting stream by exact term. Pure relocation: postings keep
/// their payload and their arrival order within a group, groups appear in
/// first-arrival order, nothing is merged or deduplicated. A group is only
/// complete once the whole input has been consumed.
pub fn group_by_term(postings: impl IntoIterator<Item = Posting>) -> Vec<TermPostings> {
    let mut slot: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<TermPostings> = Vec::new();
    for posting in postings {
        match slot.get(&posting.term) {
            Some(&i) => groups[i].postings.push(posting),
            None => {
                slot.insert(posting.term.clone(), groups.len());
                groups.push(TermPostings { term: posting.term.clone(), postings: vec![posting] });
            }
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docid::DocId;
    use crate::posting::FieldType;

    #[test]
    fn groups_without_deduplicating() {
        let doc_a = DocId::from_url("http://a/");
        let doc_b = DocId::from_url("http://b/");
        let input = vec![
            Posting::raw("hello".into(), doc_a.clone(), 1.0, vec![0, 1]),
            Posting::presence("world".into(), doc_a.clone(), FieldType::Title),
            Posting::presence("hello".into(), doc_b.clone(), FieldType::Title),
            Posting::presence("hello".into(), doc_b.clone(), FieldType::Title),
        ];
        let groups = group_by_term(input.clone());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].term, "hello");
        assert_eq!(groups[0].postings, vec![input[0].clone(), input[2].clone(), input[3].clone()]);
        assert_eq!(groups[1].term, "world");
        assert_eq!(groups[1].postings, vec![input[1].clone()]);
    }

    #[test]
    fn empty_stream_yields_no_groups() {
        assert!(group_by_term(Vec::new()).is_empty());
    }
}
