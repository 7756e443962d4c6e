use webindex_core::{DocId, Extractor, FieldType, Posting, NO_WEIGHT};

fn extract(url: &str, html: &str) -> Vec<Posting> {
    Extractor::default().extract(url, html)
}

fn terms_of(postings: &[Posting], field: FieldType) -> Vec<&str> {
    postings
        .iter()
        .filter(|p| p.field == field)
        .map(|p| p.term.as_str())
        .collect()
}

#[test]
fn worked_example_hello_world() {
    let url = "http://example.com/a";
    let postings = extract(
        url,
        "<html><title>Hello World</title><body>hello hello world</body></html>",
    );
    let doc_id = DocId::from_url(url);
    assert_eq!(doc_id.as_str(), "487288002139349861936101543423621612752364261643");

    let raw: Vec<&Posting> = postings.iter().filter(|p| p.field == FieldType::Raw).collect();
    assert_eq!(raw.len(), 2);
    assert_eq!(raw[0].term, "hello");
    assert!((raw[0].weight - 1.0).abs() < 1e-6);
    assert_eq!(raw[0].positions, vec![0, 1]);
    assert_eq!(raw[1].term, "world");
    assert!((raw[1].weight - 0.7).abs() < 1e-6);
    assert_eq!(raw[1].positions, vec![2]);
    assert!(raw.iter().all(|p| p.doc_id == doc_id));

    // "com" is stop-listed in the URL field; "exampl" and "a" survive.
    assert_eq!(terms_of(&postings, FieldType::Url), vec!["exampl", "a"]);

    let title: Vec<&Posting> = postings.iter().filter(|p| p.field == FieldType::Title).collect();
    assert_eq!(
        title.iter().map(|p| p.term.as_str()).collect::<Vec<_>>(),
        vec!["hello", "world"]
    );
    for p in title {
        assert_eq!(p.weight, NO_WEIGHT);
        assert!(p.positions.is_empty());
        assert_eq!(p.doc_id, doc_id);
    }
}

#[test]
fn single_occurrence_term_attains_the_maximum() {
    let postings = extract("http://example.com/t", "<html><body>testing</body></html>");
    let raw: Vec<&Posting> = postings.iter().filter(|p| p.field == FieldType::Raw).collect();
    assert_eq!(raw.len(), 1);
    assert_eq!(raw[0].term, "test");
    // count 1 of max 1: the floor formula gives the full weight
    assert!((raw[0].weight - 1.0).abs() < 1e-6);
    assert_eq!(raw[0].positions, vec![0]);
}

#[test]
fn tf_is_floored_and_max_term_scores_one() {
    let postings = extract(
        "http://example.com/tf",
        "<html><body>alpha alpha alpha beta beta gamma</body></html>",
    );
    let mut max_seen = 0.0f32;
    for p in postings.iter().filter(|p| p.field == FieldType::Raw) {
        assert!(p.weight >= 0.4 - 1e-6 && p.weight <= 1.0 + 1e-6);
        max_seen = max_seen.max(p.weight);
        match p.term.as_str() {
            "alpha" => assert!((p.weight - 1.0).abs() < 1e-6),
            "beta" => assert!((p.weight - 0.8).abs() < 1e-6),
            "gamma" => assert!((p.weight - 0.6).abs() < 1e-6),
            other => panic!("unexpected term {other}"),
        }
    }
    assert!((max_seen - 1.0).abs() < 1e-6);
}

#[test]
fn anchor_text_is_credited_to_the_link_target() {
    let url = "http://example.com/a";
    let postings = extract(
        url,
        r##"<html><body>
            <a href="#top">skip this</a>
            <a href="b.html" title="next page">read more</a>
            <a href="http://other.com/page#frag">elsewhere</a>
            <a name="x">dangling text</a>
        </body></html>"##,
    );
    let own_id = DocId::from_url(url);
    let anchors: Vec<&Posting> =
        postings.iter().filter(|p| p.field == FieldType::Anchor).collect();

    // fragment-only and href-less links contribute nothing
    assert!(anchors.iter().all(|p| p.term != "skip" && p.term != "dangl"));
    // every anchor posting belongs to some other document's identifier
    assert!(anchors.iter().all(|p| p.doc_id != own_id));

    let b_id = DocId::from_url("http://example.com/b.html");
    let b_terms: Vec<&str> =
        anchors.iter().filter(|p| p.doc_id == b_id).map(|p| p.term.as_str()).collect();
    // visible text plus the title attribute, in that order
    assert_eq!(b_terms, vec!["read", "more", "next", "page"]);

    // the fragment is stripped before the target is hashed
    let other_id = DocId::from_url("http://other.com/page");
    assert!(anchors.iter().any(|p| p.doc_id == other_id));
}

#[test]
fn non_basic_latin_tokens_never_surface_in_any_field() {
    let postings = extract(
        "http://example.com/latin",
        r#"<html>
            <title>naïve titles</title>
            <meta name="description" content="résumé plain">
            <body>héllo wörld visible <a href="c.html">cliché anchors</a></body>
        </html>"#,
    );
    for p in &postings {
        assert!(p.term.is_ascii(), "non-ASCII term {:?} leaked", p.term);
    }
    let all_terms: Vec<&str> = postings.iter().map(|p| p.term.as_str()).collect();
    // the surviving ASCII neighbors are still there
    assert!(all_terms.contains(&"plain"));
    assert!(all_terms.contains(&"anchor"));
    // dropped tokens do not reappear partially stemmed
    assert!(!all_terms.iter().any(|t| t.starts_with("h\u{e9}") || t.contains("llo")));
}

#[test]
fn repeated_meta_tags_are_not_deduplicated() {
    let postings = extract(
        "http://example.com/m",
        r#"<html><head>
            <meta name="keywords" content="rocket">
            <meta name="description" content="rocket">
            <meta charset="utf-8">
        </head><body></body></html>"#,
    );
    let metas = terms_of(&postings, FieldType::Meta);
    assert_eq!(metas, vec!["rocket", "rocket"]);
}

#[test]
fn fields_are_emitted_in_a_fixed_order() {
    let postings = extract(
        "http://example.com/order",
        r#"<html><title>zeta</title><meta name="k" content="eta">
           <body>body words <a href="d.html">delta</a></body></html>"#,
    );
    fn rank(f: FieldType) -> u8 {
        match f {
            FieldType::Raw => 0,
            FieldType::Url => 1,
            FieldType::Anchor => 2,
            FieldType::Meta => 3,
            FieldType::Title => 4,
        }
    }
    let ranks: Vec<u8> = postings.iter().map(|p| rank(p.field)).collect();
    let mut sorted = ranks.clone();
    sorted.sort();
    assert_eq!(ranks, sorted);
}

#[test]
fn a_shared_extractor_is_safe_across_threads() {
    let docs = [
        ("http://example.com/one", "<html><body>first page here</body></html>"),
        ("http://example.com/two", "<html><body>second page there</body></html>"),
        ("http://example.com/three", "<html><body>third page everywhere</body></html>"),
    ];
    let extractor = Extractor::default();
    let sequential: Vec<Vec<Posting>> =
        docs.iter().map(|(u, h)| extractor.extract(u, h)).collect();

    let mut parallel: Vec<Vec<Posting>> = Vec::new();
    let shared = &extractor;
    std::thread::scope(|scope| {
        let handles: Vec<_> = docs
            .iter()
            .map(|&(u, h)| scope.spawn(move || shared.extract(u, h)))
            .collect();
        for h in handles {
            parallel.push(h.join().unwrap());
        }
    });
    assert_eq!(sequential, parallel);
}
