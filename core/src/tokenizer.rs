use lazy_static::lazy_static;
use rust_stemmers::{Algorithm, Stemmer};

/// Characters that separate tokens: whitespace plus the punctuation set
/// shared by every extraction field.
pub const DELIMITERS: &str = " \t\n\r\"'-_/.,:;|{}[]!@#%^&*()<>=+`~?";

lazy_static! {
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
}

fn is_delimiter(c: char) -> bool {
    DELIMITERS.contains(c)
}

/// Split `text` on the fixed delimiter set and stem each token.
///
/// Tokens containing any character outside Basic Latin are dropped whole
/// (never partially stemmed), as are tokens that stem to nothing. Input is
/// not lowercased here; callers that need case folding do it first.
pub fn stem_tokens(text: &str) -> Vec<String> {
    text.split(is_delimiter)
        .filter(|t| !t.is_empty() && t.is_ascii())
        .map(|t| STEMMER.stem(t).to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
