//! Word tokenization for vocabulary lookups.
//!
//! Text is lower-cased and split with the BERT pre-tokenizer (whitespace
//! removed, punctuation isolated). Apostrophe splits are then folded back into
//! Treebank-style contractions (`i'm` → `i` `'m`, `don't` → `do` `n't`) so the
//! tokens match a vocabulary trained on word-tokenized text.

use tokenizers::pre_tokenizers::bert::BertPreTokenizer;
use tokenizers::{OffsetReferential, OffsetType, PreTokenizedString, PreTokenizer};
use tracing::warn;

const CLITIC_SUFFIXES: [&str; 6] = ["m", "s", "re", "ve", "ll", "d"];

/// Splits `text` into lower-cased word and punctuation tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut pretokenized = PreTokenizedString::from(lowered.as_str());

    let pieces: Vec<String> = match BertPreTokenizer.pre_tokenize(&mut pretokenized) {
        Ok(()) => pretokenized
            .get_splits(OffsetReferential::Original, OffsetType::Byte)
            .into_iter()
            .map(|(piece, _, _)| piece.to_string())
            .collect(),
        Err(e) => {
            warn!(error = %e, "Pre-tokenizer failed; falling back to whitespace split");
            lowered.split_whitespace().map(str::to_string).collect()
        }
    };

    merge_contractions(pieces)
}

fn is_apostrophe(piece: &str) -> bool {
    piece == "'" || piece == "\u{2019}"
}

fn is_word(piece: &str) -> bool {
    piece.chars().any(char::is_alphanumeric)
}

fn merge_contractions(pieces: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(pieces.len());
    let mut iter = pieces.into_iter().peekable();

    while let Some(piece) = iter.next() {
        let follows_word = out.last().is_some_and(|prev| is_word(prev));
        if !is_apostrophe(&piece) || !follows_word {
            out.push(piece);
            continue;
        }

        match iter.peek().map(String::as_str) {
            Some(next) if CLITIC_SUFFIXES.contains(&next) => {
                out.push(format!("'{next}"));
                iter.next();
            }
            Some("t") if out.last().is_some_and(|prev| prev.ends_with('n')) => {
                if let Some(mut prev) = out.pop() {
                    prev.pop();
                    if !prev.is_empty() {
                        out.push(prev);
                    }
                }
                out.push("n't".to_string());
                iter.next();
            }
            _ => out.push("'".to_string()),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(text: &str) -> Vec<String> {
        tokenize(text)
    }

    #[test]
    fn test_lowercases_and_splits_whitespace() {
        assert_eq!(toks("Machine  Learning\tEngineer"), vec![
            "machine", "learning", "engineer"
        ]);
    }

    #[test]
    fn test_isolates_punctuation() {
        assert_eq!(toks("Python, SQL; and Go."), vec![
            "python", ",", "sql", ";", "and", "go", "."
        ]);
    }

    #[test]
    fn test_pronoun_contraction() {
        assert_eq!(toks("I'm studying"), vec!["i", "'m", "studying"]);
        assert_eq!(toks("we've shipped"), vec!["we", "'ve", "shipped"]);
    }

    #[test]
    fn test_negative_contraction() {
        assert_eq!(toks("I don't know"), vec!["i", "do", "n't", "know"]);
        assert_eq!(toks("can't"), vec!["ca", "n't"]);
    }

    #[test]
    fn test_curly_apostrophe_is_normalised() {
        assert_eq!(toks("Python\u{2019}s toolkit"), vec!["python", "'s", "toolkit"]);
    }

    #[test]
    fn test_leading_quote_is_kept() {
        assert_eq!(toks("'quoted"), vec!["'", "quoted"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(toks("").is_empty());
        assert!(toks("   \n ").is_empty());
    }
}
