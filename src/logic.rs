//! Consumer-facing layer - query batches and outcome rendering

use crate::model::{ErrorKind, Outcome, TranslationRecord};
use crate::network::{PendingOutcome, RequestDispatcher};
use futures::future::join_all;

/// Separator used when showing several translations on one line
pub const TEXT_SEPARATOR: &str = ", ";

/// One word to look up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationQuery {
    pub word: String,
    pub source_lang: String,
    pub target_lang: String,
}

impl TranslationQuery {
    pub fn new(word: impl Into<String>, source_lang: impl Into<String>, target_lang: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
        }
    }
}

/// Dispatch every query before awaiting any, then pair outcomes back with
/// the query that produced them.
pub async fn translate_all(
    dispatcher: &RequestDispatcher,
    queries: Vec<TranslationQuery>,
) -> Vec<(TranslationQuery, Outcome)> {
    let pending: Vec<PendingOutcome> = queries
        .iter()
        .map(|q| dispatcher.dispatch(&q.word, &q.source_lang, &q.target_lang))
        .collect();

    let outcomes = join_all(pending.into_iter().map(PendingOutcome::recv)).await;
    queries.into_iter().zip(outcomes).collect()
}

/// Texts joined by `separator`, no trailing separator.
pub fn join_texts(records: &[TranslationRecord], separator: &str) -> String {
    records
        .iter()
        .map(|r| r.text.as_str())
        .collect::<Vec<_>>()
        .join(separator)
}

/// One display line per query
pub fn format_outcome(query: &TranslationQuery, outcome: &Outcome) -> String {
    let head = format!("{} ({} → {})", query.word, query.source_lang, query.target_lang);
    match outcome {
        Outcome::Success(records) if records.is_empty() => format!("{head}: no translations found"),
        Outcome::Success(records) => format!("{head}: {}", join_texts(records, TEXT_SEPARATOR)),
        Outcome::Failure(detail) => match detail.kind {
            ErrorKind::ParseError => format!("{head}: JSON conversion error: {}", detail.message),
            ErrorKind::TransportError => format!("{head}: Request error: {}", detail.message),
        },
    }
}

/// Build summary line
pub fn build_summary(results: &[(TranslationQuery, Outcome)]) -> String {
    let ok = results.iter().filter(|(_, o)| o.is_success()).count();
    format!("{} translated | {} failed", ok, results.len() - ok)
}
