use std::path::Path;

use rand::Rng;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::{
    config::{DATA_PATH, RANDOM_RELEVANCE},
    dataset::{self, Dataset, load_dataset},
    error::{LoadError, SearchError},
    record::{RecordView, as_number},
};

/// One entry of a search response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredResult {
    pub number: i64,
    /// Number of query words found in the record.
    pub score: usize,
    /// `score` divided by the number of query words.
    pub relevance: f64,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_random: bool,
}

impl ScoredResult {
    fn random(number: i64) -> Self {
        Self {
            number,
            score: 0,
            relevance: RANDOM_RELEVANCE,
            is_random: true,
        }
    }
}

/// Run a keyword search using the thread-local random source for the
/// fallback sample.
///
/// When `data` is `None` (or an empty record list) the dataset is loaded
/// from [`DATA_PATH`]. A load error, whether passed in or produced here,
/// is returned unchanged.
pub fn search(
    query: &str,
    limit: usize,
    data: Option<Result<Dataset, LoadError>>,
) -> Result<Vec<ScoredResult>, SearchError> {
    search_with_rng(query, limit, data, &mut rand::thread_rng())
}

/// Same as [`search`] with an explicit random source.
///
/// 1. Score every record by how many query words occur in its text
/// 2. Keep records with a positive score, highest first (ties keep
///    dataset order)
/// 3. Truncate to `limit`
/// 4. If nothing is left, return a random sample of the dataset instead
pub fn search_with_rng<R: Rng + ?Sized>(
    query: &str,
    limit: usize,
    data: Option<Result<Dataset, LoadError>>,
    rng: &mut R,
) -> Result<Vec<ScoredResult>, SearchError> {
    let dataset = match data {
        Some(Err(err)) => return Err(err.into()),
        Some(Ok(dataset)) if !is_blank(&dataset) => dataset,
        _ => load_dataset(Path::new(DATA_PATH))?,
    };

    let records: &[Value] = match &dataset {
        Dataset::Records(records) => records,
        Dataset::Opaque(Value::Object(map)) if map.contains_key("error") => {
            return Err(SearchError::Payload(dataset.to_json()));
        }
        // Neither yields record objects; the fallback still samples them.
        Dataset::Opaque(Value::Object(_) | Value::String(_)) => &[],
        Dataset::Opaque(other) => {
            let err = SearchError::Failed(format!(
                "cannot iterate over a {} dataset",
                dataset::json_kind(other)
            ));
            error!("Error in search: {err}");
            return Err(err);
        }
    };

    let query = query.to_lowercase();
    let words: Vec<&str> = query.split_whitespace().collect();
    debug!(words = words.len(), records = records.len(), "scoring");

    let mut results = score_records(records, &words);
    info!("{} record(s) matched", results.len());
    results.truncate(limit);

    if results.is_empty() {
        return Ok(random_sample(&dataset, limit, rng).unwrap_or_else(|e| {
            warn!("Error generating random results: {e}");
            Vec::new()
        }));
    }

    Ok(results)
}

fn is_blank(dataset: &Dataset) -> bool {
    matches!(dataset, Dataset::Records(records) if records.is_empty())
}

/// Score each object record against `words`, dropping zero scores.
///
/// The returned list is sorted by score, descending, with ties kept in
/// dataset order.
fn score_records(records: &[Value], words: &[&str]) -> Vec<ScoredResult> {
    let mut scored: Vec<ScoredResult> = records
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|record| {
            let view = RecordView::new(record);
            let blob = view.search_blob();
            let score = words.iter().filter(|w| blob.contains(**w)).count();

            (score > 0).then(|| ScoredResult {
                number: view.number(),
                score,
                relevance: score as f64 / words.len() as f64,
                is_random: false,
            })
        })
        .collect();

    // `sort_by` is stable.
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

/// Draw `min(limit, len)` distinct positions uniformly from the whole
/// dataset.
///
/// A string dataset is sampled by character and every pick is numbered by
/// its position. An empty object has nothing to draw; any other opaque
/// value cannot be indexed and fails.
fn random_sample<R: Rng + ?Sized>(
    dataset: &Dataset,
    limit: usize,
    rng: &mut R,
) -> Result<Vec<ScoredResult>, String> {
    let len = match dataset {
        Dataset::Records(records) => records.len(),
        Dataset::Opaque(Value::String(text)) => text.chars().count(),
        Dataset::Opaque(Value::Object(map)) if map.is_empty() => 0,
        Dataset::Opaque(other) => {
            return Err(format!(
                "cannot index a {} dataset",
                dataset::json_kind(other)
            ));
        }
    };

    let amount = limit.min(len);
    rand::seq::index::sample(rng, len, amount)
        .into_iter()
        .map(|idx| {
            let number = match dataset {
                Dataset::Records(records) => sampled_number(&records[idx], idx)?,
                Dataset::Opaque(_) => idx as i64 + 1,
            };
            Ok(ScoredResult::random(number))
        })
        .collect()
}

/// Identifier of a sampled element: `ID`, then `number`, then its
/// one-based position.
///
/// Strings and arrays have no fields and take their position, unless they
/// contain an identifier key, which would have to be looked up by name.
/// Scalars cannot be searched for a key at all.
fn sampled_number(element: &Value, idx: usize) -> Result<i64, String> {
    let position = idx as i64 + 1;
    match element {
        Value::Object(record) => Ok(record
            .get("ID")
            .or_else(|| record.get("number"))
            .and_then(as_number)
            .unwrap_or(position)),
        Value::String(text)
            if IDENTIFIER_KEYS.iter().any(|key| text.contains(key)) =>
        {
            Err(format!("record {idx} is a string naming an identifier key"))
        }
        Value::Array(items)
            if items.iter().any(|item| IDENTIFIER_KEYS.iter().any(|key| item == key)) =>
        {
            Err(format!("record {idx} is an array holding an identifier key"))
        }
        Value::String(_) | Value::Array(_) => Ok(position),
        other => Err(format!(
            "record {idx} is a {}",
            dataset::json_kind(other)
        )),
    }
}

const IDENTIFIER_KEYS: [&str; 2] = ["ID", "number"];
