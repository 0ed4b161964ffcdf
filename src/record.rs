use serde_json::{Map, Value};

/// Legacy column names and the canonical field each one maps to.
pub const FIELD_MAPPING: &[(&str, &str)] = &[
    ("ID", "number"),
    ("Kural", "tamil"),
    ("Couplet", "english"),
    ("Vilakam", "tamil_explanation"),
    ("M_Varadharajanar", "english_explanation"),
    ("Adhigaram_ID", "chapter"),
    ("Adhigaram", "chapter_name"),
    ("Paal", "section_name"),
];

/// Fields concatenated into the search blob, in order.
pub const SEARCH_FIELDS: &[&str] = &[
    "tamil",
    "english",
    "tamil_explanation",
    "english_explanation",
    "Kural",
    "Couplet",
    "Vilakam",
    "M_Varadharajanar",
    "combined_text_tamil",
    "combined_text_english",
    "Parimezhalagar_Urai",
    "Kalaingar_Urai",
    "Solomon_Pappaiya",
];

/// A record together with its canonical view.
///
/// The canonical view holds only fields derived through [`FIELD_MAPPING`];
/// the raw record is left as it was.
#[derive(Debug)]
pub struct RecordView<'a> {
    raw: &'a Map<String, Value>,
    mapped: Vec<(&'static str, &'a Value)>,
}

impl<'a> RecordView<'a> {
    pub fn new(raw: &'a Map<String, Value>) -> Self {
        let mapped = FIELD_MAPPING
            .iter()
            .filter_map(|(legacy, canonical)| {
                raw.get(*legacy).map(|value| (*canonical, value))
            })
            .collect();
        Self { raw, mapped }
    }

    /// Look up `field` in the canonical view, then in the raw record.
    pub fn get(&self, field: &str) -> Option<&'a Value> {
        self.mapped
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| *value)
            .or_else(|| self.raw.get(field))
    }

    /// Lowercased text of every searchable field, joined by spaces.
    pub fn search_blob(&self) -> String {
        SEARCH_FIELDS
            .iter()
            .filter_map(|field| self.get(field))
            .filter_map(value_text)
            .map(|text| text.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The couplet number: the mapped `number` (from `ID`), then the raw
    /// `ID`, then 0. A record carrying only a canonical `number` gets 0.
    pub fn number(&self) -> i64 {
        self.mapped
            .iter()
            .find(|(name, _)| *name == "number")
            .map(|(_, value)| *value)
            .or_else(|| self.raw.get("ID"))
            .and_then(as_number)
            .unwrap_or(0)
    }
}

/// String form of a field value. Nulls have none.
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Interpret an identifier value as a plain integer.
pub fn as_number(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.is_finite())
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn legacy_fields_resolve_to_canonical() {
        let raw = object(json!({
            "ID": 12,
            "Kural": "Aram",
            "Paal": "Virtue"
        }));
        let view = RecordView::new(&raw);

        assert_eq!(view.get("tamil"), Some(&json!("Aram")));
        assert_eq!(view.get("section_name"), Some(&json!("Virtue")));
        // Originals stay reachable.
        assert_eq!(view.get("Kural"), Some(&json!("Aram")));
        assert_eq!(view.number(), 12);
    }

    #[test]
    fn mapped_view_wins_over_raw_canonical() {
        let raw = object(json!({
            "Couplet": "from legacy",
            "english": "from canonical"
        }));
        let view = RecordView::new(&raw);
        assert_eq!(view.get("english"), Some(&json!("from legacy")));
    }

    #[test]
    fn blob_follows_field_order_and_skips_nulls() {
        let raw = object(json!({
            "Solomon_Pappaiya": "Last",
            "english": "First",
            "tamil_explanation": null,
            "combined_text_tamil": 42
        }));
        let view = RecordView::new(&raw);
        assert_eq!(view.search_blob(), "first 42 last");
    }

    #[test]
    fn legacy_text_appears_under_both_names() {
        let raw = object(json!({ "Kural": "Aram" }));
        let view = RecordView::new(&raw);
        assert_eq!(view.search_blob(), "aram aram");
    }

    #[test]
    fn number_comes_from_id_or_zero() {
        let legacy = object(json!({ "ID": "7" }));
        assert_eq!(RecordView::new(&legacy).number(), 7);

        let canonical_only = object(json!({ "number": 7 }));
        assert_eq!(RecordView::new(&canonical_only).number(), 0);

        let float = object(json!({ "ID": 3.0 }));
        assert_eq!(RecordView::new(&float).number(), 3);

        let none = object(json!({ "english": "text" }));
        assert_eq!(RecordView::new(&none).number(), 0);
    }

    #[test]
    fn non_integral_numbers_are_rejected() {
        assert_eq!(as_number(&json!(1.5)), None);
        assert_eq!(as_number(&json!(true)), None);
        assert_eq!(as_number(&json!(" 9 ")), Some(9));
    }
}
