//! Duplicate ticker detection and annotation.

use std::collections::{BTreeMap, BTreeSet};

use super::{Mapping, MappingValue};

/// Symbols mapped from more than one company, with those companies in key
/// order. Null symbols are ignored.
pub fn find_duplicate_tickers(mapping: &Mapping) -> BTreeMap<String, Vec<String>> {
    let mut by_symbol: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (company, value) in mapping {
        if let Some(symbol) = value.as_ref().and_then(MappingValue::symbol) {
            by_symbol
                .entry(symbol.to_string())
                .or_default()
                .push(company.clone());
        }
    }
    by_symbol.retain(|_, companies| companies.len() > 1);
    by_symbol
}

/// Rewrite every entry as `{sym, notes}`. Companies sharing a symbol get a
/// note naming the other companies; everything else gets `notes: null`.
pub fn annotate_duplicates(
    mapping: &Mapping,
    duplicates: &BTreeMap<String, Vec<String>>,
) -> Mapping {
    mapping
        .iter()
        .map(|(company, value)| {
            let sym = value
                .as_ref()
                .and_then(MappingValue::symbol)
                .map(str::to_string);
            let notes = sym
                .as_ref()
                .and_then(|symbol| duplicates.get(symbol))
                .map(|companies| {
                    let others: Vec<&str> = companies
                        .iter()
                        .filter(|other| *other != company)
                        .map(String::as_str)
                        .collect();
                    format!("Duplicate ticker used by: {}", others.join(", "))
                });
            (company.clone(), Some(MappingValue::Annotated { sym, notes }))
        })
        .collect()
}

/// Distinct non-null symbols across both value shapes.
pub fn unique_tickers(mapping: &Mapping) -> BTreeSet<String> {
    mapping
        .values()
        .filter_map(|value| value.as_ref().and_then(MappingValue::symbol))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(entries: &[(&str, Option<&str>)]) -> Mapping {
        entries
            .iter()
            .map(|(name, symbol)| (name.to_string(), symbol.map(MappingValue::from)))
            .collect()
    }

    #[test]
    fn test_find_duplicates() {
        let mapping = mapping(&[("A", Some("TIK")), ("B", Some("TIK")), ("C", Some("OTH"))]);
        let duplicates = find_duplicate_tickers(&mapping);

        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates["TIK"], vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_null_symbols_are_not_duplicates() {
        let mut mapping = mapping(&[("A", None), ("B", None)]);
        mapping.insert(
            "C".to_string(),
            Some(MappingValue::Annotated {
                sym: None,
                notes: Some("Private".to_string()),
            }),
        );
        assert!(find_duplicate_tickers(&mapping).is_empty());
    }

    #[test]
    fn test_duplicates_across_value_shapes() {
        let mut mapping = mapping(&[("A", Some("TIK"))]);
        mapping.insert(
            "B".to_string(),
            Some(MappingValue::Annotated {
                sym: Some("TIK".to_string()),
                notes: None,
            }),
        );
        assert_eq!(find_duplicate_tickers(&mapping)["TIK"].len(), 2);
    }

    #[test]
    fn test_annotate_duplicates() {
        let mapping = mapping(&[
            ("A", Some("TIK")),
            ("B", Some("TIK")),
            ("C", Some("OTH")),
            ("D", None),
        ]);
        let annotated = annotate_duplicates(&mapping, &find_duplicate_tickers(&mapping));

        assert_eq!(
            annotated["A"],
            Some(MappingValue::Annotated {
                sym: Some("TIK".to_string()),
                notes: Some("Duplicate ticker used by: B".to_string()),
            })
        );
        assert_eq!(
            annotated["B"].as_ref().unwrap().notes(),
            Some("Duplicate ticker used by: A")
        );
        assert_eq!(
            annotated["C"],
            Some(MappingValue::Annotated {
                sym: Some("OTH".to_string()),
                notes: None,
            })
        );
        assert_eq!(
            annotated["D"],
            Some(MappingValue::Annotated {
                sym: None,
                notes: None,
            })
        );
    }

    #[test]
    fn test_note_lists_all_other_companies() {
        let mapping = mapping(&[("A", Some("X")), ("B", Some("X")), ("C", Some("X"))]);
        let annotated = annotate_duplicates(&mapping, &find_duplicate_tickers(&mapping));
        assert_eq!(
            annotated["B"].as_ref().unwrap().notes(),
            Some("Duplicate ticker used by: A, C")
        );
    }

    #[test]
    fn test_unique_tickers() {
        let mapping = mapping(&[
            ("A", Some("TIK")),
            ("B", Some("TIK")),
            ("C", Some("OTH")),
            ("D", None),
        ]);
        let tickers = unique_tickers(&mapping);
        assert_eq!(tickers.len(), 2);
        assert!(tickers.contains("TIK"));
        assert!(tickers.contains("OTH"));
    }
}
