//! Expansion of an ambiguous window into its disambiguated readings.

use std::collections::HashSet;

use morph_dict::Dictionary;
use morph_types::{AnalysisId, Side};

use crate::index::MaterializedContext;
use crate::window::WindowToken;

/// Readings of one position with duplicate normal forms removed; the first
/// reading of each form wins.
fn distinct_forms(ids: &[AnalysisId], dict: &Dictionary) -> Vec<AnalysisId> {
    let mut seen = HashSet::new();
    ids.iter()
        .copied()
        .filter(|id| seen.insert(dict.analysis(*id).normalized_form.as_str()))
        .collect()
}

/// Cartesian product of the distinct-form readings, position by position.
///
/// Unambiguous positions are appended in place without copying the partial
/// combinations. The result always holds the product of the per-position
/// distinct counts, each combination unique.
pub fn combinations(candidates: &[Vec<AnalysisId>], dict: &Dictionary) -> Vec<Vec<AnalysisId>> {
    candidates
        .iter()
        .enumerate()
        .fold(Vec::<Vec<AnalysisId>>::new(), |mut combos, (pos, ids)| {
            let readings = distinct_forms(ids, dict);
            if pos == 0 {
                return readings.into_iter().map(|id| vec![id]).collect();
            }
            if let [only] = readings.as_slice() {
                for combo in &mut combos {
                    combo.push(*only);
                }
                return combos;
            }
            let mut expanded = Vec::with_capacity(readings.len() * combos.len());
            for id in &readings {
                for combo in &combos {
                    let mut next = Vec::with_capacity(combo.len() + 1);
                    next.extend_from_slice(combo);
                    next.push(*id);
                    expanded.push(next);
                }
            }
            expanded
        })
}

/// Resolve every token of `window` (synthesizing `UNKW` readings as needed)
/// and build one context per disambiguated reading. All contexts share the
/// window's surface text.
pub fn materialize(
    side: Side,
    window: &[WindowToken],
    dict: &mut Dictionary,
) -> Vec<MaterializedContext> {
    let candidates: Vec<Vec<AnalysisId>> = window
        .iter()
        .map(|token| dict.resolve(&token.key).to_vec())
        .collect();
    let raw_text = window
        .iter()
        .map(|token| token.raw.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    combinations(&candidates, dict)
        .into_iter()
        .map(|analyses| {
            let normalized_form = analyses
                .iter()
                .map(|id| dict.analysis(*id).normalized_form.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            MaterializedContext::new(side, raw_text.clone(), normalized_form, analyses)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use morph_types::Analysis;

    fn ambiguous_dict() -> Dictionary {
        let mut dict = Dictionary::new();
        dict.insert("СТАЛИ", Analysis::new("СТАЛЬ", "NOUN"));
        dict.insert("СТАЛИ", Analysis::new("СТАТЬ", "VERB"));
        dict.insert("ПЕЧИ", Analysis::new("ПЕЧЬ", "NOUN"));
        dict.insert("ПЕЧИ", Analysis::new("ПЕЧЬ", "VERB"));
        dict.insert("ПЕЧИ", Analysis::new("ПЕЧЕНЬЕ", "NOUN"));
        dict.insert("ЛИСТ", Analysis::new("ЛИСТ", "NOUN"));
        dict
    }

    fn window(words: &[&str]) -> Vec<WindowToken> {
        words
            .iter()
            .map(|w| WindowToken::new(*w, w.to_uppercase()))
            .collect()
    }

    #[test]
    fn unambiguous_window_yields_one_context() {
        let mut dict = ambiguous_dict();
        let contexts = materialize(Side::Left, &window(&["Лист", "блог"]), &mut dict);
        assert_eq!(contexts.len(), 1);
        assert_eq!(contexts[0].raw_text, "Лист блог");
        assert_eq!(contexts[0].normalized_form, "ЛИСТ БЛОГ");
        assert_eq!(contexts[0].count, 0);
        assert_eq!(contexts[0].analyses.len(), 2);
    }

    #[test]
    fn output_size_is_product_of_distinct_forms() {
        let mut dict = ambiguous_dict();
        // distinct forms: СТАЛИ 2, ЛИСТ 1, ПЕЧИ 2 (ПЕЧЬ twice collapses), СТАЛИ 2
        let contexts = materialize(
            Side::Right,
            &window(&["стали", "лист", "печи", "стали"]),
            &mut dict,
        );
        assert_eq!(contexts.len(), 8);
        let forms: HashSet<_> = contexts.iter().map(|c| c.normalized_form.as_str()).collect();
        assert_eq!(forms.len(), 8);
        assert!(forms.contains("СТАТЬ ЛИСТ ПЕЧЕНЬЕ СТАЛЬ"));
        assert!(contexts.iter().all(|c| c.raw_text == "стали лист печи стали"));
    }

    #[test]
    fn fast_path_does_not_change_the_count() {
        let dict = ambiguous_dict();
        let pech = dict.get("ПЕЧИ").unwrap().to_vec();
        let stal = dict.get("СТАЛИ").unwrap().to_vec();
        let list = dict.get("ЛИСТ").unwrap().to_vec();
        // Same distinct sizes, ambiguous first vs. ambiguous last.
        let a = combinations(&[list.clone(), stal.clone(), pech.clone()], &dict);
        let b = combinations(&[pech, list, stal], &dict);
        assert_eq!(a.len(), 4);
        assert_eq!(b.len(), 4);
    }

    #[test]
    fn first_reading_of_a_form_wins() {
        let mut dict = ambiguous_dict();
        let contexts = materialize(Side::Left, &window(&["печи"]), &mut dict);
        let pos: Vec<_> = contexts
            .iter()
            .map(|c| dict.analysis(c.analyses[0]).part_of_speech.as_str())
            .collect();
        assert_eq!(pos, vec!["NOUN", "NOUN"]);
        assert_eq!(contexts[0].normalized_form, "ПЕЧЬ");
    }

    #[test]
    fn empty_window_has_no_contexts() {
        let dict = ambiguous_dict();
        assert!(combinations(&[], &dict).is_empty());
    }
}
