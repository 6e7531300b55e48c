//! Frequency tables of materialized contexts, one per side, and their ranking.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use morph_types::{AnalysisId, Side};

/// One disambiguated context and how often its normal form was seen.
///
/// `raw_text` is the surface text of the first occurrence recorded; later
/// occurrences only bump `count`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MaterializedContext {
    pub side: Side,
    pub raw_text: String,
    pub normalized_form: String,
    pub analyses: Vec<AnalysisId>,
    pub count: u64,
}

impl MaterializedContext {
    /// A fresh context with `count == 0`; recording it sets the count.
    pub fn new(
        side: Side,
        raw_text: impl Into<String>,
        normalized_form: impl Into<String>,
        analyses: Vec<AnalysisId>,
    ) -> Self {
        Self {
            side,
            raw_text: raw_text.into(),
            normalized_form: normalized_form.into(),
            analyses,
            count: 0,
        }
    }
}

/// Left and right tables keyed by normal form.
#[derive(Clone, Debug, Default)]
pub struct ConcordanceIndex {
    left: HashMap<String, MaterializedContext>,
    right: HashMap<String, MaterializedContext>,
}

impl ConcordanceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert on first sight, then count the occurrence.
    pub fn record(&mut self, context: MaterializedContext) {
        let table = self.table_mut(context.side);
        table
            .entry(context.normalized_form.clone())
            .or_insert(context)
            .count += 1;
    }

    pub fn record_all(&mut self, contexts: impl IntoIterator<Item = MaterializedContext>) {
        for context in contexts {
            self.record(context);
        }
    }

    /// Fold another index into this one, summing counts. Entries already
    /// present keep their surface text.
    pub fn merge(&mut self, other: ConcordanceIndex) {
        for (side, table) in [(Side::Left, other.left), (Side::Right, other.right)] {
            let target = self.table_mut(side);
            for (form, context) in table {
                match target.entry(form) {
                    Entry::Occupied(mut existing) => existing.get_mut().count += context.count,
                    Entry::Vacant(slot) => {
                        slot.insert(context);
                    }
                }
            }
        }
    }

    pub fn get(&self, side: Side, normalized_form: &str) -> Option<&MaterializedContext> {
        self.table(side).get(normalized_form)
    }

    pub fn len(&self, side: Side) -> usize {
        self.table(side).len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }

    pub fn ranked(&self) -> RankedConcordance {
        self.clone().into_ranked()
    }

    pub fn into_ranked(self) -> RankedConcordance {
        RankedConcordance {
            left: rank(self.left),
            right: rank(self.right),
        }
    }

    fn table(&self, side: Side) -> &HashMap<String, MaterializedContext> {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn table_mut(&mut self, side: Side) -> &mut HashMap<String, MaterializedContext> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// Both tables sorted by descending count, ties broken by normal form and
/// then surface text.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RankedConcordance {
    pub left: Vec<MaterializedContext>,
    pub right: Vec<MaterializedContext>,
}

impl RankedConcordance {
    pub fn side(&self, side: Side) -> &[MaterializedContext] {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Entries frequent enough for interactive display.
    pub fn visible(
        &self,
        side: Side,
        threshold: u32,
    ) -> impl Iterator<Item = &MaterializedContext> + '_ {
        self.side(side)
            .iter()
            .filter(move |context| context.count >= u64::from(threshold))
    }
}

fn rank(table: HashMap<String, MaterializedContext>) -> Vec<MaterializedContext> {
    let mut contexts: Vec<_> = table.into_values().collect();
    contexts.sort_by(compare_ranked);
    contexts
}

fn compare_ranked(a: &MaterializedContext, b: &MaterializedContext) -> Ordering {
    b.count
        .cmp(&a.count)
        .then_with(|| a.normalized_form.cmp(&b.normalized_form))
        .then_with(|| a.raw_text.cmp(&b.raw_text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(side: Side, raw: &str, form: &str) -> MaterializedContext {
        MaterializedContext::new(side, raw, form, Vec::new())
    }

    #[test]
    fn first_raw_text_is_kept() {
        let mut index = ConcordanceIndex::new();
        index.record(ctx(Side::Left, "Хорошая разработка", "ХОРОШИЙ РАЗРАБОТКА"));
        index.record(ctx(Side::Left, "хорошей разработки", "ХОРОШИЙ РАЗРАБОТКА"));
        let entry = index.get(Side::Left, "ХОРОШИЙ РАЗРАБОТКА").unwrap();
        assert_eq!(entry.count, 2);
        assert_eq!(entry.raw_text, "Хорошая разработка");
        assert_eq!(index.len(Side::Right), 0);
    }

    #[test]
    fn merge_sums_counts_and_keeps_existing_text() {
        let mut a = ConcordanceIndex::new();
        a.record(ctx(Side::Right, "one", "X"));
        let mut b = ConcordanceIndex::new();
        b.record(ctx(Side::Right, "two", "X"));
        b.record(ctx(Side::Right, "two", "X"));
        b.record(ctx(Side::Left, "three", "Y"));
        a.merge(b);
        let x = a.get(Side::Right, "X").unwrap();
        assert_eq!((x.count, x.raw_text.as_str()), (3, "one"));
        assert_eq!(a.get(Side::Left, "Y").map(|c| c.count), Some(1));
    }

    #[test]
    fn ranks_by_count_then_form() {
        let mut index = ConcordanceIndex::new();
        for form in ["B", "A", "C", "C", "B", "C"] {
            index.record(ctx(Side::Left, form, form));
        }
        let ranked = index.into_ranked();
        let order: Vec<_> = ranked
            .left
            .iter()
            .map(|c| (c.normalized_form.as_str(), c.count))
            .collect();
        assert_eq!(order, vec![("C", 3), ("B", 2), ("A", 1)]);

        let mut ties = ConcordanceIndex::new();
        for form in ["Z", "M", "A"] {
            ties.record(ctx(Side::Right, form, form));
        }
        let forms: Vec<_> = ties
            .ranked()
            .right
            .iter()
            .map(|c| c.normalized_form.clone())
            .collect();
        assert_eq!(forms, vec!["A", "M", "Z"]);
    }

    #[test]
    fn threshold_filters_display_only() {
        let mut index = ConcordanceIndex::new();
        for form in ["A", "A", "B"] {
            index.record(ctx(Side::Left, form, form));
        }
        let ranked = index.into_ranked();
        assert_eq!(ranked.visible(Side::Left, 2).count(), 1);
        assert_eq!(ranked.visible(Side::Left, 1).count(), 2);
        assert_eq!(ranked.side(Side::Left).len(), 2);
    }
}
