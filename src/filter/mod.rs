//! The shared filter predicate engine.
//!
//! Job search and interview-prep browsing both filter collections with the
//! same four criterion kinds; this module is the single implementation both
//! services call, parameterized by each entity's field lookup (`Filterable`).
//! Criteria combine with AND semantics, inactive criteria are ignored, and
//! the input order of the collection is preserved.

use rust_decimal::Decimal;

/// A typed view of one entity field, as exposed to the engine.
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    /// Free text, matched by substring criteria.
    Text(&'a str),
    /// A list of text entries; substring criteria match any element.
    TextList(&'a [String]),
    /// A categorical value, matched exactly (case-sensitive).
    Keyword(&'a str),
    /// A numeric range; `None` bounds mean 0 / unbounded, both `None` means
    /// the entity carries no data for this field.
    Range {
        min: Option<Decimal>,
        max: Option<Decimal>,
    },
}

/// Field lookup for an entity kind. Returning `None` marks the field as
/// unrecognized, which makes any criterion naming it a no-op (lenient
/// toleration of schema drift).
pub trait Filterable {
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

/// One independent filter condition.
#[derive(Debug, Clone)]
pub enum Criterion {
    /// Case-insensitive substring containment; matches when the term occurs
    /// in any of the designated fields.
    Substring { fields: Vec<String>, term: String },
    /// Case-sensitive membership of the field value in the candidate set.
    OneOf { field: String, values: Vec<String> },
    /// The entity's own range must overlap the filter range; touching
    /// boundaries count as overlap.
    Overlaps {
        field: String,
        min: Decimal,
        max: Decimal,
    },
    /// Case-sensitive equality, with `"all"`/empty as the inactive sentinel.
    Equals { field: String, value: String },
}

impl Criterion {
    pub fn substring(fields: &[&str], term: &str) -> Self {
        Self::Substring {
            fields: fields.iter().map(|f| f.to_string()).collect(),
            term: term.to_string(),
        }
    }

    pub fn one_of(field: &str, values: Vec<String>) -> Self {
        Self::OneOf {
            field: field.to_string(),
            values,
        }
    }

    pub fn overlaps(field: &str, min: Decimal, max: Decimal) -> Self {
        Self::Overlaps {
            field: field.to_string(),
            min,
            max,
        }
    }

    pub fn equals(field: &str, value: &str) -> Self {
        Self::Equals {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    /// Unset or sentinel-valued criteria are ignored, never "match nothing".
    pub fn is_active(&self) -> bool {
        match self {
            Criterion::Substring { term, .. } => !term.trim().is_empty(),
            Criterion::OneOf { values, .. } => !values.is_empty(),
            Criterion::Overlaps { .. } => true,
            Criterion::Equals { value, .. } => !value.is_empty() && value != "all",
        }
    }

    pub fn matches<T: Filterable>(&self, entity: &T) -> bool {
        if !self.is_active() {
            return true;
        }
        match self {
            Criterion::Substring { fields, term } => {
                let known: Vec<FieldValue> =
                    fields.iter().filter_map(|f| entity.field(f)).collect();
                if known.is_empty() {
                    return true;
                }
                let term = term.to_lowercase();
                known.iter().any(|value| contains_term(value, &term))
            }
            Criterion::OneOf { field, values } => match entity.field(field) {
                Some(FieldValue::Keyword(s)) | Some(FieldValue::Text(s)) => {
                    values.iter().any(|v| v == s)
                }
                Some(FieldValue::TextList(items)) => {
                    items.iter().any(|item| values.contains(item))
                }
                _ => true,
            },
            Criterion::Overlaps { field, min, max } => match entity.field(field) {
                Some(FieldValue::Range {
                    min: entity_min,
                    max: entity_max,
                }) => {
                    if entity_min.is_none() && entity_max.is_none() {
                        return false;
                    }
                    let lower = entity_min.unwrap_or(Decimal::ZERO);
                    let upper = entity_max.unwrap_or(Decimal::MAX);
                    upper >= *min && lower <= *max
                }
                _ => true,
            },
            Criterion::Equals { field, value } => match entity.field(field) {
                Some(FieldValue::Keyword(s)) | Some(FieldValue::Text(s)) => s == value,
                _ => true,
            },
        }
    }
}

fn contains_term(value: &FieldValue, lowered_term: &str) -> bool {
    match value {
        FieldValue::Text(s) | FieldValue::Keyword(s) => {
            s.to_lowercase().contains(lowered_term)
        }
        FieldValue::TextList(items) => items
            .iter()
            .any(|item| item.to_lowercase().contains(lowered_term)),
        FieldValue::Range { .. } => false,
    }
}

/// Returns the subsequence of `items` satisfying every active criterion,
/// in the original relative order.
pub fn apply<T: Filterable + Clone>(items: &[T], criteria: &[Criterion]) -> Vec<T> {
    items
        .iter()
        .filter(|item| criteria.iter().all(|c| c.matches(*item)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Listing {
        title: String,
        industry: String,
        tags: Vec<String>,
        salary_min: Option<Decimal>,
        salary_max: Option<Decimal>,
    }

    impl Listing {
        fn new(title: &str, industry: &str, salary: Option<(i64, i64)>) -> Self {
            Self {
                title: title.to_string(),
                industry: industry.to_string(),
                tags: vec![],
                salary_min: salary.map(|(min, _)| Decimal::from(min)),
                salary_max: salary.map(|(_, max)| Decimal::from(max)),
            }
        }
    }

    impl Filterable for Listing {
        fn field(&self, name: &str) -> Option<FieldValue<'_>> {
            match name {
                "title" => Some(FieldValue::Text(&self.title)),
                "industry" => Some(FieldValue::Keyword(&self.industry)),
                "tags" => Some(FieldValue::TextList(&self.tags)),
                "salary" => Some(FieldValue::Range {
                    min: self.salary_min,
                    max: self.salary_max,
                }),
                _ => None,
            }
        }
    }

    fn sample() -> Vec<Listing> {
        vec![
            Listing::new("Senior Engineer", "Technology", Some((50000, 70000))),
            Listing::new("Accountant", "Finance", Some((60000, 80000))),
            Listing::new("Engineering Manager", "Technology", None),
        ]
    }

    #[test]
    fn empty_criteria_set_is_identity() {
        let items = sample();
        assert_eq!(apply(&items, &[]), items);
    }

    #[test]
    fn substring_is_case_insensitive() {
        let items = sample();
        for term in ["engineer", "ENGINEER"] {
            let out = apply(&items, &[Criterion::substring(&["title"], term)]);
            assert_eq!(out.len(), 2);
            assert_eq!(out[0].title, "Senior Engineer");
        }
    }

    #[test]
    fn substring_matches_any_designated_field() {
        let mut items = sample();
        items[1].tags = vec!["engineering".to_string()];
        let out = apply(&items, &[Criterion::substring(&["title", "tags"], "engineer")]);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn set_membership_preserves_original_order() {
        let items = sample();
        let out = apply(
            &items,
            &[Criterion::one_of("industry", vec!["Technology".to_string()])],
        );
        let titles: Vec<&str> = out.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["Senior Engineer", "Engineering Manager"]);
    }

    #[test]
    fn empty_candidate_set_is_inactive() {
        let items = sample();
        assert_eq!(apply(&items, &[Criterion::one_of("industry", vec![])]), items);
    }

    #[test]
    fn criteria_combine_with_and_semantics() {
        let items = sample();
        let c1 = Criterion::substring(&["title"], "engineer");
        let c2 = Criterion::one_of("industry", vec!["Technology".to_string()]);

        let combined = apply(&items, &[c1.clone(), c2.clone()]);
        let sequential = apply(&apply(&items, &[c1]), &[c2]);
        assert_eq!(combined, sequential);
        assert_eq!(combined.len(), 2);
    }

    #[test]
    fn range_overlap_counts_touching_boundaries() {
        let items = vec![Listing::new("Dev", "Technology", Some((50000, 70000)))];
        let hit = Criterion::overlaps("salary", Decimal::from(70000), Decimal::from(90000));
        assert_eq!(apply(&items, &[hit]).len(), 1);

        let miss = Criterion::overlaps("salary", Decimal::from(90001), Decimal::from(120000));
        assert!(apply(&items, &[miss]).is_empty());
    }

    #[test]
    fn entity_without_salary_data_fails_active_range() {
        let items = sample();
        let out = apply(
            &items,
            &[Criterion::overlaps("salary", Decimal::ZERO, Decimal::from(200000))],
        );
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|l| l.salary_min.is_some()));
    }

    #[test]
    fn exact_value_sentinel_all_is_inactive() {
        let items = sample();
        assert_eq!(apply(&items, &[Criterion::equals("industry", "all")]), items);
        let out = apply(&items, &[Criterion::equals("industry", "Finance")]);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn unrecognized_field_is_ignored() {
        let items = sample();
        let out = apply(
            &items,
            &[
                Criterion::substring(&["remote_policy"], "hybrid"),
                Criterion::equals("seniority", "staff"),
            ],
        );
        assert_eq!(out, items);
    }
}
