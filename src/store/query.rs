use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Record;

/// Predicate operators understood by the record store's query layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Case-insensitive substring match against a text field.
    Contains,
    /// Case-sensitive membership in the supplied candidate values.
    ExactMatch,
    /// Strict equality against a single value.
    EqualTo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub operator: Operator,
    pub values: Vec<Value>,
}

impl Condition {
    pub fn contains(field: &str, value: &str) -> Self {
        Self {
            field: field.to_string(),
            operator: Operator::Contains,
            values: vec![Value::String(value.to_string())],
        }
    }

    pub fn exact_match(field: &str, values: Vec<String>) -> Self {
        Self {
            field: field.to_string(),
            operator: Operator::ExactMatch,
            values: values.into_iter().map(Value::String).collect(),
        }
    }

    pub fn equal_to(field: &str, value: Value) -> Self {
        Self {
            field: field.to_string(),
            operator: Operator::EqualTo,
            values: vec![value],
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        let Some(actual) = record.fields.get(&self.field) else {
            return false;
        };
        match self.operator {
            Operator::Contains => {
                let Some(needle) = self.values.first().and_then(Value::as_str) else {
                    return false;
                };
                value_contains(actual, needle)
            }
            Operator::ExactMatch => {
                let Some(actual) = actual.as_str() else {
                    return false;
                };
                self.values.iter().filter_map(Value::as_str).any(|v| v == actual)
            }
            Operator::EqualTo => self.values.first().is_some_and(|v| values_equal(actual, v)),
        }
    }
}

/// OR-combined sub-conditions; a record matches the group when any member
/// condition matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionGroup {
    pub conditions: Vec<Condition>,
}

impl ConditionGroup {
    pub fn any_contains(fields: &[&str], value: &str) -> Self {
        Self {
            conditions: fields
                .iter()
                .map(|f| Condition::contains(f, value))
                .collect(),
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.conditions.iter().any(|c| c.matches(record))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBy {
    pub field: String,
    pub descending: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Paging {
    pub limit: usize,
    pub offset: usize,
}

/// Query parameters accepted by `RecordStore::fetch`: field selection,
/// AND-combined conditions, OR-grouped sub-conditions, one sort key and
/// limit/offset pagination.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryParams {
    pub fields: Vec<String>,
    pub conditions: Vec<Condition>,
    pub groups: Vec<ConditionGroup>,
    pub order_by: Option<OrderBy>,
    pub paging: Option<Paging>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, fields: &[&str]) -> Self {
        self.fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn group(mut self, group: ConditionGroup) -> Self {
        self.groups.push(group);
        self
    }

    pub fn order_by(mut self, field: &str, descending: bool) -> Self {
        self.order_by = Some(OrderBy {
            field: field.to_string(),
            descending,
        });
        self
    }

    pub fn paging(mut self, limit: usize, offset: usize) -> Self {
        self.paging = Some(Paging { limit, offset });
        self
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.conditions.iter().all(|c| c.matches(record))
            && self.groups.iter().all(|g| g.matches(record))
    }

    /// Applies the query against an already-materialized collection, the way
    /// the fallback store evaluates it.
    pub fn apply(&self, records: &[Record]) -> Vec<Record> {
        let mut out: Vec<Record> = records.iter().filter(|r| self.matches(r)).cloned().collect();

        if let Some(order) = &self.order_by {
            out.sort_by(|a, b| {
                let ord = compare_fields(a, b, &order.field);
                if order.descending {
                    ord.reverse()
                } else {
                    ord
                }
            });
        }

        if let Some(paging) = self.paging {
            out = out
                .into_iter()
                .skip(paging.offset)
                .take(paging.limit)
                .collect();
        }

        out
    }
}

fn value_contains(actual: &Value, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    match actual {
        Value::String(s) => s.to_lowercase().contains(&needle),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .any(|s| s.to_lowercase().contains(&needle)),
        _ => false,
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

fn compare_fields(a: &Record, b: &Record, field: &str) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    let left = a.fields.get(field);
    let right = b.fields.get(field);
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => compare_values(x, y),
    }
}

fn compare_values(a: &Value, b: &Value) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (Value::Number(_), Value::Number(_)) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: i64, pairs: &[(&str, Value)]) -> Record {
        let mut r = Record::new(id);
        for (k, v) in pairs {
            r.set(k, v.clone());
        }
        r
    }

    #[test]
    fn contains_is_case_insensitive() {
        let r = record(1, &[("title", json!("Senior Engineer"))]);
        assert!(Condition::contains("title", "engineer").matches(&r));
        assert!(Condition::contains("title", "ENGINEER").matches(&r));
        assert!(!Condition::contains("title", "manager").matches(&r));
    }

    #[test]
    fn exact_match_is_case_sensitive_membership() {
        let r = record(1, &[("industry", json!("Technology"))]);
        let cond = Condition::exact_match("industry", vec!["Technology".into(), "Finance".into()]);
        assert!(cond.matches(&r));
        let lower = Condition::exact_match("industry", vec!["technology".into()]);
        assert!(!lower.matches(&r));
    }

    #[test]
    fn group_is_or_across_fields() {
        let r = record(1, &[("title", json!("Backend dev")), ("company", json!("Acme"))]);
        let group = ConditionGroup::any_contains(&["title", "company", "description"], "acme");
        assert!(group.matches(&r));
    }

    #[test]
    fn missing_field_never_matches_store_conditions() {
        let r = record(1, &[]);
        assert!(!Condition::contains("title", "x").matches(&r));
        assert!(!Condition::equal_to("job_id", json!(3)).matches(&r));
    }

    #[test]
    fn apply_sorts_and_paginates() {
        let rows = vec![
            record(1, &[("posted_date", json!("2024-01-01T00:00:00Z"))]),
            record(2, &[("posted_date", json!("2024-03-01T00:00:00Z"))]),
            record(3, &[("posted_date", json!("2024-02-01T00:00:00Z"))]),
        ];
        let params = QueryParams::new().order_by("posted_date", true).paging(2, 0);
        let out = params.apply(&rows);
        let ids: Vec<i64> = out.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }
}
