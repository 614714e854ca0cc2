use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::store::Record;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertFrequency {
    #[default]
    Daily,
    Weekly,
}

impl AlertFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertFrequency::Daily => "daily",
            AlertFrequency::Weekly => "weekly",
        }
    }
}

impl FromStr for AlertFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(AlertFrequency::Daily),
            "weekly" => Ok(AlertFrequency::Weekly),
            other => Err(format!("Unknown alert frequency: {}", other)),
        }
    }
}

impl fmt::Display for AlertFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored salary band plus the display label derived from it. The label is
/// never persisted; it is recomputed on every normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalaryBand {
    pub min: Decimal,
    pub max: Decimal,
    pub label: String,
}

impl SalaryBand {
    pub fn new(min: Decimal, max: Decimal) -> Self {
        let label = if min > Decimal::ZERO && max > Decimal::ZERO {
            format!("${} - ${}", thousands(min), thousands(max))
        } else {
            String::new()
        };
        Self { min, max, label }
    }
}

fn thousands(value: Decimal) -> String {
    let raw = value.trunc().to_string();
    let (sign, digits) = raw.strip_prefix('-').map_or(("", raw.as_str()), |d| ("-", d));
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    format!("{}{}", sign, out)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertFilters {
    pub job_title: String,
    pub location: String,
    pub industries: Vec<String>,
    pub salary_range: SalaryBand,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: i64,
    pub name: String,
    pub filters: AlertFilters,
    pub frequency: AlertFrequency,
    pub is_active: bool,
}

impl Alert {
    pub fn from_record(record: &Record) -> Self {
        let f = &record.fields;
        Self {
            id: record.id,
            name: super::text(f.get("name")),
            filters: AlertFilters {
                job_title: super::text(f.get("job_title")),
                location: super::text(f.get("location")),
                industries: super::split_list(f.get("industries"), ','),
                salary_range: SalaryBand::new(
                    super::decimal(f.get("salary_range_min")),
                    super::decimal(f.get("salary_range_max")),
                ),
            },
            frequency: f
                .get("frequency")
                .and_then(Value::as_str)
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            is_active: super::boolean(f.get("is_active")),
        }
    }

    pub fn to_record(&self) -> Record {
        let mut record = Record::new(self.id);
        record.set("name", Value::String(self.name.clone()));
        record.set("job_title", Value::String(self.filters.job_title.clone()));
        record.set("location", Value::String(self.filters.location.clone()));
        record.set(
            "industries",
            Value::String(self.filters.industries.join(",")),
        );
        record.set(
            "salary_range_min",
            Value::String(self.filters.salary_range.min.to_string()),
        );
        record.set(
            "salary_range_max",
            Value::String(self.filters.salary_range.max.to_string()),
        );
        record.set("frequency", Value::String(self.frequency.to_string()));
        record.set("is_active", Value::Bool(self.is_active));
        record
    }
}
