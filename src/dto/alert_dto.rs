use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::alert::AlertFrequency;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertFiltersPayload {
    pub job_title: Option<String>,
    pub location: Option<String>,
    pub industries: Option<Vec<String>>,
    pub salary_min: Option<Decimal>,
    pub salary_max: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAlertPayload {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub filters: AlertFiltersPayload,
    pub frequency: Option<AlertFrequency>,
    /// New alerts default to active.
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateAlertPayload {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub filters: Option<AlertFiltersPayload>,
    pub frequency: Option<AlertFrequency>,
    pub is_active: Option<bool>,
}
