use serde_json::json;

use super::collections;
use super::Record;

/// Demo content for the fallback store so the API is browsable without a
/// hosted record store behind it.
pub fn seed_records() -> Vec<(&'static str, Vec<Record>)> {
    vec![
        (collections::JOBS, seed_jobs()),
        (collections::INTERVIEW_QUESTIONS, seed_questions()),
    ]
}

fn record(id: i64, pairs: Vec<(&str, serde_json::Value)>) -> Record {
    let mut r = Record::new(id);
    for (field, value) in pairs {
        r.set(field, value);
    }
    r
}

fn seed_jobs() -> Vec<Record> {
    vec![
        record(
            1,
            vec![
                ("title", json!("Senior Backend Engineer")),
                ("company", json!("Nimbus Labs")),
                ("location", json!("Remote")),
                ("industry", json!("Technology")),
                ("salary_min", json!(120000)),
                ("salary_max", json!(160000)),
                (
                    "description",
                    json!("Own the services powering our scheduling platform."),
                ),
                ("requirements", json!("5+ years backend, Rust or Go, PostgreSQL")),
                ("posted_date", json!("2025-06-02T09:00:00Z")),
                ("application_deadline", json!("2025-09-30T23:59:59Z")),
            ],
        ),
        record(
            2,
            vec![
                ("title", json!("Financial Analyst")),
                ("company", json!("Crestline Partners")),
                ("location", json!("New York, NY")),
                ("industry", json!("Finance")),
                ("salary_min", json!(85000)),
                ("salary_max", json!(110000)),
                (
                    "description",
                    json!("Build models and reporting for our private credit desk."),
                ),
                ("requirements", json!("Excel modelling, SQL, CFA level 1")),
                ("posted_date", json!("2025-06-10T14:30:00Z")),
                ("application_deadline", json!("2025-08-31T23:59:59Z")),
            ],
        ),
        record(
            3,
            vec![
                ("title", json!("Registered Nurse")),
                ("company", json!("Lakeside Health")),
                ("location", json!("Chicago, IL")),
                ("industry", json!("Healthcare")),
                ("salary_min", json!(70000)),
                ("salary_max", json!(90000)),
                ("description", json!("Acute care unit, rotating shifts.")),
                ("requirements", json!("BSN, state license, 2+ years acute care")),
                ("posted_date", json!("2025-06-15T08:00:00Z")),
            ],
        ),
        record(
            4,
            vec![
                ("title", json!("Product Designer")),
                ("company", json!("Fieldnote")),
                ("location", json!("Remote")),
                ("industry", json!("Design")),
                ("salary_min", json!(95000)),
                ("salary_max", json!(130000)),
                (
                    "description",
                    json!("Design the mobile experience for field researchers."),
                ),
                ("requirements", json!("Portfolio, Figma, mobile-first design")),
                ("posted_date", json!("2025-06-20T11:00:00Z")),
                ("application_deadline", json!("2025-10-15T23:59:59Z")),
            ],
        ),
        record(
            5,
            vec![
                ("title", json!("Machine Learning Engineer")),
                ("company", json!("Nimbus Labs")),
                ("location", json!("Austin, TX")),
                ("industry", json!("Technology")),
                ("salary_min", json!(140000)),
                ("salary_max", json!(185000)),
                (
                    "description",
                    json!("Take our ranking models from notebook to production."),
                ),
                ("requirements", json!("Python, ML systems, feature pipelines")),
                ("posted_date", json!("2025-06-25T16:45:00Z")),
            ],
        ),
    ]
}

fn seed_questions() -> Vec<Record> {
    vec![
        record(
            1,
            vec![
                ("question", json!("Tell me about yourself.")),
                ("category", json!("general")),
                ("difficulty", json!("beginner")),
                (
                    "key_points",
                    json!("Keep it under two minutes\nConnect your story to the role\nEnd with why you are here"),
                ),
                (
                    "sample_answer",
                    json!("Start with your current role, walk through one or two relevant accomplishments, and close with what draws you to this position."),
                ),
                ("tips", json!("Practice out loud\nAvoid reciting your resume line by line")),
                ("tags", json!("intro,behavioral")),
                ("created_at", json!("2025-05-01T10:00:00Z")),
            ],
        ),
        record(
            2,
            vec![
                (
                    "question",
                    json!("How would you design a URL shortener?"),
                ),
                ("category", json!("software-engineering")),
                ("difficulty", json!("intermediate")),
                (
                    "key_points",
                    json!("Clarify scale requirements first\nKey generation and collision handling\nRead-heavy caching strategy"),
                ),
                (
                    "sample_answer",
                    json!("Scope reads vs writes, pick an id-encoding scheme, then discuss storage, caching and redirects."),
                ),
                ("tips", json!("Draw the data flow\nState your assumptions explicitly")),
                ("tags", json!("system-design,architecture")),
                ("created_at", json!("2025-05-03T10:00:00Z")),
            ],
        ),
        record(
            3,
            vec![
                (
                    "question",
                    json!("Explain the bias-variance tradeoff."),
                ),
                ("category", json!("data-science")),
                ("difficulty", json!("intermediate")),
                (
                    "key_points",
                    json!("Define both terms\nUnderfitting vs overfitting\nHow regularization mediates the tradeoff"),
                ),
                (
                    "sample_answer",
                    json!("Bias is error from overly simple assumptions, variance from sensitivity to training data; total error balances the two."),
                ),
                ("tips", json!("Use a concrete model as the running example")),
                ("tags", json!("ml,statistics")),
                ("created_at", json!("2025-05-05T10:00:00Z")),
            ],
        ),
        record(
            4,
            vec![
                (
                    "question",
                    json!("Walk me through a product you would sunset and why."),
                ),
                ("category", json!("product-management")),
                ("difficulty", json!("advanced")),
                (
                    "key_points",
                    json!("Pick a real product\nQuantify the opportunity cost\nAddress migration for existing users"),
                ),
                (
                    "sample_answer",
                    json!("Frame the decision with usage data and strategy fit, then cover the wind-down plan and how you communicate it."),
                ),
                ("tips", json!("Show empathy for affected users\nBring numbers")),
                ("tags", json!("strategy,case")),
                ("created_at", json!("2025-05-07T10:00:00Z")),
            ],
        ),
    ]
}
