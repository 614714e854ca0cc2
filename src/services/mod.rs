pub mod alert_service;
pub mod application_service;
pub mod job_service;
pub mod question_service;
pub mod resume_service;
