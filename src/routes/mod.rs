pub mod alerts;
pub mod applications;
pub mod health;
pub mod jobs;
pub mod questions;
pub mod resumes;
