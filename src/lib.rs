pub mod config;
pub mod dto;
pub mod error;
pub mod filter;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod utils;

use std::sync::Arc;

use crate::services::{
    alert_service::AlertService, application_service::ApplicationService,
    job_service::JobService, question_service::QuestionService, resume_service::ResumeService,
};
use crate::store::RecordStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub job_service: JobService,
    pub application_service: ApplicationService,
    pub alert_service: AlertService,
    pub resume_service: ResumeService,
    pub question_service: QuestionService,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        let job_service = JobService::new(store.clone());
        let application_service = ApplicationService::new(store.clone());
        let alert_service = AlertService::new(store.clone());
        let resume_service = ResumeService::new(store.clone());
        let question_service = QuestionService::new(store.clone());

        Self {
            store,
            job_service,
            application_service,
            alert_service,
            resume_service,
            question_service,
        }
    }
}
