use anyhow::{Context, Result};
use chrono::Local;
use csv::Writer;
use serde::Serialize;
use std::fs::{create_dir_all, OpenOptions};
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::client::SubmitAction;
use crate::error::SubmitError;
use crate::strategy::Strategy;

#[derive(Debug, Serialize, Clone)]
pub struct SubmissionRecord {
    pub timestamp: String,
    pub action: String,
    pub strategy: String,
    pub components: usize,
    pub outcome: String, // OK, APP_ERROR, TRANSPORT_ERROR
    pub message: String,
}

/// Appends one CSV row per save/deploy attempt.
#[derive(Clone)]
pub struct SubmissionAuditLogger {
    writer: Arc<Mutex<Writer<std::fs::File>>>,
}

impl SubmissionAuditLogger {
    pub fn new(log_dir: &str) -> Result<Self> {
        let dir = Path::new(log_dir);
        create_dir_all(dir).context("Failed to create log directory")?;

        let file_path = dir.join("submissions.csv");
        let file_exists = file_path.exists();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)
            .context("Failed to open submissions.csv")?;

        let writer = csv::WriterBuilder::new()
            .has_headers(!file_exists)
            .from_writer(file);

        Ok(Self {
            writer: Arc::new(Mutex::new(writer)),
        })
    }

    pub fn log(&self, record: SubmissionRecord) {
        if let Ok(mut w) = self.writer.lock() {
            if let Err(e) = w.serialize(record) {
                log::error!("Failed to write submission audit log: {}", e);
            } else {
                let _ = w.flush();
            }
        }
    }

    pub fn log_outcome(
        &self,
        action: SubmitAction,
        strategy: &Strategy,
        outcome: &Result<(), SubmitError>,
    ) {
        let (outcome, message) = match outcome {
            Ok(()) => ("OK", action.success_message().to_string()),
            Err(e @ SubmitError::Application { .. }) => ("APP_ERROR", e.to_string()),
            Err(e @ SubmitError::Transport { .. }) => ("TRANSPORT_ERROR", e.to_string()),
        };
        self.log(SubmissionRecord {
            timestamp: Local::now().to_rfc3339(),
            action: action.to_string(),
            strategy: strategy.name.clone(),
            components: strategy.components.len(),
            outcome: outcome.to_string(),
            message,
        });
    }
}
