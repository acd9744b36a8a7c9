pub mod submission_audit;
