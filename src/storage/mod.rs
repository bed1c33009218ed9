pub mod db;
pub mod models;

pub use db::{AssessmentStats, Database};
pub use models::AssessmentRecord;
