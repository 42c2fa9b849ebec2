//! Admission throttling: budget, feedback loop and the combined entry point.

pub mod budget;
pub mod feedback;
pub mod throttler;


// Re-export main types
pub use budget::AdmissionBudget;
pub use feedback::FeedbackController;
pub use throttler::Throttler;
