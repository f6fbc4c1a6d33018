pub mod assess;
pub mod report;
