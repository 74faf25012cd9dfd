pub mod dashboard;
pub mod plan_detail;
pub mod plans;
pub mod topics;
