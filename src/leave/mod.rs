pub mod calendar;
pub mod catalog;
pub mod ledger;
pub mod queries;
pub mod workflow;
