mod client_index;
mod derived_index;
mod flow_collector;
mod nav_index;
mod scope;

pub mod export;
pub mod performance_model;
pub mod performance_service;
pub mod reporting_period;

#[cfg(test)]
mod performance_service_tests;

pub use performance_model::*;
pub use performance_service::*;
pub use reporting_period::*;
