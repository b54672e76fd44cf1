//! Trip planning core: a persistent store of trip records, the budget
//! calculator, the static catalog the trip builder picks from, and the
//! builder itself. [`api`] exposes all of it over HTTP.

pub mod api;
pub mod budget;
pub mod catalog;
pub mod config;
pub mod models;
pub mod planner;
pub mod render;
pub mod store;
