pub mod db;
pub mod error;
pub mod models;
pub mod planner;
pub mod service;
