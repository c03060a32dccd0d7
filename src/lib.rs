pub mod app;
pub mod appointments;
pub mod caregivers;
pub mod config;
pub mod db;
pub mod error;
pub mod jobs;
pub mod members;
pub mod pages;
pub mod password;
pub mod state;
pub mod stats;
pub mod users;
pub mod validation;
