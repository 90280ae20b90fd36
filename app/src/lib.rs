//! Calorie Tracker Library
//!
//! This library exposes the tracker modules for use in tests and front ends.

pub mod config;
pub mod console;
pub mod controller;
pub mod db;
pub mod error;
pub mod repositories;
pub mod services;
pub mod state;
