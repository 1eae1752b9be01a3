//! Test suite for chatcast
//!
//! This module organizes all integration and property tests

pub mod common;
pub mod integration;
pub mod property;
