//! Property-based tests

mod reconcile_proptest;
