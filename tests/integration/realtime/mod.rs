//! Subscribe stream integration tests

mod fanout_test;
