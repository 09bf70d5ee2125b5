//! Integration tests

mod common;
mod lending_tests;
mod persistence_tests;
