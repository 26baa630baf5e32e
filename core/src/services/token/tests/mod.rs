//! Unit tests for the token service

mod service_tests;
