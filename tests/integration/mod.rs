//! Integration tests

pub mod config_tests;
pub mod http_client_tests;
pub mod pipeline_tests;
pub mod upload_tests;
