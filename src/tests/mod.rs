#![warn(clippy::all, clippy::pedantic)]

// Test modules
pub mod app_tests;
pub mod game_tests;
pub mod pipe_group_tests;

// Import test utilities
pub mod test_utils;
