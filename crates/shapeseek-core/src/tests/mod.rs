//! Unit tests for `shapeseek_core` types.

mod language_tests;
mod mode_tests;
