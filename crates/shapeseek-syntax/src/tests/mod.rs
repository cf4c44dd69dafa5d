//! Search-level tests for `shapeseek-syntax`.

mod behaviour;
mod unit;
