//! Common utilities for integration tests

pub mod test_helpers;

// Re-export commonly used items
pub use test_helpers::{
    assert_fields_close,
    pulse_channel,
    relative_error,
};
