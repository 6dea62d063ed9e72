//! Workspace facade used by the integration tests in `tests/`.
pub use ansible_run_core::*;
