//! Test-only crate. See `tests/security_invariants.rs`.
