//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `taskpad_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // Tiny probe validating core crate wiring independently from the
    // Flutter/FFI runtime setup.
    println!("taskpad_core ping={}", taskpad_core::ping());
    println!("taskpad_core version={}", taskpad_core::core_version());
}
