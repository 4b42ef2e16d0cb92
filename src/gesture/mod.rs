//! Gesture module for modifier tap detection
//!
//! Decides whether a modifier release is a clean tap:
//! - Pressed modifier starts a hold
//! - Any other key pressed during the hold interrupts it
//! - Releasing an uninterrupted hold triggers a language switch

mod detector;

pub use detector::{GestureDetector, TriggerDecision};
