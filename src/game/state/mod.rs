//! Demo-wide state shared by every demonstration.

pub mod demo_state;

pub use demo_state::{AppRequest, DemoState};
