//! Services that sit between handlers and the remote API.

pub mod progress;
