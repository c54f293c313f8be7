//! API Routes
//!
//! Route handlers organized by functionality.

pub mod health;
pub mod notation;
pub mod session;
pub mod submissions;
