//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod movie;
pub mod rating;
pub mod role;
pub mod user;
