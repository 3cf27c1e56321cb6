//! Shared request/response types.

mod pagination;
mod response;

pub use pagination::{MoviePage, Page, PageRequest};
pub use response::{Created, MessageResponse, NoContent};
