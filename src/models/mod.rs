//! Data models for the Book Library

pub mod author;
pub mod book;

// Re-export commonly used types
pub use author::{Author, AuthorInput, AuthorResponse};
pub use book::{Book, BookInput, BookResponse};
