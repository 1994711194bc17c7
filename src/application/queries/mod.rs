pub mod articles;
pub mod comments;
