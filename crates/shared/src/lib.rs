pub mod corpus;
pub mod domain;
pub mod error;
pub mod input;
pub mod protocol;
