pub mod backup;
pub mod document;
pub mod location;
pub mod writer;
