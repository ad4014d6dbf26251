pub mod application;
pub mod certificate;
pub mod document;
pub mod internship;
pub mod user;
