//! Core data types exchanged with Bazel and the login page.

pub mod credentials;
pub mod output;
pub mod request;

pub use credentials::{CredentialSource, Credentials};
pub use output::OutputDescriptor;
pub use request::RequestDescriptor;
