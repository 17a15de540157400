pub mod billing;
pub mod profile;
pub mod project;
pub mod recommendation;
pub mod request;
