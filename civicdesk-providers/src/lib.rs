pub mod intake_api;
pub mod parse;
pub mod request;
pub mod runtime;
