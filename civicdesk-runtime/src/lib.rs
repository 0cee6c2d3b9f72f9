pub mod config_store;
pub mod remote;
pub mod runtime_session;
