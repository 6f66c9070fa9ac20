// OpenAlternative - Back Office Core
//
// Backend for the open alternatives catalog: admin search, social posting and
// the scheduled publishing of tools. Durable execution runs on Restate.
//
// Workflows and services are organized per-domain in domains/*/restate/

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;
pub mod workflows_client;

pub use config::*;
