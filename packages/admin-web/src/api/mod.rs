//! Back office API access (Restate ingress)

mod client;
mod server_fns;

pub use client::*;
pub use server_fns::*;
