// Business domains
pub mod auth;
pub mod catalog;
pub mod socials;
pub mod tools;
