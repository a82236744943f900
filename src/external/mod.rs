//! Outbound HTTP plumbing shared by the platform notifiers.

pub mod client;

pub use client::HTTP_CLIENT;
