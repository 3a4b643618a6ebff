pub mod config;
pub mod contracts;
pub mod notifications;
pub mod regions;
pub mod timings;
