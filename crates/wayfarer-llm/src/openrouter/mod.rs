mod client;
mod responses;

pub use client::OpenRouterClient;
