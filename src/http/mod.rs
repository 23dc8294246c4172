//! HTTP client module
//!
//! Thin transport plumbing: one request per call, no retries, no backoff.
//!
//! # Features
//!
//! - **Base URL joining**: relative paths resolve against a configured base
//! - **Default headers**: user agent and per-client headers on every request
//! - **Rate Limiting**: optional token bucket limiter using governor

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
