//! # modelscope-rs
//!
//! Async Rust client for the [ModelScope](https://modelscope.cn) image
//! generation API.
//!
//! The API is task based: a generation request returns a task id, and the
//! caller polls the task until it succeeds or fails. This crate drives that
//! submit → poll workflow on a fixed cadence and maps the service's
//! free-form error responses onto a small, stable [`ModelScopeError`]
//! taxonomy.
//!
//! ## Quick Start
//!
//! ```no_run
//! use modelscope_rs::{ErrorCode, GenerationRequest, ModelScopeClient};
//!
//! # async fn example() -> modelscope_rs::Result<()> {
//! let client = ModelScopeClient::from_env();
//!
//! let request = GenerationRequest::new("a sunset over mountains")
//!     .negative("lowres, blurry")
//!     .size(1024, 768)
//!     .token(std::env::var("MODELSCOPE_TOKEN").unwrap_or_default());
//!
//! match client.generate(&request).await {
//!     Ok(result) => println!("{} (seed {})", result.url, result.seed),
//!     Err(e) if e.code() == ErrorCode::RateLimited => eprintln!("slow down: {}", e),
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! The HTTP transport ([`Transport`]), the inter-poll delay ([`Sleeper`]),
//! and seed generation ([`SeedSource`]) are all injectable, so a whole
//! generation can be scripted without a network or a wall clock.

pub mod classify;
pub mod client;
pub mod clock;
pub mod config;
pub mod error;
pub mod poll;
pub mod provider;
pub mod request;
pub mod seed;
pub mod submit;
pub mod transport;
pub mod types;

pub use classify::{classify, classify_response, ErrorPayload};
pub use client::{validate_token, ModelScopeClient};
pub use clock::{Sleeper, TokioSleeper};
pub use config::{ModelScopeConfig, ModelScopeConfigBuilder};
pub use error::{ErrorCode, ModelScopeError, Result};
pub use provider::{ImageProvider, PROVIDER_ID, PROVIDER_NAME};
pub use request::GenerationRequest;
pub use seed::{RandomSeed, SeedSource, MAX_SEED};
pub use transport::{HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError};
pub use types::{GenerationResult, SubmitBody, TaskHandle, TaskStatus};
