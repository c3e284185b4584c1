//! Drive the submit and poll steps separately with a tuned configuration,
//! reusing a seed to reproduce an earlier image.
//!
//! ```sh
//! MODELSCOPE_TOKEN=ms-... cargo run --example custom_config
//! ```

use modelscope_rs::{validate_token, GenerationRequest, ModelScopeClient, ModelScopeConfig};
use serde_json::json;
use std::time::Duration;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let config = ModelScopeConfig::builder()
        .with_max_poll_attempts(60)
        .with_poll_interval(Duration::from_secs(2))
        .with_request_timeout(Duration::from_secs(15))
        .with_default_steps(12)
        .build();
    let client = ModelScopeClient::new(config).with_http_client(
        reqwest::Client::builder()
            .user_agent("modelscope-rs-demo")
            .build()?,
    );

    let token = std::env::var("MODELSCOPE_TOKEN").ok();
    let token = validate_token(token.as_deref())?;

    let request = GenerationRequest::new("ink wash painting of a mountain temple")
        .size(768, 1024)
        .seed(20240601)
        .guidance(3.5)
        .loras(json!({"studio/ink-wash": 0.8}));

    let seed = client.resolve_seed(&request);
    let body = client.build_body(&request, seed);
    println!("Submitting: {}", serde_json::to_string_pretty(&body)?);

    let handle = client.submit_task(token, &body).await?;
    println!("Task: {}", handle);

    let url = client.poll_task(token, &handle).await?;
    println!("Image: {} (seed {})", url, seed);

    Ok(())
}
