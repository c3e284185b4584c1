//! Generate a single image from a text prompt.
//!
//! Requires a ModelScope access token in `MODELSCOPE_TOKEN`.
//!
//! ```sh
//! MODELSCOPE_TOKEN=ms-... cargo run --example simple_generation
//! ```

use modelscope_rs::{ErrorCode, GenerationRequest, ModelScopeClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("modelscope_rs=debug")),
        )
        .init();

    let token = std::env::var("MODELSCOPE_TOKEN").unwrap_or_default();
    let client = ModelScopeClient::from_env();

    let request = GenerationRequest::new("a beautiful sunset over mountains")
        .negative("lowres, blurry, bad anatomy")
        .size(1024, 768)
        .token(token);

    match client.generate(&request).await {
        Ok(result) => {
            println!("Image: {}", result.url);
            println!("Seed:  {}", result.seed);
        }
        Err(e) => match e.code() {
            ErrorCode::AuthRequired | ErrorCode::AuthInvalid | ErrorCode::AuthExpired => {
                eprintln!("Check MODELSCOPE_TOKEN: {}", e)
            }
            ErrorCode::RateLimited | ErrorCode::QuotaExceeded => {
                eprintln!("Try again later: {}", e)
            }
            ErrorCode::Timeout => eprintln!("Generation timed out"),
            _ => eprintln!("Generation failed: {}", e),
        },
    }

    Ok(())
}
