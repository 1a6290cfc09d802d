use config::{Config, Environment};
use mathchat::models::tool::ToolResult;
use mathchat::systems::multiply::{internal_error, multiply};
use mathchat::systems::MultiplyArgs;
use serde::Deserialize;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;
use warp::hyper::body::Bytes;
use warp::Filter;

/// Largest request body accepted on /multiply
const MAX_BODY_BYTES: u64 = 64 * 1024;

#[derive(Debug, Deserialize)]
struct Settings {
    host: String,
    port: u16,
}

impl Settings {
    fn new() -> Result<Self, config::ConfigError> {
        Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 3001)?
            .add_source(
                Environment::with_prefix("MULTIPLY_SYSTEM")
                    .prefix_separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

/// Every outcome is a 200 carrying either `result` or `error`
fn handle(body: &[u8]) -> ToolResult {
    let raw = match std::str::from_utf8(body) {
        Ok(raw) => raw,
        Err(e) => return internal_error(e),
    };

    match MultiplyArgs::from_request_body(raw) {
        Ok(args) => {
            let result = multiply(&args.a, &args.b);
            tracing::debug!(a_len = args.a.len(), b_len = args.b.len(), ok = result.is_success(), "multiply");
            result
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not decode multiply request");
            internal_error(e)
        }
    }
}

fn multiply_route() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::post()
        .and(warp::path!("multiply"))
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::bytes())
        .map(|body: Bytes| warp::reply::json(&handle(&body)))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::new()?;
    let addr: SocketAddr = format!("{}:{}", settings.host, settings.port).parse()?;

    tracing::info!("Multiply system running at http://{}", addr);
    warp::serve(multiply_route()).run(addr).await;
    Ok(())
}
