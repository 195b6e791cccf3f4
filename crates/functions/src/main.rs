//! Local invocation harness: `valkyrie-functions <function> < event.json`.

use std::io::Read;
use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use valkyrie_app::{Dispatcher, Repositories};
use valkyrie_functions::authorizer::{Authorizer, AuthorizerRequest};
use valkyrie_functions::config::FunctionsConfig;
use valkyrie_functions::handlers::FunctionHandlers;
use valkyrie_functions::invoke::{invoke, FunctionName};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries only the function result.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "valkyrie_functions=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let Some(name) = std::env::args().nth(1) else {
        eprintln!("usage: valkyrie-functions <function> < event.json");
        return ExitCode::FAILURE;
    };
    let function: FunctionName = match name.parse() {
        Ok(function) => function,
        Err(err) => {
            tracing::error!(error = %err, "Cannot invoke");
            return ExitCode::FAILURE;
        }
    };

    let event = match read_event() {
        Ok(event) => event,
        Err(err) => {
            tracing::error!(error = %err, "Failed to read event from stdin");
            return ExitCode::FAILURE;
        }
    };

    let config = FunctionsConfig::from_env();

    let output = if function.needs_database() {
        let Some(database_url) = config.database_url.as_deref() else {
            tracing::error!(function = %function, "DATABASE_URL must be set");
            return ExitCode::FAILURE;
        };
        let pool = match valkyrie_db::create_pool(database_url, config.db_max_connections).await {
            Ok(pool) => pool,
            Err(err) => {
                tracing::error!(error = %err, "Failed to connect to database");
                return ExitCode::FAILURE;
            }
        };
        let dispatcher = Arc::new(Dispatcher::new(&Repositories::postgres(pool)));
        invoke(&FunctionHandlers::new(dispatcher), function, event)
            .await
            .map_err(|err| err.to_string())
    } else {
        authorize(&config, event).await
    };

    match output {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, function = %function, "Invocation failed");
            ExitCode::FAILURE
        }
    }
}

async fn authorize(config: &FunctionsConfig, event: serde_json::Value) -> Result<String, String> {
    let request: AuthorizerRequest = serde_json::from_value(event).map_err(|e| e.to_string())?;
    let authorizer = Authorizer::new(config.auth_issuer.clone(), config.auth_jwks_uri.clone());
    let response = authorizer
        .authorize(&request)
        .await
        .map_err(|e| e.to_string())?;
    serde_json::to_string(&response).map_err(|e| e.to_string())
}

/// Read the whole of stdin as one JSON value. Empty input is `null`.
fn read_event() -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let mut raw = String::new();
    std::io::stdin().read_to_string(&mut raw)?;
    if raw.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    Ok(serde_json::from_str(&raw)?)
}
