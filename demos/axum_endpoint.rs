//! Serves an interactions endpoint with axum.
//!
//! Set `DISCORD_PUBLIC_KEY`, `DISCORD_APPLICATION_ID` and `DISCORD_TOKEN` from the application's
//! dashboard, then point its "Interactions Endpoint URL" at this server. `BIND_ADDRESS` defaults
//! to `0.0.0.0:8787`.

use std::env;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::{Json, Router};
use interactions_endpoint::async_trait;
use interactions_endpoint::builder::{
    CreateCommand,
    CreateCommandOption,
    CreateInteractionResponse,
    CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage,
    EditInteractionResponse,
};
use interactions_endpoint::constants::{SIGNATURE_HEADER, TIMESTAMP_HEADER};
use interactions_endpoint::model::application::CommandOptionType;
use interactions_endpoint::model::id::ApplicationId;
use interactions_endpoint::prelude::*;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

struct Ping;

#[async_trait]
impl CommandHandler for Ping {
    async fn handle(&self, responder: &mut Responder) -> interactions_endpoint::Result<()> {
        let content = match responder.interaction().invoker() {
            Some(user) => format!("Pong! <@{}>", user.id),
            None => "Pong!".to_string(),
        };
        responder.respond(CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new().content(content),
        ))
    }
}

struct Echo;

#[async_trait]
impl CommandHandler for Echo {
    async fn handle(&self, responder: &mut Responder) -> interactions_endpoint::Result<()> {
        let text = responder
            .data()
            .and_then(|data| data.option("text"))
            .and_then(|option| option.as_str())
            .unwrap_or_default()
            .to_string();

        // Answer later, once the work is done.
        responder.defer()?;
        responder.edit_initial_response(&EditInteractionResponse::new().content(&text)).await?;
        responder
            .follow_up(
                &CreateInteractionResponseFollowup::new().content("Only you can see this").ephemeral(true),
            )
            .await?;

        Ok(())
    }
}

async fn interactions(
    State(endpoint): State<Arc<InteractionsEndpoint>>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header = |name: &str| headers.get(name).and_then(|value| value.to_str().ok());
    let response = endpoint
        .handle(EndpointRequest {
            method: method.as_str(),
            signature: header(SIGNATURE_HEADER),
            timestamp: header(TIMESTAMP_HEADER),
            body: &body,
        })
        .await;

    let status = StatusCode::from_u16(response.status.as_u16())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response.body)).into_response()
}

async fn register_commands(commands: &GlobalCommands) -> interactions_endpoint::Result<()> {
    commands.list().await?;
    commands.create(&CreateCommand::new("ping").description("Replies with a pong")).await?;
    commands
        .create(&CreateCommand::new("echo").description("Echoes a message").add_option(
            CreateCommandOption::new(CommandOptionType::String, "text", "What to echo")
                .required(true),
        ))
        .await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "interactions_endpoint=debug,axum_endpoint=info".into()),
        )
        .init();

    let public_key = env::var("DISCORD_PUBLIC_KEY")?;
    let application_id: u64 = env::var("DISCORD_APPLICATION_ID")?.parse()?;
    let token = env::var("DISCORD_TOKEN")?;
    let bind_address = env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8787".to_string());

    let verifier = Verifier::from_hex(&public_key)?;
    let http = Arc::new(
        HttpBuilder::new(token).application_id(ApplicationId::new(application_id)).build(),
    );
    let registry = Arc::new(CommandRegistry::new());
    registry.bind_name("ping", Arc::new(Ping));
    registry.bind_name("echo", Arc::new(Echo));

    let commands = GlobalCommands::new(Arc::clone(&http), Arc::clone(&registry));
    if let Err(why) = register_commands(&commands).await {
        tracing::error!("could not register commands: {why}");
    }

    let endpoint = Arc::new(InteractionsEndpoint::new(verifier, registry, http));
    let router = Router::new().route("/interactions", any(interactions)).with_state(endpoint);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("listening on {bind_address}");
    axum::serve(listener, router).await?;

    Ok(())
}
