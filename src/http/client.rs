use std::time::Duration;

use reqwest::{Client, ClientBuilder, Response as ReqwestResponse, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, trace};

use super::request::Request;
use super::routing::Route;
use super::{ErrorResponse, HttpError, LightMethod};
use crate::constants;
use crate::internal::prelude::*;
use crate::model::prelude::*;

/// A builder for the underlying [`Http`] client that performs requests to Discord's REST API.
///
/// ## Example
///
/// Create an instance of [`Http`] pointed at a local mock of the API:
///
/// ```rust
/// use std::time::Duration;
///
/// use interactions_endpoint::http::HttpBuilder;
/// use interactions_endpoint::model::id::ApplicationId;
///
/// let http = HttpBuilder::new("token")
///     .application_id(ApplicationId::new(381880193251409931))
///     .api_base("http://127.0.0.1:8080/api/v10")
///     .timeout(Duration::from_secs(5))
///     .build();
/// ```
#[must_use]
pub struct HttpBuilder {
    client: Option<Client>,
    token: SecretString,
    application_id: Option<ApplicationId>,
    api_base: String,
    timeout: Duration,
}

impl HttpBuilder {
    /// Construct a new builder to call methods on for the HTTP construction. The `token` will
    /// automatically be prefixed "Bot " if not already.
    pub fn new(token: impl AsRef<str>) -> Self {
        Self {
            client: None,
            token: parse_token(token),
            application_id: None,
            api_base: constants::API_BASE.to_string(),
            timeout: constants::DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Sets the application_id to use interactions.
    pub fn application_id(mut self, application_id: ApplicationId) -> Self {
        self.application_id = Some(application_id);
        self
    }

    /// Sets a token for the bot. If the token is not prefixed "Bot ", this method will
    /// automatically do so.
    pub fn token(mut self, token: impl AsRef<str>) -> Self {
        self.token = parse_token(token);
        self
    }

    /// Sets the [`reqwest::Client`]. If one isn't provided, a default one will be used.
    ///
    /// A provided client is used as is, so [`Self::timeout`] has no effect on it.
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Sets the base URL every route is resolved against, including the API version, e.g.
    /// `https://discord.com/api/v10`. Useful for pointing the client at a proxy or a mock server.
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Sets the timeout applied to every request made by the default client.
    ///
    /// Defaults to [`DEFAULT_REQUEST_TIMEOUT`].
    ///
    /// [`DEFAULT_REQUEST_TIMEOUT`]: crate::constants::DEFAULT_REQUEST_TIMEOUT
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use the given configuration to build the `Http` client.
    #[must_use]
    pub fn build(self) -> Http {
        let timeout = self.timeout;
        let client = self.client.unwrap_or_else(|| {
            let builder = configure_client_backend(Client::builder()).timeout(timeout);
            builder.build().expect("Cannot build reqwest::Client")
        });

        Http {
            client,
            token: self.token,
            application_id: self.application_id,
            api_base: self.api_base,
        }
    }
}

fn parse_token(token: impl AsRef<str>) -> SecretString {
    let token = token.as_ref().trim();
    let token =
        if token.starts_with("Bot ") { token.to_string() } else { format!("Bot {token}") };
    SecretString::new(token)
}

/// A low-level client for the REST endpoints the interactions endpoint needs: the global
/// application commands, and the webhook of each interaction.
///
/// **Note**: No ratelimiting or retrying is done. A request either returns the expected status
/// code or fails with [`HttpError::UnsuccessfulRequest`].
pub struct Http {
    client: Client,
    token: SecretString,
    application_id: Option<ApplicationId>,
    api_base: String,
}

impl std::fmt::Debug for Http {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Http")
            .field("application_id", &self.application_id)
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl Http {
    /// Creates a client with the default configuration. See [`HttpBuilder`] for more options.
    #[must_use]
    pub fn new(token: &str) -> Self {
        HttpBuilder::new(token).build()
    }

    #[must_use]
    pub fn application_id(&self) -> Option<ApplicationId> {
        self.application_id
    }

    fn try_application_id(&self) -> Result<ApplicationId> {
        self.application_id.ok_or_else(|| HttpError::ApplicationIdMissing.into())
    }

    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Fetches all of the global commands for your application.
    pub async fn get_global_commands(&self) -> Result<Vec<Command>> {
        self.fire(
            &[StatusCode::OK],
            Request::new(
                Route::Commands {
                    application_id: self.try_application_id()?,
                },
                LightMethod::Get,
            ),
        )
        .await
    }

    /// Creates a global command.
    ///
    /// Discord answers `201 Created` for a new command and `200 OK` when a command of the same
    /// name was overwritten; both are accepted.
    ///
    /// **Note**: Creating a command with the same name as an already-existing global command will
    /// overwrite the old command.
    pub async fn create_global_command(&self, map: &impl Serialize) -> Result<Command> {
        self.fire(
            &[StatusCode::OK, StatusCode::CREATED],
            Request::new(
                Route::Commands {
                    application_id: self.try_application_id()?,
                },
                LightMethod::Post,
            )
            .body(Some(to_vec(map)?)),
        )
        .await
    }

    /// Edits a global command.
    pub async fn edit_global_command(
        &self,
        command_id: CommandId,
        map: &impl Serialize,
    ) -> Result<Command> {
        self.fire(
            &[StatusCode::OK],
            Request::new(
                Route::Command {
                    application_id: self.try_application_id()?,
                    command_id,
                },
                LightMethod::Patch,
            )
            .body(Some(to_vec(map)?)),
        )
        .await
    }

    /// Deletes a global command.
    pub async fn delete_global_command(&self, command_id: CommandId) -> Result<()> {
        self.wind(
            StatusCode::NO_CONTENT,
            Request::new(
                Route::Command {
                    application_id: self.try_application_id()?,
                    command_id,
                },
                LightMethod::Delete,
            ),
        )
        .await
    }

    /// Edits the initial interaction response.
    ///
    /// Refer to Discord's [docs] for Edit Webhook Message for field information.
    ///
    /// [docs]: https://discord.com/developers/docs/resources/webhook#edit-webhook-message
    pub async fn edit_original_interaction_response(
        &self,
        interaction_token: &str,
        map: &impl Serialize,
    ) -> Result<Message> {
        self.fire(
            &[StatusCode::OK],
            Request::new(
                Route::WebhookOriginalInteractionResponse {
                    application_id: self.try_application_id()?,
                    token: interaction_token,
                },
                LightMethod::Patch,
            )
            .body(Some(to_vec(map)?)),
        )
        .await
    }

    /// Deletes the initial interaction response.
    pub async fn delete_original_interaction_response(&self, interaction_token: &str) -> Result<()> {
        self.wind(
            StatusCode::NO_CONTENT,
            Request::new(
                Route::WebhookOriginalInteractionResponse {
                    application_id: self.try_application_id()?,
                    token: interaction_token,
                },
                LightMethod::Delete,
            ),
        )
        .await
    }

    /// Creates a follow-up message for an interaction.
    pub async fn create_followup_message(
        &self,
        interaction_token: &str,
        map: &impl Serialize,
    ) -> Result<Message> {
        self.fire(
            &[StatusCode::OK],
            Request::new(
                Route::WebhookFollowupMessages {
                    application_id: self.try_application_id()?,
                    token: interaction_token,
                },
                LightMethod::Post,
            )
            .body(Some(to_vec(map)?)),
        )
        .await
    }

    /// Edits a follow-up message for an interaction.
    pub async fn edit_followup_message(
        &self,
        interaction_token: &str,
        message_id: MessageId,
        map: &impl Serialize,
    ) -> Result<Message> {
        self.fire(
            &[StatusCode::OK],
            Request::new(
                Route::WebhookFollowupMessage {
                    application_id: self.try_application_id()?,
                    token: interaction_token,
                    message_id,
                },
                LightMethod::Patch,
            )
            .body(Some(to_vec(map)?)),
        )
        .await
    }

    /// Deletes a follow-up message for an interaction.
    pub async fn delete_followup_message(
        &self,
        interaction_token: &str,
        message_id: MessageId,
    ) -> Result<()> {
        self.wind(
            StatusCode::NO_CONTENT,
            Request::new(
                Route::WebhookFollowupMessage {
                    application_id: self.try_application_id()?,
                    token: interaction_token,
                    message_id,
                },
                LightMethod::Delete,
            ),
        )
        .await
    }

    /// Fires off a request, deserializing the response reader via the given type bound.
    ///
    /// The response must carry one of the `expected` status codes, otherwise an
    /// [`HttpError::UnsuccessfulRequest`] holding the status and body is returned.
    pub async fn fire<T: DeserializeOwned>(
        &self,
        expected: &[StatusCode],
        req: Request<'_>,
    ) -> Result<T> {
        let method = req.method();
        let response = self.request(req).await?;
        let response = check_status(response, expected, method).await?;

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(From::from)
    }

    /// Performs a request and returns the raw response, whatever its status code.
    ///
    /// Use [`Self::fire`] to check the status and deserialize the response into some type.
    #[instrument(skip_all, fields(method = ?req.method()))]
    pub async fn request(&self, req: Request<'_>) -> Result<ReqwestResponse> {
        let request = req.build(&self.client, self.token.expose_secret(), &self.api_base)?;
        let response = request.send().await?;

        trace!(status = %response.status(), "received response");
        Ok(response)
    }

    /// Performs a request and then verifies that the response status code is equal to the
    /// expected value.
    ///
    /// This is a function that performs a light amount of work and returns an empty tuple, so
    /// it's called "self.wind" to denote that it's lightweight.
    pub(super) async fn wind(&self, expected: StatusCode, req: Request<'_>) -> Result<()> {
        let method = req.method();
        let response = self.request(req).await?;
        check_status(response, &[expected], method).await.map(drop)
    }
}

async fn check_status(
    response: ReqwestResponse,
    expected: &[StatusCode],
    method: LightMethod,
) -> Result<ReqwestResponse> {
    if expected.contains(&response.status()) {
        return Ok(response);
    }

    debug!("Expected {:?}, got {}", expected, response.status());

    let error = ErrorResponse::from_response(response, method).await;
    trace!("Unsuccessful response body: {}", error.body);
    Err(Error::Http(HttpError::UnsuccessfulRequest(error)))
}

fn to_vec(map: &impl Serialize) -> Result<Vec<u8>> {
    serde_json::to_vec(map).map_err(From::from)
}

#[cfg(not(feature = "native_tls_backend"))]
fn configure_client_backend(builder: ClientBuilder) -> ClientBuilder {
    builder.use_rustls_tls()
}

#[cfg(feature = "native_tls_backend")]
fn configure_client_backend(builder: ClientBuilder) -> ClientBuilder {
    builder.use_native_tls()
}
