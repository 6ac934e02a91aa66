use std::error::Error as StdError;
use std::fmt;

use reqwest::header::InvalidHeaderValue;
use reqwest::{Error as ReqwestError, Response, StatusCode};
use url::ParseError as UrlError;

use super::LightMethod;
use crate::internal::prelude::*;

/// The details of a response with an unexpected status code.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct ErrorResponse {
    pub status_code: StatusCode,
    pub url: String,
    pub method: LightMethod,
    /// The raw response body, usually a JSON error object.
    pub body: String,
}

impl ErrorResponse {
    // We need a freestanding from-function since we cannot implement an async From-trait.
    pub async fn from_response(r: Response, method: LightMethod) -> Self {
        ErrorResponse {
            status_code: r.status(),
            url: r.url().to_string(),
            method,
            body: r.text().await.unwrap_or_else(|_| "[interactions-endpoint] No body to be read".into()),
        }
    }

    /// Parses the body as JSON, if it is JSON.
    #[must_use]
    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }
}

#[derive(Debug)]
#[non_exhaustive]
pub enum HttpError {
    /// When a non-successful status code was received for a request.
    UnsuccessfulRequest(ErrorResponse),
    /// When parsing an URL failed due to invalid input.
    Url(UrlError),
    /// Header value contains invalid input.
    InvalidHeader(InvalidHeaderValue),
    /// Reqwest's Error contain information on why sending a request failed.
    Request(ReqwestError),
    /// When the application Id was not provided to the [`Http`] client.
    ///
    /// [`Http`]: super::Http
    ApplicationIdMissing,
}

impl HttpError {
    /// Returns true when the error is caused by an unsuccessful request
    #[must_use]
    pub fn is_unsuccessful_request(&self) -> bool {
        matches!(self, Self::UnsuccessfulRequest(_))
    }

    /// Returns the status code if the error is an unsuccessful request
    #[must_use]
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::UnsuccessfulRequest(res) => Some(res.status_code),
            _ => None,
        }
    }
}

impl From<ReqwestError> for Error {
    fn from(error: ReqwestError) -> Self {
        Self::Http(HttpError::Request(error))
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsuccessfulRequest(e) => write!(
                f,
                "{:?} request failed with status {}: {}",
                e.method, e.status_code, e.body
            ),
            Self::Url(_) => f.write_str("Provided URL is incorrect."),
            Self::InvalidHeader(_) => f.write_str("Provided value is an invalid header value."),
            Self::Request(_) => f.write_str("Error while sending HTTP request."),
            Self::ApplicationIdMissing => f.write_str("Application id was expected but missing."),
        }
    }
}

impl StdError for HttpError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Url(inner) => Some(inner),
            Self::Request(inner) => Some(inner),
            Self::InvalidHeader(inner) => Some(inner),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_accessors() {
        let error = HttpError::UnsuccessfulRequest(ErrorResponse {
            status_code: StatusCode::FORBIDDEN,
            url: "http://127.0.0.1/applications/1/commands".into(),
            method: LightMethod::Post,
            body: r#"{"message": "Missing Access", "code": 50001}"#.into(),
        });

        assert!(error.is_unsuccessful_request());
        assert_eq!(error.status_code(), Some(StatusCode::FORBIDDEN));
        assert_eq!(error.to_string(), format!(
            "Post request failed with status 403 Forbidden: {}",
            r#"{"message": "Missing Access", "code": 50001}"#
        ));

        let HttpError::UnsuccessfulRequest(response) = error else { unreachable!() };
        assert_eq!(response.json().unwrap()["code"], 50001);
    }
}
