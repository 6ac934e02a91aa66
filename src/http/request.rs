use reqwest::header::{
    HeaderMap as Headers,
    HeaderValue,
    AUTHORIZATION,
    CONTENT_LENGTH,
    CONTENT_TYPE,
    USER_AGENT,
};
use reqwest::{Client, RequestBuilder as ReqwestRequestBuilder, Url};

use super::routing::Route;
use super::{HttpError, LightMethod};
use crate::constants;
use crate::internal::prelude::*;

/// A single REST request: a [`Route`], the method to call it with, and an optional JSON body.
#[derive(Clone, Debug)]
#[must_use]
pub struct Request<'a> {
    pub(super) body: Option<Vec<u8>>,
    pub(super) method: LightMethod,
    pub(super) route: Route<'a>,
}

impl<'a> Request<'a> {
    pub const fn new(route: Route<'a>, method: LightMethod) -> Self {
        Self {
            body: None,
            method,
            route,
        }
    }

    pub fn body(mut self, body: Option<Vec<u8>>) -> Self {
        self.body = body;
        self
    }

    #[must_use]
    pub fn method(&self) -> LightMethod {
        self.method
    }

    /// Resolves the route against `api_base` and attaches the common headers.
    pub fn build(
        self,
        client: &Client,
        token: &str,
        api_base: &str,
    ) -> Result<ReqwestRequestBuilder> {
        let Request {
            body,
            method,
            route,
        } = self;

        let url = format!("{}{}", api_base.trim_end_matches('/'), route.path());
        let mut builder =
            client.request(method.reqwest_method(), Url::parse(&url).map_err(HttpError::Url)?);

        let mut headers = Headers::with_capacity(4);
        headers.insert(USER_AGENT, HeaderValue::from_static(constants::USER_AGENT));
        headers
            .insert(AUTHORIZATION, HeaderValue::from_str(token).map_err(HttpError::InvalidHeader)?);

        // Discord will return a 400: Bad Request response if we set the content type header,
        // but don't give a body.
        if body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        let length = body
            .as_ref()
            .map(|b| HeaderValue::try_from(b.len().to_string()))
            .transpose()
            .map_err(HttpError::InvalidHeader)?;
        headers.insert(CONTENT_LENGTH, length.unwrap_or_else(|| HeaderValue::from_static("0")));

        if let Some(bytes) = body {
            builder = builder.body(bytes);
        }

        Ok(builder.headers(headers))
    }
}
