//! Compiles routes into request descriptors.

use std::collections::BTreeMap;
use std::sync::Arc;
use url::Url;

use super::definition::{Encoding, Route};
use super::environment::Environment;
use super::error::RouteError;
use super::request::{
    RequestDescriptor, APP_ID, AUTHORIZATION, CONTENT_TYPE, JSON_CONTENT_TYPE,
};
use crate::log::Logger;
use crate::settings::{Credentials, TokenStage};
use crate::{log_info, log_warn};

/// A request built with a freshly staged token.
///
/// The stage must be committed or rolled back once the request finishes.
#[derive(Debug)]
pub struct StagedRequest {
    pub request: RequestDescriptor,
    pub stage: TokenStage,
}

/// Builds [`RequestDescriptor`]s against one environment.
pub struct RequestBuilder {
    environment: Environment,
    app_id: Option<String>,
    credentials: Arc<Credentials>,
    logger: Arc<dyn Logger>,
}

impl RequestBuilder {
    /// # Arguments
    ///
    /// * `environment` - Supplies the API base URL
    /// * `app_id` - Sent as `App-ID` on authenticated routes
    /// * `credentials` - Source of the `Authorization` token
    /// * `logger` - Receives the built URL
    pub fn new(
        environment: Environment,
        app_id: Option<String>,
        credentials: Arc<Credentials>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            environment,
            app_id: app_id.filter(|id| !id.is_empty()),
            credentials,
            logger,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn credentials(&self) -> &Arc<Credentials> {
        &self.credentials
    }

    /// Build `route` using the persisted token.
    pub fn build(&self, route: &Route) -> Result<RequestDescriptor, RouteError> {
        let token = if route.requires_auth() {
            self.credentials.resolved_token()
        } else {
            None
        };
        self.build_inner(route, token.as_deref())
    }

    /// Persist `token` as the active token, then build `route` with it.
    ///
    /// On a build failure the stage is rolled back before returning.
    pub fn build_with_token(&self, route: &Route, token: &str) -> Result<StagedRequest, RouteError> {
        let stage = self.credentials.stage(token)?;

        let header_token = if !route.requires_auth() {
            None
        } else if stage.token().is_empty() {
            self.credentials.resolved_token()
        } else {
            Some(stage.token().to_string())
        };

        match self.build_inner(route, header_token.as_deref()) {
            Ok(request) => Ok(StagedRequest { request, stage }),
            Err(e) => {
                log_warn!(self.logger, "request build failed, restoring token: {}", e);
                self.credentials.rollback(&stage);
                Err(e)
            }
        }
    }

    fn build_inner(&self, route: &Route, token: Option<&str>) -> Result<RequestDescriptor, RouteError> {
        let url = self.endpoint(route)?;

        let mut headers = BTreeMap::new();
        if route.requires_auth() {
            if let Some(app_id) = &self.app_id {
                headers.insert(APP_ID.to_string(), app_id.clone());
            }
            if let Some(token) = token.filter(|t| !t.is_empty()) {
                headers.insert(AUTHORIZATION.to_string(), token.to_string());
            }
        }

        let body = match (route.encoding(), route.attributes()) {
            (Encoding::Json, Some(attributes)) => {
                headers.insert(CONTENT_TYPE.to_string(), JSON_CONTENT_TYPE.to_string());
                Some(serde_json::to_vec(attributes)?)
            }
            _ => None,
        };

        log_info!(self.logger, "URL: {}", url);
        Ok(RequestDescriptor::new(url, route.method(), headers, body))
    }

    fn endpoint(&self, route: &Route) -> Result<Url, RouteError> {
        let base = self.environment.base_url();
        let invalid = |reason: String| RouteError::InvalidUrl {
            url: base.to_string(),
            reason,
        };

        let mut url = Url::parse(base).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("URL cannot take path segments".to_string()))?
            .pop_if_empty()
            .push(route.path());
        Ok(url)
    }
}
