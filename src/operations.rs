//! Declarative table of gateway operations
//!
//! Every endpoint is one row of [`OPERATIONS`]: an id, an HTTP method and a
//! path template. [`dispatch`] is the single routine that turns a row plus an
//! [`OperationRequest`] into a call on the [`RequestEnvelope`].
//!
//! Alias routes (`/batch` next to `/batches`, `/provisioning/keys` next to
//! `/management/keys`, the `/video/generations` and `/music/generations`
//! families) are kept as separate rows because the gateway serves all of them.

use crate::envelope::{Method, RequestEnvelope};
use crate::error::{SdkError, SdkResult};
use crate::logging::log_debug;
use bytes::Bytes;
use once_cell::sync::Lazy;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// Characters escaped inside a single path segment (everything but RFC 3986 unreserved)
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern"));

static BY_ID: Lazy<HashMap<&'static str, Operation>> = Lazy::new(|| {
    OPERATIONS
        .iter()
        .map(|spec| (spec.id, spec.operation))
        .collect()
});

/// Every operation the gateway exposes
///
/// Variant order matches [`OPERATIONS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CalculatePricing,
    CreateAnthropicMessage,
    CreateBatch,
    CreateBatchAlias,
    CreateChatCompletion,
    CreateEmbedding,
    CreateImage,
    CreateImageEdit,
    CreateKeyPlaceholder,
    CreateModeration,
    CreateOAuthClient,
    CreateOcr,
    CreateResponse,
    CreateSpeech,
    CreateTranscription,
    CreateTranslation,
    CreateVideo,
    CreateVideoAlias,
    DeleteOAuthClient,
    DeleteProvisioningKey,
    DeleteProvisioningKeyAlias,
    DeleteVideo,
    DeleteVideoAlias,
    GenerateMusic,
    GenerateMusicAlias,
    GetActivity,
    GetAnalytics,
    GetCredits,
    GetGeneration,
    GetKeyPlaceholder,
    GetMusicGeneration,
    GetMusicGenerationAlias,
    GetOAuthClient,
    GetProviderDerankStatus,
    GetProvisioningKey,
    GetProvisioningKeyAlias,
    GetVideo,
    GetVideoAlias,
    GetVideoContent,
    GetVideoContentAlias,
    Healthz,
    InvalidateGatewayKeyCache,
    ListEndpointsPlaceholder,
    ListFiles,
    ListKeysPlaceholder,
    ListModels,
    ListOAuthClients,
    ListOrganisations,
    ListPricingModels,
    ListProviders,
    ListProvisioningKeys,
    ListProvisioningKeysAlias,
    RegenerateOAuthClientSecret,
    RetrieveBatch,
    RetrieveBatchAlias,
    RetrieveFile,
    Root,
    UpdateOAuthClient,
    UpdateProvisioningKey,
    UpdateProvisioningKeyAlias,
    UploadFile,
}

/// One row of the operation table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationSpec {
    pub operation: Operation,
    /// Gateway operation id, e.g. `createChatCompletion`
    pub id: &'static str,
    pub method: Method,
    /// Path template; `{name}` marks a path parameter
    pub path: &'static str,
}

const fn op(
    operation: Operation,
    id: &'static str,
    method: Method,
    path: &'static str,
) -> OperationSpec {
    OperationSpec {
        operation,
        id,
        method,
        path,
    }
}

use self::Operation as O;
use crate::envelope::Method::{Delete, Get, Patch, Post};

pub static OPERATIONS: &[OperationSpec] = &[
    op(O::CalculatePricing, "calculatePricing", Post, "/pricing/calculate"),
    op(O::CreateAnthropicMessage, "createAnthropicMessage", Post, "/messages"),
    op(O::CreateBatch, "createBatch", Post, "/batches"),
    op(O::CreateBatchAlias, "createBatchAlias", Post, "/batch"),
    op(O::CreateChatCompletion, "createChatCompletion", Post, "/chat/completions"),
    op(O::CreateEmbedding, "createEmbedding", Post, "/embeddings"),
    op(O::CreateImage, "createImage", Post, "/images/generations"),
    op(O::CreateImageEdit, "createImageEdit", Post, "/images/edits"),
    op(O::CreateKeyPlaceholder, "createKeyPlaceholder", Post, "/keys"),
    op(O::CreateModeration, "createModeration", Post, "/moderations"),
    op(O::CreateOAuthClient, "createOAuthClient", Post, "/oauth-clients"),
    op(O::CreateOcr, "createOcr", Post, "/ocr"),
    op(O::CreateResponse, "createResponse", Post, "/responses"),
    op(O::CreateSpeech, "createSpeech", Post, "/audio/speech"),
    op(O::CreateTranscription, "createTranscription", Post, "/audio/transcriptions"),
    op(O::CreateTranslation, "createTranslation", Post, "/audio/translations"),
    op(O::CreateVideo, "createVideo", Post, "/videos"),
    op(O::CreateVideoAlias, "createVideoAlias", Post, "/video/generations"),
    op(O::DeleteOAuthClient, "deleteOAuthClient", Delete, "/oauth-clients/{client_id}"),
    op(O::DeleteProvisioningKey, "deleteProvisioningKey", Delete, "/management/keys/{id}"),
    op(
        O::DeleteProvisioningKeyAlias,
        "deleteProvisioningKeyAlias",
        Delete,
        "/provisioning/keys/{id}",
    ),
    op(O::DeleteVideo, "deleteVideo", Delete, "/videos/{video_id}"),
    op(O::DeleteVideoAlias, "deleteVideoAlias", Delete, "/video/generations/{video_id}"),
    op(O::GenerateMusic, "generateMusic", Post, "/music/generate"),
    op(O::GenerateMusicAlias, "generateMusicAlias", Post, "/music/generations"),
    op(O::GetActivity, "getActivity", Get, "/activity"),
    op(O::GetAnalytics, "getAnalytics", Post, "/analytics"),
    op(O::GetCredits, "getCredits", Get, "/credits"),
    op(O::GetGeneration, "getGeneration", Get, "/generations"),
    op(O::GetKeyPlaceholder, "getKeyPlaceholder", Get, "/key"),
    op(O::GetMusicGeneration, "getMusicGeneration", Get, "/music/generate/{music_id}"),
    op(O::GetMusicGenerationAlias, "getMusicGenerationAlias", Get, "/music/generations/{music_id}"),
    op(O::GetOAuthClient, "getOAuthClient", Get, "/oauth-clients/{client_id}"),
    op(
        O::GetProviderDerankStatus,
        "getProviderDerankStatus",
        Get,
        "/health/providers/{provider_id}/derank",
    ),
    op(O::GetProvisioningKey, "getProvisioningKey", Get, "/management/keys/{id}"),
    op(O::GetProvisioningKeyAlias, "getProvisioningKeyAlias", Get, "/provisioning/keys/{id}"),
    op(O::GetVideo, "getVideo", Get, "/videos/{video_id}"),
    op(O::GetVideoAlias, "getVideoAlias", Get, "/video/generations/{video_id}"),
    op(O::GetVideoContent, "getVideoContent", Get, "/videos/{video_id}/content"),
    op(
        O::GetVideoContentAlias,
        "getVideoContentAlias",
        Get,
        "/video/generations/{video_id}/content",
    ),
    op(O::Healthz, "healthz", Get, "/health"),
    op(O::InvalidateGatewayKeyCache, "invalidateGatewayKeyCache", Post, "/keys/{id}/invalidate"),
    op(O::ListEndpointsPlaceholder, "listEndpointsPlaceholder", Get, "/endpoints"),
    op(O::ListFiles, "listFiles", Get, "/files"),
    op(O::ListKeysPlaceholder, "listKeysPlaceholder", Get, "/keys"),
    op(O::ListModels, "listModels", Get, "/models"),
    op(O::ListOAuthClients, "listOAuthClients", Get, "/oauth-clients"),
    op(O::ListOrganisations, "listOrganisations", Get, "/organisations"),
    op(O::ListPricingModels, "listPricingModels", Get, "/pricing/models"),
    op(O::ListProviders, "listProviders", Get, "/providers"),
    op(O::ListProvisioningKeys, "listProvisioningKeys", Get, "/management/keys"),
    op(O::ListProvisioningKeysAlias, "listProvisioningKeysAlias", Get, "/provisioning/keys"),
    op(
        O::RegenerateOAuthClientSecret,
        "regenerateOAuthClientSecret",
        Post,
        "/oauth-clients/{client_id}/regenerate-secret",
    ),
    op(O::RetrieveBatch, "retrieveBatch", Get, "/batches/{batch_id}"),
    op(O::RetrieveBatchAlias, "retrieveBatchAlias", Get, "/batch/{id}"),
    op(O::RetrieveFile, "retrieveFile", Get, "/files/{file_id}"),
    op(O::Root, "root", Get, "/"),
    op(O::UpdateOAuthClient, "updateOAuthClient", Patch, "/oauth-clients/{client_id}"),
    op(O::UpdateProvisioningKey, "updateProvisioningKey", Patch, "/management/keys/{id}"),
    op(
        O::UpdateProvisioningKeyAlias,
        "updateProvisioningKeyAlias",
        Patch,
        "/provisioning/keys/{id}",
    ),
    op(O::UploadFile, "uploadFile", Post, "/files"),
];

impl Operation {
    /// Table row for this operation
    pub fn spec(self) -> &'static OperationSpec {
        &OPERATIONS[self as usize]
    }

    pub fn id(self) -> &'static str {
        self.spec().id
    }

    pub fn method(self) -> Method {
        self.spec().method
    }

    pub fn path_template(self) -> &'static str {
        self.spec().path
    }

    /// Look up an operation by its gateway id (e.g. `listModels`)
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::UnknownOperation`] if no row has this id.
    pub fn from_id(id: &str) -> SdkResult<Self> {
        BY_ID
            .get(id)
            .copied()
            .ok_or_else(|| SdkError::unknown_operation(id))
    }

    /// Names of the path parameters, in template order
    pub fn path_parameters(self) -> Vec<&'static str> {
        PLACEHOLDER
            .captures_iter(self.path_template())
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect()
    }

    /// Fill the path template; each value is escaped as one path segment
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::MissingPathParameter`] if a placeholder has no value.
    pub fn resolve_path(self, params: &HashMap<String, String>) -> SdkResult<String> {
        let template = self.path_template();
        let mut resolved = String::with_capacity(template.len());
        let mut last = 0;

        for captures in PLACEHOLDER.captures_iter(template) {
            let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            let value = params
                .get(name.as_str())
                .ok_or_else(|| SdkError::missing_path_parameter(self.id(), name.as_str()))?;
            resolved.push_str(&template[last..whole.start()]);
            resolved.extend(utf8_percent_encode(value, PATH_SEGMENT));
            last = whole.end();
        }
        resolved.push_str(&template[last..]);

        Ok(resolved)
    }
}

/// Endpoint-specific inputs for one operation call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationRequest {
    pub path_params: HashMap<String, String>,
    pub query: HashMap<String, String>,
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
}

impl OperationRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.insert(name.into(), value.into());
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    pub fn query_map(mut self, query: HashMap<String, String>) -> Self {
        self.query.extend(query);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Attach a JSON body; a value that serializes to `null` clears it
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::Serialization`] if `body` cannot be represented as JSON.
    pub fn json<T: Serialize + ?Sized>(self, body: &T) -> SdkResult<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| SdkError::serialization("Failed to encode operation body", e))?;
        Ok(self.body(value))
    }

    /// Attach a body that is already JSON; `Value::Null` clears it
    pub fn body(mut self, body: impl Into<Value>) -> Self {
        self.body = Some(body.into()).filter(|v| !v.is_null());
        self
    }
}

/// Resolve `operation`'s path and run it through the envelope
///
/// # Errors
///
/// Any error from [`Operation::resolve_path`] or [`RequestEnvelope::execute`].
pub async fn dispatch(
    envelope: &RequestEnvelope,
    operation: Operation,
    request: &OperationRequest,
) -> SdkResult<Bytes> {
    let path = operation.resolve_path(&request.path_params)?;

    log_debug!(
        operation = operation.id(),
        method = %operation.method(),
        path = %path,
        "Dispatching gateway operation"
    );

    envelope
        .execute(
            operation.method(),
            &path,
            &request.query,
            &request.headers,
            request.body.as_ref().filter(|v| !v.is_null()),
        )
        .await
}
