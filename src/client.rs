use crate::config::ClientConfig;
use crate::decode::decode;
use crate::document::Document;
use crate::envelope::RequestEnvelope;
use crate::error::{SdkError, SdkResult};
use crate::logging::log_debug;
use crate::models::{
    BatchResponse, ChatCompletionsRequest, ChatCompletionsResponse, EmbeddingsRequest,
    EmbeddingsResponse, ModelsListResponse, ModerationsRequest, ModerationsResponse,
};
use crate::operations::{dispatch, Operation, OperationRequest};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// Client for the AI Stats gateway
///
/// Wraps a [`RequestEnvelope`] carrying `Authorization: Bearer <key>` and
/// `User-Agent` as default headers. Every operation is reachable through
/// [`call`](Self::call); the named methods cover the common endpoints.
///
/// Cloning shares the connection pool. Header changes made through
/// [`set_header`](Self::set_header) only affect the clone they are made on.
#[derive(Debug, Clone)]
pub struct AiStats {
    envelope: RequestEnvelope,
}

impl AiStats {
    /// Create a client from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::Configuration`] if the configuration is invalid or
    /// the transport cannot be built.
    pub fn new(config: ClientConfig) -> SdkResult<Self> {
        config.validate()?;
        let http = config.build_http_client()?;

        let mut envelope = RequestEnvelope::new(config.base_url.clone(), http);
        if let Some(api_key) = config.api_key.as_deref() {
            envelope.set_header("Authorization", format!("Bearer {}", api_key.trim()));
        }
        envelope.set_header("User-Agent", config.user_agent.clone());
        for (name, value) in &config.default_headers {
            envelope.set_header(name.clone(), value.clone());
        }

        log_debug!(
            base_url = %envelope.base_url(),
            default_headers = envelope.headers().len(),
            "AI Stats client created"
        );

        Ok(Self { envelope })
    }

    /// Create a client from `AI_STATS_*` environment variables
    pub fn from_env() -> SdkResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Wrap an envelope that is already configured
    pub fn from_envelope(envelope: RequestEnvelope) -> Self {
        Self { envelope }
    }

    pub fn envelope(&self) -> &RequestEnvelope {
        &self.envelope
    }

    /// Set a default header sent on every later call
    pub fn set_header(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.envelope.set_header(name, value)
    }

    pub fn remove_header(&mut self, name: &str) -> Option<String> {
        self.envelope.remove_header(name)
    }

    // =========================================================================
    // Generic operation calls
    // =========================================================================

    /// Run any operation and decode the response as a [`Document`]
    pub async fn call(
        &self,
        operation: Operation,
        request: &OperationRequest,
    ) -> SdkResult<Document> {
        self.call_as(operation, request).await
    }

    /// Run any operation and decode the response into `T`
    pub async fn call_as<T>(&self, operation: Operation, request: &OperationRequest) -> SdkResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let bytes = self.call_raw(operation, request).await?;
        decode(&bytes)
    }

    /// Run any operation and return the undecoded response body
    pub async fn call_raw(
        &self,
        operation: Operation,
        request: &OperationRequest,
    ) -> SdkResult<Bytes> {
        dispatch(&self.envelope, operation, request).await
    }

    /// Run an operation named by its gateway id, e.g. `"listModels"`
    pub async fn call_by_id(&self, id: &str, request: &OperationRequest) -> SdkResult<Document> {
        self.call(Operation::from_id(id)?, request).await
    }

    // =========================================================================
    // Generation
    // =========================================================================

    /// Non-streaming chat completion; `stream` is always sent as `false`
    pub async fn generate_text(
        &self,
        request: &ChatCompletionsRequest,
    ) -> SdkResult<ChatCompletionsResponse> {
        let mut body = serde_json::to_value(request)
            .map_err(|e| SdkError::serialization("Failed to encode chat request", e))?;
        if let Value::Object(map) = &mut body {
            map.insert("stream".to_string(), Value::Bool(false));
        }
        self.call_as(
            Operation::CreateChatCompletion,
            &OperationRequest::new().body(body),
        )
        .await
    }

    /// `POST /responses`
    pub async fn generate_response<B: Serialize + ?Sized>(&self, body: &B) -> SdkResult<Document> {
        self.post(Operation::CreateResponse, body).await
    }

    /// Anthropic-style `POST /messages`
    pub async fn generate_message<B: Serialize + ?Sized>(&self, body: &B) -> SdkResult<Document> {
        self.post(Operation::CreateAnthropicMessage, body).await
    }

    pub async fn generate_embedding(
        &self,
        request: &EmbeddingsRequest,
    ) -> SdkResult<EmbeddingsResponse> {
        self.post(Operation::CreateEmbedding, request).await
    }

    pub async fn generate_moderation(
        &self,
        request: &ModerationsRequest,
    ) -> SdkResult<ModerationsResponse> {
        self.post(Operation::CreateModeration, request).await
    }

    pub async fn generate_image<B: Serialize + ?Sized>(&self, body: &B) -> SdkResult<Document> {
        self.post(Operation::CreateImage, body).await
    }

    pub async fn edit_image<B: Serialize + ?Sized>(&self, body: &B) -> SdkResult<Document> {
        self.post(Operation::CreateImageEdit, body).await
    }

    /// Text to speech; the response is audio, returned as raw bytes
    pub async fn generate_speech<B: Serialize + ?Sized>(&self, body: &B) -> SdkResult<Bytes> {
        let request = OperationRequest::new().json(body)?;
        self.call_raw(Operation::CreateSpeech, &request).await
    }

    pub async fn transcribe<B: Serialize + ?Sized>(&self, body: &B) -> SdkResult<Document> {
        self.post(Operation::CreateTranscription, body).await
    }

    pub async fn translate<B: Serialize + ?Sized>(&self, body: &B) -> SdkResult<Document> {
        self.post(Operation::CreateTranslation, body).await
    }

    pub async fn generate_ocr<B: Serialize + ?Sized>(&self, body: &B) -> SdkResult<Document> {
        self.post(Operation::CreateOcr, body).await
    }

    pub async fn generate_music<B: Serialize + ?Sized>(&self, body: &B) -> SdkResult<Document> {
        self.post(Operation::GenerateMusic, body).await
    }

    pub async fn get_music(&self, music_id: &str) -> SdkResult<Document> {
        self.with_path_param(Operation::GetMusicGeneration, "music_id", music_id).await
    }

    // =========================================================================
    // Video
    // =========================================================================

    pub async fn generate_video<B: Serialize + ?Sized>(&self, body: &B) -> SdkResult<Document> {
        self.post(Operation::CreateVideo, body).await
    }

    pub async fn get_video(&self, video_id: &str) -> SdkResult<Document> {
        self.with_path_param(Operation::GetVideo, "video_id", video_id).await
    }

    /// Rendered video file
    pub async fn get_video_content(&self, video_id: &str) -> SdkResult<Bytes> {
        let request = OperationRequest::new().path_param("video_id", video_id);
        self.call_raw(Operation::GetVideoContent, &request).await
    }

    pub async fn delete_video(&self, video_id: &str) -> SdkResult<Document> {
        self.with_path_param(Operation::DeleteVideo, "video_id", video_id).await
    }

    // =========================================================================
    // Batches and files
    // =========================================================================

    pub async fn create_batch<B: Serialize + ?Sized>(&self, body: &B) -> SdkResult<BatchResponse> {
        self.post(Operation::CreateBatch, body).await
    }

    pub async fn get_batch(&self, batch_id: &str) -> SdkResult<BatchResponse> {
        let request = OperationRequest::new().path_param("batch_id", batch_id);
        self.call_as(Operation::RetrieveBatch, &request).await
    }

    pub async fn list_files(&self) -> SdkResult<Document> {
        self.call(Operation::ListFiles, &OperationRequest::new()).await
    }

    pub async fn get_file(&self, file_id: &str) -> SdkResult<Document> {
        self.with_path_param(Operation::RetrieveFile, "file_id", file_id).await
    }

    pub async fn upload_file<B: Serialize + ?Sized>(&self, body: &B) -> SdkResult<Document> {
        self.post(Operation::UploadFile, body).await
    }

    // =========================================================================
    // Catalogue and account
    // =========================================================================

    /// `GET /models`; `query` carries filters such as `limit`, `offset`, `organisation`
    pub async fn get_models(
        &self,
        query: HashMap<String, String>,
    ) -> SdkResult<ModelsListResponse> {
        let request = OperationRequest::new().query_map(query);
        self.call_as(Operation::ListModels, &request).await
    }

    pub async fn list_providers(&self, query: HashMap<String, String>) -> SdkResult<Document> {
        self.list(Operation::ListProviders, query).await
    }

    pub async fn list_organisations(&self, query: HashMap<String, String>) -> SdkResult<Document> {
        self.list(Operation::ListOrganisations, query).await
    }

    pub async fn get_credits(&self) -> SdkResult<Document> {
        self.call(Operation::GetCredits, &OperationRequest::new()).await
    }

    pub async fn get_activity(&self, query: HashMap<String, String>) -> SdkResult<Document> {
        self.list(Operation::GetActivity, query).await
    }

    /// Look up one generation by id (`GET /generations?id=...`)
    pub async fn get_generation(&self, id: &str) -> SdkResult<Document> {
        let request = OperationRequest::new().query("id", id);
        self.call(Operation::GetGeneration, &request).await
    }

    pub async fn get_health(&self) -> SdkResult<Document> {
        self.call(Operation::Healthz, &OperationRequest::new()).await
    }

    pub async fn get_provider_derank_status(&self, provider_id: &str) -> SdkResult<Document> {
        self.with_path_param(Operation::GetProviderDerankStatus, "provider_id", provider_id).await
    }

    pub async fn list_pricing_models(&self, query: HashMap<String, String>) -> SdkResult<Document> {
        self.list(Operation::ListPricingModels, query).await
    }

    pub async fn calculate_pricing<B: Serialize + ?Sized>(&self, body: &B) -> SdkResult<Document> {
        self.post(Operation::CalculatePricing, body).await
    }

    pub async fn get_analytics<B: Serialize + ?Sized>(&self, body: &B) -> SdkResult<Document> {
        self.post(Operation::GetAnalytics, body).await
    }

    // =========================================================================
    // Provisioning keys
    // =========================================================================

    pub async fn list_provisioning_keys(
        &self,
        query: HashMap<String, String>,
    ) -> SdkResult<Document> {
        self.list(Operation::ListProvisioningKeys, query).await
    }

    pub async fn get_provisioning_key(&self, id: &str) -> SdkResult<Document> {
        self.with_path_param(Operation::GetProvisioningKey, "id", id).await
    }

    pub async fn update_provisioning_key<B: Serialize + ?Sized>(
        &self,
        id: &str,
        body: &B,
    ) -> SdkResult<Document> {
        let request = OperationRequest::new().path_param("id", id).json(body)?;
        self.call(Operation::UpdateProvisioningKey, &request).await
    }

    pub async fn delete_provisioning_key(&self, id: &str) -> SdkResult<Document> {
        self.with_path_param(Operation::DeleteProvisioningKey, "id", id).await
    }

    // =========================================================================
    // OAuth clients
    // =========================================================================

    pub async fn list_oauth_clients(&self) -> SdkResult<Document> {
        self.call(Operation::ListOAuthClients, &OperationRequest::new()).await
    }

    pub async fn create_oauth_client<B: Serialize + ?Sized>(
        &self,
        body: &B,
    ) -> SdkResult<Document> {
        self.post(Operation::CreateOAuthClient, body).await
    }

    pub async fn get_oauth_client(&self, client_id: &str) -> SdkResult<Document> {
        self.with_path_param(Operation::GetOAuthClient, "client_id", client_id).await
    }

    pub async fn update_oauth_client<B: Serialize + ?Sized>(
        &self,
        client_id: &str,
        body: &B,
    ) -> SdkResult<Document> {
        let request = OperationRequest::new()
            .path_param("client_id", client_id)
            .json(body)?;
        self.call(Operation::UpdateOAuthClient, &request).await
    }

    pub async fn delete_oauth_client(&self, client_id: &str) -> SdkResult<Document> {
        self.with_path_param(Operation::DeleteOAuthClient, "client_id", client_id).await
    }

    pub async fn regenerate_oauth_client_secret(&self, client_id: &str) -> SdkResult<Document> {
        self.with_path_param(Operation::RegenerateOAuthClientSecret, "client_id", client_id).await
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    async fn post<B, T>(&self, operation: Operation, body: &B) -> SdkResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        let request = OperationRequest::new().json(body)?;
        self.call_as(operation, &request).await
    }

    /// Body-less call with a single path parameter, whatever the method
    async fn with_path_param(
        &self,
        operation: Operation,
        name: &str,
        value: &str,
    ) -> SdkResult<Document> {
        let request = OperationRequest::new().path_param(name, value);
        self.call(operation, &request).await
    }

    async fn list(
        &self,
        operation: Operation,
        query: HashMap<String, String>,
    ) -> SdkResult<Document> {
        let request = OperationRequest::new().query_map(query);
        self.call(operation, &request).await
    }
}
