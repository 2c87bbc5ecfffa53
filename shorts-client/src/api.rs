//! HTTP client for the generation backend
//!
//! One method per backend operation, no retry or caching. Non-success
//! responses become [`ClientError::Status`] with the body attached; transport
//! failures propagate as [`ClientError::Http`]. Retrying is the poller's job.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde_json::json;

use crate::error::{ClientError, Result};
use crate::project::{
    DogUploadResponse, Project, ProjectListResponse, PromptType, PromptTypesResponse, SceneImage,
};
use crate::variant::{DirectVideoForm, SceneStyleOptions, StageTrigger};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const API_URL_ENV: &str = "SHORTS_API_URL";

/// Where the backend lives. Read from `SHORTS_API_URL`, overridable by the
/// CLI.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        ApiConfig { base_url }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        ApiConfig {
            base_url: base_url.into(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        ApiClient {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Join a project-relative artifact path onto the backend origin for
    /// display or download.
    pub fn media_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::Status { status, body })
        }
    }

    async fn file_part(path: &Path) -> Result<Part> {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Part::bytes(bytes).file_name(name))
    }

    // --- Project CRUD ---------------------------------------------------

    /// Create a classic project from a description and optional content
    /// category. The returned project carries the initial non-terminal
    /// status.
    pub async fn create(&self, description: &str, content_type: Option<&str>) -> Result<Project> {
        let body = json!({
            "description": description,
            "content_type": content_type.unwrap_or("general"),
        });
        let response = self
            .http
            .post(self.url("/api/projects/create"))
            .json(&body)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Classic creation with an uploaded reference image, analyzed server
    /// side before prompt generation.
    pub async fn create_with_dog_upload(
        &self,
        description: &str,
        content_type: &str,
        file: &Path,
    ) -> Result<Project> {
        let form = Form::new()
            .text("description", description.to_string())
            .text("content_type", content_type.to_string())
            .part("file", Self::file_part(file).await?);
        let response = self
            .http
            .post(self.url("/api/projects/create-with-dog-upload"))
            .multipart(form)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Create a 4-step scene project. Uses multipart when a base reference
    /// image is supplied, plain JSON otherwise.
    pub async fn create_scene_project(
        &self,
        description: &str,
        style: &SceneStyleOptions,
        reference: Option<&Path>,
    ) -> Result<Project> {
        let url = self.url("/api/projects/create-new-workflow");
        let response = match reference {
            Some(path) => {
                let form = Form::new()
                    .text("description", description.to_string())
                    .text("style_options", serde_json::to_string(style).unwrap_or_default())
                    .part("file", Self::file_part(path).await?);
                self.http.post(url).multipart(form).send().await?
            }
            None => {
                let body = json!({
                    "description": description,
                    "style_options": style,
                });
                self.http.post(url).json(&body).send().await?
            }
        };
        Ok(Self::check(response).await?.json().await?)
    }

    /// Create a direct-video project from validated form input. Validation
    /// runs here as well so no caller can skip it.
    pub async fn create_direct_video(&self, input: &DirectVideoForm) -> Result<Project> {
        input.validate()?;
        let mut form = Form::new().text("description", input.description.clone());
        for (image, prompt) in input.images.iter().zip(&input.prompts) {
            form = form
                .part("files", Self::file_part(image).await?)
                .text("prompts", prompt.clone());
        }
        let response = self
            .http
            .post(self.url("/api/projects/create-direct-video"))
            .multipart(form)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Fetch the current snapshot. Fails if the id does not exist.
    pub async fn get(&self, project_id: &str) -> Result<Project> {
        let response = self
            .http
            .get(self.url(&format!("/api/projects/{project_id}")))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn list(&self) -> Result<Vec<Project>> {
        let response = self.http.get(self.url("/api/projects")).send().await?;
        let body: ProjectListResponse = Self::check(response).await?.json().await?;
        Ok(body.projects)
    }

    /// Delete a project and its generated artifacts. Not guaranteed
    /// idempotent by the backend contract.
    pub async fn delete(&self, project_id: &str) -> Result<()> {
        let response = self
            .http
            .delete(self.url(&format!("/api/projects/{project_id}")))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    // --- Pipeline triggers ----------------------------------------------

    /// Kick off the full pipeline. Callers do not await completion through
    /// this call; the poller is the completion observer.
    pub async fn generate_all(&self, project_id: &str) -> Result<()> {
        self.trigger(project_id, StageTrigger::GenerateAll).await
    }

    pub async fn generate_images(&self, project_id: &str) -> Result<Project> {
        self.trigger_returning(project_id, StageTrigger::GenerateImages)
            .await
    }

    pub async fn analyze_and_generate_video_prompts(&self, project_id: &str) -> Result<Project> {
        self.trigger_returning(project_id, StageTrigger::AnalyzeVideoPrompts)
            .await
    }

    pub async fn generate_videos(&self, project_id: &str) -> Result<Project> {
        self.trigger_returning(project_id, StageTrigger::GenerateVideos)
            .await
    }

    pub async fn execute_step(&self, project_id: &str, step: u8) -> Result<Project> {
        self.trigger_returning(project_id, StageTrigger::ExecuteStep(step))
            .await
    }

    pub async fn execute_complete_workflow(&self, project_id: &str) -> Result<Project> {
        self.trigger_returning(project_id, StageTrigger::ExecuteCompleteWorkflow)
            .await
    }

    pub async fn execute_direct_video(&self, project_id: &str) -> Result<Project> {
        self.trigger_returning(project_id, StageTrigger::ExecuteDirectVideo)
            .await
    }

    pub(crate) fn trigger_path(project_id: &str, trigger: StageTrigger) -> String {
        match trigger {
            StageTrigger::GenerateAll => format!("/api/projects/{project_id}/generate-all"),
            StageTrigger::GenerateImages => format!("/api/projects/{project_id}/generate-images"),
            StageTrigger::AnalyzeVideoPrompts => {
                format!("/api/projects/{project_id}/analyze-and-generate-video-prompts")
            }
            StageTrigger::GenerateVideos => format!("/api/projects/{project_id}/generate-videos"),
            StageTrigger::ExecuteStep(n) => format!("/api/projects/{project_id}/execute-step/{n}"),
            StageTrigger::ExecuteCompleteWorkflow => {
                format!("/api/projects/{project_id}/execute-complete-workflow")
            }
            StageTrigger::ExecuteDirectVideo => {
                format!("/api/projects/{project_id}/execute-direct-video")
            }
        }
    }

    /// Fire a trigger and discard the body; project state is observed through
    /// polling.
    pub async fn trigger(&self, project_id: &str, trigger: StageTrigger) -> Result<()> {
        let path = Self::trigger_path(project_id, trigger);
        let response = self.http.post(self.url(&path)).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn trigger_returning(
        &self,
        project_id: &str,
        trigger: StageTrigger,
    ) -> Result<Project> {
        let path = Self::trigger_path(project_id, trigger);
        let response = self.http.post(self.url(&path)).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    // --- Scene workflow extras ------------------------------------------

    /// Regenerate a single scene image, optionally with an edited prompt.
    pub async fn regenerate_image(
        &self,
        project_id: &str,
        scene_number: u32,
        prompt: Option<&str>,
    ) -> Result<SceneImage> {
        #[derive(serde::Deserialize)]
        struct RegenerateResponse {
            scene_image: SceneImage,
        }

        let body = json!({
            "scene_number": scene_number,
            "prompt": prompt,
        });
        let response = self
            .http
            .post(self.url(&format!("/api/projects/{project_id}/regenerate-image")))
            .json(&body)
            .send()
            .await?;
        let body: RegenerateResponse = Self::check(response).await?.json().await?;
        Ok(body.scene_image)
    }

    // --- Auxiliary endpoints --------------------------------------------

    /// Upload an image for standalone breed analysis.
    pub async fn upload_dog_image(&self, file: &Path) -> Result<DogUploadResponse> {
        let form = Form::new().part("file", Self::file_part(file).await?);
        let response = self
            .http
            .post(self.url("/api/upload-dog-image"))
            .multipart(form)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn list_prompt_types(&self) -> Result<Vec<PromptType>> {
        let response = self.http.get(self.url("/api/prompt-types")).send().await?;
        let body: PromptTypesResponse = Self::check(response).await?.json().await?;
        Ok(body.prompt_types)
    }

    pub async fn get_prompt_type(&self, type_id: &str) -> Result<PromptType> {
        let response = self
            .http
            .get(self.url(&format!("/api/prompt-types/{type_id}")))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new(ApiConfig::with_base_url("http://localhost:8000/"));
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/api/projects"), "http://localhost:8000/api/projects");
    }

    #[test]
    fn test_media_url_joins_relative_paths() {
        let client = ApiClient::new(ApiConfig::with_base_url("http://localhost:8000"));
        assert_eq!(
            client.media_url("/videos/scene_1.mp4"),
            "http://localhost:8000/videos/scene_1.mp4"
        );
        assert_eq!(
            client.media_url("videos/scene_1.mp4"),
            "http://localhost:8000/videos/scene_1.mp4"
        );
    }

    #[test]
    fn test_trigger_paths() {
        assert_eq!(
            ApiClient::trigger_path("p1", StageTrigger::GenerateAll),
            "/api/projects/p1/generate-all"
        );
        assert_eq!(
            ApiClient::trigger_path("p1", StageTrigger::AnalyzeVideoPrompts),
            "/api/projects/p1/analyze-and-generate-video-prompts"
        );
        assert_eq!(
            ApiClient::trigger_path("p1", StageTrigger::ExecuteStep(3)),
            "/api/projects/p1/execute-step/3"
        );
        assert_eq!(
            ApiClient::trigger_path("p1", StageTrigger::ExecuteDirectVideo),
            "/api/projects/p1/execute-direct-video"
        );
    }
}
