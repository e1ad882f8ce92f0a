//! Offline character provider backed by the per-theme templates.

use async_trait::async_trait;
use fabula_core::CharacterDraft;
use fabula_error::FabulaResult;
use fabula_interface::{CharacterRequest, GenerationProvider};
use tracing::{debug, instrument};

/// Returns the fixed archetype cast for the request's theme.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateCharacterProvider;

#[async_trait]
impl GenerationProvider for TemplateCharacterProvider {
    type Request = CharacterRequest;
    type Output = Vec<CharacterDraft>;

    fn name(&self) -> &str {
        "templates"
    }

    #[instrument(skip(self, request), fields(provider = "templates", theme = %request.theme))]
    async fn generate(&self, request: &CharacterRequest) -> FabulaResult<Vec<CharacterDraft>> {
        let cast = request.theme.character_templates();
        debug!(count = cast.len(), "Using template characters");
        Ok(cast)
    }
}
