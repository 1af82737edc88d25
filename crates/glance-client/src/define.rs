//! Dictionary lookup.

use glance_core::entities::{DefinitionEntry, WordDefinition};
use serde::{Deserialize, Serialize};

use crate::http::{check_response, json};
use crate::{ClientError, GlanceClient};

#[derive(Serialize)]
struct DefineRequest<'a> {
    word: &'a str,
}

#[derive(Debug, Deserialize)]
struct DefineResponse {
    word: String,
    #[serde(default)]
    suggested: String,
    #[serde(default)]
    results: Vec<DefinitionRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DefinitionRow {
    #[serde(default)]
    part_of_speech: String,
    #[serde(default)]
    definition: String,
    #[serde(default)]
    example: String,
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}

impl From<DefineResponse> for WordDefinition {
    fn from(data: DefineResponse) -> Self {
        Self {
            word: data.word,
            suggested: non_empty(data.suggested),
            results: data
                .results
                .into_iter()
                .map(|row| DefinitionEntry {
                    part_of_speech: row.part_of_speech,
                    definition: row.definition,
                    example: non_empty(row.example),
                })
                .collect(),
        }
    }
}

impl GlanceClient {
    /// Look up a word. The backend spell-corrects before looking up, and
    /// reports the correction in `suggested`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidInput`] for a blank word, and
    /// [`ClientError::Api`] with status 404 when no definition exists.
    pub async fn define(&self, word: &str) -> Result<WordDefinition, ClientError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(ClientError::InvalidInput("word is empty".into()));
        }
        let resp = check_response(
            self.http
                .post(self.url("/api/define"))
                .json(&DefineRequest { word })
                .send()
                .await?,
        )
        .await?;

        let data: DefineResponse = json(resp).await?;
        Ok(data.into())
    }
}
