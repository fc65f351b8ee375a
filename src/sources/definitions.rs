//! Fonte de definições (dictionaryapi.dev).

use async_trait::async_trait;
use serde::Deserialize;

use super::base::{HttpEndpoint, LexicalSource};
use crate::types::record::MAX_DEFINITIONS;
use crate::types::{Category, CategoryResult, Definition, NormalizedWord};
use crate::WordscopeResult;

/// Entrada de dicionário retornada pelo provedor.
#[derive(Debug, Deserialize)]
pub struct DictionaryEntry {
    #[serde(default)]
    pub meanings: Vec<Meaning>,
}

#[derive(Debug, Deserialize)]
pub struct Meaning {
    #[serde(default)]
    pub definitions: Vec<MeaningDefinition>,
}

#[derive(Debug, Deserialize)]
pub struct MeaningDefinition {
    #[serde(default)]
    pub definition: String,
}

/// Extrai até [`MAX_DEFINITIONS`] definições, na ordem do provedor.
///
/// Definições em branco contam para o limite e são descartadas depois.
pub fn parse_definitions(entries: Vec<DictionaryEntry>) -> Vec<Definition> {
    entries
        .into_iter()
        .flat_map(|entry| entry.meanings)
        .flat_map(|meaning| meaning.definitions)
        .take(MAX_DEFINITIONS)
        .map(|d| d.definition.trim().to_string())
        .filter(|text| !text.is_empty())
        .map(Definition::new)
        .collect()
}

/// Fonte de definições.
///
/// Consulta `GET {endpoint}/{palavra}`. Palavra desconhecida responde 404,
/// o que resulta em lista vazia.
pub struct DefinitionsSource {
    http: HttpEndpoint,
}

impl DefinitionsSource {
    pub fn new(http: HttpEndpoint) -> Self {
        Self { http }
    }
}

#[async_trait]
impl LexicalSource for DefinitionsSource {
    fn name(&self) -> &str {
        self.http.name()
    }

    fn category(&self) -> Category {
        Category::Definitions
    }

    async fn try_fetch(&self, word: &NormalizedWord) -> WordscopeResult<CategoryResult> {
        let url = self.http.url_with_segment(word.as_str())?;
        let entries: Vec<DictionaryEntry> = self.http.get_json_url(url, &[]).await?;
        Ok(CategoryResult::Definitions(parse_definitions(entries)))
    }
}
