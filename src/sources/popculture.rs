//! Fonte de referências culturais (busca da Wikipedia).

use async_trait::async_trait;
use serde::Deserialize;

use super::base::{take_non_empty, HttpEndpoint, LexicalSource};
use crate::types::record::MAX_POPCULTURE;
use crate::types::{Category, CategoryResult, NormalizedWord};
use crate::WordscopeResult;

/// Resposta de `action=query&list=search`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub query: Option<SearchQuery>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: String,
}

/// Extrai até [`MAX_POPCULTURE`] títulos.
pub fn parse_titles(response: SearchResponse) -> Vec<String> {
    let hits = response.query.map(|q| q.search).unwrap_or_default();
    take_non_empty(hits.into_iter().map(|hit| hit.title), MAX_POPCULTURE)
}

/// Fonte de títulos de artigos que mencionam a palavra.
pub struct PopCultureSource {
    http: HttpEndpoint,
}

impl PopCultureSource {
    pub fn new(http: HttpEndpoint) -> Self {
        Self { http }
    }
}

#[async_trait]
impl LexicalSource for PopCultureSource {
    fn name(&self) -> &str {
        self.http.name()
    }

    fn category(&self) -> Category {
        Category::PopCulture
    }

    async fn try_fetch(&self, word: &NormalizedWord) -> WordscopeResult<CategoryResult> {
        let response: SearchResponse = self
            .http
            .get_json(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", word.as_str()),
                ("format", "json"),
                ("origin", "*"),
            ])
            .await?;

        Ok(CategoryResult::PopCulture(parse_titles(response)))
    }
}
