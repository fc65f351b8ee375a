//! Fonte de rimas (Datamuse).

use async_trait::async_trait;

use super::base::{HttpEndpoint, LexicalSource};
use super::datamuse::{related_words, Relation};
use crate::types::record::MAX_RHYMES;
use crate::types::{Category, CategoryResult, NormalizedWord};
use crate::WordscopeResult;

/// Fonte de rimas perfeitas.
pub struct RhymesSource {
    http: HttpEndpoint,
}

impl RhymesSource {
    pub fn new(http: HttpEndpoint) -> Self {
        Self { http }
    }
}

#[async_trait]
impl LexicalSource for RhymesSource {
    fn name(&self) -> &str {
        self.http.name()
    }

    fn category(&self) -> Category {
        Category::Rhymes
    }

    async fn try_fetch(&self, word: &NormalizedWord) -> WordscopeResult<CategoryResult> {
        let rhymes = related_words(&self.http, Relation::Rhyme, word, MAX_RHYMES).await?;
        Ok(CategoryResult::Rhymes(rhymes))
    }
}
