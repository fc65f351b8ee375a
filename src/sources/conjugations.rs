//! Fonte de termos relacionados (gatilhos Datamuse).

use async_trait::async_trait;

use super::base::{HttpEndpoint, LexicalSource};
use super::datamuse::{related_words, Relation};
use crate::types::record::MAX_CONJUGATIONS;
use crate::types::{Category, CategoryResult, NormalizedWord};
use crate::WordscopeResult;

/// Fonte de termos associados à palavra.
pub struct ConjugationsSource {
    http: HttpEndpoint,
}

impl ConjugationsSource {
    pub fn new(http: HttpEndpoint) -> Self {
        Self { http }
    }
}

#[async_trait]
impl LexicalSource for ConjugationsSource {
    fn name(&self) -> &str {
        self.http.name()
    }

    fn category(&self) -> Category {
        Category::Conjugations
    }

    async fn try_fetch(&self, word: &NormalizedWord) -> WordscopeResult<CategoryResult> {
        let terms = related_words(&self.http, Relation::Trigger, word, MAX_CONJUGATIONS).await?;
        Ok(CategoryResult::Conjugations(terms))
    }
}
