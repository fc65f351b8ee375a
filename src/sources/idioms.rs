//! Fonte de expressões idiomáticas (frases Datamuse).

use async_trait::async_trait;

use super::base::{HttpEndpoint, LexicalSource};
use super::datamuse::{related_words, Relation};
use crate::types::record::MAX_IDIOMS;
use crate::types::{Category, CategoryResult, NormalizedWord};
use crate::WordscopeResult;

/// Fonte de expressões que contêm a palavra.
pub struct IdiomsSource {
    http: HttpEndpoint,
}

impl IdiomsSource {
    pub fn new(http: HttpEndpoint) -> Self {
        Self { http }
    }
}

/// Datamuse separa as palavras de uma frase com `_`.
pub fn humanize_phrase(phrase: &str) -> String {
    phrase.replace('_', " ")
}

#[async_trait]
impl LexicalSource for IdiomsSource {
    fn name(&self) -> &str {
        self.http.name()
    }

    fn category(&self) -> Category {
        Category::Idioms
    }

    async fn try_fetch(&self, word: &NormalizedWord) -> WordscopeResult<CategoryResult> {
        let phrases = related_words(&self.http, Relation::Phrase, word, MAX_IDIOMS).await?;
        Ok(CategoryResult::Idioms(
            phrases.iter().map(|p| humanize_phrase(p)).collect(),
        ))
    }
}
