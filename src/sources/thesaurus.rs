//! Fonte de sinônimos e antônimos (Datamuse).

use async_trait::async_trait;

use super::base::{HttpEndpoint, LexicalSource};
use super::datamuse::{related_words, Relation};
use crate::types::record::MAX_THESAURUS;
use crate::types::{Category, CategoryResult, NormalizedWord};
use crate::WordscopeResult;

/// Fonte de sinônimos e antônimos.
///
/// As duas consultas correm em paralelo e falham de forma independente:
/// se só os antônimos falharem, os sinônimos continuam no resultado.
pub struct ThesaurusSource {
    http: HttpEndpoint,
}

impl ThesaurusSource {
    pub fn new(http: HttpEndpoint) -> Self {
        Self { http }
    }

    async fn relation_or_empty(&self, relation: Relation, word: &NormalizedWord) -> Vec<String> {
        match related_words(&self.http, relation, word, MAX_THESAURUS).await {
            Ok(words) => words,
            Err(e) => {
                tracing::debug!(
                    source = self.name(),
                    relation = relation.param(),
                    error = %e,
                    "Thesaurus relation failed"
                );
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl LexicalSource for ThesaurusSource {
    fn name(&self) -> &str {
        self.http.name()
    }

    fn category(&self) -> Category {
        Category::Thesaurus
    }

    async fn try_fetch(&self, word: &NormalizedWord) -> WordscopeResult<CategoryResult> {
        let (synonyms, antonyms) = tokio::join!(
            self.relation_or_empty(Relation::Synonym, word),
            self.relation_or_empty(Relation::Antonym, word),
        );

        Ok(CategoryResult::Thesaurus { synonyms, antonyms })
    }
}
