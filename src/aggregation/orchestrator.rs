//! Orquestrador de fontes.
//!
//! Dispara todas as fontes em paralelo, espera todas terminarem e monta
//! um único [`WordRecord`].

use std::sync::Arc;

use futures::future::join_all;
use tokio::time::Instant;

use crate::sources::{build_sources, LexicalSource};
use crate::types::config::Config;
use crate::types::{NormalizedWord, WordRecord};
use crate::{WordscopeError, WordscopeResult};

/// Orquestrador de consultas às fontes lexicais.
///
/// Responsável por:
/// - Chamar cada fonte exatamente uma vez por agregação
/// - Esperar todas as fontes (sem fail-fast)
/// - Atribuir cada resultado à sua categoria, independente da ordem de término
pub struct Orchestrator {
    sources: Vec<Arc<dyn LexicalSource>>,
}

impl Orchestrator {
    /// Cria um orquestrador com as fontes dadas.
    pub fn new(sources: Vec<Arc<dyn LexicalSource>>) -> Self {
        Self { sources }
    }

    /// Cria orquestrador com as fontes habilitadas no TOML.
    pub fn from_config(config: &Config) -> WordscopeResult<Self> {
        Ok(Self::new(build_sources(config)?))
    }

    /// Nomes das fontes, na ordem de registro.
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Número de fontes registradas.
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Agrega todas as fontes para `word`.
    ///
    /// Falhas das fontes viram categorias vazias e nunca interrompem a
    /// agregação. Só falha se uma tarefa escapar da própria fronteira de
    /// erro (pânico), caso em que retorna [`WordscopeError::Aggregation`].
    pub async fn aggregate(&self, word: &NormalizedWord) -> WordscopeResult<WordRecord> {
        let started = Instant::now();

        let handles: Vec<_> = self
            .sources
            .iter()
            .map(|source| {
                let source = Arc::clone(source);
                let word = word.clone();
                tokio::spawn(async move {
                    let started = Instant::now();
                    let result = source.fetch(&word).await;
                    tracing::debug!(
                        source = source.name(),
                        empty = result.is_empty(),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Source finished"
                    );
                    result
                })
            })
            .collect();

        let joined = join_all(handles).await;

        let mut record = WordRecord::empty(word.clone());
        for (source, outcome) in self.sources.iter().zip(joined) {
            match outcome {
                Ok(result) => record.apply(result),
                Err(e) => {
                    tracing::error!(
                        source = source.name(),
                        word = %word,
                        error = %e,
                        "Source task escaped its error boundary"
                    );
                    return Err(WordscopeError::Aggregation(format!(
                        "fonte '{}' abortou: {}",
                        source.name(),
                        e
                    )));
                }
            }
        }

        tracing::info!(
            word = %word,
            sources = self.sources.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Aggregation complete"
        );

        Ok(record)
    }
}
