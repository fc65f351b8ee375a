//! Serviço de consulta: normalização, cache e agregação.

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;
use tracing::Instrument;
use uuid::Uuid;

use crate::aggregation::Orchestrator;
use crate::cache::{CacheStats, WordCache};
use crate::types::config::Config;
use crate::types::{NormalizedWord, WordRecord};
use crate::{WordscopeError, WordscopeResult};

/// Agregação em andamento, compartilhada entre requisições da mesma palavra.
type SharedLookup = Shared<BoxFuture<'static, Result<Arc<WordRecord>, String>>>;

type InFlight = Arc<Mutex<HashMap<NormalizedWord, SharedLookup>>>;

/// Ponto de entrada do motor.
///
/// Normaliza a palavra, consulta o cache e, em caso de miss, agrega as
/// fontes e grava o resultado. Com coalescência ligada, misses
/// simultâneos da mesma palavra compartilham uma única agregação.
pub struct QueryService {
    orchestrator: Arc<Orchestrator>,
    cache: Arc<Mutex<WordCache>>,
    in_flight: InFlight,
    coalesce: bool,
}

impl QueryService {
    /// Cria um novo serviço com coalescência ligada.
    pub fn new(orchestrator: Orchestrator, cache: WordCache) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            cache: Arc::new(Mutex::new(cache)),
            in_flight: Arc::new(Mutex::new(HashMap::new())),
            coalesce: true,
        }
    }

    /// Cria serviço a partir da configuração do TOML.
    pub fn from_config(config: &Config) -> WordscopeResult<Self> {
        let orchestrator = Orchestrator::from_config(config)?;
        let cache = WordCache::new(config.cache.capacity, config.cache.ttl());
        Ok(Self::new(orchestrator, cache).with_coalescing(config.cache.coalesce_requests))
    }

    /// Liga ou desliga a coalescência de misses simultâneos.
    #[must_use]
    pub fn with_coalescing(mut self, enabled: bool) -> Self {
        self.coalesce = enabled;
        self
    }

    /// Busca tudo o que se sabe sobre `raw`.
    ///
    /// Retorna [`WordscopeError::EmptyWord`] se a entrada ficar vazia após
    /// a normalização; nesse caso nada é consultado nem gravado.
    pub async fn query(&self, raw: &str) -> WordscopeResult<Arc<WordRecord>> {
        let word = NormalizedWord::parse(raw)?;
        let span = tracing::info_span!("query", request_id = %Uuid::new_v4(), word = %word);
        self.lookup(word).instrument(span).await
    }

    async fn lookup(&self, word: NormalizedWord) -> WordscopeResult<Arc<WordRecord>> {
        if let Some(record) = self.cache.lock().await.get(&word) {
            tracing::debug!("Cache hit");
            return Ok(record);
        }

        tracing::debug!("Cache miss");

        if self.coalesce {
            self.aggregate_coalesced(word).await
        } else {
            aggregate_and_store(&self.orchestrator, &self.cache, word).await
        }
    }

    async fn aggregate_coalesced(&self, word: NormalizedWord) -> WordscopeResult<Arc<WordRecord>> {
        let lookup = {
            let mut in_flight = self.in_flight.lock().await;
            if let Some(existing) = in_flight.get(&word).cloned() {
                tracing::debug!("Joining in-flight aggregation");
                existing
            } else {
                // A agregação anterior pode ter terminado entre o miss e este ponto
                if let Some(record) = self.cache.lock().await.peek(&word) {
                    return Ok(record);
                }
                let lookup = self.start_lookup(word.clone());
                in_flight.insert(word, lookup.clone());
                lookup
            }
        };

        lookup.await.map_err(WordscopeError::Aggregation)
    }

    /// Cria a agregação compartilhada.
    ///
    /// A agregação corre em uma tarefa própria, então termina mesmo que
    /// todos os chamadores desistam. Ela grava no cache e só depois remove
    /// o marcador, de modo que quem chegar em seguida encontra o cache
    /// preenchido. Deve ser chamada com o lock de `in_flight` já tomado.
    fn start_lookup(&self, word: NormalizedWord) -> SharedLookup {
        let orchestrator = Arc::clone(&self.orchestrator);
        let cache = Arc::clone(&self.cache);
        let in_flight = Arc::clone(&self.in_flight);

        let task = tokio::spawn(
            async move {
                let outcome =
                    AssertUnwindSafe(aggregate_and_store(&orchestrator, &cache, word.clone()))
                        .catch_unwind()
                        .await;
                in_flight.lock().await.remove(&word);

                match outcome {
                    Ok(result) => result.map_err(|e| match e {
                        WordscopeError::Aggregation(msg) => msg,
                        other => other.to_string(),
                    }),
                    Err(_) => Err(format!("agregação de '{}' entrou em pânico", word)),
                }
            }
            .in_current_span(),
        );

        async move {
            match task.await {
                Ok(outcome) => outcome,
                Err(e) => Err(format!("tarefa de agregação abortou: {}", e)),
            }
        }
        .boxed()
        .shared()
    }

    /// Remove uma palavra do cache.
    pub async fn invalidate(&self, raw: &str) -> WordscopeResult<()> {
        let word = NormalizedWord::parse(raw)?;
        self.cache.lock().await.invalidate(&word);
        Ok(())
    }

    /// Limpa todo o cache.
    pub async fn clear_cache(&self) {
        self.cache.lock().await.clear();
    }

    /// Retorna estatísticas do cache.
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.lock().await.stats()
    }

    /// Verifica se `raw` tem entrada válida no cache.
    pub async fn is_cached(&self, raw: &str) -> bool {
        match NormalizedWord::parse(raw) {
            Ok(word) => self.cache.lock().await.contains(&word),
            Err(_) => false,
        }
    }

    /// Nomes das fontes registradas.
    pub fn source_names(&self) -> Vec<String> {
        self.orchestrator
            .source_names()
            .into_iter()
            .map(String::from)
            .collect()
    }
}

async fn aggregate_and_store(
    orchestrator: &Orchestrator,
    cache: &Mutex<WordCache>,
    word: NormalizedWord,
) -> WordscopeResult<Arc<WordRecord>> {
    let record = Arc::new(orchestrator.aggregate(&word).await?);
    cache.lock().await.put(word, Arc::clone(&record));
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use crate::sources::LexicalSource;
    use crate::types::{Category, CategoryResult};

    struct CountingSource {
        calls: Arc<AtomicUsize>,
        delay: Duration,
    }

    #[async_trait]
    impl LexicalSource for CountingSource {
        fn name(&self) -> &str {
            "counting"
        }

        fn category(&self) -> Category {
            Category::Rhymes
        }

        async fn try_fetch(&self, word: &NormalizedWord) -> WordscopeResult<CategoryResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            Ok(CategoryResult::Rhymes(vec![format!("{}-rhyme", word)]))
        }
    }

    fn service(capacity: usize, delay_ms: u64) -> (QueryService, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = CountingSource {
            calls: Arc::clone(&calls),
            delay: Duration::from_millis(delay_ms),
        };
        let sources: Vec<Arc<dyn LexicalSource>> = vec![Arc::new(source) as Arc<dyn LexicalSource>];
        let orchestrator = Orchestrator::new(sources);
        let cache = WordCache::new(capacity, Duration::from_secs(60));
        (QueryService::new(orchestrator, cache), calls)
    }

    #[tokio::test]
    async fn test_empty_word_touches_nothing() {
        let (service, calls) = service(10, 0);

        assert!(matches!(
            service.query("   ").await,
            Err(WordscopeError::EmptyWord)
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(service.cache_stats().await.size, 0);
        assert_eq!(service.cache_stats().await.misses, 0);
    }

    #[tokio::test]
    async fn test_second_query_is_served_from_cache() {
        let (service, calls) = service(10, 0);

        let first = service.query("Light").await.unwrap();
        let second = service.query("  light ").await.unwrap();

        assert_eq!(first, second);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_misses_share_one_aggregation() {
        let (service, calls) = service(10, 500);

        let (a, b, c) = tokio::join!(
            service.query("light"),
            service.query("LIGHT"),
            service.query(" light"),
        );

        let (a, b, c) = (a.unwrap(), b.unwrap(), c.unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&a, &b));
        assert!(Arc::ptr_eq(&b, &c));
        assert!(service.in_flight.lock().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_without_coalescing_misses_aggregate_independently() {
        let (service, calls) = service(10, 500);
        let service = service.with_coalescing(false);

        let (a, b) = tokio::join!(service.query("light"), service.query("light"));

        assert_eq!(a.unwrap(), b.unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_new_aggregation() {
        let (service, calls) = service(10, 0);

        service.query("light").await.unwrap();
        assert!(service.is_cached("LIGHT").await);

        service.invalidate(" Light ").await.unwrap();
        assert!(!service.is_cached("light").await);

        service.query("light").await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_clear_cache() {
        let (service, _calls) = service(10, 0);

        service.query("light").await.unwrap();
        service.query("dark").await.unwrap();
        service.clear_cache().await;

        assert_eq!(service.cache_stats().await.size, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_caller_still_caches_record() {
        let (service, calls) = service(10, 100);

        let abandoned =
            tokio::time::timeout(Duration::from_millis(10), service.query("light")).await;
        assert!(abandoned.is_err());

        tokio::time::sleep(Duration::from_secs(5)).await;

        assert!(service.in_flight.lock().await.is_empty());
        assert!(service.is_cached("light").await);

        service.query("light").await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_joiner_after_cancellation_gets_fresh_result() {
        let (service, calls) = service(10, 100);

        let abandoned =
            tokio::time::timeout(Duration::from_millis(10), service.query("light")).await;
        assert!(abandoned.is_err());

        // Ainda em andamento: quem chega agora entra na mesma agregação
        let record = service.query("light").await.unwrap();

        assert_eq!(record.rhymes, vec!["light-rhyme"]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(service.in_flight.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_cold_then_warm_query_counts_one_miss() {
        let (service, _calls) = service(10, 0);

        service.query("light").await.unwrap();
        service.query("light").await.unwrap();

        let stats = service.cache_stats().await;
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
        assert!((stats.hit_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[tokio::test(start_paused = true)]
    async fn test_coalesced_misses_count_once_each() {
        let (service, calls) = service(10, 500);

        let (a, b) = tokio::join!(service.query("light"), service.query("light"));
        a.unwrap();
        b.unwrap();

        let stats = service.cache_stats().await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.hits, 0);
    }

    #[test]
    fn test_from_config_lists_sources() {
        let service = QueryService::from_config(&Config::default()).unwrap();
        assert_eq!(service.source_names().len(), 7);
        assert!(service.coalesce);
    }
}
