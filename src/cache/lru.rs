//! Cache LRU com TTL para registros de palavras.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use lru::LruCache;
use tokio::time::Instant;

use crate::types::{NormalizedWord, WordRecord};

/// Registro em cache.
#[derive(Debug, Clone)]
pub struct CachedRecord {
    /// Registro agregado.
    pub record: Arc<WordRecord>,

    /// Momento em que foi cacheado.
    pub inserted_at: Instant,
}

impl CachedRecord {
    /// Cria um novo registro em cache.
    pub fn new(record: Arc<WordRecord>) -> Self {
        Self {
            record,
            inserted_at: Instant::now(),
        }
    }

    /// Verifica se o cache expirou.
    ///
    /// Válido enquanto `agora - inserted_at < ttl`.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.inserted_at.elapsed() >= ttl
    }
}

/// Estatísticas do cache.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStats {
    /// Número atual de entradas.
    pub size: usize,

    /// Capacidade máxima.
    pub capacity: usize,

    /// Número de acertos (cache hits).
    pub hits: u64,

    /// Número de erros (cache misses).
    pub misses: u64,

    /// Entradas removidas por LRU.
    pub evictions: u64,
}

impl CacheStats {
    /// Calcula a taxa de acerto.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Cache LRU de palavras.
///
/// Capacidade e TTL são fixos na construção e valem para todas as entradas.
pub struct WordCache {
    cache: LruCache<NormalizedWord, CachedRecord>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl WordCache {
    /// Cria um novo cache.
    ///
    /// # Argumentos
    /// - `capacity`: Número máximo de palavras (0 é tratado como 1)
    /// - `ttl`: Tempo de vida das entradas
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(cap),
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Busca no cache.
    ///
    /// Retorna `None` se não encontrado ou se expirado. Um acerto atualiza
    /// a posição LRU da entrada.
    pub fn get(&mut self, key: &NormalizedWord) -> Option<Arc<WordRecord>> {
        // Usa peek para não alterar LRU antes de saber se expirou
        let is_expired = self.cache.peek(key).map(|c| c.is_expired(self.ttl));

        match is_expired {
            Some(true) => {
                self.cache.pop(key);
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
            Some(false) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                self.cache.get(key).map(|c| Arc::clone(&c.record))
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Insere ou substitui a entrada de `key`.
    ///
    /// Se o cache estiver cheio e `key` for nova, remove a entrada acessada
    /// há mais tempo. Entradas expiradas são removidas primeiro.
    pub fn put(&mut self, key: NormalizedWord, record: Arc<WordRecord>) {
        if !self.cache.contains(&key) && self.cache.len() == self.cache.cap().get() {
            self.cleanup_expired();
        }

        if let Some((evicted, _)) = self.cache.push(key.clone(), CachedRecord::new(record)) {
            if evicted != key {
                self.evictions.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(word = %evicted, "Evicted least recently used word");
            }
        }
    }

    /// Entrada válida de `key`, sem alterar LRU nem estatísticas.
    pub fn peek(&self, key: &NormalizedWord) -> Option<Arc<WordRecord>> {
        self.cache
            .peek(key)
            .filter(|c| !c.is_expired(self.ttl))
            .map(|c| Arc::clone(&c.record))
    }

    /// Verifica se existe entrada válida, sem alterar LRU nem estatísticas.
    pub fn contains(&self, key: &NormalizedWord) -> bool {
        self.peek(key).is_some()
    }

    /// Invalida uma entrada específica.
    pub fn invalidate(&mut self, key: &NormalizedWord) {
        self.cache.pop(key);
    }

    /// Limpa todo o cache.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Número de entradas armazenadas (incluindo expiradas ainda não removidas).
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Retorna estatísticas do cache.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.cache.len(),
            capacity: self.cache.cap().get(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }

    /// Remove entradas expiradas.
    pub fn cleanup_expired(&mut self) {
        let expired_keys: Vec<NormalizedWord> = self
            .cache
            .iter()
            .filter(|(_, v)| v.is_expired(self.ttl))
            .map(|(k, _)| k.clone())
            .collect();

        for key in expired_keys {
            self.cache.pop(&key);
        }
    }
}
