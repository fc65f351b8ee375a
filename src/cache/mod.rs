//! Cache LRU de registros de palavras.
//!
//! Este módulo implementa um cache Least Recently Used (LRU) com TTL
//! absoluto, evitando consultar novamente todas as fontes para uma
//! palavra pedida há pouco tempo.

mod lru;

pub use lru::{CacheStats, CachedRecord, WordCache};
