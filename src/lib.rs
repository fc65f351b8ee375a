//! # Wordscope
//!
//! Motor de agregação lexical: "mostre tudo o que se sabe sobre a palavra W".
//!
//! Wordscope consulta em paralelo sete fontes independentes (definições,
//! sinônimos/antônimos, expressões, traduções, termos relacionados,
//! referências culturais e rimas), mais uma busca opcional de títulos de
//! filmes, músicas e livros. Tolera a falha de qualquer subconjunto delas e
//! serve consultas repetidas de um cache LRU com TTL.
//!
//! ## Módulos
//!
//! - [`sources`] - Adaptadores para os provedores remotos
//! - [`aggregation`] - Orquestrador (fan-out e join de todas as fontes)
//! - [`cache`] - Cache LRU com TTL de registros
//! - [`service`] - Serviço de consulta (normalização, cache, coalescência)
//! - [`server`] - API HTTP
//! - [`cli`] - Interface de linha de comando
//! - [`types`] - Tipos compartilhados

pub mod aggregation;
pub mod cache;
#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "server")]
pub mod server;
pub mod service;
pub mod sources;
pub mod types;

pub use service::QueryService;
pub use types::config::Config;
pub use types::errors::{WordscopeError, WordscopeResult};
pub use types::{NormalizedWord, WordRecord};
