//! Serviço de consulta do Wordscope.
//!
//! [`QueryService`] é a única entrada que a camada HTTP e a CLI precisam:
//! decide entre cache e agregação e coalesce misses simultâneos.

mod query;

pub use query::QueryService;
