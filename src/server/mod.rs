//! Servidor HTTP do Wordscope.
//!
//! Camada fina sobre o [`QueryService`](crate::service::QueryService):
//! expõe a consulta de palavras e uma sonda de liveness.

mod routes;

pub use routes::{router, serve};
