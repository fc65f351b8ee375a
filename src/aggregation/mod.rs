//! Agregação das fontes lexicais.
//!
//! O [`Orchestrator`] dispara uma chamada por fonte, todas em paralelo,
//! e espera todas terminarem antes de montar o registro.
//!
//! ## Exemplo
//!
//! ```rust,ignore
//! use wordscope::aggregation::Orchestrator;
//! use wordscope::types::NormalizedWord;
//!
//! let orchestrator = Orchestrator::from_config(&config)?;
//! let word = NormalizedWord::parse("Light")?;
//! let record = orchestrator.aggregate(&word).await?;
//! println!("{} sinônimos", record.synonyms.len());
//! ```

mod orchestrator;

pub use orchestrator::Orchestrator;
