//! Interface de linha de comando do Wordscope.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Wordscope - tudo o que se sabe sobre uma palavra.
#[derive(Parser, Debug)]
#[command(name = "wordscope")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Arquivo de configuração.
    #[arg(short, long, default_value = "wordscope.toml")]
    pub config: PathBuf,

    /// Modo verbose.
    #[arg(short, long)]
    pub verbose: bool,

    /// Modo silencioso.
    #[arg(short, long)]
    pub quiet: bool,

    /// Comando a executar.
    #[command(subcommand)]
    pub command: Commands,
}

/// Comandos disponíveis.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inicializa configuração no diretório atual.
    Init {
        /// Diretório de destino (padrão: diretório atual).
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Consulta uma palavra e imprime o registro em JSON.
    Lookup {
        /// Palavra a consultar.
        word: String,

        /// Formata o JSON com indentação.
        #[arg(short, long)]
        pretty: bool,
    },

    /// Inicia o servidor HTTP.
    Serve {
        /// Porta (padrão: valor do config).
        #[arg(short, long)]
        port: Option<u16>,

        /// Endereço de bind (padrão: valor do config).
        #[arg(long)]
        host: Option<String>,
    },

    /// Lista as fontes configuradas.
    Sources,

    /// Diagnostica problemas de configuração.
    Doctor,

    /// Mostra versão.
    Version,
}
