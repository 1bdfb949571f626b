//! `krsbot` — command-line shell around the KRS answer cascade.
//!
//! Thin presentation layer: it loads the knowledge base once, then only
//! ever calls `Responder::get_response` and displays the returned
//! fields. Session history lives in memory and dies with the process.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use krsbot_core::MatchResult;
use krsbot_knowledge::{KnowledgeBase, Responder};
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

const GREETING: &str = "Halo! Saya adalah chatbot KRS yang dapat membantu Anda seputar \
pertanyaan Kartu Rencana Studi. Silakan ajukan pertanyaan Anda!";

const SAMPLE_QUESTIONS: &[&str] = &[
    "Apa itu KRS?",
    "Berapa maksimal SKS yang bisa diambil dalam satu semester?",
    "Bagaimana prosedur pengajuan cuti akademik?",
    "Apa fungsi dosen pembimbing akademik?",
    "Kapan biasanya pengisian KRS dilakukan?",
    "Bagaimana jika terlambat mengisi KRS?",
    "Apakah mata kuliah bisa diganti setelah KRS dikunci?",
    "Apa pengertian cuti akademik?",
];

#[derive(Parser)]
#[command(name = "krsbot", about = "KRSBot — tanya jawab seputar Kartu Rencana Studi")]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "krsbot.toml")]
    config: PathBuf,

    /// Knowledge data directory (overrides config)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session
    Chat,
    /// Ask a single question and exit
    Ask {
        /// The question text
        question: String,
    },
    /// Print the sample questions
    Samples,
}

#[derive(Deserialize)]
struct KrsbotConfig {
    #[serde(default = "default_data_dir")]
    data_dir: PathBuf,
}

impl Default for KrsbotConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

async fn load_config(path: &Path) -> anyhow::Result<KrsbotConfig> {
    if !path.exists() {
        return Ok(KrsbotConfig::default());
    }
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
    })?;
    Ok(toml::from_str(&content)?)
}

fn print_result(result: &MatchResult) {
    println!("{}", result.answer);
    println!();
    println!("Similarity: {:.2} | Method: {}", result.similarity, result.method);
    if let Some(question) = &result.matched_question {
        println!("Pertanyaan yang cocok: {question}");
    }
}

fn print_samples() {
    println!("Contoh pertanyaan:");
    for question in SAMPLE_QUESTIONS {
        println!("  - {question}");
    }
}

async fn chat(responder: &Responder) -> anyhow::Result<()> {
    println!("{GREETING}");
    println!("(/contoh: contoh pertanyaan, /riwayat: riwayat, /hapus: hapus riwayat, /keluar: keluar)");

    let mut transcript: Vec<(&str, String)> = vec![("bot", GREETING.to_string())];
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        match line {
            "" => continue,
            "/keluar" => break,
            "/contoh" => print_samples(),
            "/riwayat" => {
                for (role, content) in &transcript {
                    println!("[{role}] {content}");
                }
            }
            "/hapus" => {
                transcript.clear();
                transcript.push(("bot", GREETING.to_string()));
                println!("{GREETING}");
            }
            query => {
                let result = responder.get_response(query);
                print_result(&result);
                transcript.push(("anda", query.to_string()));
                transcript.push(("bot", result.answer));
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.config).await?;
    let data_dir = cli.data_dir.unwrap_or(config.data_dir);

    let kb = KnowledgeBase::load(&data_dir).await?;
    info!(entries = kb.len(), "Knowledge base ready");
    let responder = Responder::new(kb);

    match cli.command {
        Commands::Chat => chat(&responder).await?,
        Commands::Ask { question } => {
            let result = responder.get_response(&question);
            print_result(&result);
        }
        Commands::Samples => print_samples(),
    }

    Ok(())
}
