use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};

use pdfx::app::App;
use pdfx::backend::{default_engine, load_shared_bytes};
use pdfx::config::Config;
use pdfx::error::{AppError, AppResult};
use pdfx::fields::{FieldExtractor, PlaceholderExtractor};
use pdfx::logging::{self, LogTarget};
use pdfx::store::{DocumentId, DocumentStore, JsonFileStore, MemoryStore};
use pdfx::viewer::extract_document_text;
use pdfx::workflow::{export_fields, export_json, save_title, save_unique};

/// View PDFs in the terminal, extract their text and keep it in a local store.
#[derive(Parser, Debug)]
#[command(name = "pdfx", version, about, long_about = None)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,

    /// PDF to open in the viewer
    file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the interactive viewer
    View {
        file: Option<PathBuf>,
    },
    /// Print the text of every page
    Extract {
        file: PathBuf,

        /// Print the field map as JSON instead of the text
        #[arg(long)]
        fields: bool,
    },
    /// Extract a PDF's text and add it to the store
    Save {
        file: PathBuf,

        /// Title to save under; defaults to the file name
        #[arg(long)]
        title: Option<String>,
    },
    /// List saved documents, newest first
    List,
    /// Print one saved document
    Show {
        id: String,
    },
    /// Write the extracted field map as JSON
    Export {
        file: PathBuf,

        /// Directory to write into; defaults to the configured export directory
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    match cli.command {
        None => view(config, cli.file).await,
        Some(Command::View { file }) => view(config, file.or(cli.file)).await,
        Some(command) => {
            logging::init(&config.log, LogTarget::Stderr)?;
            headless(&config, command)
        }
    }
}

async fn view(config: Config, file: Option<PathBuf>) -> AppResult<()> {
    logging::init(&config.log, LogTarget::for_terminal_ui(&config.log))?;
    let store = open_store(&config)?;
    let mut app = App::new(config, store);
    app.run(file).await
}

fn headless(config: &Config, command: Command) -> AppResult<()> {
    match command {
        Command::Extract { file, fields } => {
            let text = extract_file(&file)?;
            if fields {
                println!("{}", export_json(&PlaceholderExtractor.extract(&text))?);
            } else {
                print!("{text}");
            }
        }
        Command::Save { file, title } => {
            let text = extract_file(&file)?;
            let title = title.unwrap_or_else(|| save_title(file_name(&file).as_deref()));
            let store = open_store(config)?;
            let id = save_unique(store.as_ref(), &title, &text)?;
            tracing::info!(id = %id, title = %title, "document saved");
            println!("{id}");
        }
        Command::List => {
            let store = open_store(config)?;
            for doc in store.list_documents()? {
                println!("{}\t{}\t{}", doc.id, doc.created_at_local(), doc.title);
            }
        }
        Command::Show { id } => {
            let store = open_store(config)?;
            let doc = store
                .get_document(&DocumentId::new(id.clone()))?
                .ok_or_else(|| AppError::invalid_argument(format!("no saved document {id}")))?;
            println!("{}\n{}\n\n{}", doc.title, doc.created_at_local(), doc.content);
        }
        Command::Export { file, out } => {
            let text = extract_file(&file)?;
            let fields = PlaceholderExtractor.extract(&text);
            let directory = out.unwrap_or_else(|| config.export.directory.clone());
            let path = export_fields(&fields, file_name(&file).as_deref(), &directory)?;
            println!("{}", path.display());
        }
        Command::View { .. } => {
            return Err(AppError::invalid_argument("view runs in the terminal UI"));
        }
    }
    Ok(())
}

fn extract_file(path: &Path) -> AppResult<String> {
    let bytes = load_shared_bytes(path)?;
    let doc = default_engine().open_document(bytes)?;
    extract_document_text(doc.as_ref())
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

fn open_store(config: &Config) -> AppResult<Arc<dyn DocumentStore>> {
    match config.store.resolved_path() {
        Some(path) => Ok(Arc::new(JsonFileStore::open(path)?)),
        None => {
            tracing::warn!("no data directory; saved documents will not outlive this process");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::{Cli, Command};

    #[test]
    fn bare_file_argument_opens_viewer() {
        let cli = Cli::try_parse_from(["pdfx", "invoice.pdf"]).expect("should parse");
        assert!(cli.command.is_none());
        assert_eq!(cli.file, Some(PathBuf::from("invoice.pdf")));
    }

    #[test]
    fn save_accepts_title_override() {
        let cli = Cli::try_parse_from(["pdfx", "save", "a.pdf", "--title", "Q3"])
            .expect("should parse");
        assert!(matches!(
            cli.command,
            Some(Command::Save { title: Some(ref title), .. }) if title == "Q3"
        ));
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::try_parse_from(["pdfx", "list", "--config", "/tmp/pdfx.toml"])
            .expect("should parse");
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/pdfx.toml")));
        assert!(matches!(cli.command, Some(Command::List)));
    }
}
