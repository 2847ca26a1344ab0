use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use content_digest::{
    openai::{OpenAIClient, GROQ_BASE_URL},
    presenter::{self, DEFAULT_OUTPUT_FILE},
    tracing::init_tracing_subscriber,
    types::{AVAILABLE_MODELS, DEFAULT_MODEL, DEFAULT_SUMMARY_LENGTH},
    DigestError, DigestProcessor, DigestProcessorBuilder, SubmissionForm, SummaryOptions,
    SummaryStyle,
};
use content_extract::{
    document::PdfPageReader, website::HttpPageFetcher, youtube::captions::YoutubeCaptionClient,
    ContentExtractor, DocumentUpload,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

type HttpDigestProcessor =
    DigestProcessor<YoutubeCaptionClient, HttpPageFetcher, PdfPageReader, OpenAIClient>;

#[derive(Parser)]
#[command(
    name = "content-digest",
    about = "Summarize YouTube videos, web pages and PDF documents with a hosted LLM"
)]
struct Cli {
    /// API key for the chat completion endpoint
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true, default_value = "")]
    api_key: String,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, env = "LLM_BASE_URL", default_value = GROQ_BASE_URL)]
    base_url: String,

    /// Model used for summarization, e.g. deepseek-r1-distill-qwen-32b,
    /// llama3-70b-8192 or mixtral-8x7b-32768
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Target summary length in words (100-500)
    #[arg(long, default_value_t = DEFAULT_SUMMARY_LENGTH)]
    length: u16,

    /// Summary style: concise, detailed or bullet-points
    #[arg(long, default_value_t = SummaryStyle::Concise)]
    style: SummaryStyle,

    /// Leave the source out of the printed summary
    #[arg(long)]
    no_metadata: bool,

    /// File the summary is written to
    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Timeout in seconds for each network request
    #[arg(long, default_value = "120")]
    timeout: u64,

    /// Skip TLS certificate verification when fetching websites
    #[arg(long)]
    insecure_tls: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize a single source and exit
    Run {
        /// YouTube or website URL
        #[arg(long, required_unless_present = "pdf")]
        url: Option<String>,

        /// PDF document to summarize; takes precedence over --url
        #[arg(long)]
        pdf: Option<PathBuf>,
    },
    /// Read one URL (or `pdf:<path>`) per line until `quit`
    Interactive,
}

impl Cli {
    fn options(&self) -> SummaryOptions {
        SummaryOptions {
            model_name: self.model.clone(),
            summary_length: self.length,
            style: self.style,
            include_metadata: !self.no_metadata,
        }
    }

    fn form(&self, url: Option<String>, document: Option<DocumentUpload>) -> SubmissionForm {
        SubmissionForm {
            api_key: self.api_key.clone(),
            url,
            document,
            options: self.options(),
        }
    }
}

fn build_processor(cli: &Cli) -> anyhow::Result<HttpDigestProcessor> {
    let timeout = Duration::from_secs(cli.timeout);

    let extractor = ContentExtractor::http(timeout, cli.insecure_tls)
        .context("Failed to build content extractor")?;
    let summarizer = OpenAIClient::new(timeout)
        .context("Failed to build LLM client")?
        .with_base_url(&cli.base_url);

    Ok(DigestProcessorBuilder::new()
        .extractor(extractor)
        .summarizer(summarizer)
        .build())
}

fn read_upload(path: &Path) -> anyhow::Result<DocumentUpload> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(DocumentUpload::new(name, bytes))
}

fn report(error: &DigestError) {
    eprintln!("Error: {error}");
    if let Some(hint) = error.hint() {
        eprintln!("{hint}");
    }
}

/// Runs one submission, prints the summary and saves it to `--output`
async fn summarize_once(
    processor: &HttpDigestProcessor,
    cli: &Cli,
    form: SubmissionForm,
) -> Result<(), DigestError> {
    let include_metadata = form.options.include_metadata;
    let digest = processor.run(form).await?;

    println!("{}", presenter::render(&digest, include_metadata));
    match presenter::save(&digest, &cli.output) {
        Ok(()) => eprintln!("Summary saved to {}", cli.output.display()),
        Err(e) => {
            tracing::error!(error = %e, "Failed to save summary");
            eprintln!("Error: could not save summary: {e}");
        }
    }

    Ok(())
}

async fn run(
    processor: &HttpDigestProcessor,
    cli: &Cli,
    url: Option<String>,
    pdf: Option<&Path>,
) -> anyhow::Result<()> {
    let document = pdf.map(read_upload).transpose()?;
    let form = cli.form(url, document);

    summarize_once(processor, cli, form)
        .await
        .inspect_err(report)
        .context("Summarization failed")
}

async fn interactive(processor: &HttpDigestProcessor, cli: &Cli) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"url or pdf:<path> > ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();

        match line {
            "" => continue,
            "quit" | "exit" => break,
            _ => {}
        }

        let form = match line.strip_prefix("pdf:") {
            Some(path) => match read_upload(Path::new(path.trim())) {
                Ok(upload) => cli.form(None, Some(upload)),
                Err(e) => {
                    eprintln!("Error: {e:#}");
                    continue;
                }
            },
            None => cli.form(Some(line.to_owned()), None),
        };

        if let Err(e) = summarize_once(processor, cli, form).await {
            report(&e);
        }
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    ));

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    if !AVAILABLE_MODELS.contains(&cli.model.as_str()) {
        tracing::warn!(
            model = %cli.model,
            "Unrecognised model, sizing input for the default context window"
        );
    }

    let processor = build_processor(&cli)?;

    match &cli.command {
        Command::Run { url, pdf } => run(&processor, &cli, url.clone(), pdf.as_deref()).await?,
        Command::Interactive => {
            tracing::info!(model = %cli.model, "Starting interactive session");
            interactive(&processor, &cli).await?;
        }
    }

    Ok(())
}
