// ==========================================
// Онтология ГРМ - 命令行入口
// ==========================================
// 子命令:
//   process <archive.zip>        处理归档并保存结果归档
//   inspect-template <xlsx>      打印模板属性清单
//   inspect-records <xlsx>       打印记录文件表头
// ==========================================

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use grm_ontology::config::ConfigManager;
use grm_ontology::i18n::{self, t_with_args};
use grm_ontology::importer::{ColumnReader, ExcelGridReader, SchemaExtractor};
use grm_ontology::{logging, OntologyApi, PipelineError};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "grm-ontology")]
#[command(author, version, about = "Онтология ГРМ: извлечение атрибутов и справочников")]
struct Cli {
    /// JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process an ontology archive
    Process {
        /// Input ZIP archive
        archive: PathBuf,

        /// Directory for the result archive (default: current dir)
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Print a JSON summary instead of the text report
        #[arg(long)]
        json: bool,
    },

    /// Show the attribute schema of a template file
    InspectTemplate {
        /// Template spreadsheet
        input: PathBuf,
    },

    /// Show the header columns of a records file
    InspectRecords {
        /// Records spreadsheet
        input: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.log_json {
        logging::init_json();
    } else {
        logging::init();
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", t_with_args("cli.failed", &[("message", &format!("{:#}", e))]));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let manager = ConfigManager::load(cli.config.as_deref()).context("failed to load config")?;
    i18n::set_locale(manager.config().locale.as_str());
    tracing::info!(version = grm_ontology::VERSION, "{}", grm_ontology::APP_NAME);

    match cli.command {
        Commands::Process { archive, output, json } => process(manager, &archive, &output, json),
        Commands::InspectTemplate { input } => inspect_template(&manager, &input),
        Commands::InspectRecords { input } => inspect_records(&input),
    }
}

fn process(manager: ConfigManager, archive: &Path, output: &Path, json: bool) -> Result<()> {
    let api = OntologyApi::new(manager.into_config());
    let progress = |fraction: f64, message: &str| {
        eprintln!("[{:>3.0}%] {}", fraction * 100.0, message);
    };

    match api.process_archive(Some(archive), output, &progress) {
        Ok(outcome) => {
            let mut stdout = io::stdout().lock();
            if json {
                serde_json::to_writer_pretty(&mut stdout, &outcome).context("failed to write JSON")?;
                writeln!(stdout)?;
            } else {
                writeln!(stdout, "{}", outcome.report)?;
                writeln!(
                    stdout,
                    "{}",
                    t_with_args("cli.saved", &[("path", &outcome.archive_path.display().to_string())])
                )?;
            }
            Ok(())
        }
        Err(err) => {
            err.log();
            Err(user_facing(err))
        }
    }
}

fn user_facing(err: PipelineError) -> anyhow::Error {
    let message = err.user_message();
    anyhow::Error::new(err).context(message)
}

fn inspect_template(manager: &ConfigManager, input: &Path) -> Result<()> {
    let reader = ExcelGridReader;
    let extractor = SchemaExtractor::new(&reader, &manager.config().schema);
    let schema = extractor.extract(input);

    let mut stdout = io::stdout().lock();
    writeln!(
        stdout,
        "{}",
        t_with_args("cli.schema_header", &[("count", &schema.len().to_string())])
    )?;
    for attribute in schema.attributes() {
        writeln!(stdout, "  {}", attribute)?;
    }
    Ok(())
}

fn inspect_records(input: &Path) -> Result<()> {
    let reader = ExcelGridReader;
    let columns = ColumnReader::new(&reader)
        .read_table(input)
        .with_context(|| format!("failed to read {}", input.display()))?
        .columns;

    let mut stdout = io::stdout().lock();
    writeln!(
        stdout,
        "{}",
        t_with_args("cli.columns_header", &[("count", &columns.len().to_string())])
    )?;
    for column in columns.columns() {
        writeln!(stdout, "  {}", column)?;
    }
    Ok(())
}
