use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{CommandFactory, ErrorKind, Parser};
use eyre::WrapErr;
use hny_btgen::honeycomb::DEFAULT_API_URL;
use hny_btgen::{
    convert_board, generate, Config, HoneycombClient, Variables, DEFAULT_GRAPHIC,
    DEFAULT_SEQUENCE_NUMBER,
};
use log::info;

#[derive(Parser, Debug)]
#[clap(name = "hny-btgen", about, version)]
struct Args {
    /// Honeycomb API key.
    #[clap(long = "honeycomb-api-key", env = "HONEYCOMB_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// ID of the Honeycomb board to convert.
    #[clap(long)]
    board: Option<String>,

    /// Base URL of the Honeycomb API.
    #[clap(long, env = "HONEYCOMB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Graphic # to use.
    #[clap(long, default_value_t = DEFAULT_GRAPHIC)]
    graphic: u32,

    /// Sequence number to use as the template's primary key.
    #[clap(long, default_value_t = DEFAULT_SEQUENCE_NUMBER)]
    sequence_number: u64,

    /// Variables definition file to use (JSON or YAML).
    #[clap(long)]
    variables: Option<PathBuf>,

    /// File to write the generated Go code to, instead of standard output.
    #[clap(long)]
    out: Option<PathBuf>,

    /// Increase output logging verbosity.
    #[clap(short, long)]
    verbose: bool,
}

/// Pipeline stages, each failing with its own exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Configure,
    Fetch,
    LoadVariables,
    Generate,
    CreateOutput,
    WriteOutput,
}

impl Stage {
    fn exit_code(self) -> i32 {
        match self {
            Self::Configure => 1,
            Self::Fetch => 2,
            Self::LoadVariables | Self::Generate => 3,
            Self::CreateOutput => 4,
            Self::WriteOutput => 5,
        }
    }
}

#[derive(Debug)]
struct Failure {
    stage: Stage,
    report: eyre::Report,
}

trait AtStage<T> {
    fn at(self, stage: Stage) -> Result<T, Failure>;
}

impl<T, E> AtStage<T> for Result<T, E>
where
    E: Into<eyre::Report>,
{
    fn at(self, stage: Stage) -> Result<T, Failure> {
        self.map_err(|e| Failure {
            stage,
            report: e.into(),
        })
    }
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                println!("{}", e);
                process::exit(Stage::Configure.exit_code());
            }
        },
    };

    // Generated code on standard output must not be interleaved with logs.
    let level = match (&args.out, args.verbose) {
        (None, _) => log::Level::Error,
        (Some(_), true) => log::Level::Debug,
        (Some(_), false) => log::Level::Info,
    };
    if let Err(e) = simple_logger::init_with_level(level) {
        println!("Failed to initialize logging: {}", e);
    }

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            println!();
            let _ = Args::command().print_help();
            println!();
            println!("{}", e);
            process::exit(Stage::Configure.exit_code());
        }
    };

    if let Err(failure) = run(&config) {
        log::error!("{:#}", failure.report);
        process::exit(failure.stage.exit_code());
    }
}

fn build_config(args: &Args) -> Result<Config, hny_btgen::Error> {
    let config = Config::new(
        args.board.as_deref().unwrap_or_default(),
        args.api_key.as_deref().unwrap_or_default(),
    )?
    .with_api_url(&args.api_url)
    .with_sequence_number(args.sequence_number)
    .with_graphic(args.graphic)
    .with_variables_file(args.variables.clone())
    .with_output_file(args.out.clone());
    Ok(config)
}

fn run(config: &Config) -> Result<(), Failure> {
    let variables = Variables::load_optional(config.variables_file()).at(Stage::LoadVariables)?;

    let client =
        HoneycombClient::with_base_url(config.api_key(), config.api_url()).at(Stage::Fetch)?;
    let template = convert_board(&client, config, &variables).at(Stage::Fetch)?;

    let code = generate(&template)
        .wrap_err("failed to generate template code")
        .at(Stage::Generate)?;

    write_output(&code, config.output_file())
}

/// Writes the generated code to the given file, or to standard output.
fn write_output(code: &str, path: Option<&Path>) -> Result<(), Failure> {
    match path {
        Some(path) => {
            info!("Writing template to: {}", path.display());
            let mut file = File::create(path)
                .wrap_err_with(|| format!("failed to create {}", path.display()))
                .at(Stage::CreateOutput)?;
            file.write_all(code.as_bytes())
                .and_then(|_| file.flush())
                .wrap_err_with(|| format!("failed to write {}", path.display()))
                .at(Stage::WriteOutput)?;
            info!("Done");
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            out.write_all(code.as_bytes())
                .and_then(|_| out.flush())
                .wrap_err("failed to write to standard output")
                .at(Stage::WriteOutput)?;
        }
    }
    Ok(())
}
