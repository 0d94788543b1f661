use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use tracing::{error, info, warn};

use solarpaper::{
    config::RenderConfig,
    constants::JulianDate,
    logging,
    renderer::{RenderContext, RenderSummary},
    solarpaper_errors::SolarpaperError,
    sso::{
        orbit_record::KindField,
        sso_reader::{read_sso_file, SsoReader},
    },
    surface::CommandRecorder,
    time::jd_now,
    view::ViewParameters,
};

#[derive(Parser)]
#[command(name = "solarpaper")]
#[command(version, about = "Render a solar system wallpaper from an orbit dataset", long_about = None)]
struct Cli {
    /// Decompressed `.sso` dataset
    #[arg(value_name = "DATASET")]
    dataset: Utf8PathBuf,

    /// TOML render configuration
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<Utf8PathBuf>,

    /// Julian date (TDB) to render, the current time by default
    #[arg(long = "jd", value_name = "JD")]
    jd: Option<JulianDate>,

    /// Width of the `kind` field, overrides the configuration
    #[arg(long = "kind-field", value_enum)]
    kind_field: Option<KindFieldArg>,

    /// Write the drawing commands here instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<Utf8PathBuf>,

    /// Render even if the dataset is past its validity date
    #[arg(long)]
    allow_stale: bool,

    /// Debug logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindFieldArg {
    Wide,
    Compact,
}

impl From<KindFieldArg> for KindField {
    fn from(arg: KindFieldArg) -> Self {
        match arg {
            KindFieldArg::Wide => KindField::Wide,
            KindFieldArg::Compact => KindField::Compact,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.verbose) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(summary) => {
            if !summary.skipped.is_empty() {
                warn!(skipped = summary.skipped.len(), "some orbits were skipped");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<RenderSummary, SolarpaperError> {
    let mut config = match &cli.config {
        Some(path) => RenderConfig::from_file(path)?,
        None => RenderConfig::default(),
    };
    if let Some(kind_field) = cli.kind_field {
        config.kind_field = kind_field.into();
    }

    let jd = match cli.jd {
        Some(jd) => jd,
        None => jd_now()?,
    };
    let view = ViewParameters::from_config(&config)?;
    let data = read_sso_file(&cli.dataset)?;
    info!(dataset = %cli.dataset, jd, "loaded dataset");

    let mut context = RenderContext::new(view, jd);
    let mut surface = CommandRecorder::new();
    let summary = if cli.allow_stale {
        let reader = SsoReader::new(&data, config.kind_field)?;
        if let Err(e) = reader.check_valid_at(jd) {
            warn!("{e}, rendering anyway");
        }
        context.render_records(reader, &mut surface)?
    } else {
        context.render_dataset(&data, config.kind_field, &mut surface)?
    };

    let json = surface.to_json()?;
    match &cli.output {
        Some(path) => std::fs::write(path, json)?,
        None => println!("{json}"),
    }
    Ok(summary)
}
