use clap::Parser;
use log::{error, info};
use scancat_core::cli::{Cli, OutputFormat};
use scancat_core::{
    CustomClassifications, Result, SeriesClassification, SeriesClassifier, SeriesDocument,
    TextReport,
};
use std::process;

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    if !cli.input.exists() {
        eprintln!("Error: {} does not exist", cli.input.display());
        process::exit(1);
    }

    match run(&cli) {
        Ok(result) => output_result(&result, &cli.format),
        Err(e) => {
            error!("Classification failed: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn run(cli: &Cli) -> Result<SeriesClassification> {
    info!("Processing input: {}", cli.input.display());

    let mut document = SeriesDocument::load(&cli.input)?;
    if let Some(label) = cli.label.as_ref().filter(|label| !label.is_empty()) {
        document.acquisition_label = Some(label.clone());
    }

    let mut classifier = SeriesClassifier::new();
    if let Some(path) = &cli.config {
        classifier = classifier.with_custom_classifications(CustomClassifications::load(path)?);
    }

    classifier.classify_document(&document, cli.modality()?)
}

fn output_result(result: &SeriesClassification, format: &OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", TextReport::new(result)),
        OutputFormat::Json => match result.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize to JSON: {}", e);
                eprintln!("Error: Failed to serialize to JSON: {}", e);
                process::exit(1);
            }
        },
    }
}
