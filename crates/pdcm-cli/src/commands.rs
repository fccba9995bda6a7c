use std::sync::Arc;

use anyhow::{Context, Result};
use comfy_table::Table;
use pdcm_dictionary::{DictionaryProvider, DictionaryStore, FileDictionaryProvider};
use pdcm_ingest::Upload;
use pdcm_model::{ServiceError, ValidationReport};
use pdcm_report::write_report_json;
use tracing::info_span;

use pdcm_cli::pipeline::{ValidationOptions, ValidationPipeline};

use crate::cli::{DictionaryArgs, ValidateArgs};
use crate::summary::apply_table_style;

pub fn run_validate(args: &ValidateArgs) -> Result<ValidationReport> {
    let span = info_span!("validate_command", file = %args.file.display());
    let _guard = span.enter();

    let store = Arc::new(DictionaryStore::new());
    let provider = FileDictionaryProvider::new(&args.dictionary.dictionary_dir);
    store
        .reload(
            &provider,
            &args.dictionary.dictionary_name,
            &args.dictionary.dictionary_version,
        )
        .map_err(ServiceError::from)?;

    let upload = Upload::from_path(&args.file).map_err(ServiceError::from)?;
    let pipeline = ValidationPipeline::with_restrictions(store).with_options(ValidationOptions {
        compute_scores: !args.no_score,
    });
    let report = pipeline.validate_upload(Some(&upload))?;

    if let Some(path) = &args.output {
        write_report_json(&report, path)
            .with_context(|| format!("write report to {}", path.display()))?;
    }
    Ok(report)
}

pub fn run_schemas(args: &DictionaryArgs) -> Result<()> {
    let provider = FileDictionaryProvider::new(&args.dictionary_dir);
    let dictionary = provider
        .load_dictionary(&args.dictionary_name, &args.dictionary_version)
        .map_err(ServiceError::from)?;

    println!("Dictionary: {} {}", dictionary.name, dictionary.version);
    let mut table = Table::new();
    table.set_header(vec!["Schema", "Fields", "Required", "Weighted", "Description"]);
    apply_table_style(&mut table);
    for schema in &dictionary.schemas {
        let required = schema.fields.iter().filter(|f| f.is_required()).count();
        let weighted = schema.fields.iter().filter(|f| f.weight().is_some()).count();
        table.add_row(vec![
            schema.name.clone(),
            schema.fields.len().to_string(),
            required.to_string(),
            weighted.to_string(),
            schema.description.clone().unwrap_or_default(),
        ]);
    }
    println!("{table}");
    Ok(())
}
