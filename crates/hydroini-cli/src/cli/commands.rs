use super::CliError;
use super::helpers::*;
use anyhow::Context;
use hydroini_core::IniProfile;
use hydroini_core::domain::{IniError, IniErrorCategory};
use serde::Serialize;
use std::path::PathBuf;

#[derive(clap::Args)]
pub(super) struct ParseArgs {
    /// INI file to parse
    file: PathBuf,

    /// Pretty-print the JSON document
    #[arg(long)]
    pretty: bool,
}

#[derive(clap::Args)]
pub(super) struct CheckArgs {
    /// Files or directories to check; directories are searched recursively
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// File name pattern used inside directories
    #[arg(long, default_value = DEFAULT_CHECK_GLOB)]
    glob: String,

    /// Print a JSON report instead of one line per file
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
pub(super) struct FormatArgs {
    /// INI file to rewrite
    input: PathBuf,

    /// Output path (default: rewrite the input in place)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Drop property comments from the output
    #[arg(long)]
    no_comments: bool,
}

#[derive(clap::Args)]
pub(super) struct GetArgs {
    /// INI file to read
    file: PathBuf,

    /// Section name (case-insensitive)
    section: String,

    /// Property key (case-insensitive)
    key: String,

    /// Print the values from every matching section and property
    #[arg(long)]
    all: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckedFile {
    path: PathBuf,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    sections: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub(super) fn run_parse_command(args: ParseArgs, profile: &IniProfile) -> Result<i32, CliError> {
    let document = reader_for(profile).read_file(&args.file)?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&document)
    } else {
        serde_json::to_string(&document)
    }
    .with_context(|| format!("failed to serialize '{}'", args.file.display()))?;

    println!("{json}");
    Ok(0)
}

pub(super) fn run_check_command(args: CheckArgs, profile: &IniProfile) -> Result<i32, CliError> {
    let matcher = compile_glob(&args.glob)?;
    let files = collect_input_files(&args.paths, &matcher)?;
    if files.is_empty() {
        return Err(CliError::Usage(format!(
            "no files matching '{}' were found",
            args.glob
        )));
    }

    let mut reader = reader_for(profile);
    let results = files
        .into_iter()
        .map(|path| match reader.read_file(&path) {
            Ok(document) => CheckedFile {
                path,
                ok: true,
                sections: Some(document.len()),
                line: None,
                error: None,
            },
            Err(error) => CheckedFile {
                path,
                ok: false,
                sections: None,
                line: error.line_number(),
                error: Some(error.diagnostic_line()),
            },
        })
        .collect::<Vec<_>>();

    let failures = results.iter().filter(|result| !result.ok).count();
    tracing::info!(files = results.len(), failures, "check finished");

    if args.json {
        let report = serde_json::to_string_pretty(&results).context("failed to render report")?;
        println!("{report}");
    } else {
        for result in &results {
            match (&result.sections, &result.error) {
                (Some(sections), _) => {
                    println!("OK {} ({} sections)", result.path.display(), sections)
                }
                (None, Some(error)) => println!("FAIL {}: {}", result.path.display(), error),
                (None, None) => {}
            }
        }
    }

    if failures == 0 {
        Ok(0)
    } else {
        Ok(IniErrorCategory::InputValidationError.exit_code())
    }
}

pub(super) fn run_format_command(args: FormatArgs, profile: &IniProfile) -> Result<i32, CliError> {
    let document = reader_for(profile).read_file(&args.input)?;
    let output = args.output.as_ref().unwrap_or(&args.input);

    let mut writer = writer_for(profile);
    if args.no_comments {
        writer = writer.write_comments(false);
    }
    writer.write_file(&document, output)?;
    Ok(0)
}

pub(super) fn run_get_command(args: GetArgs, profile: &IniProfile) -> Result<i32, CliError> {
    let document = reader_for(profile).read_file(&args.file)?;
    let section = document.require_section(&args.section)?;

    if !args.all {
        println!("{}", section.require_property(&args.key)?.value());
        return Ok(0);
    }

    let values = document
        .find_sections(&args.section)
        .flat_map(|section| section.property_values(&args.key))
        .collect::<Vec<_>>();
    if values.is_empty() {
        return Err(IniError::MissingProperty {
            section: section.name().to_string(),
            key: args.key.clone(),
        }
        .into());
    }

    for value in values {
        println!("{value}");
    }
    Ok(0)
}
