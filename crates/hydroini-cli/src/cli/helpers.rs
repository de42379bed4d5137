use super::{CliError, GlobalArgs};
use globset::{Glob, GlobMatcher};
use hydroini_core::diagnostics::TracingSink;
use hydroini_core::domain::IniError;
use hydroini_core::{IniProfile, IniReader, IniWriter};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

pub(super) const DEFAULT_CHECK_GLOB: &str = "*.{ini,mdu,mor,sed,bc}";

pub(super) fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // A subscriber may already be installed when running inside tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

pub(super) fn load_profile(global: &GlobalArgs) -> Result<IniProfile, CliError> {
    let mut profile = match &global.profile {
        Some(path) => {
            let profile = IniProfile::load(path)?;
            tracing::debug!(path = %path.display(), "loaded profile");
            profile
        }
        None => IniProfile::default(),
    };

    if global.ignore_comment_lines {
        profile.reader.ignore_comment_lines = true;
    }
    Ok(profile)
}

pub(super) fn reader_for(profile: &IniProfile) -> IniReader<TracingSink> {
    IniReader::new().with_options(profile.reader)
}

pub(super) fn writer_for(profile: &IniProfile) -> IniWriter<TracingSink> {
    IniWriter::new().with_options(profile.writer)
}

pub(super) fn compile_glob(pattern: &str) -> Result<GlobMatcher, CliError> {
    Glob::new(pattern)
        .map(|glob| glob.compile_matcher())
        .map_err(|source| CliError::Usage(format!("invalid glob pattern '{pattern}': {source}")))
}

/// Expands directories recursively into the files whose name matches
/// `matcher`; explicit file arguments are kept as given. Output is sorted
/// per directory so runs are reproducible.
pub(super) fn collect_input_files(
    inputs: &[PathBuf],
    matcher: &GlobMatcher,
) -> Result<Vec<PathBuf>, CliError> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            collect_directory(input, matcher, &mut files)?;
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}

fn collect_directory(
    directory: &Path,
    matcher: &GlobMatcher,
    files: &mut Vec<PathBuf>,
) -> Result<(), CliError> {
    let mut entries = fs::read_dir(directory)
        .and_then(|entries| {
            entries
                .map(|entry| entry.map(|entry| entry.path()))
                .collect::<Result<Vec<_>, _>>()
        })
        .map_err(|source| IniError::io(directory, source))?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            collect_directory(&path, matcher, files)?;
        } else if path
            .file_name()
            .is_some_and(|file_name| matcher.is_match(file_name))
        {
            files.push(path);
        }
    }
    Ok(())
}
