//! Diagnostic logging to a file
use std::path::Path;
use thiserror::Error;

/// Send log messages to the file at `path`, appending to it if it already
/// exists.  The level defaults to `info` and can be changed with `RUST_LOG`.
///
/// Messages cannot go to the terminal, as that would corrupt the display.
pub(crate) fn init(path: &Path) -> Result<(), LogError> {
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(LogError::Open)?;
    let mut builder = pretty_env_logger::formatted_timed_builder();
    builder
        .target(env_logger::Target::Pipe(Box::new(file)))
        .write_style(env_logger::WriteStyle::Never)
        .filter_level(log::LevelFilter::Info);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.try_init()?;
    Ok(())
}

#[derive(Debug, Error)]
pub(crate) enum LogError {
    #[error("failed to open log file")]
    Open(#[source] std::io::Error),
    #[error("failed to install logger")]
    Install(#[from] log::SetLoggerError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unopenable_file() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("missing").join("gridsnake.log");
        assert!(matches!(init(&path), Err(LogError::Open(_))));
        assert!(!path.exists());
    }
}
