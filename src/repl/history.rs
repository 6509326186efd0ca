use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

const NAME: &str = env!("CARGO_PKG_NAME");

/// Path of the history file in the user's home directory, or `None`
/// when no home directory can be resolved.
pub fn history_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(format!(".{}_history", NAME)))
}

/// Appends one line to the history file, creating it on first use.
pub fn append(line: &str, path: &PathBuf) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let mut writer = BufWriter::new(file);
    writeln!(writer, "{}", line.trim())?;
    writer.flush()?;
    Ok(())
}
