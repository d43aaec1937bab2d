use crate::bio::taxonomy::TaxonId;
use anyhow::Context;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

/// Spinner on stderr for long loads
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message.into());
    pb
}

pub fn success(message: &str) {
    eprintln!("{} {}", "✓".green().bold(), message);
}

/// Open `path` for writing, or stdout when no path is given
pub fn writer(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

/// One taxon ID per line
pub fn write_ids<W: Write>(out: &mut W, ids: &[TaxonId]) -> io::Result<()> {
    for id in ids {
        writeln!(out, "{}", id)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_ids() {
        let mut buffer = Vec::new();
        write_ids(&mut buffer, &[1, 22, 333]).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "1\n22\n333\n");
    }
}
