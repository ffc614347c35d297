//! Text exports of correction curves.
//!
//! - CSV: one row per grid point of the first channel, one correction column
//!   per channel
//! - EQ APO `GraphicEQ`: one block per channel with its delay, the global
//!   preamp and the full curve on a single line

use crate::{Error, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use swfir_core::Channel;
use swfir_dsp::channel_preamp_db;

/// Comment lines opening every `GraphicEQ` file.
pub const GRAPHIC_EQ_HEADER: &str =
    "# Sonarworks SoundID Reference correction curves\n# Exported from .swproj file\n";

/// CSV file name for a project stem.
pub fn csv_file_name(stem: &str) -> String {
    format!("{stem}.csv")
}

/// `GraphicEQ` file name for a project stem.
pub fn graphic_eq_file_name(stem: &str) -> String {
    format!("{stem}_eqapo.txt")
}

/// Write the correction table as CSV.
///
/// Rows follow the first channel's grid; an empty channel list writes only
/// the header.
pub fn write_csv<W: Write>(channels: &[Channel], mut out: W) -> std::io::Result<()> {
    write!(out, "frequency_hz")?;
    for ch in channels {
        write!(out, ",{}_correction_dB", ch.name)?;
    }
    writeln!(out)?;

    let Some(first) = channels.first() else {
        return Ok(());
    };
    for (i, freq) in first.frequencies.iter().enumerate() {
        write!(out, "{freq:.2}")?;
        for ch in channels {
            match ch.correction_db.get(i) {
                Some(gain) => write!(out, ",{gain:.4}")?,
                None => write!(out, ",")?,
            }
        }
        writeln!(out)?;
    }
    out.flush()
}

/// Write an EQ APO preset with one `GraphicEQ` line per channel.
///
/// Every channel block carries the same global preamp, emitted only when it
/// attenuates.
pub fn write_graphic_eq<W: Write>(
    channels: &[Channel],
    headroom_db: f64,
    mut out: W,
) -> std::io::Result<()> {
    writeln!(out, "{GRAPHIC_EQ_HEADER}")?;
    let preamp = channel_preamp_db(channels, headroom_db);

    for ch in channels {
        writeln!(out, "# Channel: {} (delay: {:.4} ms)", ch.name, ch.delay_ms)?;
        if preamp < 0.0 {
            writeln!(out, "Preamp: {preamp:.1} dB")?;
        }
        let points = ch
            .frequencies
            .iter()
            .zip(&ch.correction_db)
            .map(|(f, g)| format!("{f:.1} {g:.1}"))
            .collect::<Vec<_>>()
            .join("; ");
        writeln!(out, "GraphicEQ: {points}")?;
        writeln!(out)?;
    }
    out.flush()
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| Error::io(path, e))
}

/// Export the correction table to a CSV file.
pub fn export_csv(channels: &[Channel], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    write_csv(channels, create(path)?).map_err(|e| Error::io(path, e))?;
    tracing::debug!(path = %path.display(), "wrote CSV");
    Ok(())
}

/// Export an EQ APO `GraphicEQ` preset file.
pub fn export_graphic_eq(
    channels: &[Channel],
    headroom_db: f64,
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref();
    write_graphic_eq(channels, headroom_db, create(path)?).map_err(|e| Error::io(path, e))?;
    tracing::debug!(path = %path.display(), "wrote GraphicEQ preset");
    Ok(())
}
