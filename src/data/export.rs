use std::fmt::{self, Write as _};
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};

use super::model::WellLog;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Write a well log to `path`.  Dispatch by extension (`las`, `csv`/`txt`).
pub fn save_file(log: &WellLog, path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "las" => {
            std::fs::write(path, write_las(log))
                .with_context(|| format!("writing {}", path.display()))?;
        }
        "csv" | "txt" => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            write_csv(log, file)?;
        }
        other => bail!("Unsupported export extension: .{other}"),
    }

    log::info!(
        "Exported {} curves x {} rows to {}",
        log.curves.len(),
        log.len(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// LAS writer
// ---------------------------------------------------------------------------

/// Render a log as LAS 2.0 text, one line per depth step.
/// Non-finite samples are written as the log's NULL marker.
pub fn write_las(log: &WellLog) -> String {
    let mut out = String::new();
    // `fmt::Write` for `String` never returns an error.
    let _ = render_las(log, &mut out);
    out
}

fn render_las(log: &WellLog, out: &mut String) -> fmt::Result {
    let null_value = log.null_value();

    writeln!(out, "~VERSION INFORMATION")?;
    writeln!(out, "VERS.   {}   : LAS file format version", log.version)?;
    writeln!(out, "WRAP.   NO    : One line per depth step")?;
    writeln!(out)?;

    writeln!(out, "~WELL INFORMATION")?;
    for item in &log.well_info {
        writeln!(
            out,
            "{:<8}.{:<4} {} : {}",
            item.mnemonic, item.unit, item.value, item.description
        )?;
    }
    writeln!(out)?;

    writeln!(out, "~CURVE INFORMATION")?;
    for curve in std::iter::once(&log.depth_curve).chain(&log.curves) {
        writeln!(
            out,
            "{:<8}.{:<4} : {}",
            curve.name, curve.unit, curve.description
        )?;
    }
    writeln!(out)?;

    writeln!(out, "~PARAMETER INFORMATION")?;
    writeln!(out)?;
    writeln!(out, "~OTHER INFORMATION")?;
    writeln!(
        out,
        "Processed with Well Log Cleaner v{}",
        env!("CARGO_PKG_VERSION")
    )?;
    writeln!(out)?;

    let mut header = format!("~A  {:<10}", log.depth_curve.name);
    for curve in &log.curves {
        write!(header, "{:<12}", curve.name)?;
    }
    writeln!(out, "{}", header.trim_end())?;

    let mut line = String::new();
    for (row, depth) in log.depth.iter().enumerate() {
        line.clear();
        write!(line, "{depth:<12.2}")?;
        for column in &log.values {
            let value = column[row];
            let value = if value.is_finite() { value } else { null_value };
            write!(line, "{value:<12.6}")?;
        }
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV writer
// ---------------------------------------------------------------------------

/// Header `DEPTH,<curve names…>` then one record per depth step.
pub fn write_csv<W: Write>(log: &WellLog, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["DEPTH".to_string()];
    header.extend(log.curves.iter().map(|c| c.name.clone()));
    wtr.write_record(&header).context("writing CSV header")?;

    for (row, depth) in log.depth.iter().enumerate() {
        let mut record = Vec::with_capacity(log.values.len() + 1);
        record.push(depth.to_string());
        record.extend(log.values.iter().map(|column| column[row].to_string()));
        wtr.write_record(&record)
            .with_context(|| format!("writing CSV row {row}"))?;
    }

    wtr.flush().context("flushing CSV")?;
    Ok(())
}
