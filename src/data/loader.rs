use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};

use super::model::{CurveInfo, HeaderItem, WellLog};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a well log from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.las`        – LAS 2.0, one line per depth step
/// * `.csv`/`.txt` – header row, first column is depth, one column per curve
pub fn load_file(path: &Path) -> Result<WellLog> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unnamed");

    match ext.as_str() {
        "las" => {
            let text = std::fs::read_to_string(path).context("reading LAS file")?;
            parse_las(&text, file_name)
        }
        "csv" | "txt" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            parse_csv(file, file_name)
        }
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// LAS loader
// ---------------------------------------------------------------------------

/// Parse LAS 2.0 text.
///
/// ```text
/// ~VERSION INFORMATION
/// VERS.   2.0   : CWLS LOG ASCII STANDARD - VERSION 2.0
/// ~WELL INFORMATION
/// NULL.      -999.25         : NULL VALUE
/// ~CURVE INFORMATION
/// DEPT.M     : DEPTH
/// GR.GAPI    : GAMMA RAY
/// ~A  DEPTH     GR
/// 1670.0000    75.0000
/// ```
///
/// The first `~C` curve is the index (depth) curve. Data rows with fewer
/// values than curves are skipped; values that do not parse become NaN.
pub fn parse_las(text: &str, file_name: &str) -> Result<WellLog> {
    let lines: Vec<&str> = text.lines().collect();
    let data_start = lines
        .iter()
        .position(|line| is_section(line, 'A'))
        .context("No ~A data section found in LAS file")?;

    let sections = split_sections(&lines[..data_start]);

    let version = sections
        .get(&'V')
        .and_then(|items| items.iter().find(|i| i.mnemonic.eq_ignore_ascii_case("VERS")))
        .map(|i| i.value.clone())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "2.0".to_string());

    let wrapped = sections
        .get(&'V')
        .and_then(|items| items.iter().find(|i| i.mnemonic.eq_ignore_ascii_case("WRAP")))
        .is_some_and(|i| i.value.eq_ignore_ascii_case("YES"));
    if wrapped {
        bail!("Wrapped LAS files (WRAP YES) are not supported");
    }

    let well_info = sections.get(&'W').cloned().unwrap_or_default();
    let mut curve_defs = sections
        .get(&'C')
        .map(|items| {
            items
                .iter()
                .map(|i| CurveInfo::new(&i.mnemonic, &i.unit, &i.description))
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();
    if curve_defs.is_empty() {
        bail!("No curves defined in ~C section");
    }
    let depth_curve = curve_defs.remove(0);
    let curves = curve_defs;

    let (depth, values) = parse_data_rows(&lines[data_start + 1..], curves.len())?;

    log::debug!(
        "Parsed {file_name}: version {version}, {} curves, {} rows",
        curves.len(),
        depth.len()
    );

    let mut log = WellLog::from_columns(file_name, depth_curve, curves, depth, values)?;
    log.version = version;
    log.well_info = well_info;
    Ok(log)
}

fn is_section(line: &str, letter: char) -> bool {
    let mut chars = line.trim_start().chars();
    chars.next() == Some('~')
        && chars
            .next()
            .is_some_and(|c| c.eq_ignore_ascii_case(&letter))
}

/// Group header lines by section letter (`V`, `W`, `C`, `P`, ...).
/// `~O` (free text) is skipped.
fn split_sections(lines: &[&str]) -> BTreeMap<char, Vec<HeaderItem>> {
    let mut sections: BTreeMap<char, Vec<HeaderItem>> = BTreeMap::new();
    let mut current: Option<char> = None;

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix('~') {
            current = rest.chars().next().map(|c| c.to_ascii_uppercase());
            continue;
        }
        match current {
            Some('O') | None => {}
            Some(section) => {
                if let Some(item) = parse_header_line(trimmed) {
                    sections.entry(section).or_default().push(item);
                }
            }
        }
    }
    sections
}

/// `MNEM.UNIT  VALUE : DESCRIPTION` → [`HeaderItem`].
///
/// The unit runs from the first `.` to the next whitespace; the value runs
/// to the last `:`; anything after a `|` in the description is dropped.
fn parse_header_line(line: &str) -> Option<HeaderItem> {
    let (mnemonic, rest) = line.split_once('.')?;
    let (body, description) = rest.rsplit_once(':')?;
    let unit_end = body.find(char::is_whitespace).unwrap_or(body.len());
    let (unit, value) = body.split_at(unit_end);
    let description = description.split('|').next().unwrap_or("");

    Some(HeaderItem::new(
        mnemonic.trim(),
        unit,
        value.trim(),
        description.trim(),
    ))
}

fn parse_data_rows(lines: &[&str], n_curves: usize) -> Result<(Vec<f64>, Vec<Vec<f64>>)> {
    let mut depth = Vec::new();
    let mut values: Vec<Vec<f64>> = vec![Vec::new(); n_curves];
    let mut skipped = 0usize;

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if trimmed.starts_with('~') {
            bail!("Unexpected section after ~A: {trimmed}");
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        if tokens.len() < n_curves + 1 {
            skipped += 1;
            continue;
        }

        depth.push(parse_number(tokens[0]));
        for (column, token) in values.iter_mut().zip(&tokens[1..]) {
            column.push(parse_number(token));
        }
    }

    if skipped > 0 {
        log::warn!("Skipped {skipped} short data rows");
    }
    Ok((depth, values))
}

fn parse_number(token: &str) -> f64 {
    token.trim().parse::<f64>().unwrap_or(f64::NAN)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout:  header row with column names.
/// The first column is depth; every other column is a curve. Empty or
/// non-numeric cells become NaN.
pub fn parse_csv<R: Read>(reader: R, file_name: &str) -> Result<WellLog> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.len() < 2 {
        bail!("CSV needs a depth column and at least one curve column");
    }

    let depth_curve = CurveInfo::new(&headers[0], "", "");
    let curves: Vec<CurveInfo> = headers[1..]
        .iter()
        .map(|h| CurveInfo::new(h, "", ""))
        .collect();

    let mut depth = Vec::new();
    let mut values: Vec<Vec<f64>> = vec![Vec::new(); curves.len()];

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        depth.push(parse_number(record.get(0).unwrap_or("")));
        for (column, cell) in values.iter_mut().zip(record.iter().skip(1)) {
            column.push(parse_number(cell));
        }
    }

    WellLog::from_columns(file_name, depth_curve, curves, depth, values)
}
