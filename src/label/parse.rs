//! YOLO label file reading.

use std::fs;
use std::path::Path;

use super::NormalizedBox;
use crate::error::ManifestError;

/// Read every box from a label file.
///
/// Every line, blank ones included, must parse, or the whole file is
/// rejected with [`ManifestError::MalformedLabelLine`].
pub fn read_label_file(path: &Path) -> Result<Vec<NormalizedBox>, ManifestError> {
    let content = fs::read_to_string(path).map_err(ManifestError::Io)?;
    parse_label_str(&content, path)
}

/// Parse the contents of a label file. `path` is only used for error context.
pub fn parse_label_str(content: &str, path: &Path) -> Result<Vec<NormalizedBox>, ManifestError> {
    content
        .lines()
        .enumerate()
        .map(|(line_idx, line)| parse_label_line(line, path, line_idx + 1))
        .collect()
}

pub(crate) fn parse_label_line(
    line: &str,
    file_path: &Path,
    line_num: usize,
) -> Result<NormalizedBox, ManifestError> {
    // Take at most 6 tokens so pathological inputs do not allocate unbounded memory.
    let tokens: Vec<&str> = line.split_whitespace().take(6).collect();

    if tokens.len() != 5 {
        let found = if tokens.len() > 5 {
            "more than 5".to_string()
        } else {
            tokens.len().to_string()
        };
        return Err(ManifestError::MalformedLabelLine {
            path: file_path.to_path_buf(),
            line: line_num,
            message: format!("expected 5 tokens (id x y w h), found {found}"),
        });
    }

    Ok(NormalizedBox {
        class_id: tokens[0].to_string(),
        cx: parse_coord(tokens[1], "x_center", file_path, line_num)?,
        cy: parse_coord(tokens[2], "y_center", file_path, line_num)?,
        w: parse_coord(tokens[3], "width", file_path, line_num)?,
        h: parse_coord(tokens[4], "height", file_path, line_num)?,
    })
}

/// Fuzz-only entrypoint for single-line label parsing.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_label_line(input: &str) -> Result<(), ManifestError> {
    let _ = parse_label_line(input, Path::new("<fuzz>"), 1)?;
    Ok(())
}

fn parse_coord(
    raw: &str,
    field_name: &str,
    file_path: &Path,
    line_num: usize,
) -> Result<f64, ManifestError> {
    let malformed = |message: String| ManifestError::MalformedLabelLine {
        path: file_path.to_path_buf(),
        line: line_num,
        message,
    };

    let value = raw
        .parse::<f64>()
        .map_err(|_| malformed(format!("invalid {field_name} '{raw}'; expected a number")))?;

    if !value.is_finite() {
        return Err(malformed(format!(
            "invalid {field_name} '{raw}'; expected a finite number"
        )));
    }

    Ok(value)
}
