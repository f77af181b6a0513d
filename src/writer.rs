//! Manifest file output.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;
use tempfile::NamedTempFile;

use crate::error::ManifestError;
use crate::manifest::ManifestLine;
use crate::split::DatasetSplit;

pub const TRAIN_FILE_NAME: &str = "train.txt";
pub const VAL_FILE_NAME: &str = "val.txt";

/// Destination paths for the two manifests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestPaths {
    pub train: PathBuf,
    pub val: PathBuf,
}

impl ManifestPaths {
    pub fn in_dir(output_dir: &Path) -> Self {
        Self {
            train: output_dir.join(TRAIN_FILE_NAME),
            val: output_dir.join(VAL_FILE_NAME),
        }
    }
}

/// Fail if either destination exists and overwriting is off.
///
/// A destination that exists but is not a regular file (a directory, for
/// instance) is a conflict even when overwriting. Both paths are checked
/// before anything is written.
pub fn check_output_conflicts(paths: &ManifestPaths, overwrite: bool) -> Result<(), ManifestError> {
    for path in [&paths.train, &paths.val] {
        if !path.exists() {
            continue;
        }
        if !path.is_file() {
            return Err(ManifestError::OutputConflict {
                path: path.clone(),
                message: "already exists and is not a regular file".to_string(),
            });
        }
        if !overwrite {
            return Err(ManifestError::OutputConflict {
                path: path.clone(),
                message: "already exists (pass --overwrite_files to replace it)".to_string(),
            });
        }
    }
    Ok(())
}

/// Concatenate rendered lines; each already ends in a newline.
pub fn render_manifest(lines: &[ManifestLine]) -> String {
    lines.iter().map(ManifestLine::render).collect()
}

/// Write `train.txt` and `val.txt` into `output_dir`.
///
/// Both manifests are fully written to temporary files in `output_dir`
/// before either destination is touched; the temporaries are then renamed
/// into place. Without `overwrite`, a failure to place `val.txt` removes the
/// `train.txt` just created.
pub fn write_manifests(
    output_dir: &Path,
    split: &DatasetSplit,
    overwrite: bool,
) -> Result<ManifestPaths, ManifestError> {
    let paths = ManifestPaths::in_dir(output_dir);
    check_output_conflicts(&paths, overwrite)?;

    let train = stage(output_dir, &render_manifest(&split.train))?;
    let val = stage(output_dir, &render_manifest(&split.val))?;

    place(train, &paths.train, overwrite)?;
    if let Err(err) = place(val, &paths.val, overwrite) {
        if !overwrite {
            let _ = fs::remove_file(&paths.train);
        }
        return Err(err);
    }

    info!(
        "Wrote {} and {}",
        paths.train.display(),
        paths.val.display()
    );
    Ok(paths)
}

fn stage(output_dir: &Path, content: &str) -> Result<NamedTempFile, ManifestError> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".labelimg2train-").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o644));
    }

    let mut file = builder.tempfile_in(output_dir).map_err(ManifestError::Io)?;
    file.write_all(content.as_bytes()).map_err(ManifestError::Io)?;
    file.as_file().sync_all().map_err(ManifestError::Io)?;
    Ok(file)
}

fn place(file: NamedTempFile, dest: &Path, overwrite: bool) -> Result<(), ManifestError> {
    let placed = if overwrite {
        file.persist(dest)
    } else {
        file.persist_noclobber(dest)
    };
    placed.map(|_| ()).map_err(|err| ManifestError::Io(err.error))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(name: &str) -> ManifestLine {
        ManifestLine {
            label_path: PathBuf::from(name),
            boxes: Vec::new(),
            label_missing: false,
        }
    }

    fn sample_split() -> DatasetSplit {
        DatasetSplit {
            train: vec![line("a.txt"), line("c.txt")],
            val: vec![line("b.txt"), line("b.txt")],
            val_indices: vec![1, 1],
        }
    }

    #[test]
    fn write_manifests_writes_lines_verbatim() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let paths = write_manifests(temp.path(), &sample_split(), false).expect("write");

        assert_eq!(fs::read_to_string(&paths.train).unwrap(), "a.txt \nc.txt \n");
        assert_eq!(fs::read_to_string(&paths.val).unwrap(), "b.txt \nb.txt \n");
    }

    #[test]
    fn existing_val_blocks_train_too() {
        let temp = tempfile::tempdir().expect("create temp dir");
        fs::write(temp.path().join(VAL_FILE_NAME), "old").expect("pre-create val");

        let err = write_manifests(temp.path(), &sample_split(), false).unwrap_err();
        assert!(matches!(err, ManifestError::OutputConflict { .. }));
        assert!(!temp.path().join(TRAIN_FILE_NAME).exists());
        assert_eq!(
            fs::read_to_string(temp.path().join(VAL_FILE_NAME)).unwrap(),
            "old"
        );
    }

    #[test]
    fn val_directory_blocks_run_without_partial_write() {
        let temp = tempfile::tempdir().expect("create temp dir");
        fs::create_dir(temp.path().join(VAL_FILE_NAME)).expect("create val dir");

        for overwrite in [false, true] {
            let err = write_manifests(temp.path(), &sample_split(), overwrite).unwrap_err();
            match err {
                ManifestError::OutputConflict { path, message } => {
                    assert_eq!(path, temp.path().join(VAL_FILE_NAME));
                    assert!(message.contains("not a regular file"));
                }
                other => panic!("unexpected error: {other}"),
            }
            assert!(!temp.path().join(TRAIN_FILE_NAME).exists());
        }
    }

    #[test]
    fn no_staging_files_are_left_behind() {
        let temp = tempfile::tempdir().expect("create temp dir");
        write_manifests(temp.path(), &sample_split(), false).expect("write");

        let mut names: Vec<String> = fs::read_dir(temp.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec![TRAIN_FILE_NAME, VAL_FILE_NAME]);
    }

    #[cfg(unix)]
    #[test]
    fn manifests_are_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::tempdir().expect("create temp dir");
        let paths = write_manifests(temp.path(), &sample_split(), false).expect("write");
        let mode = fs::metadata(&paths.train).unwrap().permissions().mode();
        assert_eq!(mode & 0o044, 0o044);
    }

    #[test]
    fn missing_output_dir_writes_nothing() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let err = write_manifests(&temp.path().join("absent"), &sample_split(), false).unwrap_err();
        assert!(matches!(err, ManifestError::Io(_)));
    }

    #[test]
    fn overwrite_replaces_both_files() {
        let temp = tempfile::tempdir().expect("create temp dir");
        fs::write(temp.path().join(TRAIN_FILE_NAME), "old train").expect("pre-create train");
        fs::write(temp.path().join(VAL_FILE_NAME), "old val").expect("pre-create val");

        let paths = write_manifests(temp.path(), &sample_split(), true).expect("overwrite");
        assert_eq!(fs::read_to_string(&paths.train).unwrap(), "a.txt \nc.txt \n");
        assert_eq!(fs::read_to_string(&paths.val).unwrap(), "b.txt \nb.txt \n");
    }

    #[test]
    fn empty_split_writes_empty_files() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let paths = write_manifests(temp.path(), &DatasetSplit::default(), false).expect("write");
        assert!(fs::read_to_string(&paths.train).unwrap().is_empty());
        assert!(fs::read_to_string(&paths.val).unwrap().is_empty());
    }
}
