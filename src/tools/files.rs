//! Output file naming.
//!
//! Compression appends the algorithm's extension. Decompression strips it again, or appends
//! `.out` when the input does not carry it. Unless overwriting is forced, an existing output is
//! never replaced: a free name `name (N).ext` is picked instead.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::compression::codec::Algorithm;

const UNKNOWN_EXTENSION: &str = "out";

/// `input` with `.ext` appended.
fn with_added_extension(input: &Path, ext: &str) -> PathBuf {
    let mut name: OsString = input.as_os_str().to_owned();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Name of the compressed file for `input`.
pub fn compressed_name(input: &Path, algorithm: Algorithm) -> PathBuf {
    with_added_extension(input, algorithm.extension())
}

/// Name of the decompressed file for `input`.
pub fn decompressed_name(input: &Path, algorithm: Algorithm) -> PathBuf {
    match input.extension() {
        Some(ext) if ext == algorithm.extension() && input.file_stem().is_some() => {
            input.with_extension("")
        }
        _ => with_added_extension(input, UNKNOWN_EXTENSION),
    }
}

/// The algorithm a compressed file's extension names, if any.
pub fn detect_algorithm(input: &Path) -> Option<Algorithm> {
    input
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(Algorithm::from_extension)
}

/// `path` itself if nothing is there yet, otherwise the first free `stem (N).ext`.
pub fn unique_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path.extension().map(|e| e.to_string_lossy().into_owned());
    (1_u32..)
        .map(|n| {
            let name = match &ext {
                Some(ext) => format!("{} ({}).{}", stem, n, ext),
                None => format!("{} ({})", stem, n),
            };
            path.with_file_name(name)
        })
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| path.to_path_buf())
}

/// Where to write: `path` when overwriting is allowed, else a free variant of it.
pub fn output_path(path: &Path, force_overwrite: bool) -> PathBuf {
    if force_overwrite {
        path.to_path_buf()
    } else {
        unique_path(path)
    }
}

#[cfg(test)]
mod test {
    use super::{compressed_name, decompressed_name, detect_algorithm, output_path, unique_path};
    use crate::compression::codec::Algorithm;
    use std::fs::File;
    use std::path::{Path, PathBuf};

    #[test]
    fn compressed_name_test() {
        assert_eq!(
            compressed_name(Path::new("docs/notes.txt"), Algorithm::Huffman),
            PathBuf::from("docs/notes.txt.huffz")
        );
        assert_eq!(
            compressed_name(Path::new("notes"), Algorithm::Lzw),
            PathBuf::from("notes.LmZWp")
        );
    }

    #[test]
    fn decompressed_name_test() {
        assert_eq!(
            decompressed_name(Path::new("notes.txt.huffz"), Algorithm::Huffman),
            PathBuf::from("notes.txt")
        );
        assert_eq!(
            decompressed_name(Path::new("notes.bin"), Algorithm::Lzw),
            PathBuf::from("notes.bin.out")
        );
        assert_eq!(
            decompressed_name(Path::new("notes.huffz"), Algorithm::Lzw),
            PathBuf::from("notes.huffz.out")
        );
    }

    #[test]
    fn detect_algorithm_test() {
        assert_eq!(detect_algorithm(Path::new("a.huffz")), Some(Algorithm::Huffman));
        assert_eq!(detect_algorithm(Path::new("a.b.LmZWp")), Some(Algorithm::Lzw));
        assert_eq!(detect_algorithm(Path::new("a.txt")), None);
        assert_eq!(detect_algorithm(Path::new("huffz")), None);
    }

    #[test]
    fn unique_path_test() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("notes.txt");
        assert_eq!(unique_path(&target), target);

        File::create(&target).unwrap();
        let first = unique_path(&target);
        assert_eq!(first, dir.path().join("notes (1).txt"));

        File::create(&first).unwrap();
        assert_eq!(unique_path(&target), dir.path().join("notes (2).txt"));
    }

    #[test]
    fn unique_path_no_extension_test() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("notes");
        File::create(&target).unwrap();
        assert_eq!(unique_path(&target), dir.path().join("notes (1)"));
    }

    #[test]
    fn forced_output_test() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("notes.txt");
        File::create(&target).unwrap();
        assert_eq!(output_path(&target, true), target);
        assert_ne!(output_path(&target, false), target);
    }
}
