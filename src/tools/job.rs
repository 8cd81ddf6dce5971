//! Runs one compress / decompress / test job for the command line.

use std::fs::{self, File};
use std::io::{self, Cursor, Read, Seek, Write};
use std::path::Path;

use log::{info, warn};

use crate::compression::codec::{Algorithm, Report};
use crate::compression::{huffman_compress, huffman_decompress, lzw_compress, lzw_decompress};
use crate::error::{CodecError, Result};

use super::cli::{Mode, Opts, Output};
use super::files::{compressed_name, decompressed_name, detect_algorithm, output_path};

/// Run the codec for `mode` from `source` to `sink`.
fn code<R: Read + Seek, W: Write>(
    mode: Mode,
    algorithm: Algorithm,
    budget: usize,
    source: &mut R,
    sink: W,
) -> Result<Report> {
    match (mode, algorithm) {
        (Mode::Zip, Algorithm::Huffman) => huffman_compress::compress(source, sink),
        (Mode::Zip, Algorithm::Lzw) => lzw_compress::compress(source, sink, budget),
        (_, Algorithm::Huffman) => huffman_decompress::decompress(source, sink),
        (_, Algorithm::Lzw) => lzw_decompress::decompress(source, sink, budget),
    }
}

/// The algorithm for this job. Decompression goes by the extension unless one was named.
fn pick_algorithm(opts: &Opts, input: Option<&Path>) -> Result<Algorithm> {
    if opts.op_mode == Mode::Zip {
        return Ok(opts.zip_algorithm());
    }
    opts.algorithm
        .or_else(|| input.and_then(detect_algorithm))
        .ok_or_else(|| {
            CodecError::InvalidInput(format!(
                "can not tell the algorithm of {}, use -a huffman or -a lzw",
                input.map_or("standard input".to_string(), |p| p.display().to_string())
            ))
        })
}

/// Process one named file.
pub fn run_file(opts: &Opts, input: &Path) -> Result<Report> {
    let algorithm = pick_algorithm(opts, Some(input))?;
    let mut source = File::open(input)?;

    match (opts.op_mode, opts.output) {
        (Mode::Test, _) => {
            let report = code(Mode::Test, algorithm, opts.budget, &mut source, io::sink())?;
            info!("{}: ok", input.display());
            Ok(report)
        }
        (mode, Output::Stdout) => {
            let stdout = io::stdout();
            let sink = stdout.lock();
            code(mode, algorithm, opts.budget, &mut source, sink)
        }
        (mode, Output::File) => {
            if mode == Mode::Zip && detect_algorithm(input).is_some() {
                warn!("{} looks compressed already.", input.display());
            }
            let name = match mode {
                Mode::Zip => compressed_name(input, algorithm),
                _ => decompressed_name(input, algorithm),
            };
            let target = output_path(&name, opts.force_overwrite);
            info!("{} -> {}", input.display(), target.display());

            let mut sink = File::create(&target)?;
            let result = code(mode, algorithm, opts.budget, &mut source, &mut sink);
            drop(sink);
            if result.is_err() {
                // Never leave half a file behind
                if let Err(e) = fs::remove_file(&target) {
                    warn!("Could not remove {}: {}", target.display(), e);
                }
            }
            result
        }
    }
}

/// Filter standard input to standard output.
pub fn run_stdio(opts: &Opts) -> Result<Report> {
    let algorithm = pick_algorithm(opts, None)?;
    // Compression reads its input twice, so standard input is taken in whole
    let mut data = Vec::new();
    io::stdin().lock().read_to_end(&mut data)?;
    let mut source = Cursor::new(data);
    match opts.op_mode {
        Mode::Test => code(Mode::Test, algorithm, opts.budget, &mut source, io::sink()),
        mode => {
            let stdout = io::stdout();
            let sink = stdout.lock();
            code(mode, algorithm, opts.budget, &mut source, sink)
        }
    }
}

#[cfg(test)]
mod test {
    use super::run_file;
    use crate::compression::codec::Algorithm;
    use crate::error::CodecError;
    use crate::tools::cli::{Mode, Opts};
    use std::fs;

    fn opts(mode: Mode, algorithm: Option<Algorithm>) -> Opts {
        let mut opts = Opts::new();
        opts.op_mode = mode;
        opts.algorithm = algorithm;
        opts
    }

    #[test]
    fn file_round_trip_test() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("poem.txt");
        let text = "Tyger Tyger, burning bright, In the forests of the night; ".repeat(40);
        fs::write(&input, &text).unwrap();

        for algorithm in [Algorithm::Huffman, Algorithm::Lzw] {
            let zipped = dir.path().join(format!("poem.txt.{}", algorithm.extension()));
            let report = run_file(&opts(Mode::Zip, Some(algorithm)), &input).unwrap();
            assert_eq!(report.bytes_in, text.len() as u64);
            assert!(zipped.exists());
            // The input is kept
            assert!(input.exists());

            // poem.txt exists, so the output gets a fresh name
            run_file(&opts(Mode::Unzip, None), &zipped).unwrap();
            let restored = dir.path().join("poem (1).txt");
            assert_eq!(fs::read_to_string(&restored).unwrap(), text);
            fs::remove_file(&restored).unwrap();
        }
    }

    #[test]
    fn force_overwrite_test() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.bin");
        fs::write(&input, [1_u8, 2, 3, 3, 3]).unwrap();
        let zipped = dir.path().join("data.bin.huffz");
        fs::write(&zipped, "stale").unwrap();

        let mut o = opts(Mode::Zip, None);
        o.force_overwrite = true;
        run_file(&o, &input).unwrap();
        assert_ne!(fs::read(&zipped).unwrap(), "stale".as_bytes());
        assert!(!dir.path().join("data.bin (1).huffz").exists());
    }

    #[test]
    fn test_mode_writes_nothing_test() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("a.txt");
        fs::write(&input, "abcabcabc").unwrap();
        run_file(&opts(Mode::Zip, Some(Algorithm::Lzw)), &input).unwrap();
        fs::remove_file(&input).unwrap();

        let zipped = dir.path().join("a.txt.LmZWp");
        run_file(&opts(Mode::Test, None), &zipped).unwrap();
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn failed_job_leaves_no_output_test() {
        let dir = tempfile::tempdir().unwrap();
        let zipped = dir.path().join("broken.huffz");
        // Claims 300 distinct bytes
        fs::write(&zipped, [0_u8, 0, 1, 44]).unwrap();
        let result = run_file(&opts(Mode::Unzip, None), &zipped);
        assert!(matches!(result, Err(CodecError::CorruptHeader(_))));
        assert!(!dir.path().join("broken").exists());
    }

    #[test]
    fn empty_lzw_file_test() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty");
        fs::write(&input, "").unwrap();
        let result = run_file(&opts(Mode::Zip, Some(Algorithm::Lzw)), &input);
        assert!(matches!(result, Err(CodecError::InvalidInput(_))));
        assert!(!dir.path().join("empty.LmZWp").exists());
    }

    #[test]
    fn unknown_extension_test() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("mystery.bin");
        fs::write(&input, [0_u8; 8]).unwrap();
        let result = run_file(&opts(Mode::Unzip, None), &input);
        assert!(matches!(result, Err(CodecError::InvalidInput(_))));
    }
}
