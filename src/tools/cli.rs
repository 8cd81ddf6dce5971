use std::fmt::{Display, Formatter};

use clap::Parser;
use log::LevelFilter;

use crate::compression::codec::Algorithm;
use crate::lzw_coding::dictionary::DEFAULT_BUDGET;

/// Verbosity of user information
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    /// -v0 is quiet, -v5 (or more) is chatty
    pub fn from_level(level: u8) -> Self {
        match level {
            0 => Verbosity::Quiet,
            1 => Verbosity::Errors,
            2 => Verbosity::Warnings,
            3 => Verbosity::Info,
            4 => Verbosity::Debug,
            _ => Verbosity::Trace,
        }
    }

    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Off,
            Verbosity::Errors => LevelFilter::Error,
            Verbosity::Warnings => LevelFilter::Warn,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}

/// Zip, Unzip, Test
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Zip,
    Unzip,
    Test,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Define the two output channels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Output {
    File,
    Stdout,
}
impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Opts {
    /// Algorithm used. None on decompression means "go by the file extension"
    pub algorithm: Option<Algorithm>,
    /// LZW dictionary memory budget, in characters
    pub budget: usize,
    /// Names of files to read for input. Empty means standard input
    pub files: Vec<String>,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Compress/Decompress/Test
    pub op_mode: Mode,
    /// Location where output is sent
    pub output: Output,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl Opts {
    pub fn new() -> Self {
        Self {
            algorithm: None,
            budget: DEFAULT_BUDGET,
            files: vec![],
            force_overwrite: false,
            op_mode: Mode::Zip,
            output: Output::File,
            verbose: Verbosity::Info,
        }
    }

    /// Algorithm to compress with when none was asked for.
    pub fn zip_algorithm(&self) -> Algorithm {
        self.algorithm.unwrap_or(Algorithm::Huffman)
    }
}

impl Default for Opts {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Lossless file compression with Huffman or LZW coding",
    long_about = "
    Compresses files with one of two self contained algorithms. Huffman coding (.huffz) gives
    frequent byte values shorter codes. LZW (.LmZWp) replaces repeated strings with dictionary
    codes. Decompression picks the algorithm from the file extension unless -a is given.

    Input files are never removed. With no files, reads standard input and writes standard output."
)]
pub struct Args {
    /// Files to process
    #[clap()]
    files: Vec<String>,

    /// Perform compression on the input files (the default)
    #[clap(short = 'z', long = "compress")]
    compress: bool,

    /// Perform decompression on the input files
    #[clap(short = 'd', long = "decompress")]
    decompress: bool,

    /// Test compressed file integrity
    #[clap(short = 't', long = "test")]
    test: bool,

    /// huffman or lzw. Compression defaults to huffman
    #[clap(short = 'a', long = "algorithm")]
    algorithm: Option<Algorithm>,

    /// Send output to the terminal
    #[clap(short = 'c', long = "stdout")]
    stdout: bool,

    ///Force overwriting output files
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Sets verbosity. -v0 is silent, -v5 is chatty
    #[clap(short = 'v', default_value_t = 3)]
    v: u8,

    /// LZW dictionary memory budget, in characters. Must match on compress and decompress
    #[clap(long = "dictionary-budget", default_value_t = DEFAULT_BUDGET)]
    dictionary_budget: usize,
}

/// Put command line information from CLAP into our internal structure.
pub fn opts_from_args(args: Args) -> Opts {
    let mut opts = Opts::new();
    opts.files = args.files;

    // Test wins over everything, an explicit -z wins over -d
    opts.op_mode = if args.test {
        Mode::Test
    } else if args.decompress && !args.compress {
        Mode::Unzip
    } else {
        Mode::Zip
    };

    opts.algorithm = args.algorithm;
    opts.budget = args.dictionary_budget;
    opts.force_overwrite = args.force;

    // No files means a filter from stdin to stdout
    if args.stdout || opts.files.is_empty() {
        opts.output = Output::Stdout
    };

    opts.verbose = Verbosity::from_level(args.v);
    opts
}

/// Parse the process command line.
pub fn opts_init() -> Opts {
    opts_from_args(Args::parse())
}

#[cfg(test)]
mod test {
    use super::{opts_from_args, Args, Mode, Output, Verbosity};
    use crate::compression::codec::Algorithm;
    use clap::Parser;
    use log::LevelFilter;

    fn opts(line: &[&str]) -> super::Opts {
        opts_from_args(Args::try_parse_from(line.to_vec()).unwrap())
    }

    #[test]
    fn defaults_test() {
        let o = opts(&["hlzip", "notes.txt"]);
        assert_eq!(o.op_mode, Mode::Zip);
        assert_eq!(o.output, Output::File);
        assert_eq!(o.algorithm, None);
        assert_eq!(o.zip_algorithm(), Algorithm::Huffman);
        assert_eq!(o.budget, 100_000);
        assert_eq!(o.verbose, Verbosity::Info);
        assert!(!o.force_overwrite);
    }

    #[test]
    fn decompress_lzw_test() {
        let o = opts(&["hlzip", "-d", "-a", "lzw", "-f", "a.LmZWp", "b.LmZWp"]);
        assert_eq!(o.op_mode, Mode::Unzip);
        assert_eq!(o.algorithm, Some(Algorithm::Lzw));
        assert_eq!(o.files.len(), 2);
        assert!(o.force_overwrite);
    }

    #[test]
    fn stdin_means_stdout_test() {
        let o = opts(&["hlzip", "-z"]);
        assert_eq!(o.output, Output::Stdout);
        assert!(o.files.is_empty());
    }

    #[test]
    fn test_mode_test() {
        let o = opts(&["hlzip", "-d", "-t", "x.huffz"]);
        assert_eq!(o.op_mode, Mode::Test);
    }

    #[test]
    fn budget_and_verbosity_test() {
        let o = opts(&["hlzip", "--dictionary-budget", "4096", "-v", "5", "x"]);
        assert_eq!(o.budget, 4096);
        assert_eq!(o.verbose.level_filter(), LevelFilter::Trace);
        assert_eq!(Verbosity::from_level(0).level_filter(), LevelFilter::Off);
    }

    #[test]
    fn bad_algorithm_test() {
        assert!(Args::try_parse_from(["hlzip", "-a", "bzip2", "x"]).is_err());
    }
}
