mod logging;
mod protocol;

use std::error::Error;
use std::fs::{self, File};
use std::io::{self, prelude::*, stdin, BufWriter};
use std::path::{Path, PathBuf};

use ahoscan::{AutomatonBuilder, ScanResult};
use clap::{Parser, ValueEnum};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use protocol::{Request, Subject};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ArgColor {
    Never,
    Always,
    Auto,
}

#[derive(Parser, Debug)]
#[command(
    name = "ahocount",
    about = "A program to count occurrences of many patterns at once."
)]
struct Args {
    /// Reads the subject text from the file whose path is on the first input line.
    #[arg(short = 'c', long = "icustom")]
    subject_from_file: bool,

    /// Prints pattern names instead of ordinals.
    #[arg(short, long)]
    verbose: bool,

    /// Highlights pattern labels.
    #[arg(long, value_enum, default_value_t = ArgColor::Never)]
    color: ArgColor,

    /// Writes the automaton in Graphviz format to the given file.
    #[arg(long, value_name = "FILE")]
    dot: Option<PathBuf>,

    /// Log filter directives, e.g. `debug`.
    #[arg(long, env = "AHOCOUNT_LOG", default_value = "warn")]
    log_filter: String,

    /// Input file. The standard input is read if omitted.
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
}

/// Prints `label: count` with the label highlighted.
fn print_count<W>(wtr: &mut W, label: &str, count: usize) -> io::Result<()>
where
    W: WriteColor,
{
    wtr.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
    write!(wtr, "{label}")?;
    wtr.reset()?;
    writeln!(wtr, ": {count}")
}

/// Prints one line per distinct pattern, named by the pattern itself.
fn print_verbose_result<W>(wtr: &mut W, result: &ScanResult) -> io::Result<()>
where
    W: WriteColor,
{
    for (pattern, offsets) in result {
        print_count(wtr, &String::from_utf8_lossy(pattern), offsets.len())?;
    }
    Ok(())
}

/// Prints one line per input pattern, named by its 1-based ordinal.
fn print_result<W>(wtr: &mut W, patterns: &[Vec<u8>], result: &ScanResult) -> io::Result<()>
where
    W: WriteColor,
{
    for (i, pattern) in patterns.iter().enumerate() {
        let count = result.get(pattern.as_slice()).map_or(0, Vec::len);
        print_count(wtr, &(i + 1).to_string(), count)?;
    }
    Ok(())
}

fn read_input(input: Option<&PathBuf>) -> io::Result<Vec<u8>> {
    match input {
        Some(path) => fs::read(path),
        None => {
            let mut buf = vec![];
            stdin().lock().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

fn load_subject(subject: Subject) -> io::Result<Vec<u8>> {
    match subject {
        Subject::Inline(subject) => Ok(subject),
        Subject::File(path) => {
            tracing::debug!(path = %path.display(), "reading subject file");
            fs::read(&path)
        }
    }
}

/// Counts the occurrences of every pattern in the subject and prints them to `wtr`.
///
/// When `dot` is given, the linked automaton is also written there in Graphviz format.
fn count_patterns<W>(
    wtr: &mut W,
    patterns: &[Vec<u8>],
    subject: &[u8],
    verbose: bool,
    dot: Option<&Path>,
) -> Result<(), Box<dyn Error>>
where
    W: WriteColor,
{
    // Builds the automaton from the given patterns.
    let automaton = AutomatonBuilder::from_iter(patterns).compute_links();
    tracing::debug!(
        num_states = automaton.num_states(),
        num_patterns = automaton.num_patterns(),
        "computed links"
    );
    if let Some(path) = dot {
        let mut dot_wtr = BufWriter::new(File::create(path)?);
        automaton.dump(&mut dot_wtr)?;
        dot_wtr.flush()?;
        tracing::info!(path = %path.display(), "wrote automaton");
    }
    let searcher = automaton.compile()?;
    tracing::debug!(
        alphabet_size = searcher.alphabet_size(),
        heap_bytes = searcher.heap_bytes(),
        "compiled searcher"
    );

    let result = searcher.scan(subject);
    tracing::debug!(subject_len = subject.len(), "scanned subject");

    if verbose {
        print_verbose_result(wtr, &result)?;
    } else {
        print_result(wtr, patterns, &result)?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    logging::install_tracing(&args.log_filter)?;

    let input = read_input(args.input.as_ref())?;
    let Request { subject, patterns } = protocol::parse_request(&input, args.subject_from_file)?;
    tracing::debug!(num_patterns = patterns.len(), "parsed input");
    let subject = load_subject(subject)?;

    // Initialize the stream of termcolor.
    let mut stdout = match args.color {
        ArgColor::Never => StandardStream::stdout(ColorChoice::Never),
        ArgColor::Always => StandardStream::stdout(ColorChoice::Always),
        ArgColor::Auto => StandardStream::stdout(ColorChoice::Auto),
    };

    count_patterns(
        &mut stdout,
        &patterns,
        &subject,
        args.verbose,
        args.dot.as_deref(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use termcolor::NoColor;

    fn render(request: &[u8], subject_from_file: bool, verbose: bool) -> String {
        let Request { subject, patterns } =
            protocol::parse_request(request, subject_from_file).unwrap();
        let subject = load_subject(subject).unwrap();
        let mut wtr = NoColor::new(vec![]);
        count_patterns(&mut wtr, &patterns, &subject, verbose, None).unwrap();
        String::from_utf8(wtr.into_inner()).unwrap()
    }

    #[test]
    fn test_ordinal_output() {
        let output = render(b"11 abracadabra\n3\n2 ab\n3 rac\n5 barak\n", false, false);

        assert_eq!("1: 2\n2: 1\n3: 0\n", output);
    }

    #[test]
    fn test_ordinal_output_with_empty_and_duplicate_patterns() {
        let output = render(b"4 abab 4 1 a 0 2 ab 1 a", false, false);

        assert_eq!("1: 2\n2: 0\n3: 2\n4: 2\n", output);
    }

    #[test]
    fn test_verbose_output() {
        let output = render(b"8 stingirl 4 4 girl 1 i 2 in 5 zzzzz", false, true);

        assert_eq!("girl: 1\ni: 2\nin: 1\nzzzzz: 0\n", output);
    }

    #[test]
    fn test_subject_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("subject.txt");
        fs::write(&path, "ushers").unwrap();

        let request = format!("{}\n3 2 he 3 she 4 hers", path.display());
        let output = render(request.as_bytes(), true, false);

        assert_eq!("1: 1\n2: 1\n3: 1\n", output);
    }

    #[test]
    fn test_missing_subject_file() {
        let dir = tempfile::tempdir().unwrap();
        let subject = Subject::File(dir.path().join("missing.txt"));

        assert!(load_subject(subject).is_err());
    }

    #[test]
    fn test_dot_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("automaton.dot");
        let patterns = vec![b"he".to_vec(), b"she".to_vec()];

        let mut wtr = NoColor::new(vec![]);
        count_patterns(&mut wtr, &patterns, b"she", false, Some(path.as_path())).unwrap();

        assert_eq!(b"1: 1\n2: 1\n", wtr.into_inner().as_slice());
        let dot = fs::read_to_string(&path).unwrap();
        assert!(dot.starts_with("digraph {"));
        assert!(dot.contains("color = \"blue\""));
    }
}
