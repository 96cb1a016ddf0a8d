use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use min_edit_distance::{align_strs, Alignment, Error, Grid, Result};

/// Prints the minimum edit distance table and one optimal alignment
/// between two strings.
#[derive(Parser, Debug)]
#[command(name = "min_edit_distance", version, about)]
struct Args {
    /// String to transform. Prompted for on stdin when omitted.
    #[arg(long)]
    source: Option<String>,

    /// String to transform into. Prompted for on stdin when omitted.
    #[arg(long)]
    target: Option<String>,

    /// Print alignment symbols as typed instead of upper-cased.
    #[arg(long)]
    preserve_case: bool,

    /// Skip the cost table.
    #[arg(long)]
    no_table: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let options = args.options();
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let source = match args.source {
        Some(source) => source,
        None => prompt(&mut input, "source")?,
    };
    let target = match args.target {
        Some(target) => target,
        None => prompt(&mut input, "target")?,
    };

    let (grid, alignment) = align_strs(&target, &source);
    let stdout = io::stdout();
    render(&mut stdout.lock(), &grid, alignment, &options).map_err(Error::Output)
}

/// How the result is laid out.
#[derive(Debug, Clone, Copy, Default)]
struct RenderOptions {
    preserve_case: bool,
    no_table: bool,
}

impl Args {
    fn options(&self) -> RenderOptions {
        RenderOptions {
            preserve_case: self.preserve_case,
            no_table: self.no_table,
        }
    }
}

fn render<W: Write>(
    out: &mut W,
    grid: &Grid,
    alignment: Alignment<char>,
    options: &RenderOptions,
) -> io::Result<()> {
    if !options.no_table {
        writeln!(out, "Minimum Edit Distance Table:\n")?;
        write!(out, "{grid}")?;
        writeln!(out, "\n")?;
    }

    writeln!(out, "Minimum Edit Distance Alignment:\n")?;
    if options.preserve_case {
        write!(out, "{alignment}")?;
    } else {
        write!(out, "{}", alignment.map(|c| c.to_uppercase().to_string()))?;
    }

    writeln!(out, "\nMinimum Edit Distance: {}", grid.distance())?;
    out.flush()
}

/// Asks for one line on stdin and returns it without its line ending.
fn prompt<R: BufRead>(input: &mut R, what: &'static str) -> Result<String> {
    println!("Enter the {what} string:");
    io::stdout()
        .flush()
        .map_err(|source| Error::Io { what, source })?;
    read_line(input, what)
}

fn read_line<R: BufRead>(input: &mut R, what: &'static str) -> Result<String> {
    let mut bytes = Vec::new();
    let read = input
        .read_until(b'\n', &mut bytes)
        .map_err(|source| Error::Io { what, source })?;
    if read == 0 {
        return Err(Error::Io {
            what,
            source: io::Error::from(io::ErrorKind::UnexpectedEof),
        });
    }

    if bytes.last() == Some(&b'\n') {
        bytes.pop();
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
    }

    String::from_utf8(bytes).map_err(|source| Error::Decode { what, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_line_strips_line_endings() {
        let mut input: &[u8] = b"kitten\r\nsitting\nlast";
        assert_eq!(read_line(&mut input, "source").unwrap(), "kitten");
        assert_eq!(read_line(&mut input, "target").unwrap(), "sitting");
        assert_eq!(read_line(&mut input, "target").unwrap(), "last");
    }

    #[test]
    fn test_read_line_keeps_blank_lines() {
        let mut input: &[u8] = b"\n\r\n";
        assert_eq!(read_line(&mut input, "source").unwrap(), "");
        assert_eq!(read_line(&mut input, "target").unwrap(), "");
    }

    #[test]
    fn test_read_line_fails_on_closed_input() {
        let mut input: &[u8] = b"";
        let err = read_line(&mut input, "source").unwrap_err();
        match err {
            Error::Io { what, source } => {
                assert_eq!(what, "source");
                assert_eq!(source.kind(), io::ErrorKind::UnexpectedEof);
            }
            other => panic!("expected an I/O error, got {other:?}"),
        }

        let mut input: &[u8] = b"kitten\n";
        assert_eq!(read_line(&mut input, "source").unwrap(), "kitten");
        assert!(matches!(
            read_line(&mut input, "target"),
            Err(Error::Io { what: "target", .. })
        ));
    }

    #[test]
    fn test_read_line_rejects_invalid_utf8() {
        let mut input: &[u8] = b"ca\xfft\n";
        let err = read_line(&mut input, "target").unwrap_err();
        assert!(matches!(err, Error::Decode { what: "target", .. }));
    }

    fn rendered(target: &str, source: &str, options: RenderOptions) -> String {
        let (grid, alignment) = align_strs(target, source);
        let mut out = Vec::new();
        render(&mut out, &grid, alignment, &options).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_render_table_and_alignment() {
        let output = rendered("cat", "bat", RenderOptions::default());
        assert_eq!(
            output,
            "Minimum Edit Distance Table:\n\n\
             0\t1\t2\t3\t\n\
             1\t2\t3\t4\t\n\
             2\t3\t2\t3\t\n\
             3\t4\t3\t2\t\n\
             \n\n\
             Minimum Edit Distance Alignment:\n\n\
             B - C s\nA - A\nT - T\n\
             \nMinimum Edit Distance: 2\n"
        );
    }

    #[test]
    fn test_render_without_table_starts_with_alignment() {
        let options = RenderOptions {
            preserve_case: true,
            no_table: true,
        };
        let output = rendered("cats", "cat", options);
        assert_eq!(
            output,
            "Minimum Edit Distance Alignment:\n\n\
             c - c\na - a\nt - t\n* - s i\n\
             \nMinimum Edit Distance: 1\n"
        );
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from([
            "min_edit_distance",
            "--source",
            "bat",
            "--target",
            "cat",
            "--preserve-case",
        ]);
        assert_eq!(args.source.as_deref(), Some("bat"));
        assert_eq!(args.target.as_deref(), Some("cat"));
        assert!(args.preserve_case);
        assert!(!args.no_table);
    }
}
