use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

/// Where raw command lines come from. Interactive reads prompt on stdin;
/// batch reads a file and echoes each non-blank line before it runs, so a
/// transcript of a batch run reads like an interactive one.
pub enum LineSource {
    Interactive,
    Batch(BufReader<File>),
}

impl LineSource {
    pub fn interactive() -> Self {
        LineSource::Interactive
    }

    pub fn batch<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(LineSource::Batch(BufReader::new(File::open(path)?)))
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self, LineSource::Interactive)
    }

    /// Next line with its terminator stripped; `Ok(None)` on end of input.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        match self {
            LineSource::Interactive => {
                let mut out = io::stdout();
                write!(out, "{}", prompt)?;
                out.flush()?;

                let mut buf = String::new();
                if io::stdin().read_line(&mut buf)? == 0 {
                    println!();
                    return Ok(None);
                }
                strip_terminator(&mut buf);
                Ok(Some(buf))
            }
            LineSource::Batch(reader) => {
                let mut buf = String::new();
                if reader.read_line(&mut buf)? == 0 {
                    return Ok(None);
                }
                strip_terminator(&mut buf);
                if !buf.trim().is_empty() {
                    let mut out = io::stdout();
                    writeln!(out, "{}", buf)?;
                    out.flush()?;
                }
                Ok(Some(buf))
            }
        }
    }
}

fn strip_terminator(buf: &mut String) {
    while buf.ends_with('\n') || buf.ends_with('\r') {
        buf.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("seqsh_input_{}_{}", name, std::process::id()))
    }

    #[test]
    fn test_batch_reads_lines_until_eof() {
        let path = scratch("lines");
        fs::write(&path, "ls\npwd\n").unwrap();

        let mut source = LineSource::batch(&path).unwrap();
        assert_eq!(source.read_line("$ ").unwrap(), Some("ls".to_string()));
        assert_eq!(source.read_line("$ ").unwrap(), Some("pwd".to_string()));
        assert_eq!(source.read_line("$ ").unwrap(), None);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_batch_handles_missing_final_newline() {
        let path = scratch("no_newline");
        fs::write(&path, "pwd").unwrap();

        let mut source = LineSource::batch(&path).unwrap();
        assert_eq!(source.read_line("$ ").unwrap(), Some("pwd".to_string()));
        assert_eq!(source.read_line("$ ").unwrap(), None);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_batch_open_failure_is_reported_to_caller() {
        assert!(LineSource::batch("/definitely/not/a/batch/file").is_err());
    }

    #[test]
    fn test_strip_terminator_handles_crlf() {
        let mut s = "echo hi\r\n".to_string();
        strip_terminator(&mut s);
        assert_eq!(s, "echo hi");
    }
}
