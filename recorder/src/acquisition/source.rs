use anyhow::Context;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

/// Non-blocking text-line channel. One poll yields at most one line;
/// `None` means the channel had nothing this cycle, the expected steady
/// state on a quiet instrument.
pub trait LineSource {
    fn poll_line(&mut self) -> anyhow::Result<Option<String>>;

    /// True once a bounded source has delivered everything it ever will.
    /// Live transports stay inexhaustible.
    fn exhausted(&self) -> bool {
        false
    }
}

impl LineSource for Box<dyn LineSource> {
    fn poll_line(&mut self) -> anyhow::Result<Option<String>> {
        (**self).poll_line()
    }

    fn exhausted(&self) -> bool {
        (**self).exhausted()
    }
}

/// In-memory source for tests and synthetic feeds. An empty entry models
/// a poll cycle on which the channel had no data.
pub struct ScriptedSource {
    lines: VecDeque<String>,
}

impl ScriptedSource {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl LineSource for ScriptedSource {
    fn poll_line(&mut self) -> anyhow::Result<Option<String>> {
        match self.lines.pop_front() {
            Some(line) if line.is_empty() => Ok(None),
            other => Ok(other),
        }
    }

    fn exhausted(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Replays a captured line log, one line per poll.
pub struct FileSource {
    lines: Lines<BufReader<File>>,
    done: bool,
}

impl FileSource {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let file =
            File::open(path).with_context(|| format!("opening line log {}", path.display()))?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
            done: false,
        })
    }
}

impl LineSource for FileSource {
    fn poll_line(&mut self) -> anyhow::Result<Option<String>> {
        match self.lines.next() {
            Some(line) => Ok(Some(line?)),
            None => {
                self.done = true;
                Ok(None)
            }
        }
    }

    fn exhausted(&self) -> bool {
        self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn scripted_source_pops_lines_in_order() {
        let mut source = ScriptedSource::new(["first", "second"]);
        assert_eq!(source.poll_line().unwrap().as_deref(), Some("first"));
        assert!(!source.exhausted());
        assert_eq!(source.poll_line().unwrap().as_deref(), Some("second"));
        assert!(source.exhausted());
        assert_eq!(source.poll_line().unwrap(), None);
    }

    #[test]
    fn empty_entries_model_idle_cycles() {
        let mut source = ScriptedSource::new(["", "line"]);
        assert_eq!(source.poll_line().unwrap(), None);
        assert!(!source.exhausted());
        assert_eq!(source.poll_line().unwrap().as_deref(), Some("line"));
    }

    #[test]
    fn file_source_replays_until_eof() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"alpha\nbeta\n").unwrap();
        let mut source = FileSource::open(temp.path()).unwrap();

        assert_eq!(source.poll_line().unwrap().as_deref(), Some("alpha"));
        assert_eq!(source.poll_line().unwrap().as_deref(), Some("beta"));
        assert!(!source.exhausted());
        assert_eq!(source.poll_line().unwrap(), None);
        assert!(source.exhausted());
    }
}
