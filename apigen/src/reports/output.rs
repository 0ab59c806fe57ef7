//! Where reports are printed.

/// Stream a line of output belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Sink for report lines.
///
/// Reports call the semantic methods; an implementation only decides where a
/// finished line goes.
pub trait Output {
    fn write_line(&mut self, stream: Stream, line: String);

    fn section(&mut self, name: &str) {
        self.write_line(Stream::Stdout, format!("{}:", name));
    }

    fn key_value(&mut self, key: &str, value: &str) {
        self.write_line(Stream::Stdout, format!("{}: {}", key, value));
    }

    fn list_item(&mut self, text: &str) {
        self.write_line(Stream::Stdout, format!("  - {}", text));
    }

    /// A file that was written.
    fn added_item(&mut self, text: &str) {
        self.write_line(Stream::Stdout, format!("  + {}", text));
    }

    fn warning(&mut self, msg: &str) {
        self.write_line(Stream::Stderr, msg.to_string());
    }

    fn divider(&mut self, label: &str) {
        self.write_line(Stream::Stdout, format!("── {} ──", label));
    }

    fn preformatted(&mut self, text: &str) {
        self.write_line(Stream::Stdout, text.to_string());
    }

    fn newline(&mut self) {
        self.write_line(Stream::Stdout, String::new());
    }
}

pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// Prints to the process's stdout and stderr.
#[derive(Default)]
pub struct TerminalOutput;

impl Output for TerminalOutput {
    fn write_line(&mut self, stream: Stream, line: String) {
        match stream {
            Stream::Stdout => println!("{}", line),
            Stream::Stderr => eprintln!("{}", line),
        }
    }
}

/// Collects every line in memory, whatever its stream.
#[cfg(test)]
#[derive(Default)]
pub struct BufferOutput {
    pub lines: Vec<String>,
}

#[cfg(test)]
impl Output for BufferOutput {
    fn write_line(&mut self, _stream: Stream, line: String) {
        self.lines.push(line);
    }
}
