//! Output trait for rendering reports to different formats.

/// Target output for reports.
///
/// Reports describe *what* to output using these semantic methods.
/// Implementations decide *how* to render.
pub trait Output {
    /// Start a new section with a heading.
    fn section(&mut self, name: &str);

    /// Render a key-value pair.
    fn key_value(&mut self, key: &str, value: &str);

    /// Render a bullet list item.
    fn list_item(&mut self, text: &str);

    /// Render a warning message.
    fn warning(&mut self, msg: &str);

    /// Render a separator/divider with a label.
    fn divider(&mut self, label: &str);

    /// Render a block of preformatted text.
    fn preformatted(&mut self, text: &str);

    /// Render a blank line.
    fn newline(&mut self);
}

/// A report that can render itself to an output.
pub trait Report {
    /// Render this report to the given output.
    fn render(&self, out: &mut dyn Output);
}

/// Terminal output implementation.
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for TerminalOutput {
    fn section(&mut self, name: &str) {
        println!("{}:", name);
    }

    fn key_value(&mut self, key: &str, value: &str) {
        println!("{}: {}", key, value);
    }

    fn list_item(&mut self, text: &str) {
        println!("  - {}", text);
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("warning: {}", msg);
    }

    fn divider(&mut self, label: &str) {
        println!("── {} ──", label);
    }

    fn preformatted(&mut self, text: &str) {
        println!("{}", text);
    }

    fn newline(&mut self) {
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Output capturing everything for assertions.
    pub struct BufferOutput(pub Vec<String>);

    impl Output for BufferOutput {
        fn section(&mut self, name: &str) {
            self.0.push(format!("{name}:"));
        }
        fn key_value(&mut self, key: &str, value: &str) {
            self.0.push(format!("{key}: {value}"));
        }
        fn list_item(&mut self, text: &str) {
            self.0.push(format!("- {text}"));
        }
        fn warning(&mut self, msg: &str) {
            self.0.push(format!("warning: {msg}"));
        }
        fn divider(&mut self, label: &str) {
            self.0.push(format!("── {label} ──"));
        }
        fn preformatted(&mut self, text: &str) {
            self.0.push(text.to_string());
        }
        fn newline(&mut self) {
            self.0.push(String::new());
        }
    }

    #[test]
    fn test_buffer_output_records_calls() {
        let mut out = BufferOutput(Vec::new());
        out.section("Parsed");
        out.key_value("features", "12");
        out.warning("unresolved alias");

        assert_eq!(
            out.0,
            vec!["Parsed:", "features: 12", "warning: unresolved alias"]
        );
    }
}
