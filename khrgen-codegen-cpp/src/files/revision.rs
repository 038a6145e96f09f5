//! The `glrevision.h` artifact.

use khrgen_codegen::CodeBuilder;

use super::push_banner;

pub struct RevisionHeader {
    revision: u32,
}

impl RevisionHeader {
    pub fn new(revision: u32) -> Self {
        Self { revision }
    }

    pub fn render(&self) -> String {
        let mut b = CodeBuilder::cpp();
        push_banner(&mut b);
        b.push_line(&format!("#define GLAPI_REVISION {}", self.revision));
        b.build()
    }

    /// Extract the revision from a previously generated header, if any.
    pub fn parse(content: &str) -> Option<u32> {
        content
            .lines()
            .find_map(|l| l.strip_prefix("#define GLAPI_REVISION "))
            .and_then(|n| n.trim().parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_and_parse_round() {
        let rendered = RevisionHeader::new(31337).render();
        assert!(rendered.contains("#define GLAPI_REVISION 31337"));
        assert_eq!(RevisionHeader::parse(&rendered), Some(31337));
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(RevisionHeader::parse("not a header"), None);
    }
}
