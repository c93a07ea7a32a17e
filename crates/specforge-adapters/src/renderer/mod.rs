//! Text renderer: document trees to Java, TypeScript and SQL source.

mod java;
mod sql;
mod typescript;

use specforge_core::application::ports::{RenderedFile, UnitRenderer};
use specforge_core::domain::{DdlDocument, GeneratedUnit};
use specforge_core::error::ForgeResult;
use tracing::instrument;

/// Renders every unit kind with plain string building.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl TextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl UnitRenderer for TextRenderer {
    #[instrument(skip_all, fields(kind = unit.kind(), name = unit.name()))]
    fn render_unit(&self, unit: &GeneratedUnit) -> ForgeResult<RenderedFile> {
        match unit {
            GeneratedUnit::Dto(dto) => java::dto(dto),
            GeneratedUnit::Controller(controller) => java::controller(controller),
            GeneratedUnit::Enum(unit) => java::enumeration(unit),
            GeneratedUnit::ClientModel(model) => typescript::model(model),
            GeneratedUnit::ClientService(service) => typescript::service(service),
        }
    }

    #[instrument(skip_all, fields(tables = document.tables.len()))]
    fn render_ddl(&self, document: &DdlDocument) -> ForgeResult<String> {
        Ok(sql::ddl(document))
    }
}

/// Line buffer with fixed-width indentation.
pub(crate) struct Source {
    text: String,
    indent: &'static str,
}

impl Source {
    pub(crate) fn new(indent: &'static str) -> Self {
        Self {
            text: String::new(),
            indent,
        }
    }

    pub(crate) fn line(&mut self, depth: usize, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..depth {
                self.text.push_str(self.indent);
            }
            self.text.push_str(text);
        }
        self.text.push('\n');
        self
    }

    pub(crate) fn blank(&mut self) -> &mut Self {
        self.text.push('\n');
        self
    }

    /// A block comment; multi-line text keeps its line breaks.
    pub(crate) fn doc(&mut self, depth: usize, text: &str) -> &mut Self {
        self.line(depth, "/**");
        for line in text.lines() {
            let line = line.trim_end();
            if line.is_empty() {
                self.line(depth, " *");
            } else {
                self.line(depth, format!(" * {line}"));
            }
        }
        self.line(depth, " */")
    }

    pub(crate) fn finish(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_indents_and_skips_indent_on_empty_lines() {
        let mut src = Source::new("    ");
        src.line(0, "class A {").line(1, "").line(1, "int x;").line(0, "}");
        assert_eq!(src.finish(), "class A {\n\n    int x;\n}\n");
    }

    #[test]
    fn doc_blocks_wrap_each_line() {
        let mut src = Source::new("  ");
        src.doc(1, "First\n\nSecond");
        assert_eq!(src.finish(), "  /**\n   * First\n   *\n   * Second\n   */\n");
    }
}
