//! HTML document assembly and file output.
//!
//! Wraps a rendered body in `<html>`/`<head>`/`<body>` and writes it next to
//! (or instead of) the source file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::{RenderOptions, Style, ToHtml, TransformError};
use mdx_parser::{Component, Property};

/// Source extensions accepted by [`generate_file`].
pub const SOURCE_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Head section settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentConfig {
    pub title: Option<String>,
    /// One `<link>` tag per entry. Attributes with empty values are skipped.
    pub links: Vec<Vec<Property>>,
}

impl DocumentConfig {
    /// Add `<link rel="stylesheet" href="...">`.
    pub fn stylesheet(mut self, href: impl Into<String>) -> Self {
        self.links.push(vec![
            Property::new("rel", "stylesheet"),
            Property::new("href", href),
        ]);
        self
    }
}

/// Error while generating an HTML file from a source file.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("Invalid file type. File must have .md or .mdx extension: {}", path.display())]
    InvalidExtension { path: PathBuf },

    #[error("Error reading {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Error writing {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Build a complete HTML document around the rendered components.
pub fn assemble_document(
    components: &[Component],
    config: &DocumentConfig,
    options: &RenderOptions,
) -> String {
    let unit = &options.indent;
    let head = unit.repeat(2);

    let mut html = String::from("<html>\n");
    html.push_str(&format!("{unit}<head>\n"));
    html.push_str(&format!("{head}<meta charset=\"UTF-8\" />\n"));
    html.push_str(&format!(
        "{head}<meta name=\"viewport\" content=\"width=device-width,initial-scale=1\" />\n"
    ));
    html.push_str(&format!("{head}<meta name=\"description\" content=\"\" />\n"));
    if let Some(title) = config.title.as_deref().filter(|t| !t.is_empty()) {
        html.push_str(&format!("{head}<title>{title}</title>\n"));
    }
    for link in &config.links {
        let attributes: String = link
            .iter()
            .filter(|p| !p.value.is_empty())
            .map(|p| format!(" {}=\"{}\"", p.name, p.value))
            .collect();
        html.push_str(&format!("{head}<link{attributes}>\n"));
    }
    html.push_str(&format!("{unit}</head>\n"));

    html.push_str(&format!("{unit}<body>\n"));
    for component in components {
        match options.style {
            Style::Pretty => html.push_str(&component.to_pretty_html(2, options)),
            Style::Compact => {
                html.push_str(&head);
                html.push_str(&component.to_html());
                html.push('\n');
            }
        }
    }
    html.push_str(&format!("{unit}</body>\n"));
    html.push_str("</html>\n");
    html
}

/// Output path for `input`: `explicit` with `.html` appended when missing,
/// otherwise `input` with its extension replaced.
pub fn output_path(input: &Path, explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) if path.extension().is_some_and(|ext| ext == "html") => path.to_path_buf(),
        Some(path) => {
            let mut name = path.as_os_str().to_os_string();
            name.push(".html");
            PathBuf::from(name)
        }
        None => input.with_extension("html"),
    }
}

/// Read `input`, transform it and write a full HTML document to `output`.
/// Returns the number of bytes written.
pub fn generate_file(
    input: &Path,
    output: &Path,
    config: &DocumentConfig,
    options: &RenderOptions,
) -> Result<usize, GenerateError> {
    let valid = input
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext));
    if !valid {
        return Err(GenerateError::InvalidExtension {
            path: input.to_path_buf(),
        });
    }

    let source = fs::read_to_string(input).map_err(|source| GenerateError::Read {
        path: input.to_path_buf(),
        source,
    })?;

    let components = mdx_parser::parse(&source).map_err(TransformError::from)?;
    let html = assemble_document(&components, config, options);

    fs::write(output, &html).map_err(|source| GenerateError::Write {
        path: output.to_path_buf(),
        source,
    })?;

    Ok(html.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("mdx-codegen-{name}-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    // =========================================================================
    // Document shell
    // =========================================================================

    #[test]
    fn test_assemble_document() {
        let components = mdx_parser::parse("# Hi").unwrap();
        let config = DocumentConfig {
            title: Some("Notes".into()),
            links: Vec::new(),
        }
        .stylesheet("style.css");
        let html = assemble_document(&components, &config, &RenderOptions::default());
        assert_eq!(
            html,
            "<html>\n    <head>\n        <meta charset=\"UTF-8\" />\n        \
             <meta name=\"viewport\" content=\"width=device-width,initial-scale=1\" />\n        \
             <meta name=\"description\" content=\"\" />\n        <title>Notes</title>\n        \
             <link rel=\"stylesheet\" href=\"style.css\">\n    </head>\n    <body>\n        \
             <h1>Hi</h1>\n    </body>\n</html>\n"
        );
    }

    #[test]
    fn test_link_skips_empty_values() {
        let config = DocumentConfig {
            title: None,
            links: vec![vec![
                Property::new("rel", "preconnect"),
                Property::new("crossorigin", ""),
                Property::new("href", "https://fonts.example.com"),
            ]],
        };
        let html = assemble_document(&[], &config, &RenderOptions::default());
        assert!(html.contains("<link rel=\"preconnect\" href=\"https://fonts.example.com\">"));
        assert!(!html.contains("<title>"));
    }

    #[test]
    fn test_compact_body() {
        let components = mdx_parser::parse("- a").unwrap();
        let html = assemble_document(
            &components,
            &DocumentConfig::default(),
            &RenderOptions::compact(),
        );
        assert!(html.contains("<body>\n        <ul>\n    <li><p>a</p></li>\n</ul>\n    </body>"));
    }

    // =========================================================================
    // Output paths
    // =========================================================================

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            output_path(Path::new("docs/page.mdx"), None),
            PathBuf::from("docs/page.html")
        );
        assert_eq!(
            output_path(Path::new("notes.md"), None),
            PathBuf::from("notes.html")
        );
    }

    #[test]
    fn test_explicit_output_path() {
        assert_eq!(
            output_path(Path::new("a.md"), Some(Path::new("out/site"))),
            PathBuf::from("out/site.html")
        );
        assert_eq!(
            output_path(Path::new("a.md"), Some(Path::new("out/index.html"))),
            PathBuf::from("out/index.html")
        );
    }

    // =========================================================================
    // File generation
    // =========================================================================

    #[test]
    fn test_generate_file() {
        let dir = temp_dir("generate");
        let input = dir.join("page.md");
        let output = dir.join("page.html");
        fs::write(&input, "# Title\n\nBody").unwrap();

        let written = generate_file(
            &input,
            &output,
            &DocumentConfig::default(),
            &RenderOptions::default(),
        )
        .unwrap();

        let html = fs::read_to_string(&output).unwrap();
        assert_eq!(written, html.len());
        assert!(html.contains("        <h1>Title</h1>\n        <p>Body</p>\n"));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_invalid_extension() {
        let err = generate_file(
            Path::new("page.txt"),
            Path::new("page.html"),
            &DocumentConfig::default(),
            &RenderOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, GenerateError::InvalidExtension { .. }));
        assert!(err
            .to_string()
            .starts_with("Invalid file type. File must have .md or .mdx extension"));
    }

    #[test]
    fn test_missing_input() {
        let dir = temp_dir("missing");
        let err = generate_file(
            &dir.join("absent.mdx"),
            &dir.join("absent.html"),
            &DocumentConfig::default(),
            &RenderOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, GenerateError::Read { .. }));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_parse_error_writes_nothing() {
        let dir = temp_dir("parse-error");
        let input = dir.join("bad.md");
        let output = dir.join("bad.html");
        fs::write(&input, "{ .class }\n# Title").unwrap();

        let err = generate_file(
            &input,
            &output,
            &DocumentConfig::default(),
            &RenderOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, GenerateError::Transform(_)));
        assert!(!output.exists());
        fs::remove_dir_all(&dir).unwrap();
    }
}
