use clap::{Parser, Subcommand};
use mdx_codegen::{DocumentConfig, RenderOptions, Style};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "mdx")]
#[command(about = "MDX markup to HTML compiler")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile an .md/.mdx file to a full HTML document
    Build {
        /// Input .md or .mdx file
        path: PathBuf,

        /// Output file (".html" is appended when missing)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Document title (defaults to the input file name)
        #[arg(long)]
        title: Option<String>,

        /// Stylesheet to link from the head, may be repeated
        #[arg(long = "stylesheet", value_name = "HREF")]
        stylesheets: Vec<String>,

        /// Maximum line width of the generated HTML
        #[arg(long, default_value_t = 120)]
        width: usize,

        /// Emit compact HTML instead of indented HTML
        #[arg(long)]
        compact: bool,
    },

    /// Check a file for errors without generating output
    Check {
        /// Input .md or .mdx file
        path: PathBuf,
    },

    /// Print the parsed component tree
    Ast {
        /// Input .md or .mdx file
        path: PathBuf,
    },

    /// Print the token stream, one token per line
    Tokens {
        /// Input .md or .mdx file
        path: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Build {
            path,
            output,
            title,
            stylesheets,
            width,
            compact,
        } => {
            let options = RenderOptions {
                line_width: width,
                style: if compact { Style::Compact } else { Style::Pretty },
                ..RenderOptions::default()
            };
            let title = title.or_else(|| {
                path.file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
            });
            let config = stylesheets.into_iter().fold(
                DocumentConfig {
                    title,
                    links: Vec::new(),
                },
                |config, href| config.stylesheet(href),
            );
            cmd_build(&path, output.as_deref(), &config, &options);
        }
        Command::Check { path } => cmd_check(&path),
        Command::Ast { path } => cmd_ast(&path),
        Command::Tokens { path } => cmd_tokens(&path),
    }
}

fn read_source(path: &Path) -> String {
    if !path.exists() {
        eprintln!("Error: file not found: {}", path.display());
        std::process::exit(1);
    }
    match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading {}: {e}", path.display());
            std::process::exit(1);
        }
    }
}

fn parse_source(path: &Path) -> Vec<mdx_parser::Component> {
    let source = read_source(path);
    match mdx_parser::parse(&source) {
        Ok(components) => components,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn cmd_build(path: &Path, output: Option<&Path>, config: &DocumentConfig, options: &RenderOptions) {
    let html_path = mdx_codegen::output_path(path, output);

    match mdx_codegen::generate_file(path, &html_path, config, options) {
        Ok(bytes) => eprintln!("Built: {} ({bytes} bytes)", html_path.display()),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn cmd_check(path: &Path) {
    parse_source(path);
    eprintln!("OK: {}", path.display());
}

fn cmd_ast(path: &Path) {
    for component in parse_source(path) {
        println!("{component:#?}");
    }
}

fn cmd_tokens(path: &Path) {
    let source = read_source(path);
    for token in mdx_lexer::Lexer::tokenize(&source) {
        println!("{:?} {:?}", token.kind, token.literal);
    }
}
