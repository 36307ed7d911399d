//! CLI binary for playing and validating storywalk documents.

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};

use storywalk_engine::{
    check, AdvanceOutcome, Navigator, PageKind, PageView, Severity, StoryGraph,
};

#[derive(Parser)]
#[command(name = "storywalk", version, about = "Interactive branching-narrative player")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a story document interactively
    Play {
        /// Path or http(s) URL of the story JSON
        source: String,

        /// Start from this page id instead of the document's startPageId
        #[arg(long)]
        start: Option<String>,
    },

    /// Validate a story document and print its diagnostics
    Validate {
        /// Path or http(s) URL of the story JSON
        source: String,

        /// Emit diagnostics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show information about a story document
    Info {
        /// Path or http(s) URL of the story JSON
        source: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    match cli.command {
        Commands::Play { source, start } => cmd_play(&source, start.as_deref()).await?,
        Commands::Validate { source, json } => cmd_validate(&source, json).await?,
        Commands::Info { source } => cmd_info(&source).await?,
    }

    Ok(())
}

/// The one-time fetch: read the raw document from a local path or an
/// http(s) URL. A failure here is fatal: no session can begin.
async fn load_source(source: &str) -> anyhow::Result<String> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let response = reqwest::get(source).await?.error_for_status()?;
        Ok(response.text().await?)
    } else {
        Ok(std::fs::read_to_string(source)?)
    }
}

async fn load_graph(source: &str, start_override: Option<&str>) -> anyhow::Result<StoryGraph> {
    let raw = load_source(source).await?;
    let mut doc = storywalk_document::parse(&raw)?;
    if let Some(id) = start_override {
        doc.start_page_id = Some(id.to_owned());
    }
    Ok(StoryGraph::from_doc(&doc))
}

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "ERROR",
        Severity::Warning => "WARN",
    }
}

fn kind_tag(kind: PageKind) -> &'static str {
    match kind {
        PageKind::Question => "question",
        PageKind::Result => "result",
    }
}

/// Breadcrumb label: the page title when present, else the bare id.
fn trail_label(graph: &StoryGraph, id: &str) -> String {
    match graph.lookup(id) {
        Some(page) if !page.title.is_empty() => format!("{} ({})", page.title, id),
        _ => id.to_owned(),
    }
}

fn render(graph: &StoryGraph, nav: &Navigator, view: &PageView) {
    let trail: Vec<String> = nav.trail().map(|id| trail_label(graph, id)).collect();
    if trail.len() > 1 {
        println!("Path: {}", trail.join(" > "));
    }

    println!();
    println!("[{}] {}", kind_tag(view.page.kind), view.page.id);
    if !view.page.title.is_empty() {
        println!("# {}", view.page.title);
    }
    if !view.page.text.is_empty() {
        println!("{}", view.page.text);
    }

    if view.is_terminal {
        println!("(The end. 'r' to restart, 'q' to quit.)");
    } else if view.page.choices.is_empty() {
        println!("(No choices here. 'b' to go back, 'r' to restart.)");
    } else {
        println!();
        for (i, choice) in view.page.choices.iter().enumerate() {
            println!("  {}) {}", i + 1, choice.label);
        }
    }
}

async fn cmd_play(source: &str, start: Option<&str>) -> anyhow::Result<()> {
    let graph = load_graph(source, start).await?;

    let diagnostics = check(&graph);
    if !diagnostics.is_empty() {
        eprintln!("Document has {} issue(s); playing anyway:", diagnostics.len());
        for diag in &diagnostics {
            eprintln!("  [{}] {}", severity_tag(diag.severity), diag);
        }
    }

    let mut nav = Navigator::new();
    nav.start(&graph)
        .map_err(|err| anyhow::anyhow!("cannot start session: {err}"))?;

    let stdin = io::stdin();
    let mut input = String::new();
    loop {
        match nav.view(&graph) {
            Ok(view) => render(&graph, &nav, &view),
            Err(err) => println!("! {err} ('b' to go back, 'r' to restart)"),
        }

        print!("> ");
        io::stdout().flush()?;
        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            break; // EOF
        }

        match input.trim() {
            "" => continue,
            "q" | "quit" => break,
            "b" | "back" => {
                if !nav.back() {
                    println!("Nothing to go back to.");
                }
            }
            "r" | "restart" => {
                if let Err(err) = nav.restart(&graph) {
                    println!("! {err}");
                }
            }
            command => match command.parse::<usize>() {
                Ok(n) if n >= 1 => match nav.advance(&graph, n - 1) {
                    Ok(AdvanceOutcome::Moved) => {}
                    Ok(AdvanceOutcome::Terminal) => {
                        println!("This is a result page; 'r' restarts.");
                    }
                    Err(err) if err.is_navigation() => println!("! {err}"),
                    Err(err) => return Err(err.into()),
                },
                _ => println!("Enter a choice number, 'b', 'r', or 'q'."),
            },
        }
    }

    Ok(())
}

async fn cmd_validate(source: &str, json: bool) -> anyhow::Result<()> {
    let graph = load_graph(source, None).await?;
    let diagnostics = check(&graph);

    if json {
        println!("{}", serde_json::to_string_pretty(&diagnostics)?);
    } else if diagnostics.is_empty() {
        println!("Document is valid");
    } else {
        for diag in &diagnostics {
            println!("[{}] {}: {}", severity_tag(diag.severity), diag.name(), diag);
        }
    }

    if diagnostics.iter().any(|d| d.severity == Severity::Error) {
        std::process::exit(1);
    }
    Ok(())
}

async fn cmd_info(source: &str) -> anyhow::Result<()> {
    let graph = load_graph(source, None).await?;

    let choice_count: usize = graph.pages().map(|p| p.choices.len()).sum();
    println!("Pages: {}", graph.page_count());
    println!("Choices: {}", choice_count);
    match graph.start_page_id() {
        Some(start) if graph.has_explicit_start() => println!("Start: {start}"),
        Some(start) => println!("Start: {start} (first page fallback)"),
        None => println!("Start: (unresolved)"),
    }

    println!("\nPages:");
    for page in graph.pages() {
        let title = if page.title.is_empty() {
            "(untitled)"
        } else {
            &page.title
        };
        println!(
            "  {} [{}] kind={} choices={}",
            page.id,
            title,
            kind_tag(page.kind),
            page.choices.len()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_source_reads_a_local_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "pages": [ {{ "id": "only", "type": "result" }} ] }}"#).unwrap();

        let raw = load_source(file.path().to_str().unwrap()).await.unwrap();
        let graph = StoryGraph::from_doc(&storywalk_document::parse(&raw).unwrap());
        assert_eq!(graph.page_count(), 1);
    }

    #[tokio::test]
    async fn load_graph_applies_start_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "startPageId": "a",
                "pages": [
                    {{ "id": "a", "type": "result" }},
                    {{ "id": "b", "type": "result" }}
                ]
            }}"#
        )
        .unwrap();

        let graph = load_graph(file.path().to_str().unwrap(), Some("b"))
            .await
            .unwrap();
        assert_eq!(graph.start_page_id(), Some("b"));
    }

    #[test]
    fn trail_label_prefers_the_title() {
        let doc = storywalk_document::parse(
            r#"{ "pages": [ { "id": "p1", "title": "Opening", "type": "result" } ] }"#,
        )
        .unwrap();
        let graph = StoryGraph::from_doc(&doc);

        assert_eq!(trail_label(&graph, "p1"), "Opening (p1)");
        assert_eq!(trail_label(&graph, "ghost"), "ghost");
    }
}
