//! Self-contained HTML reports assembled from text blocks and plots.
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use plotly::Plot;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.12.1.min.js";

const REPORT_CSS: &str = r#"
body { font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; margin: 0; color: #222; }
header { background: #1f2937; color: #f9fafb; padding: 1.5rem 2rem; }
header h1 { margin: 0 0 0.25rem 0; }
header .meta { color: #9ca3af; font-size: 0.85rem; }
main { max-width: 960px; margin: 0 auto; padding: 1rem 2rem 3rem 2rem; }
section { margin-top: 2rem; }
section h2 { border-bottom: 2px solid #e5e7eb; padding-bottom: 0.3rem; }
.plot { margin: 1rem 0; }
img.logo { max-height: 48px; margin-bottom: 0.5rem; }
"#;

enum Block {
    Content(Markup),
    Plot(Plot),
}

/// One titled section of a report.
pub struct ReportSection {
    title: String,
    blocks: Vec<Block>,
}

impl ReportSection {
    pub fn new(title: impl Into<String>) -> Self {
        ReportSection {
            title: title.into(),
            blocks: Vec::new(),
        }
    }

    /// Append a block of maud markup.
    pub fn add_content(&mut self, content: Markup) {
        self.blocks.push(Block::Content(content));
    }

    /// Append a plotly figure.
    pub fn add_plot(&mut self, plot: Plot) {
        self.blocks.push(Block::Plot(plot));
    }
}

/// An HTML report: a header plus a list of sections.
pub struct Report {
    title: String,
    version: String,
    logo: Option<String>,
    description: String,
    sections: Vec<ReportSection>,
}

impl Report {
    pub fn new(
        title: impl Into<String>,
        version: impl Into<String>,
        logo: Option<&str>,
        description: impl Into<String>,
    ) -> Self {
        Report {
            title: title.into(),
            version: version.into(),
            logo: logo.map(|s| s.to_string()),
            description: description.into(),
            sections: Vec::new(),
        }
    }

    pub fn add_section(&mut self, section: ReportSection) {
        self.sections.push(section);
    }

    /// Render the report to a standalone HTML string.
    pub fn render(&self) -> String {
        let generated = chrono::Local::now().format("%Y-%m-%d %H:%M").to_string();
        let mut plot_counter = 0usize;

        let page = html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="utf-8";
                    title { (self.title) }
                    script src=(PLOTLY_CDN) {}
                    style { (PreEscaped(REPORT_CSS)) }
                }
                body {
                    header {
                        @if let Some(logo) = &self.logo {
                            img class="logo" src=(logo) alt="logo";
                        }
                        h1 { (self.title) }
                        p { (self.description) }
                        p class="meta" { "Version " (self.version) " · generated " (generated) }
                    }
                    main {
                        @for sec in &self.sections {
                            section {
                                h2 { (sec.title) }
                                @for block in &sec.blocks {
                                    @match block {
                                        Block::Content(markup) => { div { (markup) } }
                                        Block::Plot(plot) => {
                                            div class="plot" {
                                                ({
                                                    plot_counter += 1;
                                                    let div_id = format!("plot-{}", plot_counter);
                                                    PreEscaped(plot.to_inline_html(Some(&div_id)))
                                                })
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        };

        page.into_string()
    }

    /// Render and write the report to a file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let html = self.render();
        fs::write(&path, html)
            .with_context(|| format!("Failed to write report to {}", path.as_ref().display()))?;
        log::info!("Report saved to {}", path.as_ref().display());
        Ok(())
    }
}
