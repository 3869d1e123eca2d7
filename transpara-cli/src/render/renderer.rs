use super::theme::OneDark;
use termimad::{
    MadSkin,
    crossterm::style::{Color, Stylize},
};
use transpara_core::{CatalogError, Document, render};

#[derive(Clone)]
pub struct RenderOptions {
    pub date_format: String,
    pub use_color: bool,
    pub short_mode: bool,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(config: Option<RenderOptions>) -> Self {
        Self {
            skin: OneDark::default_onedark_skin(),
            opts: match config {
                Some(config) => config,
                None => RenderOptions {
                    date_format: "%d %b %Y".to_string(),
                    use_color: true,
                    short_mode: false,
                },
            },
        }
    }

    pub fn print_md(&self, md: &str) {
        if self.opts.use_color {
            self.skin.print_text(md);
        } else {
            print!("{md}");
            if !md.ends_with('\n') {
                println!();
            }
        }
    }

    pub fn print_info(&self, message: &str) {
        if self.opts.use_color {
            let md = format!("|-|\n| {message} |\n|-|\n");
            self.skin.print_text(&md);
        } else {
            println!("{message}");
        }
    }

    pub fn print_document_line(&self, doc: &Document) {
        let mut date = doc.date.format(&self.opts.date_format).to_string();
        let mut title = doc.title.trim().to_string();
        let mut tag = format!("[{}]", doc.tag.as_ref());
        if self.opts.use_color {
            date = date.with(Color::Cyan).to_string();
            title = title.with(Color::Yellow).to_string();
            tag = tag.with(Color::Green).to_string();
        }
        println!("{} - {} {}", date, title, tag);
    }

    pub fn print_documents(&self, documents: &[&Document]) {
        for (i, doc) in documents.iter().enumerate() {
            if self.opts.short_mode {
                self.print_document_line(doc);
                continue;
            }
            let line = render::format_document_line(doc, &self.opts.date_format);
            let heading = format!("## {line}");

            let body = doc.description.trim();
            let md = if body.is_empty() {
                format!("{heading}\n")
            } else {
                format!("{heading}\n{body}\n")
            };
            self.print_md(&md);

            if i + 1 < documents.len() && !self.opts.short_mode {
                println!();
            }
        }
    }

    pub fn print_errors(&self, errors: &[CatalogError]) {
        self.print_md("\n# Errors:");
        for error in errors {
            match error {
                CatalogError::InvalidDate { id, input } => {
                    let message =
                        format!("* Document {}: could not parse date '{}'", id, input);
                    self.print_md(&message);
                }
                CatalogError::UnknownTag { id, input } => {
                    let message = format!("* Document {}: unknown tag '{}'", id, input);
                    self.print_md(&message);
                }
            }
        }
    }
}
