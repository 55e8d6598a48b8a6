//! Template environment.
//!
//! Templates are compiled into the binary. Stored item bodies are only
//! trusted after passing through the `html` filter.

use chrono::DateTime;
use dagobah_core::sanitize::{proper_html, title_case};
use dagobah_core::Page;
use minijinja::{Environment, Value};

/// Separator written in front of keys in generated links. The routes drop
/// the first character of every wildcard capture.
pub const LINK_SEPARATOR: &str = "~";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Home,
    Items,
    Main,
    Channels,
}

impl Template {
    pub const ALL: [Template; 4] = [Self::Home, Self::Items, Self::Main, Self::Channels];

    pub fn name(self) -> &'static str {
        match self {
            Self::Home => "home.html",
            Self::Items => "items.html",
            Self::Main => "main.html",
            Self::Channels => "channels.html",
        }
    }

    fn source(self) -> &'static str {
        match self {
            Self::Home => include_str!("../templates/home.html"),
            Self::Items => include_str!("../templates/items.html"),
            Self::Main => include_str!("../templates/main.html"),
            Self::Channels => include_str!("../templates/channels.html"),
        }
    }
}

pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new(site_title: &str) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for template in Template::ALL {
            env.add_template(template.name(), template.source())?;
        }
        env.add_filter("html", html);
        env.add_filter("title", title);
        env.add_filter("datefmt", datefmt);
        env.add_global("site_title", site_title.to_string());
        env.add_global("sep", LINK_SEPARATOR);
        Ok(Self { env })
    }

    pub fn render(&self, template: Template, page: &Page) -> Result<String, minijinja::Error> {
        self.env.get_template(template.name())?.render(page)
    }
}

fn html(value: String) -> Value {
    Value::from_safe_string(proper_html(&value))
}

fn title(value: String) -> String {
    title_case(&value)
}

fn datefmt(value: String) -> String {
    DateTime::parse_from_rfc3339(&value)
        .map(|date| date.format("%b %-d, %Y").to_string())
        .unwrap_or(value)
}
