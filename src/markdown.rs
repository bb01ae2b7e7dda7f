#![forbid(unsafe_code)]

//! Markdown rendering for episode descriptions.
//!
//! The renderer is created on first use and reused for the lifetime of the
//! process through [`MarkdownHandle`], which the episode panel receives
//! explicitly instead of reaching for global state.

use std::collections::HashSet;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};
use tracing::debug;

/// Renders release bodies the way the hosting platform shows them: newlines
/// are line breaks, GitHub extensions are on, headings get anchors, raw HTML
/// is passed through untouched and punctuation is typographic.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    options: Options,
    breaks: bool,
    header_anchors: bool,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_SMART_PUNCTUATION);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        Self {
            options,
            breaks: true,
            header_anchors: true,
        }
    }
}

impl MarkdownRenderer {
    pub fn render(&self, source: &str) -> String {
        let breaks = self.breaks;
        let mut events: Vec<Event<'_>> = Parser::new_ext(source, self.options)
            .map(|event| match event {
                Event::SoftBreak if breaks => Event::HardBreak,
                other => other,
            })
            .collect();
        if self.header_anchors {
            add_heading_anchors(&mut events);
        }

        let mut out = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut out, events.into_iter());
        out
    }
}

fn add_heading_anchors(events: &mut [Event<'_>]) {
    let mut used = HashSet::new();
    for index in 0..events.len() {
        if !matches!(events[index], Event::Start(Tag::Heading { id: None, .. })) {
            continue;
        }
        let mut text = String::new();
        for event in &events[index + 1..] {
            match event {
                Event::End(TagEnd::Heading(_)) => break,
                Event::Text(chunk) | Event::Code(chunk) => text.push_str(chunk),
                _ => {}
            }
        }
        let slug = unique_slug(slugify(&text), &mut used);
        if let Event::Start(Tag::Heading { id, .. }) = &mut events[index] {
            *id = Some(CowStr::from(slug));
        }
    }
}

/// GitHub-style anchor: lowercase alphanumerics, whitespace and dashes
/// become `-`, everything else is dropped.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for ch in text.trim().chars() {
        if ch.is_alphanumeric() || ch == '_' {
            slug.extend(ch.to_lowercase());
        } else if ch.is_whitespace() || ch == '-' {
            slug.push('-');
        }
    }
    slug
}

fn unique_slug(base: String, used: &mut HashSet<String>) -> String {
    let base = if base.is_empty() { "section".to_string() } else { base };
    if used.insert(base.clone()) {
        return base;
    }
    let mut counter = 1;
    loop {
        let candidate = format!("{base}-{counter}");
        if used.insert(candidate.clone()) {
            return candidate;
        }
        counter += 1;
    }
}

/// Once-initialized renderer shared by every panel render.
#[derive(Debug, Default)]
pub struct MarkdownHandle {
    renderer: OnceLock<MarkdownRenderer>,
    initializations: AtomicUsize,
}

impl MarkdownHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the renderer, building it on the first call.
    pub fn get(&self) -> &MarkdownRenderer {
        self.renderer.get_or_init(|| {
            self.initializations.fetch_add(1, Ordering::Relaxed);
            debug!("initializing markdown renderer");
            MarkdownRenderer::default()
        })
    }

    pub fn is_initialized(&self) -> bool {
        self.renderer.get().is_some()
    }

    pub fn initializations(&self) -> usize {
        self.initializations.load(Ordering::Relaxed)
    }
}
