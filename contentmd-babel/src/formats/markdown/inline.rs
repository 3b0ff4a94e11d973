//! Inline parsing: link and image extraction, emphasis runs and heading prefixes.

use super::constants::heading_prefix;
use crate::model::{HeadingTag, Image, Link, Paragraph, Segment, SegmentFormat, Text};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static LINK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(!?)\[([^\[\]]*)\]\((https?://[^\s()]+)\)").expect("link pattern is valid")
});

/// What an inline span turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Text,
    Link,
    Image,
}

/// A piece of a paragraph line before emphasis is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    pub kind: SpanKind,
    pub text: String,
    pub url: String,
}

impl InlineSpan {
    fn text(text: String) -> Self {
        Self {
            kind: SpanKind::Text,
            text,
            url: String::new(),
        }
    }
}

/// Split a line into plain text, link and image spans.
///
/// A link or image whose URL does not parse stays literal and merges with the
/// surrounding plain text. Empty input gives no spans.
pub fn split_paragraph_segments(line: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut last = 0;

    for caps in LINK_PATTERN.captures_iter(line) {
        let Some(whole) = caps.get(0) else { continue };
        plain.push_str(&line[last..whole.start()]);
        last = whole.end();

        let url = &caps[3];
        if let Err(err) = Url::parse(url) {
            debug!("keeping `{}` as text: {}", whole.as_str(), err);
            plain.push_str(whole.as_str());
            continue;
        }

        if !plain.is_empty() {
            spans.push(InlineSpan::text(std::mem::take(&mut plain)));
        }
        let kind = if caps[1].is_empty() {
            SpanKind::Link
        } else {
            SpanKind::Image
        };
        spans.push(InlineSpan {
            kind,
            text: caps[2].to_string(),
            url: url.to_string(),
        });
    }

    plain.push_str(&line[last..]);
    if !plain.is_empty() {
        spans.push(InlineSpan::text(plain));
    }
    spans
}

/// Emphasis marker, checked longest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Strikethrough,
    Bold,
    Italic,
}

impl Marker {
    fn at(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"~~") {
            Some(Marker::Strikethrough)
        } else if bytes.starts_with(b"**") {
            Some(Marker::Bold)
        } else if bytes.starts_with(b"*") {
            Some(Marker::Italic)
        } else {
            None
        }
    }

    fn len(self) -> usize {
        match self {
            Marker::Italic => 1,
            Marker::Bold | Marker::Strikethrough => 2,
        }
    }

    fn toggle(self, state: &mut SegmentFormat) {
        match self {
            Marker::Strikethrough => state.strikethrough = !state.strikethrough,
            Marker::Bold => state.bold = !state.bold,
            Marker::Italic => state.italic = !state.italic,
        }
    }
}

/// Split a text segment into runs at every emphasis marker.
///
/// Markers toggle bold, italic or strikethrough; each run carries the style in force
/// before the marker that ends it, on top of the segment's own format. Markers never
/// pair up, so unbalanced input toggles as written. Empty runs are dropped, so empty
/// text gives nothing. Other text without markers comes back unchanged.
pub fn apply_text_formatting(segment: Text) -> Vec<Text> {
    if segment.text.is_empty() {
        return Vec::new();
    }
    let source = segment.text.as_str();
    let bytes = source.as_bytes();
    let mut runs = Vec::new();
    let mut state = SegmentFormat::default();
    let mut found = false;
    let mut run_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match Marker::at(&bytes[i..]) {
            Some(marker) => {
                found = true;
                push_run(&mut runs, &segment, &source[run_start..i], &state);
                marker.toggle(&mut state);
                i += marker.len();
                run_start = i;
            }
            None => i += 1,
        }
    }

    if !found {
        return vec![segment];
    }
    push_run(&mut runs, &segment, &source[run_start..], &state);
    runs
}

fn push_run(runs: &mut Vec<Text>, base: &Text, text: &str, state: &SegmentFormat) {
    if text.is_empty() {
        return;
    }
    let format = SegmentFormat {
        bold: base.format.bold || state.bold,
        italic: base.format.italic || state.italic,
        strikethrough: base.format.strikethrough || state.strikethrough,
        underline: base.format.underline,
    };
    runs.push(Text {
        text: text.to_string(),
        format,
        link: base.link.clone(),
    });
}

/// Text segment for a link span.
pub fn apply_link(span: &InlineSpan) -> Text {
    Text {
        text: span.text.clone(),
        format: SegmentFormat::default(),
        link: Some(Link {
            href: span.url.clone(),
            underline: true,
        }),
    }
}

/// Image segment for an image span.
pub fn apply_image(span: &InlineSpan) -> Image {
    Image::new(span.url.clone(), span.text.clone())
}

/// Heading level of a line, from its `#` prefix.
pub fn detect_heading(line: &str) -> Option<HeadingTag> {
    HeadingTag::ALL
        .iter()
        .copied()
        .find(|tag| line.starts_with(heading_prefix(*tag)))
}

/// Remove the heading prefix from the first segment of a decorated paragraph.
///
/// The prefix stripped is the one of the paragraph's decorator; a first segment that
/// does not start with it is left alone. A segment left empty is removed.
pub fn apply_heading_format(paragraph: &mut Paragraph) {
    let Some(tag) = paragraph.decorator.as_ref().map(|d| d.tag_name) else {
        return;
    };
    let prefix = heading_prefix(tag);
    let emptied = match paragraph.segments.first_mut() {
        Some(Segment::Text(text)) => match text.text.strip_prefix(prefix) {
            Some(rest) => {
                text.text = rest.to_string();
                text.text.is_empty()
            }
            None => false,
        },
        _ => false,
    };
    if emptied {
        paragraph.segments.remove(0);
    }
}
