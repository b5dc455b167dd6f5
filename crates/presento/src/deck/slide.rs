use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::id::SlideId;

pub const DEFAULT_IMAGE_SCALE: u32 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    #[default]
    Title,
    Bullets,
    ImageCenter,
    Code,
    Blank,
}

impl Layout {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Bullets => "bullets",
            Self::ImageCenter => "image-center",
            Self::Code => "code",
            Self::Blank => "blank",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "title" => Some(Self::Title),
            "bullets" | "bullet" | "list" => Some(Self::Bullets),
            "image-center" | "image" => Some(Self::ImageCenter),
            "code" => Some(Self::Code),
            "blank" => Some(Self::Blank),
            _ => None,
        }
    }

    pub fn all() -> &'static [Layout] {
        &[
            Layout::Title,
            Layout::Bullets,
            Layout::ImageCenter,
            Layout::Code,
            Layout::Blank,
        ]
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
    #[default]
    Contain,
    Cover,
    Fill,
}

impl ImageFit {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Contain => "contain",
            Self::Cover => "cover",
            Self::Fill => "fill",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "contain" => Some(Self::Contain),
            "cover" => Some(Self::Cover),
            "fill" => Some(Self::Fill),
            _ => None,
        }
    }
}

/// Layout-specific slide fields, keyed by layout.
#[derive(Debug, Clone, PartialEq)]
pub enum SlideBody {
    Title {
        content: Option<String>,
    },
    Bullets {
        items: Vec<String>,
    },
    ImageCenter {
        content: Option<String>,
        image: Option<String>,
        fit: Option<ImageFit>,
        scale: Option<u32>,
    },
    Code {
        content: Option<String>,
        code: Option<String>,
    },
    Blank {
        content: Option<String>,
    },
}

impl SlideBody {
    pub fn layout(&self) -> Layout {
        match self {
            Self::Title { .. } => Layout::Title,
            Self::Bullets { .. } => Layout::Bullets,
            Self::ImageCenter { .. } => Layout::ImageCenter,
            Self::Code { .. } => Layout::Code,
            Self::Blank { .. } => Layout::Blank,
        }
    }

    /// Content as a single string; bullet items are joined by newlines.
    pub fn content_text(&self) -> Option<String> {
        match self {
            Self::Bullets { items } => {
                if items.is_empty() {
                    None
                } else {
                    Some(items.join("\n"))
                }
            }
            Self::Title { content }
            | Self::ImageCenter { content, .. }
            | Self::Code { content, .. }
            | Self::Blank { content } => content.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub id: SlideId,
    pub title: Option<String>,
    /// Presenter-only text, never rendered for the audience.
    pub notes: Option<String>,
    pub body: SlideBody,
}

impl Slide {
    /// A blank title slide with empty title and content.
    pub fn new(id: SlideId) -> Self {
        Self {
            id,
            title: Some(String::new()),
            notes: None,
            body: SlideBody::Title {
                content: Some(String::new()),
            },
        }
    }

    pub fn layout(&self) -> Layout {
        self.body.layout()
    }

    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(t) if !t.trim().is_empty() => t,
            _ => "Untitled",
        }
    }

    /// Replace the content. Bullet slides split the text into one item per line.
    pub fn set_content(&mut self, text: &str) {
        match &mut self.body {
            SlideBody::Bullets { items } => *items = split_lines(text),
            SlideBody::Title { content }
            | SlideBody::ImageCenter { content, .. }
            | SlideBody::Code { content, .. }
            | SlideBody::Blank { content } => *content = Some(text.to_string()),
        }
    }

    /// Switch layout, carrying the content across representations.
    pub fn with_layout(self, layout: Layout) -> Self {
        if self.layout() == layout {
            return self;
        }
        let text = self.body.content_text();
        let (image, fit, scale, code) = match &self.body {
            SlideBody::ImageCenter {
                image, fit, scale, ..
            } => (image.clone(), *fit, *scale, None),
            SlideBody::Code { code, .. } => (None, None, None, code.clone()),
            _ => (None, None, None, None),
        };
        let body = match layout {
            Layout::Title => SlideBody::Title { content: text },
            Layout::Bullets => SlideBody::Bullets {
                items: text.as_deref().map(split_lines).unwrap_or_default(),
            },
            Layout::ImageCenter => SlideBody::ImageCenter {
                content: text,
                image,
                fit,
                scale,
            },
            Layout::Code => SlideBody::Code {
                content: text,
                code,
            },
            Layout::Blank => SlideBody::Blank { content: text },
        };
        Self { body, ..self }
    }

    /// Build a typed slide from its wire form, normalizing content to the layout.
    pub fn from_record(record: SlideRecord, id: SlideId) -> Self {
        if record.layout == Layout::Bullets {
            let items = match record.content {
                Some(Content::Lines(lines)) => lines,
                Some(Content::Text(text)) => split_lines(&text),
                None => Vec::new(),
            };
            return Self {
                id,
                title: record.title,
                notes: record.notes,
                body: SlideBody::Bullets { items },
            };
        }
        let text = record.content.map(Content::into_text);
        let body = match record.layout {
            Layout::Title | Layout::Bullets => SlideBody::Title { content: text },
            Layout::ImageCenter => SlideBody::ImageCenter {
                content: text,
                image: record.image,
                fit: record.image_fit,
                scale: record.image_scale,
            },
            Layout::Code => SlideBody::Code {
                content: text,
                code: record.code,
            },
            Layout::Blank => SlideBody::Blank { content: text },
        };
        Self {
            id,
            title: record.title,
            notes: record.notes,
            body,
        }
    }
}

fn split_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n').map(str::to_string).collect()
}

/// Bullet content travels as an array; every other layout uses a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Lines(Vec<String>),
}

impl Content {
    fn into_text(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Lines(lines) => lines.join("\n"),
        }
    }
}

/// Flat JSON shape of a slide, used for local persistence and import/export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideRecord {
    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    #[serde(default)]
    pub layout: Layout,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_fit: Option<ImageFit>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_scale: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Accept any truthy id: strings are kept, numbers are stringified, and
/// empty, zero, null or structured values count as missing.
fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let id = match Value::deserialize(deserializer)? {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    };
    Ok(id)
}

impl From<&Slide> for SlideRecord {
    fn from(slide: &Slide) -> Self {
        let mut record = SlideRecord {
            id: Some(slide.id.to_string()),
            layout: slide.layout(),
            title: slide.title.clone(),
            notes: slide.notes.clone(),
            ..Default::default()
        };
        match &slide.body {
            SlideBody::Bullets { items } => {
                record.content = Some(Content::Lines(items.clone()));
            }
            SlideBody::ImageCenter {
                content,
                image,
                fit,
                scale,
            } => {
                record.content = content.clone().map(Content::Text);
                record.image = image.clone();
                record.image_fit = *fit;
                record.image_scale = *scale;
            }
            SlideBody::Code { content, code } => {
                record.content = content.clone().map(Content::Text);
                record.code = code.clone();
            }
            SlideBody::Title { content } | SlideBody::Blank { content } => {
                record.content = content.clone().map(Content::Text);
            }
        }
        record
    }
}

impl Serialize for Slide {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SlideRecord::from(self).serialize(serializer)
    }
}

/// Convert wire records into slides, generating an id for every record that
/// has none or repeats one seen earlier in the list.
pub fn slides_from_records(records: Vec<SlideRecord>) -> Vec<Slide> {
    let mut seen: HashSet<String> = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .map(|mut record| {
            let id = match record.id.take() {
                Some(id) if !id.is_empty() && !seen.contains(&id) => SlideId::new(id),
                Some(id) if !id.is_empty() => {
                    let fresh = SlideId::generate();
                    log::debug!("Duplicate slide id {id}, assigned {fresh}");
                    fresh
                }
                _ => {
                    let fresh = SlideId::generate();
                    log::debug!("Slide without id, assigned {fresh}");
                    fresh
                }
            };
            seen.insert(id.to_string());
            Slide::from_record(record, id)
        })
        .collect()
}
