//! Per-tool field tables: what is required, what is allow-listed, and how
//! each field is named on the wire.

use crate::types::{GenerationRequest, ToolKind};

/// How the remote endpoint frames its reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyShape {
    /// Plain text, or an envelope when the endpoint sends one.
    TextOrEnvelope,
    /// Must be a `{success, reply}` envelope.
    Envelope,
}

/// Value policy for one field.
#[derive(Debug, Clone, Copy)]
pub enum ValueRule {
    /// Passed through; absent values take `default`, or are omitted when
    /// there is none.
    Free { default: Option<&'static str> },
    /// Must match one of `allowed` (ASCII case-insensitive), else `default`.
    Choice {
        allowed: &'static [&'static str],
        default: &'static str,
    },
    /// Allow-listed labels with distinct wire values; unknown labels use
    /// the `default` label.
    Mapped {
        table: &'static [(&'static str, &'static str)],
        default: &'static str,
    },
}

/// Final rewrite applied to the wire value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireCase {
    AsIs,
    Lower,
    /// First letter upper-cased, the rest lower-cased.
    Capitalized,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub wire: &'static str,
    pub rule: ValueRule,
    pub case: WireCase,
}

impl FieldSpec {
    const fn free(name: &'static str, wire: &'static str, default: Option<&'static str>) -> Self {
        Self {
            name,
            wire,
            rule: ValueRule::Free { default },
            case: WireCase::AsIs,
        }
    }

    const fn choice(
        name: &'static str,
        allowed: &'static [&'static str],
        default: &'static str,
    ) -> Self {
        Self {
            name,
            wire: name,
            rule: ValueRule::Choice { allowed, default },
            case: WireCase::AsIs,
        }
    }

    const fn mapped(
        name: &'static str,
        wire: &'static str,
        table: &'static [(&'static str, &'static str)],
        default: &'static str,
    ) -> Self {
        Self {
            name,
            wire,
            rule: ValueRule::Mapped { table, default },
            case: WireCase::AsIs,
        }
    }

    const fn cased(self, case: WireCase) -> Self {
        Self { case, ..self }
    }

    /// The user-facing value after allow-list coercion, `None` when the
    /// field is free, absent and has no default.
    pub fn label(&self, raw: Option<String>) -> Option<String> {
        match self.rule {
            ValueRule::Free { default } => raw.or_else(|| default.map(str::to_string)),
            ValueRule::Choice { allowed, default } => {
                let matched = raw.and_then(|value| {
                    allowed
                        .iter()
                        .find(|candidate| candidate.eq_ignore_ascii_case(&value))
                        .copied()
                });
                Some(matched.unwrap_or(default).to_string())
            }
            ValueRule::Mapped { table, default } => {
                let matched = raw.and_then(|value| {
                    table
                        .iter()
                        .find(|(label, _)| label.eq_ignore_ascii_case(&value))
                        .map(|(label, _)| *label)
                });
                Some(matched.unwrap_or(default).to_string())
            }
        }
    }

    /// The value sent to the endpoint for a resolved label.
    pub fn wire_value(&self, label: &str) -> String {
        let value = match self.rule {
            ValueRule::Mapped { table, .. } => table
                .iter()
                .find(|(candidate, _)| *candidate == label)
                .map_or(label, |(_, wire)| *wire),
            _ => label,
        };
        match self.case {
            WireCase::AsIs => value.to_string(),
            WireCase::Lower => value.to_lowercase(),
            WireCase::Capitalized => capitalize(value),
        }
    }
}

/// Everything the builder needs to know about one tool.
#[derive(Debug, Clone, Copy)]
pub struct ToolSpec {
    pub tool: ToolKind,
    /// Path of the remote resource relative to the configured base, or an
    /// absolute URL.
    pub resource: &'static str,
    pub required: &'static [&'static str],
    pub fields: &'static [FieldSpec],
    pub reply: ReplyShape,
    pub nonce_param: &'static str,
}

impl ToolSpec {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Resolved label of `name` for `request`, falling back to `fallback`
    /// when the tool has no such field or it resolves to nothing.
    pub fn label_or(&self, request: &GenerationRequest, name: &str, fallback: &str) -> String {
        self.field(name)
            .and_then(|field| field.label(request.field(name)))
            .unwrap_or_else(|| fallback.to_string())
    }
}

const LENGTHS_MID: &[(&str, &str)] = &[("Short", "short"), ("Medium", "mid"), ("Long", "long")];
const LENGTHS_MEDIUM: &[(&str, &str)] =
    &[("Short", "short"), ("Medium", "medium"), ("Long", "long")];

const PROMPT: FieldSpec = FieldSpec::free("topic", "prompt", None);

pub const ESSAY_TYPES: &[&str] = &["Argumentative", "Descriptive", "Narrative", "Expository"];
pub const STORY_GENRES: &[&str] = &["Adventure", "Romance", "Mystery", "Fantasy", "Sci-Fi", "Horror"];
pub const STORY_TONES: &[&str] = &["Engaging", "Dramatic", "Humorous", "Dark", "Inspirational"];
pub const POEM_STYLES: &[&str] = &["Free Verse", "Sonnet", "Haiku", "Limerick", "Ballad"];
pub const POEM_MOODS: &[&str] = &["Reflective", "Joyful", "Melancholic", "Romantic", "Inspirational"];
pub const EMAIL_TONES: &[&str] = &["Professional", "Friendly", "Formal", "Casual", "Persuasive"];
pub const EMAIL_RECIPIENTS: &[&str] = &["Boss", "Colleague", "Client", "Friend", "General"];
pub const PARAGRAPH_PURPOSES: &[&str] =
    &["Informative", "Persuasive", "Descriptive", "Narrative", "Explanatory"];
pub const PARAGRAPH_TONES: &[&str] = &["Neutral", "Formal", "Casual", "Academic", "Creative"];
pub const THESIS_POSITIONS: &[&str] = &["Supportive", "Critical", "Neutral", "Comparative"];
pub const THESIS_FIELDS: &[&str] = &[
    "Literature",
    "History",
    "Science",
    "Technology",
    "Social Studies",
    "General",
];
pub const THESIS_COMPLEXITIES: &[&str] = &["Simple", "Medium", "Complex", "Advanced"];

static CATALOG: [ToolSpec; 9] = [
    ToolSpec {
        tool: ToolKind::Essay,
        resource: "api.php",
        required: &["topic"],
        fields: &[
            PROMPT,
            FieldSpec::choice("type", ESSAY_TYPES, "Argumentative"),
            FieldSpec::free("stage", "level", Some("High School")),
            FieldSpec::mapped("length", "longtype", LENGTHS_MID, "Medium"),
        ],
        reply: ReplyShape::TextOrEnvelope,
        nonce_param: "_",
    },
    ToolSpec {
        tool: ToolKind::Story,
        resource: "api_story.php",
        required: &["topic"],
        fields: &[
            PROMPT,
            FieldSpec::choice("genre", STORY_GENRES, "Adventure"),
            FieldSpec::mapped("length", "length", LENGTHS_MID, "Medium"),
            FieldSpec::choice("tone", STORY_TONES, "Engaging"),
        ],
        reply: ReplyShape::TextOrEnvelope,
        nonce_param: "_",
    },
    ToolSpec {
        tool: ToolKind::Poem,
        resource: "api_poem.php",
        required: &["topic"],
        fields: &[
            PROMPT,
            FieldSpec::choice("style", POEM_STYLES, "Free Verse"),
            FieldSpec::choice("mood", POEM_MOODS, "Reflective"),
            FieldSpec::mapped("length", "length", LENGTHS_MEDIUM, "Medium"),
        ],
        reply: ReplyShape::TextOrEnvelope,
        nonce_param: "_",
    },
    ToolSpec {
        tool: ToolKind::Email,
        resource: "api_email.php",
        required: &["topic"],
        fields: &[
            PROMPT,
            FieldSpec::choice("tone", EMAIL_TONES, "Professional"),
            FieldSpec::choice("recipient", EMAIL_RECIPIENTS, "General"),
            FieldSpec::free("context", "context", None),
        ],
        reply: ReplyShape::TextOrEnvelope,
        nonce_param: "_",
    },
    ToolSpec {
        tool: ToolKind::Thesis,
        resource: "api_thesis.php",
        required: &["topic"],
        fields: &[
            PROMPT,
            FieldSpec::choice("position", THESIS_POSITIONS, "Neutral"),
            FieldSpec::choice("field", THESIS_FIELDS, "General"),
            FieldSpec::choice("complexity", THESIS_COMPLEXITIES, "Medium").cased(WireCase::Lower),
        ],
        reply: ReplyShape::TextOrEnvelope,
        nonce_param: "nocache",
    },
    ToolSpec {
        tool: ToolKind::Application,
        resource: "api_application.php",
        required: &["category", "type", "receiver", "name"],
        fields: &[
            FieldSpec::free("category", "category", None).cased(WireCase::Capitalized),
            FieldSpec::free("type", "type", None),
            FieldSpec::free("receiver", "receiver", None),
            FieldSpec::free("name", "name", None),
            FieldSpec::free("reason", "reason", None),
        ],
        reply: ReplyShape::Envelope,
        nonce_param: "_",
    },
    ToolSpec {
        tool: ToolKind::Report,
        resource: "api_report.php",
        required: &["topic", "context", "date", "tone"],
        fields: &[
            PROMPT,
            FieldSpec::free("context", "context", None),
            FieldSpec::free("date", "incident_date", None),
            FieldSpec::free("tone", "tone", None),
        ],
        reply: ReplyShape::Envelope,
        nonce_param: "_",
    },
    ToolSpec {
        tool: ToolKind::Paragraph,
        resource: "api_paragraph.php",
        required: &["topic"],
        fields: &[
            PROMPT,
            FieldSpec::choice("purpose", PARAGRAPH_PURPOSES, "Informative"),
            FieldSpec::choice("tone", PARAGRAPH_TONES, "Neutral"),
            FieldSpec::mapped("length", "length", LENGTHS_MEDIUM, "Medium"),
        ],
        reply: ReplyShape::TextOrEnvelope,
        nonce_param: "_",
    },
    ToolSpec {
        tool: ToolKind::Content,
        resource: "https://sttricks.site/jsw/api_content.php",
        required: &["topic", "type"],
        fields: &[
            PROMPT,
            FieldSpec::free("type", "type", None),
            FieldSpec::free("tone", "tone", Some("Professional")),
            FieldSpec::free("length", "length", Some("Medium")),
            FieldSpec::free("audience", "audience", Some("")),
            FieldSpec::free("context", "context", Some("")),
        ],
        reply: ReplyShape::Envelope,
        nonce_param: "_",
    },
];

/// The catalog entry for `tool`.
pub fn tool_spec(tool: ToolKind) -> &'static ToolSpec {
    let index = match tool {
        ToolKind::Essay => 0,
        ToolKind::Story => 1,
        ToolKind::Poem => 2,
        ToolKind::Email => 3,
        ToolKind::Thesis => 4,
        ToolKind::Application => 5,
        ToolKind::Report => 6,
        ToolKind::Paragraph => 7,
        ToolKind::Content => 8,
    };
    &CATALOG[index]
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
