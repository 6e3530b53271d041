//! Offline templates used when remote generation is unavailable.
//!
//! Templates are built only from the request's own fields and use the same
//! markup the endpoints return, so they go through the normalizer like any
//! other reply.

use crate::types::{GenerationRequest, ToolKind};

use super::catalog::tool_spec;

/// Deterministic stand-in content for `request`.
///
/// Works on incomplete requests too: absent fields use neutral
/// placeholders.
pub fn fallback_content(request: &GenerationRequest) -> String {
    let topic = request
        .topic()
        .map(|topic| topic.replace('+', " "))
        .unwrap_or_else(|| "Untitled".to_string());
    let spec = tool_spec(request.tool);
    let label = |name: &str, fallback: &str| spec.label_or(request, name, fallback);

    match request.tool {
        ToolKind::Essay => format!(
            "### Introduction\n\nThe topic of \"{topic}\" has become increasingly relevant.\n\n\
             ### Main Body\n\nThe significance cannot be understated.\n\n\
             ### Conclusion\n\nIn conclusion, this remains important."
        ),
        ToolKind::Story => {
            let genre = label("genre", "Adventure");
            format!(
                "# {topic}\n\nIn a {} setting, our protagonist {}.",
                genre.to_lowercase(),
                genre_flavor(&genre)
            )
        }
        ToolKind::Poem => poem_template(
            &topic,
            &label("style", "Free Verse"),
            &label("mood", "Reflective"),
        ),
        ToolKind::Email => {
            let context = request
                .field("context")
                .map(|context| format!("Additional details: {context}\n\n"))
                .unwrap_or_default();
            format!(
                "Subject: {topic}\n\n{},\n\n{} {topic}.\n\n{context}Best regards,\n[Your Name]",
                salutation(&label("recipient", "General")),
                email_opener(&label("tone", "Professional")),
            )
        }
        ToolKind::Paragraph => {
            let purpose = label("purpose", "Informative");
            format!(
                "{} {} {topic}. The {}-length treatment offers {} on this subject.",
                paragraph_lead(&label("tone", "Neutral")),
                paragraph_verb(&purpose),
                label("length", "Medium").to_lowercase(),
                if purpose == "Descriptive" {
                    "rich details"
                } else {
                    "key insights"
                },
            )
        }
        ToolKind::Thesis => format!(
            "THESIS STATEMENT: {topic}\n\nThis {}-complexity thesis takes a {} position on \
             {topic} within the field of {} studies.",
            label("complexity", "Medium").to_lowercase(),
            label("position", "Neutral").to_lowercase(),
            label("field", "General").to_lowercase(),
        ),
        ToolKind::Application => {
            let name = request
                .field("name")
                .unwrap_or_else(|| "Applicant".to_string());
            let reason = request
                .field("reason")
                .map(|reason| format!("**Reason:** {reason}\n\n"))
                .unwrap_or_default();
            format!(
                "**APPLICATION**\n\n**To:** {}\n\nI, {name}, am writing to request {}.\n\n\
                 {reason}**Sincerely,**\n{name}",
                request
                    .field("receiver")
                    .unwrap_or_else(|| "Sir/Madam".to_string()),
                request.field("type").unwrap_or_else(|| "leave".to_string()),
            )
        }
        ToolKind::Report => format!(
            "**REPORT**\n\n**Topic:** {topic}\n**Date:** {}\n\n{}",
            request.field("date").unwrap_or_else(|| "Unknown".to_string()),
            request
                .field("context")
                .unwrap_or_else(|| "No context provided.".to_string()),
        ),
        ToolKind::Content => format!(
            "**CONTENT**\n\n**Topic:** {topic}\n\n{}",
            request
                .field("context")
                .unwrap_or_else(|| "No context provided.".to_string()),
        ),
    }
}

fn genre_flavor(genre: &str) -> &'static str {
    match genre {
        "Romance" => "found love in unexpected places",
        "Mystery" => "uncovered secrets that would change everything",
        "Fantasy" => "discovered magical realms beyond imagination",
        "Sci-Fi" => "encountered advanced technologies that defied belief",
        "Horror" => "faced terrors that chilled them to the bone",
        _ => "embarked on an exciting journey",
    }
}

fn mood_descriptor(mood: &str) -> &'static str {
    match mood {
        "Joyful" => "cheerful delight",
        "Melancholic" => "wistful sorrow",
        "Romantic" => "passionate longing",
        "Inspirational" => "hopeful aspiration",
        _ => "thoughtful contemplation",
    }
}

fn poem_template(topic: &str, style: &str, mood: &str) -> String {
    let feeling = mood_descriptor(mood);
    match style {
        "Sonnet" => format!(
            "Shall I compare {topic} to a summer's day?\nThou art more lovely and more temperate..."
        ),
        "Haiku" => format!("{topic} in spring\n{feeling} grows\nMorning dew glistens"),
        "Limerick" => format!(
            "There once was {topic} so fine\nWhose {feeling} did shine\nWith a tip and a tap\n\
             And a snap and a clap\nIt became quite divine!"
        ),
        "Ballad" => format!("Oh gather round and I'll tell you true\nOf {topic} and {feeling} too..."),
        _ => format!(
            "About {topic}\n\nFlowing freely like a river,\nUnbound by rules or rhyme,\n\
             Expressing {feeling}\nIn its own space and time."
        ),
    }
}

fn salutation(recipient: &str) -> &'static str {
    match recipient {
        "Boss" => "Dear Manager",
        "Colleague" => "Hi [Colleague's Name]",
        "Client" => "Dear Valued Client",
        "Friend" => "Hey [Friend's Name]",
        _ => "To Whom It May Concern",
    }
}

fn email_opener(tone: &str) -> &'static str {
    match tone {
        "Friendly" => "Hope you're doing great!",
        "Formal" => "I am writing to formally address",
        "Casual" => "Just wanted to drop you a note about",
        "Persuasive" => "I strongly recommend considering",
        _ => "I hope this message finds you well.",
    }
}

fn paragraph_lead(tone: &str) -> &'static str {
    match tone {
        "Formal" => "This formal composition",
        "Casual" => "Here's a casual take on",
        "Academic" => "From an academic perspective,",
        "Creative" => "Imagine this creative exploration of",
        _ => "This paragraph",
    }
}

fn paragraph_verb(purpose: &str) -> &'static str {
    match purpose {
        "Persuasive" => "makes a compelling case for",
        "Descriptive" => "vividly describes",
        "Narrative" => "tells a story about",
        "Explanatory" => "explains the concept of",
        _ => "provides information about",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_topic_tool_mentions_the_topic() {
        for tool in ToolKind::ALL {
            if !tool.requires_topic() {
                continue;
            }
            let request = GenerationRequest::new(tool).with_topic("Monsoon");
            let content = fallback_content(&request);
            assert!(content.contains("Monsoon"), "{tool}: {content}");
        }
    }

    #[test]
    fn story_uses_validated_genre() {
        let request = GenerationRequest::new(ToolKind::Story)
            .with_topic("Lost+City")
            .with_param("genre", "Horror");
        assert_eq!(
            fallback_content(&request),
            "# Lost City\n\nIn a horror setting, our protagonist faced terrors that chilled them to the bone."
        );
    }

    #[test]
    fn haiku_uses_mood_descriptor() {
        let request = GenerationRequest::new(ToolKind::Poem)
            .with_topic("autumn")
            .with_param("style", "Haiku")
            .with_param("mood", "Melancholic");
        assert_eq!(
            fallback_content(&request),
            "autumn in spring\nwistful sorrow grows\nMorning dew glistens"
        );
    }

    #[test]
    fn application_works_without_any_fields() {
        let content = fallback_content(&GenerationRequest::new(ToolKind::Application));
        assert!(content.contains("**To:** Sir/Madam"));
        assert!(content.contains("I, Applicant, am writing to request leave."));
        assert!(!content.contains("Reason"));
    }

    #[test]
    fn email_includes_context_when_given() {
        let request = GenerationRequest::new(ToolKind::Email)
            .with_topic("Budget")
            .with_param("recipient", "Boss")
            .with_param("context", "Q3 numbers");
        let content = fallback_content(&request);
        assert!(content.starts_with("Subject: Budget\n\nDear Manager,"));
        assert!(content.contains("Additional details: Q3 numbers"));
    }
}
