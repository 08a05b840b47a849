//! The canonical, already-sanitized input of one render.

pub const DEFAULT_TITLE: &str = "Travel Itinerary";
pub const DEFAULT_SUBTITLE: &str = "Your day-by-day travel plan";
pub const DEFAULT_HEADING: &str = "Section";
pub const DEFAULT_TRAVELLER: &str = "Valued traveller";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    pub heading: String,
    pub body: String,
    pub bullets: Vec<String>,
}

impl Section {
    pub fn new(heading: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            body: body.into(),
            bullets: Vec::new(),
        }
    }

    pub fn with_bullets<I, S>(mut self, bullets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bullets = bullets.into_iter().map(Into::into).collect();
        self
    }

    pub fn heading_or_default(&self) -> &str {
        non_empty(&self.heading).unwrap_or(DEFAULT_HEADING)
    }

    fn sanitized(self) -> Self {
        Self {
            heading: sanitize(&self.heading),
            body: sanitize(&self.body),
            bullets: self
                .bullets
                .iter()
                .map(|b| sanitize(b))
                .filter(|b| !b.trim().is_empty())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItineraryDocument {
    pub title: String,
    pub subtitle: String,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub operator_name: Option<String>,
    pub operator_country: Option<String>,
    pub website: Option<String>,
    pub contact: Option<String>,
    pub generated_at: Option<String>,
    pub sections: Vec<Section>,
}

impl ItineraryDocument {
    pub fn title(&self) -> &str {
        non_empty(&self.title).unwrap_or(DEFAULT_TITLE)
    }

    pub fn subtitle(&self) -> &str {
        non_empty(&self.subtitle).unwrap_or(DEFAULT_SUBTITLE)
    }

    pub fn prepared_for(&self) -> &str {
        self.customer_name.as_deref().and_then(non_empty).unwrap_or(DEFAULT_TRAVELLER)
    }

    /// Normalizes every text field and drops empty optionals.
    pub fn sanitized(self) -> Self {
        let opt = |v: Option<String>| v.map(|s| sanitize(&s)).filter(|s| !s.trim().is_empty());
        Self {
            title: sanitize(&self.title),
            subtitle: sanitize(&self.subtitle),
            customer_name: opt(self.customer_name),
            customer_email: opt(self.customer_email),
            operator_name: opt(self.operator_name),
            operator_country: opt(self.operator_country),
            website: opt(self.website),
            contact: opt(self.contact),
            generated_at: opt(self.generated_at),
            sections: self.sections.into_iter().map(Section::sanitized).collect(),
        }
    }
}

fn non_empty(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Maps typographic punctuation to ASCII and strips control characters, keeping `\n`.
pub fn sanitize(text: &str) -> String {
    let text = text.replace("\r\n", "\n");
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' => out.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' => out.push('"'),
            '\u{2010}'..='\u{2015}' | '\u{2212}' => out.push('-'),
            '\u{2022}' | '\u{2023}' | '\u{2043}' | '\u{25CF}' | '\u{25E6}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            '\r' => out.push('\n'),
            '\t' | '\u{00A0}' | '\u{2000}'..='\u{200A}' | '\u{202F}' | '\u{205F}' | '\u{3000}' => out.push(' '),
            '\u{200B}'..='\u{200D}' | '\u{2060}' | '\u{FEFF}' => {}
            '\n' => out.push('\n'),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn typographic_punctuation_becomes_ascii() {
        assert_eq!(
            sanitize("\u{201C}Jambo\u{201D} \u{2014} it\u{2019}s \u{2022} day\u{2026}"),
            "\"Jambo\" - it's - day..."
        );
    }

    #[test]
    fn control_characters_are_stripped_and_newlines_kept() {
        assert_eq!(sanitize("a\u{0007}b\r\nc\rd\te\u{200B}f"), "ab\nc\nd ef");
    }

    #[test]
    fn defaults_apply_to_blank_fields() {
        let doc = ItineraryDocument {
            title: "   ".into(),
            customer_name: Some(String::new()),
            ..Default::default()
        }
        .sanitized();
        assert_eq!(doc.title(), DEFAULT_TITLE);
        assert_eq!(doc.subtitle(), DEFAULT_SUBTITLE);
        assert_eq!(doc.prepared_for(), DEFAULT_TRAVELLER);
        assert!(doc.customer_name.is_none());
        assert_eq!(Section::new("", "body").heading_or_default(), DEFAULT_HEADING);
    }

    #[test]
    fn blank_bullets_are_dropped() {
        let doc = ItineraryDocument {
            sections: vec![Section::new("Day 1", "").with_bullets(["  ", "Game drive"])],
            ..Default::default()
        }
        .sanitized();
        assert_eq!(doc.sections[0].bullets, vec!["Game drive".to_string()]);
    }
}
