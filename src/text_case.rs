use std::fmt;
use std::str::FromStr;
use unicode_segmentation::UnicodeSegmentation;

/// Words kept in lower case by [`TextCase::Title`] unless they open the text.
const MINOR_WORDS: [&str; 15] = [
    "a", "an", "the", "and", "but", "or", "for", "nor", "on", "at", "to", "from", "by", "of", "in",
];

pub const SAMPLE_TEXT: &str = "hello world example text";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextCase {
    Sentence,
    Lower,
    Upper,
    Capitalized,
    Alternating,
    Title,
    Inverse,
}

impl TextCase {
    pub const ALL: [TextCase; 7] = [
        TextCase::Sentence,
        TextCase::Lower,
        TextCase::Upper,
        TextCase::Capitalized,
        TextCase::Alternating,
        TextCase::Title,
        TextCase::Inverse,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            TextCase::Sentence => "sentence",
            TextCase::Lower => "lower",
            TextCase::Upper => "upper",
            TextCase::Capitalized => "capitalized",
            TextCase::Alternating => "alternating",
            TextCase::Title => "title",
            TextCase::Inverse => "inverse",
        }
    }

    /// The case's name, written in the case itself.
    pub fn label(&self) -> &'static str {
        match self {
            TextCase::Sentence => "Sentence case",
            TextCase::Lower => "lower case",
            TextCase::Upper => "UPPER CASE",
            TextCase::Capitalized => "Capitalized Case",
            TextCase::Alternating => "aLtErNaTiNg cAsE",
            TextCase::Title => "Title Case",
            TextCase::Inverse => "InVeRsE CaSe",
        }
    }

    pub fn convert(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        match self {
            TextCase::Sentence => capitalize(text),
            TextCase::Lower => text.to_lowercase(),
            TextCase::Upper => text.to_uppercase(),
            TextCase::Capitalized => text.split(' ').map(capitalize).collect::<Vec<_>>().join(" "),
            TextCase::Alternating => text
                .graphemes(true)
                .enumerate()
                .map(|(index, grapheme)| {
                    if index % 2 == 0 {
                        grapheme.to_lowercase()
                    } else {
                        grapheme.to_uppercase()
                    }
                })
                .collect(),
            TextCase::Title => text
                .split(' ')
                .enumerate()
                .map(|(index, word)| {
                    let lower = word.to_lowercase();
                    if index > 0 && MINOR_WORDS.contains(&lower.as_str()) {
                        lower
                    } else {
                        capitalize(word)
                    }
                })
                .collect::<Vec<_>>()
                .join(" "),
            TextCase::Inverse => {
                let mut output = String::with_capacity(text.len());
                for c in text.chars() {
                    if c.is_uppercase() {
                        output.extend(c.to_lowercase());
                    } else if c.is_lowercase() {
                        output.extend(c.to_uppercase());
                    } else {
                        output.push(c);
                    }
                }
                output
            }
        }
    }
}

impl fmt::Display for TextCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("`{0}` is not a known text case")]
pub struct UnknownTextCase(pub String);

impl FromStr for TextCase {
    type Err = UnknownTextCase;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TextCase::ALL
            .iter()
            .copied()
            .find(|case| case.id() == s)
            .ok_or_else(|| UnknownTextCase(s.to_string()))
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut capitalized: String = first.to_uppercase().collect();
            capitalized.push_str(&chars.as_str().to_lowercase());
            capitalized
        }
        None => String::new(),
    }
}
