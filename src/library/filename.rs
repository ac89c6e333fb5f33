// Filename -> artist/title guessing for files without usable tags
// Ordered pipeline: stricter patterns first, bare filename last

use regex::Regex;

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    pub artist: String,
    pub title: String,
    pub pattern_used: &'static str,
}

#[derive(Debug, Clone)]
struct NamePattern {
    name: &'static str,
    regex: Regex,
    artist_group: usize,
    title_group: usize,
}

pub struct FilenameParser {
    patterns: Vec<NamePattern>,
}

impl FilenameParser {
    pub fn new() -> Self {
        let mut patterns = Vec::new();

        // "21 - blink-182 - TAKE ME IN"
        if let Ok(regex) = Regex::new(r"^\d+\s+-\s+(.+?)\s+-\s+(.+)$") {
            patterns.push(NamePattern {
                name: "Number - Artist - Title",
                regex,
                artist_group: 1,
                title_group: 2,
            });
        }

        // "The Black Keys - Lonely Boy"
        if let Ok(regex) = Regex::new(r"^(.+?)\s+-\s+(.+)$") {
            patterns.push(NamePattern {
                name: "Artist - Title",
                regex,
                artist_group: 1,
                title_group: 2,
            });
        }

        // "BigBill_hill-Eighth_Street_Blues"
        if let Ok(regex) = Regex::new(r"^([^-]+)-(.+)$") {
            patterns.push(NamePattern {
                name: "Artist-Title",
                regex,
                artist_group: 1,
                title_group: 2,
            });
        }

        Self { patterns }
    }

    /// Parse a file stem (no extension).
    pub fn parse_stem(&self, stem: &str) -> ParsedName {
        for pattern in &self.patterns {
            if let Some(captures) = pattern.regex.captures(stem) {
                let artist = captures
                    .get(pattern.artist_group)
                    .map(|m| clean_text(m.as_str()))
                    .unwrap_or_default();
                let title = captures
                    .get(pattern.title_group)
                    .map(|m| clean_text(m.as_str()))
                    .unwrap_or_default();

                if artist.is_empty() || title.is_empty() {
                    continue;
                }

                return ParsedName {
                    artist,
                    title,
                    pattern_used: pattern.name,
                };
            }
        }

        ParsedName {
            artist: UNKNOWN_ARTIST.to_string(),
            title: clean_text(stem),
            pattern_used: "Filename only",
        }
    }
}

impl Default for FilenameParser {
    fn default() -> Self {
        Self::new()
    }
}

fn clean_text(text: &str) -> String {
    let removals = [
        "(Official Audio)",
        "(Official Video)",
        "(Official Music Video)",
        "(Official Lyric Video)",
        "(Audio)",
        "(Video)",
        "(Lyric Video)",
        "[Official Audio]",
        "[Official Video]",
    ];

    let mut cleaned = text.replace('_', " ");
    for removal in &removals {
        cleaned = cleaned.replace(removal, "");
    }

    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    cleaned
        .trim_matches(|c: char| c == '-' || c.is_whitespace())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsing_patterns() {
        let parser = FilenameParser::new();

        let parsed = parser.parse_stem("21 - blink-182 - TAKE ME IN (Official Lyric Video)");
        assert_eq!(parsed.artist, "blink-182");
        assert_eq!(parsed.title, "TAKE ME IN");

        let parsed = parser.parse_stem("The Black Keys - Lonely Boy");
        assert_eq!(parsed.artist, "The Black Keys");
        assert_eq!(parsed.title, "Lonely Boy");
        assert_eq!(parsed.pattern_used, "Artist - Title");

        let parsed = parser.parse_stem("BigBill_hill-Eighth_Street_Blues");
        assert_eq!(parsed.artist, "BigBill hill");
        assert_eq!(parsed.title, "Eighth Street Blues");
    }

    #[test]
    fn test_filename_only_fallback() {
        let parser = FilenameParser::new();

        let parsed = parser.parse_stem("untitled_demo");
        assert_eq!(parsed.artist, UNKNOWN_ARTIST);
        assert_eq!(parsed.title, "untitled demo");

        // a dangling delimiter leaves nothing on one side
        let parsed = parser.parse_stem("intro-");
        assert_eq!(parsed.pattern_used, "Filename only");
        assert_eq!(parsed.title, "intro");
    }
}
