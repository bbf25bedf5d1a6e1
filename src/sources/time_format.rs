//! Clock text formatting
//!
//! Patterns use the SimpleDateFormat letter set (`h:mm a`, `H:mm`, ...).
//! When the AM/PM designator is shrunk or hidden, the first unquoted `a`
//! plus the whitespace in front of it is tracked as a span while the
//! pattern is tokenized, so the formatted output can be cut or styled
//! without rescanning it.

use crate::core::{ClockZone, ZonedTime};
use chrono::{DateTime, Datelike, Timelike, Utc};
use log::{debug, warn};
use statusbar_types::{AmPmStyle, DisplayText, SMALL_RELATIVE_SIZE};
use std::ops::Range;
use thiserror::Error;

/// Pattern letter for the AM/PM designator
pub const AM_PM_MARKER: char = 'a';

const QUOTE: char = '\'';

/// Letters the formatter knows how to render
const SUPPORTED_LETTERS: &str = "GyMLdEaHkKhmsSzZ";

/// Pattern compilation failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("unsupported pattern letter '{0}'")]
    UnsupportedField(char),
    #[error("unterminated quote in pattern")]
    UnterminatedQuote,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Field { letter: char, width: usize },
    SpanStart,
    SpanEnd,
}

/// Locate the AM/PM span in `pattern`, as char indices.
///
/// The span starts at the whitespace run preceding the first unquoted
/// marker and ends right after the marker.
pub fn find_am_pm_span(pattern: &str) -> Option<Range<usize>> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut quoted = false;

    let marker = chars.iter().enumerate().find_map(|(i, &c)| {
        if c == QUOTE {
            quoted = !quoted;
        }
        (!quoted && c == AM_PM_MARKER).then_some(i)
    })?;

    let mut start = marker;
    while start > 0 && chars[start - 1].is_whitespace() {
        start -= 1;
    }
    Some(start..marker + 1)
}

fn tokenize(pattern: &str, span: Option<&Range<usize>>) -> Result<Vec<Token>, PatternError> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut tokens = Vec::new();
    let mut literal = String::new();

    let is_boundary = |i: usize| span.is_some_and(|s| i == s.start || i == s.end);

    let flush = |literal: &mut String, tokens: &mut Vec<Token>| {
        if !literal.is_empty() {
            tokens.push(Token::Literal(std::mem::take(literal)));
        }
    };

    let mark = |i: usize, literal: &mut String, tokens: &mut Vec<Token>| {
        if let Some(span) = span {
            if i == span.start {
                flush(literal, tokens);
                tokens.push(Token::SpanStart);
            }
            if i == span.end {
                flush(literal, tokens);
                tokens.push(Token::SpanEnd);
            }
        }
    };

    let mut i = 0;
    while i < chars.len() {
        mark(i, &mut literal, &mut tokens);
        let c = chars[i];

        if c == QUOTE {
            if chars.get(i + 1) == Some(&QUOTE) {
                literal.push(QUOTE);
                i += 2;
                continue;
            }
            // Quoted literal text, `''` inside stands for one quote
            let mut j = i + 1;
            loop {
                match chars.get(j) {
                    None => return Err(PatternError::UnterminatedQuote),
                    Some(&QUOTE) if chars.get(j + 1) == Some(&QUOTE) => {
                        literal.push(QUOTE);
                        j += 2;
                    }
                    Some(&QUOTE) => break,
                    Some(&other) => {
                        literal.push(other);
                        j += 1;
                    }
                }
            }
            i = j + 1;
        } else if c.is_ascii_alphabetic() {
            if !SUPPORTED_LETTERS.contains(c) {
                return Err(PatternError::UnsupportedField(c));
            }
            let mut end = i + 1;
            while end < chars.len() && chars[end] == c && !is_boundary(end) {
                end += 1;
            }
            flush(&mut literal, &mut tokens);
            tokens.push(Token::Field {
                letter: c,
                width: end - i,
            });
            i = end;
        } else {
            literal.push(c);
            i += 1;
        }
    }
    mark(chars.len(), &mut literal, &mut tokens);
    flush(&mut literal, &mut tokens);

    Ok(tokens)
}

fn push_padded(out: &mut String, value: i64, width: usize) {
    out.push_str(&format!("{:0width$}", value, width = width));
}

fn render_field(out: &mut String, letter: char, width: usize, zoned: &ZonedTime) {
    let t = &zoned.time;
    match letter {
        'G' => out.push_str(if t.year() > 0 { "AD" } else { "BC" }),
        'y' if width == 2 => push_padded(out, t.year().rem_euclid(100) as i64, 2),
        'y' => push_padded(out, t.year() as i64, width),
        'M' | 'L' => match width {
            1 | 2 => push_padded(out, t.month() as i64, width),
            3 => out.push_str(&t.format("%b").to_string()),
            _ => out.push_str(&t.format("%B").to_string()),
        },
        'd' => push_padded(out, t.day() as i64, width),
        'E' if width >= 4 => out.push_str(&t.format("%A").to_string()),
        'E' => out.push_str(&t.format("%a").to_string()),
        'a' => out.push_str(&t.format("%p").to_string()),
        'H' => push_padded(out, t.hour() as i64, width),
        'k' => {
            let hour = if t.hour() == 0 { 24 } else { t.hour() };
            push_padded(out, hour as i64, width)
        }
        'K' => push_padded(out, (t.hour() % 12) as i64, width),
        'h' => push_padded(out, t.hour12().1 as i64, width),
        'm' => push_padded(out, t.minute() as i64, width),
        's' => push_padded(out, t.second() as i64, width),
        'S' => push_padded(out, t.timestamp_subsec_millis() as i64, width),
        'z' => out.push_str(&zoned.abbreviation),
        'Z' => out.push_str(&t.format("%z").to_string()),
        _ => {}
    }
}

/// Formatted text plus the byte range of the AM/PM span, if tracked
#[derive(Debug, Clone, PartialEq, Eq)]
struct Rendered {
    text: String,
    span: Option<Range<usize>>,
}

/// A pattern compiled for one AM/PM treatment, bound to a zone
#[derive(Debug, Clone)]
pub struct CompiledFormat {
    source_pattern: String,
    tracks_marker: bool,
    has_marker: bool,
    tokens: Vec<Token>,
    zone: ClockZone,
}

impl CompiledFormat {
    /// Compile `pattern`. A malformed pattern is rendered verbatim.
    pub fn compile(pattern: &str, am_pm_style: AmPmStyle, zone: ClockZone) -> Self {
        let tracks_marker = am_pm_style != AmPmStyle::Normal;
        let span = if tracks_marker {
            find_am_pm_span(pattern)
        } else {
            None
        };

        let (tokens, has_marker) = match tokenize(pattern, span.as_ref()) {
            Ok(tokens) => (tokens, span.is_some()),
            Err(e) => {
                warn!("Invalid time pattern '{}': {}, showing it verbatim", pattern, e);
                (vec![Token::Literal(pattern.to_string())], false)
            }
        };

        Self {
            source_pattern: pattern.to_string(),
            tracks_marker,
            has_marker,
            tokens,
            zone,
        }
    }

    pub fn source_pattern(&self) -> &str {
        &self.source_pattern
    }

    /// Whether an AM/PM span was found and is tracked
    pub fn has_marker(&self) -> bool {
        self.has_marker
    }

    pub fn zone(&self) -> ClockZone {
        self.zone
    }

    pub fn set_zone(&mut self, zone: ClockZone) {
        self.zone = zone;
    }

    fn format(&self, instant: DateTime<Utc>) -> Rendered {
        let zoned = self.zone.localize(instant);
        let mut text = String::with_capacity(self.source_pattern.len() + 8);
        let mut start = None;
        let mut end = None;

        for token in &self.tokens {
            match token {
                Token::Literal(s) => text.push_str(s),
                Token::Field { letter, width } => render_field(&mut text, *letter, *width, &zoned),
                Token::SpanStart => start = Some(text.len()),
                Token::SpanEnd => end = Some(text.len()),
            }
        }

        let span = match (start, end) {
            (Some(start), Some(end)) if end > start => Some(start..end),
            _ => None,
        };
        Rendered { text, span }
    }
}

/// Renders instants with a cached compiled pattern
///
/// The cache is keyed by the base pattern string. Changing the zone updates
/// the cached format in place.
#[derive(Debug)]
pub struct TimeFormatter {
    cache: Option<CompiledFormat>,
    zone: ClockZone,
    compile_count: u64,
}

impl TimeFormatter {
    pub fn new(zone: ClockZone) -> Self {
        Self {
            cache: None,
            zone,
            compile_count: 0,
        }
    }

    pub fn zone(&self) -> ClockZone {
        self.zone
    }

    /// Switch zones without recompiling
    pub fn set_time_zone(&mut self, zone: ClockZone) {
        self.zone = zone;
        if let Some(cache) = self.cache.as_mut() {
            cache.set_zone(zone);
        }
    }

    /// Drop the cached format so the next render recompiles
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// How many times a pattern has been compiled
    pub fn compile_count(&self) -> u64 {
        self.compile_count
    }

    pub fn cached(&self) -> Option<&CompiledFormat> {
        self.cache.as_ref()
    }

    /// Render `instant` with `base_pattern` and the given AM/PM treatment
    pub fn render(
        &mut self,
        instant: DateTime<Utc>,
        base_pattern: &str,
        am_pm_style: AmPmStyle,
    ) -> DisplayText {
        let tracks_marker = am_pm_style != AmPmStyle::Normal;
        let stale = match &self.cache {
            Some(cache) => {
                cache.source_pattern != base_pattern || cache.tracks_marker != tracks_marker
            }
            None => true,
        };
        if stale {
            self.compile_count += 1;
            self.cache = None;
            debug!("Compiling time pattern '{}' ({:?})", base_pattern, am_pm_style);
        }

        let zone = self.zone;
        let compiled = self
            .cache
            .get_or_insert_with(|| CompiledFormat::compile(base_pattern, am_pm_style, zone));

        let Rendered { mut text, span } = compiled.format(instant);
        match (span, am_pm_style) {
            (Some(span), AmPmStyle::Gone) => {
                text.replace_range(span, "");
                DisplayText::Plain(text)
            }
            (Some(span), AmPmStyle::Small) => DisplayText::Styled {
                text,
                span,
                relative_size: SMALL_RELATIVE_SIZE,
            },
            _ => DisplayText::Plain(text),
        }
    }
}
