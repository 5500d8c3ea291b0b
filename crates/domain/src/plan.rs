//! Extraction of structured exercise entries from generated plan text.
//!
//! The generator is asked to emit one segment per exercise in the form
//!
//! ```text
//! 『name』 【weight kg】 (sets) reps [rest]
//! ```
//!
//! with the reps and rest tokens optional. The text around and between
//! segments is free prose and is ignored. Since the generator is a
//! free-text API, the contract cannot be enforced; segments that do not
//! match are skipped and fields without a readable number fall back to
//! defaults. Each entry records which fields were defaulted.

use std::fmt;

use log::debug;

use crate::{CycleStep, Lift, Name, Reps, Sets, Weight};

/// A field of an [`ExerciseEntry`] that may fall back to its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Weight,
    Reps,
    Sets,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseEntry {
    pub name: Name,
    pub weight: Weight,
    pub reps: Reps,
    pub sets: Sets,
    pub rest: Option<String>,
    /// Fields that carried no readable value and were defaulted.
    pub defaulted: Vec<Field>,
}

impl fmt::Display for ExerciseEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "『{}』 【{}kg】 ({} sets) {} reps",
            self.name, self.weight, self.sets, self.reps
        )?;
        if let Some(rest) = &self.rest {
            write!(f, " [{rest}]")?;
        }
        Ok(())
    }
}

/// Returns a lazy sequence of the entries encoded in `text`.
///
/// The sequence is finite, restartable and in source order. It is empty
/// when nothing in `text` matches; extraction never fails.
#[must_use]
pub fn extract(text: &str) -> Entries<'_> {
    Entries { rest: text }
}

/// The default plan used when every generator attempt has failed.
///
/// Same wire shape as a generated plan, so the extractor handles both.
#[must_use]
pub fn fallback_line(lift: Lift, step: &CycleStep, target_weight: Weight) -> String {
    format!(
        "『{lift}』 【{target_weight}kg】 ({} sets) {} reps [3 min]",
        step.target_sets, step.target_reps
    )
}

/// Iterator over the exercise segments of a plan text.
pub struct Entries<'a> {
    rest: &'a str,
}

impl Iterator for Entries<'_> {
    type Item = ExerciseEntry;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let start = self.rest.find('『')?;
            let after_open = &self.rest[start + '『'.len_utf8()..];
            let Some(name_end) = after_open.find('』') else {
                self.rest = "";
                return None;
            };
            let name_token = &after_open[..name_end];
            let tail = &after_open[name_end + '』'.len_utf8()..];

            // The segment reaches up to the next name token or the end.
            let segment_end = tail.find('『').unwrap_or(tail.len());
            let segment = &tail[..segment_end];

            match parse_segment(name_token, segment) {
                Some(entry) => {
                    self.rest = &tail[segment_end..];
                    return Some(entry);
                }
                None => {
                    debug!("skipping unparseable plan segment: 『{name_token}』{segment}");
                    self.rest = tail;
                }
            }
        }
    }
}

fn parse_segment(name_token: &str, segment: &str) -> Option<ExerciseEntry> {
    let name = Name::new(name_token).ok()?;
    let mut defaulted = Vec::new();

    let (weight_token, after_weight) = delimited(segment, &['【'], &['】'])?;
    let weight = first_number(weight_token)
        .and_then(|value| Weight::rounded(value).ok())
        .unwrap_or_else(|| {
            defaulted.push(Field::Weight);
            Weight::default()
        });

    let (sets_token, after_sets) = delimited(after_weight, &['(', '（'], &[')', '）'])?;
    let sets = first_integer(sets_token)
        .and_then(|value| Sets::new(value).ok())
        .unwrap_or_else(|| {
            defaulted.push(Field::Sets);
            Sets::DEFAULT
        });

    let (reps_token, rest_token) = match delimited(after_sets, &['[', '［'], &[']', '］']) {
        Some((rest, _)) => {
            let reps_region_end = after_sets
                .find(['[', '［'])
                .unwrap_or(after_sets.len());
            (&after_sets[..reps_region_end], Some(rest.trim().to_string()))
        }
        None => (after_sets, None),
    };
    let reps = first_integer(reps_token)
        .and_then(|value| Reps::new(value).ok())
        .unwrap_or_else(|| {
            defaulted.push(Field::Reps);
            Reps::DEFAULT
        });

    Some(ExerciseEntry {
        name,
        weight,
        reps,
        sets,
        rest: rest_token,
        defaulted,
    })
}

/// Returns the text between the first opening and closing delimiter, and
/// the text after the closing delimiter.
fn delimited<'a>(text: &'a str, open: &[char], close: &[char]) -> Option<(&'a str, &'a str)> {
    let start = text.find(open)?;
    let open_char = text[start..].chars().next()?;
    let inner = &text[start + open_char.len_utf8()..];
    let end = inner.find(close)?;
    let close_char = inner[end..].chars().next()?;
    Some((&inner[..end], &inner[end + close_char.len_utf8()..]))
}

/// First decimal number in `text`, e.g. "80" in "80kg" or "62.5" in
/// "approx. 62.5 kg".
fn first_number(text: &str) -> Option<f32> {
    let bytes = text.as_bytes();
    let start = bytes.iter().position(u8::is_ascii_digit)?;
    let mut end = start;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => end += 1,
            b'.' if !seen_dot && bytes.get(end + 1).is_some_and(u8::is_ascii_digit) => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }
    text[start..end].parse().ok()
}

/// First unsigned integer in `text`, e.g. 10 in "10回".
fn first_integer(text: &str) -> Option<u32> {
    let bytes = text.as_bytes();
    let start = bytes.iter().position(u8::is_ascii_digit)?;
    let end = start
        + bytes[start..]
            .iter()
            .take_while(|byte| byte.is_ascii_digit())
            .count();
    text[start..end].parse().ok()
}
