use super::canvas::TextMeasure;
use super::error::StampError;
use super::types::FontSpec;

/// Greedy word wrap of `text` so each line measures below `max_width`.
///
/// Words are never split: a single word wider than `max_width` gets a line of
/// its own. Runs of whitespace collapse to one space. Empty input yields a
/// single empty line.
pub fn wrap_text<M: TextMeasure + ?Sized>(
    measure: &M,
    text: &str,
    font: FontSpec,
    max_width: f32,
) -> Result<Vec<String>, StampError> {
    let mut words = text.split_whitespace();
    let Some(first) = words.next() else {
        return Ok(vec![String::new()]);
    };

    let mut lines = Vec::new();
    let mut current = first.to_string();

    for word in words {
        let candidate = format!("{} {}", current, word);
        if measure.measure_text(&candidate, font)? < max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    lines.push(current);
    Ok(lines)
}
