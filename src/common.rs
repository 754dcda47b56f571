use rand::Rng;
use rand::distr::Alphanumeric;
use ratatui::text::{Line, Text};
use std::time::{SystemTime, UNIX_EPOCH};

pub const DEFAULT_ID_LENGTH: usize = 16;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub fn classnames(classes: &[Option<&str>]) -> String {
    classes
        .iter()
        .flatten()
        .filter(|class| !class.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn generate_unique_id(length: usize) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis());

    let mut id = to_base36(millis);
    id.extend(
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(length)
            .map(char::from),
    );
    id
}

fn to_base36(mut value: u128) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

pub fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}

pub fn text_content(text: &Text<'_>) -> String {
    text.lines.iter().map(line_text).collect()
}
