//! Input filtering applied to form fields before a registration is created.

/// Longest NIK the form accepts
pub const NIK_MAX_LEN: usize = 16;

/// Capitalize the first character of every space-separated word and
/// lowercase the rest.
///
/// Words are split on single spaces, so a run of several spaces is kept
/// exactly as typed. Only the surrounding whitespace is trimmed.
pub fn capitalize_each_word(input: &str) -> String {
    input
        .trim()
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Keep only ASCII digits, at most [`NIK_MAX_LEN`] of them
pub fn sanitize_nik(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_digit)
        .take(NIK_MAX_LEN)
        .collect()
}
