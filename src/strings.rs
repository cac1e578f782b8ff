//! Small string helpers shared by naming and console output

/// Upper-case the first character, leaving the rest untouched.
///
/// Unlike a title-case transform, only the very first character changes:
/// `"night owl"` becomes `"Night owl"`.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A horizontal rule of `width` repetitions of `ch`
pub fn rule(ch: char, width: usize) -> String {
    std::iter::repeat(ch).take(width).collect()
}
