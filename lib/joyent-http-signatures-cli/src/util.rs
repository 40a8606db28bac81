use owo_colors::{OwoColorize, Stream};
use std::fmt::Display;

#[inline]
pub fn error_kaomoji() -> impl Display {
    "(┬┬﹏┬┬)".if_supports_color(Stream::Stderr, |text| text.red())
}

#[inline]
pub fn success_kaomoji() -> impl Display {
    "(^///^)".if_supports_color(Stream::Stdout, |text| text.green())
}

/// Right-aligned, bold field label
#[inline]
pub fn field(name: &str) -> String {
    format!("{name:>10}:")
        .if_supports_color(Stream::Stdout, |text| text.bold())
        .to_string()
}
