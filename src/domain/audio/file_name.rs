use regex::Regex;
use std::sync::LazyLock;

// Literal pattern, checked by the tests below
static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[/\\:*?"<>|\s\p{Cc}]+"#).unwrap());

fn sanitize(part: &str) -> String {
    UNSAFE_CHARS.replace_all(part.trim(), "_").into_owned()
}

/// Download name for a clip: `{shot}_{character}.{extension}`,
/// or `{character}.{extension}` when the row has no shot number.
pub fn download_file_name(shot: &str, character: &str, extension: &str) -> String {
    let shot = sanitize(shot);
    let character = sanitize(character);

    if shot.is_empty() {
        format!("{}.{}", character, extension)
    } else {
        format!("{}_{}.{}", shot, character, extension)
    }
}
