use regex::Regex;
use std::sync::OnceLock;

pub const MAX_MESSAGE_CHARS: usize = 4000;
pub const MAX_TITLE_CHARS: usize = 60;

static SCRIPT_BLOCKS: OnceLock<Regex> = OnceLock::new();
static MARKUP_TAGS: OnceLock<Regex> = OnceLock::new();

fn script_blocks() -> &'static Regex {
    SCRIPT_BLOCKS.get_or_init(|| Regex::new(r"(?is)<script\b.*?</script>").expect("valid regex"))
}

fn markup_tags() -> &'static Regex {
    MARKUP_TAGS.get_or_init(|| Regex::new(r"<[^>]+>").expect("valid regex"))
}

/// Strips script blocks and any remaining markup from a chat message,
/// then trims and clips it to [`MAX_MESSAGE_CHARS`].
pub fn sanitize_message(input: &str) -> String {
    let without_scripts = script_blocks().replace_all(input, "");
    let without_tags = markup_tags().replace_all(&without_scripts, "");
    clip_chars(without_tags.trim(), MAX_MESSAGE_CHARS)
}

/// First [`MAX_TITLE_CHARS`] characters of a sanitized message, used to
/// name a freshly created conversation.
pub fn conversation_title(message: &str) -> String {
    clip_chars(message, MAX_TITLE_CHARS)
}

pub fn clip_chars(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        input.to_string()
    } else {
        input.chars().take(max_chars).collect()
    }
}
