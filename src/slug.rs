//! Slugification of human-entered titles into filesystem- and link-safe names.
//!
//! The pipeline: Unicode compatibility decomposition (NFKD), keep only ASCII
//! word characters, whitespace, and hyphens, trim, collapse every run of
//! whitespace/hyphens into a single hyphen, lowercase. `"Épisode  1!"` becomes
//! `"episode-1"`. The operation is idempotent, so slugs can be re-slugged
//! safely (e.g. when an archive's own file name was already a slug).

use unicode_normalization::UnicodeNormalization;

/// Slugify arbitrary text. Returns an empty string when nothing survives
/// filtering; callers fall through to the next base-name source.
pub fn slugify(input: &str) -> String {
    let decomposed: String = input.nfkd().collect();

    let mut slug = String::with_capacity(decomposed.len());
    let mut gap = false;
    for c in decomposed.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if gap && !slug.is_empty() {
                slug.push('-');
            }
            gap = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' {
            // Separators merge; leading/trailing runs vanish.
            gap = true;
        }
        // Anything else is stripped without leaving a separator behind.
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_lowercases() {
        assert_eq!(slugify("Episode 1!"), "episode-1");
        assert_eq!(slugify("Q4 Planning (draft)"), "q4-planning-draft");
    }

    #[test]
    fn decomposes_accents() {
        assert_eq!(slugify("Épisode Café"), "episode-cafe");
    }

    #[test]
    fn collapses_separator_runs() {
        assert_eq!(slugify("a  -  b"), "a-b");
        assert_eq!(slugify("a---b"), "a-b");
        assert_eq!(slugify("  padded  "), "padded");
    }

    #[test]
    fn punctuation_leaves_no_separator() {
        assert_eq!(slugify("v1.2.3"), "v123");
    }

    #[test]
    fn is_idempotent() {
        for input in ["Episode 1!", "Épisode Café", "  a -- b  ", "already-a-slug"] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once, "input {input:?}");
        }
    }

    #[test]
    fn can_come_up_empty() {
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify("   "), "");
        assert_eq!(slugify(""), "");
    }
}
