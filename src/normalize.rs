/// Normalizes a scene prompt for cue matching: trimmed, lower-cased and with
/// every whitespace run collapsed to a single space.
///
/// Lower-casing is Unicode aware, so Latin text folds while Devanagari passes
/// through unchanged and stays matchable.
pub fn normalize_prompt(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns true when `cue` occurs in `haystack` starting at a word start.
///
/// Both sides are expected to be normalized already. The end of the match is
/// left open so inflected forms still hit: "alley" matches "alleys" and
/// "मंदिर" matches "मंदिरात", while "sand" does not match inside "thousand".
pub fn contains_cue(haystack: &str, cue: &str) -> bool {
    if cue.is_empty() {
        return false;
    }

    haystack
        .match_indices(cue)
        .any(|(index, _)| starts_word(haystack, index))
}

/// Returns true when `word` occurs in `haystack` as a whole word: starting at a
/// word start and ending at a word end. Used for short cues whose stem would
/// otherwise hit unrelated words ("monk" in "monkey", "आग" in "आगमन").
pub fn contains_word(haystack: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }

    haystack.match_indices(word).any(|(index, _)| {
        starts_word(haystack, index) && ends_word(haystack, index + word.len())
    })
}

fn starts_word(haystack: &str, index: usize) -> bool {
    haystack[..index]
        .chars()
        .next_back()
        .map_or(true, |previous| !is_word_char(previous))
}

fn ends_word(haystack: &str, end: usize) -> bool {
    haystack[end..]
        .chars()
        .next()
        .map_or(true, |next| !is_word_char(next))
}

// Devanagari vowel signs and the virama are marks rather than letters, but they
// sit inside words. The danda punctuation (U+0964, U+0965) does not.
fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric()
        || ('\u{0900}'..='\u{0963}').contains(&ch)
        || ('\u{0966}'..='\u{097F}').contains(&ch)
}

/// ASCII slug used in file naming: lowercase alphanumerics joined by single
/// hyphens. Non-ASCII text (for example the Marathi half of a label) is
/// dropped; an input with no ASCII alphanumerics yields `fallback`.
pub fn slugify(value: &str, fallback: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_hyphen = false;

    for ch in value.chars() {
        if ch == '(' {
            break;
        }
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        fallback.to_owned()
    } else {
        slug
    }
}
