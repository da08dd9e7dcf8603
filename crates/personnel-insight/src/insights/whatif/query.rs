/// Free-text helpers for the what-if router. All matching happens on a
/// lower-cased copy of the query; nothing here can fail, only decline to
/// find anything.

pub(crate) fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

pub(crate) fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

/// First run of digits at least `min_digits` long, truncated to
/// `max_digits`. Mirrors a leftmost regex match: "take 125 people" with
/// bounds (1, 3) yields 125, while (2, 2) yields 12.
pub(crate) fn first_number(text: &str, min_digits: usize, max_digits: usize) -> Option<u32> {
    let mut run = String::new();

    for ch in text.chars() {
        if ch.is_ascii_digit() {
            if run.len() < max_digits {
                run.push(ch);
            }
            continue;
        }

        if run.len() >= min_digits {
            break;
        }
        run.clear();
    }

    if run.len() >= min_digits {
        run[..run.len().min(max_digits)].parse().ok()
    } else {
        None
    }
}

/// Skills from the roster vocabulary mentioned in the query, in order of
/// appearance.
pub(crate) fn mentioned_skills(text: &str, known_skills: &[String]) -> Vec<String> {
    let mut mentions: Vec<(usize, String)> = known_skills
        .iter()
        .filter_map(|skill| {
            text.find(&skill.to_lowercase())
                .map(|position| (position, skill.clone()))
        })
        .collect();

    mentions.sort_by_key(|(position, _)| *position);
    mentions.into_iter().map(|(_, skill)| skill).collect()
}

/// Byte offset of `word` with non-alphanumeric boundaries, so "to" does
/// not fire inside "mentor".
pub(crate) fn word_position(text: &str, word: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut search_from = 0;

    while let Some(relative) = text[search_from..].find(word) {
        let start = search_from + relative;
        let end = start + word.len();

        let boundary_before = start == 0 || !bytes[start - 1].is_ascii_alphanumeric();
        let boundary_after = end == text.len() || !bytes[end].is_ascii_alphanumeric();
        if boundary_before && boundary_after {
            return Some(start);
        }

        search_from = start + 1;
    }

    None
}

/// Source and destination skills for a redeployment query. A skill
/// mentioned after "to" is the destination, one after "from" is the
/// source; remaining mentions fill unclaimed slots in order.
pub(crate) fn from_to_skills(
    text: &str,
    known_skills: &[String],
) -> (Option<String>, Option<String>) {
    let from_position = word_position(text, "from");
    let to_position = word_position(text, "to");

    let mut from_skill: Option<String> = None;
    let mut to_skill: Option<String> = None;

    for skill in mentioned_skills(text, known_skills) {
        let Some(position) = text.find(&skill.to_lowercase()) else {
            continue;
        };

        if to_skill.is_none() && to_position.map(|to| position > to).unwrap_or(false) {
            to_skill = Some(skill);
        } else if from_skill.is_none()
            && from_position.map(|from| position > from).unwrap_or(false)
        {
            from_skill = Some(skill);
        } else if from_skill.is_none() {
            from_skill = Some(skill);
        } else if to_skill.is_none() {
            to_skill = Some(skill);
        }
    }

    (from_skill, to_skill)
}
