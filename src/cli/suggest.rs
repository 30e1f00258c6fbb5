//! "Did you mean" suggestions for mistyped command names.

const MAX_SUGGESTIONS: usize = 3;

/// Levenshtein distance between two strings, counted in chars.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    let mut current = vec![0; b_chars.len() + 1];

    for (i, a_char) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let substitution = previous[j] + usize::from(a_char != *b_char);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b_chars.len()]
}

/// Returns up to three candidates close to `input`, nearest first.
///
/// A candidate qualifies when its edit distance is at most
/// `max(2, len / 3)` of the input, or when one name is a prefix of the
/// other. Ties keep the order of `candidates`.
pub fn closest_names<'a, I>(input: &str, candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let threshold = (input.chars().count() / 3).max(2);

    let mut scored: Vec<(usize, &str)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let distance = edit_distance(input, candidate);
            let prefix = !input.is_empty()
                && (candidate.starts_with(input) || input.starts_with(candidate));

            (distance <= threshold || prefix).then_some((distance, candidate))
        })
        .collect();

    scored.sort_by_key(|(distance, _)| *distance);
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, name)| name.to_string())
        .collect()
}
