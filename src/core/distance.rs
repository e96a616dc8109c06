/// Levenshtein edit distance between two strings
///
/// Classic dynamic-programming table of `(len(b) + 1) x (len(a) + 1)`
/// cells over Unicode scalar values: row `j`, column `i` holds the
/// distance between the first `i` chars of `a` and the first `j` chars
/// of `b`.
///
/// # Returns
/// Minimum number of single-char insertions, deletions and substitutions
/// turning `a` into `b`
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut table = vec![vec![0usize; a.len() + 1]; b.len() + 1];
    for (i, cell) in table[0].iter_mut().enumerate() {
        *cell = i;
    }
    for (j, row) in table.iter_mut().enumerate() {
        row[0] = j;
    }

    for j in 1..=b.len() {
        for i in 1..=a.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let deletion = table[j][i - 1] + 1;
            let insertion = table[j - 1][i] + 1;
            let substitution = table[j - 1][i - 1] + cost;
            table[j][i] = deletion.min(insertion).min(substitution);
        }
    }

    table[b.len()][a.len()]
}

/// Similarity in `[0, 1]` derived from an edit distance
///
/// `1 - distance / max(len(a), len(b))`, with lengths counted in chars.
/// Two empty strings are identical.
#[inline]
pub fn name_similarity(a: &str, b: &str, distance: usize) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }

    1.0 - distance as f64 / longest as f64
}
