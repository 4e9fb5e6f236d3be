//! Block-level comparisons for rendered cupsd.conf text.
//!
//! A block is a maximal run of non-empty lines; blocks are separated by one blank line.

/// Split rendered text into blocks of consecutive non-empty lines.
#[must_use]
pub fn blocks(text: &str) -> Vec<Vec<&str>> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    for line in text.split('\n') {
        if line.is_empty() {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// The block beginning with `opening`, if present.
#[must_use]
pub fn block_starting_with<'a>(text: &'a str, opening: &str) -> Option<Vec<&'a str>> {
    blocks(text)
        .into_iter()
        .find(|block| block.first().is_some_and(|first| *first == opening))
}

/// Positions of blocks that differ between two renderings with the same block count.
///
/// # Panics
///
/// Panics when the two texts do not have the same number of blocks.
#[must_use]
pub fn changed_blocks(before: &str, after: &str) -> Vec<usize> {
    let before = blocks(before);
    let after = blocks(after);
    assert_eq!(
        before.len(),
        after.len(),
        "renderings have a different number of blocks"
    );
    before
        .iter()
        .zip(&after)
        .enumerate()
        .filter_map(|(index, (left, right))| (left != right).then_some(index))
        .collect()
}

/// Lines that differ at the same position between two blocks.
#[must_use]
pub fn changed_lines<'a>(before: &[&'a str], after: &[&'a str]) -> Vec<(&'a str, &'a str)> {
    before
        .iter()
        .zip(after)
        .filter(|(left, right)| left != right)
        .map(|(left, right)| (*left, *right))
        .collect()
}
