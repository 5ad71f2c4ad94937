//! Comma-joined index lists, the format of the outbound node fields.

/// Join indices as `"3,0,7"`. An empty list yields an empty string.
pub fn join_indices<I>(indices: I) -> String
where
    I: IntoIterator<Item = usize>,
{
    indices
        .into_iter()
        .map(|idx| idx.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
