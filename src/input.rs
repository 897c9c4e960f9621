//! Reading index and token sequences from text
//!
//! Accepts either a JSON array (`[1, 2, 3]`, `["C4", "4.7"]`) or items
//! separated by whitespace and/or commas.

use anyhow::{Context, Result};

fn split_items(input: &str) -> impl Iterator<Item = &str> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|item| !item.is_empty())
}

fn is_json_array(input: &str) -> bool {
    input.trim_start().starts_with('[')
}

/// Parse a sequence of model indices
pub fn parse_indices(input: &str) -> Result<Vec<i64>> {
    if is_json_array(input) {
        return serde_json::from_str(input).context("Failed to parse index list as JSON");
    }

    split_items(input)
        .map(|item| {
            item.parse::<i64>()
                .with_context(|| format!("Invalid index '{}'", item))
        })
        .collect()
}

/// Parse a sequence of tokens
pub fn parse_tokens(input: &str) -> Result<Vec<String>> {
    if is_json_array(input) {
        return serde_json::from_str(input).context("Failed to parse token list as JSON");
    }

    Ok(split_items(input).map(str::to_string).collect())
}
