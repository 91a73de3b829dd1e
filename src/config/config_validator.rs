use std::fmt::Write as _;

use super::{Config, Timings, constants::MAX_SETTLE_MS};

pub fn validate_layouts(primary: &str, secondary: &str) -> Result<(), String> {
    if primary.trim().is_empty() || secondary.trim().is_empty() {
        return Err("Layout identifiers must not be empty.".to_owned());
    }
    if primary == secondary {
        return Err(format!(
            "Primary and secondary layout are both '{primary}'; they must differ."
        ));
    }
    Ok(())
}

/// The table maps lowercase to lowercase; case is re-applied at conversion time.
pub fn find_cased_mapping_chars(pairs: &[(char, char)]) -> Option<String> {
    let offending: Vec<_> = pairs
        .iter()
        .enumerate()
        .filter(|(_, (from, to))| {
            flipotron_core::to_lower(*from) != *from || flipotron_core::to_lower(*to) != *to
        })
        .collect();

    if offending.is_empty() {
        return None;
    }

    let mut error = String::from("Mapping pairs must be lowercase:\n\n");
    for (i, (from, to)) in offending {
        let _ = writeln!(error, "- pair #{i}: '{from}' -> '{to}'");
    }
    Some(error)
}

pub fn validate_mapping(pairs: &[(char, char)]) -> Result<(), String> {
    if pairs.is_empty() {
        return Err("Mapping must contain at least one pair.".to_owned());
    }
    match find_cased_mapping_chars(pairs) {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

pub fn validate_timings(timings: &Timings) -> Result<(), String> {
    let too_long: Vec<_> = timings
        .named()
        .into_iter()
        .filter(|(_, ms)| *ms > MAX_SETTLE_MS)
        .collect();

    if too_long.is_empty() {
        return Ok(());
    }

    let mut error = format!("Settle intervals must not exceed {MAX_SETTLE_MS} ms:\n\n");
    for (name, ms) in too_long {
        let _ = writeln!(error, "- {name} = {ms}");
    }
    Err(error)
}

impl Config {
    pub fn validate(&self) -> Result<(), String> {
        validate_layouts(&self.primary_layout, &self.secondary_layout)?;
        if let Some(pairs) = self.mapping.as_deref() {
            validate_mapping(pairs)?;
        }
        validate_timings(&self.timings)
    }
}
