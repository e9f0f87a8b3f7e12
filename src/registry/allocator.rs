use super::types::{format_bib, Category, Registration};
use crate::{FunRunError, Result};
use std::collections::HashSet;

/// Pick the lowest free bib number in `category`'s band.
///
/// Bib numbers are compared by numeric value, so `"0007"` and `"7"` occupy
/// the same slot. Stored values without leading digits are ignored.
pub fn allocate_in(existing: &[Registration], category: Category) -> Result<String> {
    let used: HashSet<u32> = existing.iter().filter_map(Registration::bib_value).collect();
    let band = category.band();

    (band.start..=band.end)
        .find(|number| !used.contains(number))
        .map(format_bib)
        .ok_or(FunRunError::CapacityExhausted { category })
}
