//! Category (RDG) blocks.
//!
//! Block membership is read from header text: a header belongs to a
//! category block when it contains one of the category prefixes. Skip
//! regions open at a foreign block header containing "start" and close at
//! the next foreign block header containing "end". Overlapping names can
//! mis-bound a region; the heuristic is kept as is.

use rdg_model::FieldRecord;
use tracing::debug;

/// Block prefixes, in match priority order.
pub const CATEGORY_BLOCK_PREFIXES: [&str; 6] = [
    "stroke",
    "spinal cord injury",
    "hip fracture",
    "amputation",
    "msk",
    "deconditioning",
];

/// Map a category name onto its block prefix.
pub fn detect_category_key(category: &str) -> Option<&'static str> {
    let name = category.trim().to_lowercase();
    if name.is_empty() {
        return None;
    }
    if name.contains("stroke") || name.starts_with('1') {
        Some("stroke")
    } else if name.contains("sci") || name.contains("spinal") {
        Some("spinal cord injury")
    } else if name.contains("hip") {
        Some("hip fracture")
    } else if name.contains("amp") {
        Some("amputation")
    } else if name.contains("msk") {
        Some("msk")
    } else if name.contains("decon") {
        Some("deconditioning")
    } else {
        None
    }
}

fn block_prefix(name_lower: &str) -> Option<&'static str> {
    CATEGORY_BLOCK_PREFIXES
        .iter()
        .find(|prefix| name_lower.starts_with(*prefix) || name_lower.contains(*prefix))
        .copied()
}

/// Keep the selected category's blocks and drop every other category's.
///
/// An unrecognised category leaves the records unchanged.
pub fn filter_by_rdg_blocks(records: &[FieldRecord], category: &str) -> Vec<FieldRecord> {
    let Some(keep) = detect_category_key(category) else {
        debug!(category, "no category block key; keeping all records");
        return records.to_vec();
    };

    let mut filtered = Vec::with_capacity(records.len());
    let mut skipping = false;
    for record in records {
        let name = record.header.trim().to_lowercase();
        let foreign = block_prefix(&name).is_some_and(|block| block != keep);
        if skipping {
            if foreign && name.contains("end") {
                skipping = false;
            }
            continue;
        }
        if foreign {
            if name.contains("start") {
                skipping = true;
            }
            continue;
        }
        filtered.push(record.clone());
    }
    debug!(
        category,
        block = keep,
        kept = filtered.len(),
        dropped = records.len() - filtered.len(),
        "filtered by category blocks"
    );
    filtered
}
