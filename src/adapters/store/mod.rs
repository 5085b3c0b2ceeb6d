pub mod jsonl;
pub mod memory;

pub use jsonl::JsonlStore;
pub use memory::MemoryStore;

use crate::domain::model::SolveRecord;

/// Orders by timestamp, newest first, ties broken by id, then slices.
pub(crate) fn newest_first_page(
    records: &[SolveRecord],
    limit: u32,
    offset: u32,
) -> (Vec<SolveRecord>, u64) {
    let mut ordered: Vec<&SolveRecord> = records.iter().collect();
    ordered.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));

    let page = ordered
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .cloned()
        .collect();
    (page, records.len() as u64)
}
