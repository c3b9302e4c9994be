//! Fragment packing.
//!
//! Groups rendered day fragments into outbound batches under two
//! independent ceilings: items per request and serialized payload bytes.
//! Pure and synchronous; the dispatcher supplies a measure function that
//! reflects the final payload shape (including a combined header riding
//! in the first batch).

use serde_json::Value;

/// Per-platform packing ceilings.
#[derive(Debug, Clone, Copy)]
pub struct BatchLimits {
    /// Maximum fragments per outbound request.
    pub max_items: usize,
    /// Maximum serialized payload size per outbound request, in bytes.
    pub max_bytes: usize,
}

/// Packs fragments into ordered batches under both limits.
///
/// Flush-before-append: if appending the next fragment would push the
/// current batch over either limit, the current batch is flushed first
/// and the fragment starts a new one. `measure` receives the index the
/// batch will be emitted at and the candidate fragment list, and must
/// return the serialized size of the full payload those fragments would
/// produce.
///
/// Guarantees: batches preserve input order, no fragment is split or
/// duplicated, and every batch with more than one fragment is under both
/// limits. A single fragment that alone exceeds `max_bytes` still ships
/// as its own batch; it cannot be subdivided here.
#[must_use]
pub fn pack_fragments<F>(fragments: &[Value], limits: BatchLimits, measure: F) -> Vec<Vec<Value>>
where
    F: Fn(usize, &[Value]) -> usize,
{
    let mut batches: Vec<Vec<Value>> = Vec::new();
    let mut current: Vec<Value> = Vec::new();

    for fragment in fragments {
        // Measure with the fragment appended, popping it back off on
        // overflow; the batch itself is never re-cloned per candidate.
        current.push(fragment.clone());
        if current.len() > 1 {
            let over_items = current.len() > limits.max_items;
            let over_bytes = measure(batches.len(), &current) > limits.max_bytes;
            if over_items || over_bytes {
                tracing::debug!(
                    batch = batches.len(),
                    items = current.len().saturating_sub(1),
                    over_items,
                    over_bytes,
                    "Flushing batch before append"
                );
                if let Some(pending) = current.pop() {
                    batches.push(std::mem::take(&mut current));
                    current.push(pending);
                }
            }
        }
    }

    if !current.is_empty() {
        batches.push(current);
    }
    batches
}
