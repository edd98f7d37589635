use crate::model::PoolSummary;

/// Case-insensitive substring search over pool name and description.
/// An empty or whitespace query matches every pool.
pub fn search_pools<'a>(pools: &'a [PoolSummary], query: &str) -> Vec<&'a PoolSummary> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return pools.iter().collect();
    }

    pools
        .iter()
        .filter(|pool| {
            pool.name.to_lowercase().contains(&needle)
                || pool.description.to_lowercase().contains(&needle)
        })
        .collect()
}
