/// Returns true if `candidate` is not already present in `existing`
///
/// Comparison is exact string equality on already-normalized links. Case and
/// trailing slashes are significant, so `/Staff` and `/staff/` stay distinct.
pub fn is_new(existing: &[String], candidate: &str) -> bool {
    !existing.iter().any(|link| link == candidate)
}
