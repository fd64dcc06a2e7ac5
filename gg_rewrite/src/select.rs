//! Weighted selection of a replacement group.

use gg_common::Group;
use rand::Rng;

/// Picks one group by cumulative-weight sampling: a point is drawn
/// uniformly in `[0, sum(weights)]` and the first group whose cumulative
/// weight reaches it wins. The last group is the deterministic fallback
/// for floating-point edge cases.
///
/// Returns `None` only for an empty slice.
pub(crate) fn pick_weighted<'a, R: Rng>(groups: &'a [Group], rng: &mut R) -> Option<&'a Group> {
    let (last, _) = groups.split_last()?;

    let total: f32 = groups.iter().map(|g| g.weight).sum();
    let point: f32 = rng.gen_range(0.0..=total);

    let mut cumulative = 0.0;
    for group in groups {
        cumulative += group.weight;
        if cumulative >= point {
            return Some(group);
        }
    }

    Some(last)
}
