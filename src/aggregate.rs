use crate::model::{CategoryMap, PercentageVector, Regulation, RegulationCategorySnapshot};
use crate::taxonomy::CATEGORY_ORDER;

/// Turn category-keyed course lists into a percentage distribution over the
/// eight taxonomy categories, in fixed taxonomy order.
///
/// Categories missing from the input contribute zero; labels outside the
/// taxonomy are excluded entirely, from both the total and the output. A
/// total of zero yields eight zeros rather than dividing by zero. No
/// rounding happens here; display precision belongs to the renderer.
pub fn percentages_of(map: &CategoryMap) -> PercentageVector {
    let total: usize = CATEGORY_ORDER.iter().map(|code| map.count(*code)).sum();
    if total == 0 {
        return [0.0; 8];
    }

    let mut percentages = [0.0; 8];
    for (slot, code) in percentages.iter_mut().zip(CATEGORY_ORDER) {
        *slot = (map.count(code) as f64 / total as f64) * 100.0;
    }
    percentages
}

/// True iff every taxonomy category's list is empty. Used to drop blank
/// regulation panels from the chart view.
pub fn is_empty(map: &CategoryMap) -> bool {
    CATEGORY_ORDER.iter().all(|code| map.count(*code) == 0)
}

/// The regulations worth charting: those present in the snapshot with at
/// least one taxonomy course, in the configured display order.
pub fn non_empty_regulations<'a>(
    snapshot: &'a RegulationCategorySnapshot,
    order: &'a [Regulation],
) -> Vec<(&'a Regulation, &'a CategoryMap)> {
    order
        .iter()
        .filter_map(|regulation| {
            snapshot
                .get(regulation)
                .filter(|map| !is_empty(map))
                .map(|map| (regulation, map))
        })
        .collect()
}
