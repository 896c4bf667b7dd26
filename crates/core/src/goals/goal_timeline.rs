use std::collections::BTreeMap;

use super::goals_model::{GoalMonthlyHistory, GoalProjectionEntry, GoalTimelinePoint};
use crate::months::Month;

/// Merges a goal's history and projection onto one chronological month axis.
///
/// Months covered by history keep only their actual value; the projection
/// fills the months after them.
pub fn stitch_goal_timeline(
    history: &[GoalMonthlyHistory],
    projection: &[GoalProjectionEntry],
) -> Vec<GoalTimelinePoint> {
    let mut points: BTreeMap<Month, GoalTimelinePoint> = BTreeMap::new();

    for row in history {
        points.insert(
            row.month,
            GoalTimelinePoint {
                month: row.month,
                actual_value: Some(row.value),
                projected_value: None,
            },
        );
    }

    for entry in projection {
        points
            .entry(entry.month)
            .or_insert_with(|| GoalTimelinePoint {
                month: entry.month,
                actual_value: None,
                projected_value: Some(entry.projected_value),
            });
    }

    points.into_values().collect()
}
