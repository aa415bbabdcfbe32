//! Column grouping and coordinate assignment.

use indexmap::IndexMap;

use strata_core::{
    geometry::{Point, Size},
    identifier::Id,
};

use crate::config::LayoutConfig;

/// Groups ids into one column per level.
///
/// Column `n` holds the ids of level `n` in the order they appear in
/// `levels`. Levels produced by longest-path assignment are contiguous, so
/// no column is empty unless `levels` skips a value.
pub fn group_by_level(levels: &IndexMap<Id, usize>) -> Vec<Vec<Id>> {
    let depth = levels.values().max().map_or(0, |max| max + 1);
    let mut columns = vec![Vec::new(); depth];
    for (&id, &level) in levels {
        columns[level].push(id);
    }
    columns
}

/// Top-left corner of the node at `row` within column `level`.
pub fn node_position(level: usize, row: usize, config: &LayoutConfig) -> Point {
    Point::new(
        level as f32 * config.column_pitch() + config.margin(),
        row as f32 * config.row_pitch() + config.margin(),
    )
}

/// Size of the drawing, including the margin on every side.
pub fn layout_size(columns: &[Vec<Id>], config: &LayoutConfig) -> Size {
    let levels = columns.len();
    let rows = columns.iter().map(Vec::len).max().unwrap_or(0);
    if levels == 0 || rows == 0 {
        return Size::default();
    }

    let span = |count: usize, extent: f32, gap: f32| {
        count as f32 * extent + (count - 1) as f32 * gap + 2.0 * config.margin()
    };

    Size::new(
        span(levels, config.node_width(), config.level_gap()),
        span(rows, config.node_height(), config.node_gap()),
    )
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn assert_point(point: Point, x: f32, y: f32) {
        assert_approx_eq!(f32, point.x(), x);
        assert_approx_eq!(f32, point.y(), y);
    }

    #[test]
    fn test_group_by_level_preserves_order() {
        let levels: IndexMap<Id, usize> = [("D", 2), ("B", 1), ("A", 0), ("C", 1)]
            .into_iter()
            .map(|(id, level)| (Id::new(id), level))
            .collect();

        let columns = group_by_level(&levels);
        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0], vec![Id::new("A")]);
        assert_eq!(columns[1], vec![Id::new("B"), Id::new("C")]);
        assert_eq!(columns[2], vec![Id::new("D")]);
    }

    #[test]
    fn test_group_by_level_empty() {
        assert!(group_by_level(&IndexMap::new()).is_empty());
    }

    #[test]
    fn test_node_position_uses_pitch_and_margin() {
        let config = LayoutConfig::default();
        assert_point(node_position(0, 0, &config), 20.0, 20.0);
        assert_point(node_position(1, 1, &config), 280.0, 100.0);
        assert_point(node_position(2, 3, &config), 540.0, 260.0);

        let tight = LayoutConfig::new(10.0, 10.0, 5.0, 5.0).with_margin(0.0);
        assert_point(node_position(2, 1, &tight), 30.0, 15.0);
    }

    #[test]
    fn test_layout_size() {
        let config = LayoutConfig::default();
        let columns = vec![
            vec![Id::new("A")],
            vec![Id::new("B"), Id::new("C")],
            vec![Id::new("D")],
        ];

        // 3 * 180 + 2 * 80 + 40, 2 * 56 + 24 + 40
        let size = layout_size(&columns, &config);
        assert_approx_eq!(f32, size.width(), 740.0);
        assert_approx_eq!(f32, size.height(), 176.0);
        assert!(layout_size(&[], &config).is_zero());
    }
}
