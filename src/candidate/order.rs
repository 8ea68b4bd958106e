//! Result ordering policies and index selection.

use crate::metric::ScoreDirection;
use crate::result::MatchResult;

/// How accepted results are ordered before selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OrderBy {
    /// Left to right by box `x`, then top to bottom.
    #[default]
    Horizontal,
    /// Top to bottom by box `y`, then left to right.
    Vertical,
    /// Best score first, respecting the score direction.
    Score,
    /// Largest box area first.
    Area,
    /// Keep production order.
    Unordered,
}

/// Sorts `results` in place. All sorts are stable.
pub fn sort_results(results: &mut [MatchResult], order: OrderBy, direction: ScoreDirection) {
    match order {
        OrderBy::Horizontal => {
            results.sort_by(|a, b| a.rect.x.cmp(&b.rect.x).then(a.rect.y.cmp(&b.rect.y)))
        }
        OrderBy::Vertical => {
            results.sort_by(|a, b| a.rect.y.cmp(&b.rect.y).then(a.rect.x.cmp(&b.rect.x)))
        }
        OrderBy::Score => results.sort_by(|a, b| direction.cmp_best_first(a.score, b.score)),
        OrderBy::Area => results.sort_by(|a, b| b.rect.area().cmp(&a.rect.area())),
        OrderBy::Unordered => {}
    }
}

/// Picks an element by index; negative indices count from the end.
///
/// Returns `None` when `index >= len` or `index < -len`.
pub fn select_index<T>(items: &[T], index: isize) -> Option<&T> {
    let len = items.len() as isize;
    let resolved = if index < 0 { len + index } else { index };
    if resolved < 0 || resolved >= len {
        return None;
    }
    items.get(resolved as usize)
}

#[cfg(test)]
mod tests {
    use super::{select_index, sort_results, OrderBy};
    use crate::geometry::Rect;
    use crate::metric::ScoreDirection;
    use crate::result::MatchResult;

    fn m(x: i32, y: i32, w: i32, score: f32) -> MatchResult {
        MatchResult {
            rect: Rect::new(x, y, w, w),
            score,
            template_index: 0,
        }
    }

    fn sample() -> Vec<MatchResult> {
        vec![
            m(30, 5, 4, 0.7),
            m(10, 40, 8, 0.9),
            m(10, 20, 2, 0.8),
            m(50, 0, 6, 0.6),
        ]
    }

    #[test]
    fn horizontal_and_vertical_orders() {
        let mut items = sample();
        sort_results(&mut items, OrderBy::Horizontal, ScoreDirection::HigherIsBetter);
        let xs: Vec<(i32, i32)> = items.iter().map(|r| (r.rect.x, r.rect.y)).collect();
        assert_eq!(xs, vec![(10, 20), (10, 40), (30, 5), (50, 0)]);

        sort_results(&mut items, OrderBy::Vertical, ScoreDirection::HigherIsBetter);
        let ys: Vec<i32> = items.iter().map(|r| r.rect.y).collect();
        assert_eq!(ys, vec![0, 5, 20, 40]);
    }

    #[test]
    fn score_order_respects_direction() {
        let mut items = sample();
        sort_results(&mut items, OrderBy::Score, ScoreDirection::HigherIsBetter);
        assert_eq!(items[0].score, 0.9);
        sort_results(&mut items, OrderBy::Score, ScoreDirection::LowerIsBetter);
        assert_eq!(items[0].score, 0.6);
    }

    #[test]
    fn area_and_unordered() {
        let mut items = sample();
        sort_results(&mut items, OrderBy::Area, ScoreDirection::HigherIsBetter);
        let widths: Vec<i32> = items.iter().map(|r| r.rect.width).collect();
        assert_eq!(widths, vec![8, 6, 4, 2]);

        let mut items = sample();
        sort_results(&mut items, OrderBy::Unordered, ScoreDirection::HigherIsBetter);
        assert_eq!(items, sample());
    }

    #[test]
    fn ties_keep_input_order_for_every_policy() {
        let tagged = |x, y, w, score, template_index| MatchResult {
            rect: Rect::new(x, y, w, w),
            score,
            template_index,
        };
        // Pairs share position, score or area and differ only by template index.
        let input = vec![
            tagged(10, 20, 4, 0.8, 0),
            tagged(30, 5, 6, 0.9, 1),
            tagged(10, 20, 4, 0.8, 2),
            tagged(50, 5, 6, 0.9, 3),
            tagged(10, 20, 4, 0.7, 4),
        ];
        let policies = [
            OrderBy::Horizontal,
            OrderBy::Vertical,
            OrderBy::Score,
            OrderBy::Area,
            OrderBy::Unordered,
        ];
        let directions = [ScoreDirection::HigherIsBetter, ScoreDirection::LowerIsBetter];
        for order in policies {
            for direction in directions {
                let mut first = input.clone();
                let mut second = input.clone();
                sort_results(&mut first, order, direction);
                sort_results(&mut second, order, direction);
                assert_eq!(first, second, "{order:?} {direction:?}");

                let tie_order = |items: &[MatchResult], a: usize, b: usize| {
                    let pos = |t| items.iter().position(|m| m.template_index == t).unwrap();
                    pos(a) < pos(b)
                };
                // Identical boxes with identical scores are equal under every key.
                assert!(tie_order(&first, 0, 2), "{order:?} {direction:?}");
                assert!(tie_order(&first, 1, 3), "{order:?} {direction:?}");
            }
        }

        let mut by_area = input.clone();
        sort_results(&mut by_area, OrderBy::Area, ScoreDirection::HigherIsBetter);
        let indices: Vec<usize> = by_area.iter().map(|m| m.template_index).collect();
        assert_eq!(indices, vec![1, 3, 0, 2, 4]);

        let mut by_x = input;
        sort_results(&mut by_x, OrderBy::Horizontal, ScoreDirection::HigherIsBetter);
        let indices: Vec<usize> = by_x.iter().map(|m| m.template_index).collect();
        assert_eq!(indices, vec![0, 2, 4, 1, 3]);
    }

    #[test]
    fn negative_indices_count_from_end() {
        let items = [1, 2, 3];
        assert_eq!(select_index(&items, 0), Some(&1));
        assert_eq!(select_index(&items, -1), Some(&3));
        assert_eq!(select_index(&items, -1), select_index(&items, 2));
        assert_eq!(select_index(&items, -3), Some(&1));
        assert_eq!(select_index(&items, 3), None);
        assert_eq!(select_index(&items, -4), None);
        assert_eq!(select_index::<i32>(&[], 0), None);
    }
}
