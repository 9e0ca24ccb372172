//! Placement of new content into free space around existing content.
//!
//! Free space starts as the whole view. Every anchor is cut out of each free
//! region it overlaps, leaving up to four maximal sub-regions (above, below,
//! left and right of the cut). The first region large enough for the agent,
//! ordered top-to-bottom then left-to-right, receives it.

use crate::rect::Rectangle;
use kurbo::Size;
use std::cmp::Ordering;

/// Padding callers add around anchors so placed content keeps some breathing room.
pub const PLACEMENT_ANCHORS_PADDING: f64 = 40.0;

/// Number of view-width steps [`walk_to_fit`] tries before giving up on free space.
pub const MAX_WALK_STEPS: usize = 16;

/// Split `region` around `anchor`, pushing the surviving pieces into `out`.
fn subtract(region: &Rectangle, anchor: &Rectangle, out: &mut Vec<Rectangle>) {
    let Some(cut) = region.intersection(anchor) else {
        out.push(*region);
        return;
    };

    let pieces = [
        // above
        Rectangle::new(region.x, region.y, region.width, cut.y - region.y),
        // below
        Rectangle::new(region.x, cut.y2(), region.width, region.y2() - cut.y2()),
        // left
        Rectangle::new(region.x, region.y, cut.x - region.x, region.height),
        // right
        Rectangle::new(cut.x2(), region.y, region.x2() - cut.x2(), region.height),
    ];
    out.extend(pieces.into_iter().filter(|p| p.width > 0.0 && p.height > 0.0));
}

/// Drop regions fully covered by another region. The first of two identical
/// regions is kept.
fn prune_contained(regions: Vec<Rectangle>) -> Vec<Rectangle> {
    let mut kept: Vec<Rectangle> = Vec::with_capacity(regions.len());
    for (i, region) in regions.iter().enumerate() {
        let covered = regions.iter().enumerate().any(|(j, other)| {
            i != j && region.is_contained_in(other) && (other != region || j < i)
        });
        if !covered {
            kept.push(*region);
        }
    }
    kept
}

/// Free regions of `view` left after cutting out every anchor, in input order.
pub fn free_regions(view: &Rectangle, anchors: &[Rectangle]) -> Vec<Rectangle> {
    let mut regions = vec![view.normalized()];
    for anchor in anchors {
        let anchor = anchor.normalized();
        let mut next = Vec::with_capacity(regions.len() + 3);
        for region in &regions {
            subtract(region, &anchor, &mut next);
        }
        regions = prune_contained(next);
    }
    regions
}

fn by_position(a: &Rectangle, b: &Rectangle) -> Ordering {
    a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x))
}

/// Find a spot for `agent` inside `view` that overlaps none of `anchors`.
///
/// Returns `None` when the agent is larger than the view or no free region is
/// large enough. That is a routine outcome, not an error.
pub fn fit(view: &Rectangle, agent: Size, anchors: &[Rectangle]) -> Option<Rectangle> {
    if agent.width > view.width.abs() || agent.height > view.height.abs() {
        log::debug!("Agent {:?} does not fit in view {:?}", agent, view);
        return None;
    }

    let mut candidates: Vec<Rectangle> = free_regions(view, anchors)
        .into_iter()
        .filter(|r| r.width >= agent.width && r.height >= agent.height)
        .collect();
    candidates.sort_by(by_position);

    let placement = candidates
        .first()
        .map(|r| Rectangle::new(r.x, r.y, agent.width, agent.height));
    log::trace!(
        "fit: {} candidate region(s) for {:?} among {} anchor(s) -> {:?}",
        candidates.len(),
        agent,
        anchors.len(),
        placement
    );
    placement
}

/// Like [`fit`], but always places the agent.
///
/// When the view has no room, the view is walked rightwards one view-width at a
/// time (up to [`MAX_WALK_STEPS`]). If that still finds nothing, the agent goes
/// to the right of every anchor, aligned with the view's top edge.
pub fn walk_to_fit(view: &Rectangle, agent: Size, anchors: &[Rectangle]) -> Rectangle {
    let view = view.normalized();
    if let Some(placement) = fit(&view, agent, anchors) {
        return placement;
    }

    let step = view.width.max(agent.width);
    if step > 0.0 {
        for i in 1..=MAX_WALK_STEPS {
            let shifted = view.translate(step * i as f64, 0.0);
            if let Some(placement) = fit(&shifted, agent, anchors) {
                log::debug!("walk_to_fit: placed after {} step(s)", i);
                return placement;
            }
        }
    }

    let right = anchors
        .iter()
        .map(Rectangle::max_x)
        .fold(view.x, f64::max);
    log::debug!("walk_to_fit: no free region, placing right of anchors at x={}", right);
    Rectangle::new(right, view.y, agent.width, agent.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f64, y: f64, w: f64, h: f64) -> Rectangle {
        Rectangle::new(x, y, w, h)
    }

    #[test]
    fn test_fit_no_anchors() {
        let placed = fit(&r(0.0, 0.0, 100.0, 100.0), Size::new(10.0, 10.0), &[]);
        assert_eq!(placed, Some(r(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_fit_oversize_agent() {
        assert_eq!(fit(&r(0.0, 0.0, 30.0, 30.0), Size::new(40.0, 40.0), &[]), None);
        assert_eq!(fit(&r(0.0, 0.0, 30.0, 30.0), Size::new(10.0, 40.0), &[]), None);
    }

    #[test]
    fn test_fit_exact_size() {
        let placed = fit(&r(5.0, 5.0, 30.0, 30.0), Size::new(30.0, 30.0), &[]);
        assert_eq!(placed, Some(r(5.0, 5.0, 30.0, 30.0)));
    }

    #[test]
    fn test_fit_three_anchors_prefers_top_then_left() {
        let view = r(0.0, 0.0, 200.0, 200.0);
        let anchors = [
            r(0.0, 0.0, 125.0, 100.0),
            r(125.0, 0.0, 75.0, 25.0),
            r(0.0, 100.0, 25.0, 100.0),
        ];
        // Free regions: (125,25,75,175) and (25,100,175,100); both fit.
        let placed = fit(&view, Size::new(50.0, 50.0), &anchors);
        assert_eq!(placed, Some(r(125.0, 25.0, 50.0, 50.0)));
    }

    #[test]
    fn test_fit_same_row_prefers_left() {
        let view = r(0.0, 0.0, 100.0, 100.0);
        let anchors = [r(40.0, 0.0, 20.0, 100.0)];
        let placed = fit(&view, Size::new(30.0, 30.0), &anchors);
        assert_eq!(placed, Some(r(0.0, 0.0, 30.0, 30.0)));
    }

    #[test]
    fn test_fit_skips_regions_too_small() {
        let view = r(0.0, 0.0, 100.0, 100.0);
        let anchors = [r(20.0, 0.0, 20.0, 100.0)];
        // Left strip is only 20 wide.
        let placed = fit(&view, Size::new(30.0, 30.0), &anchors);
        assert_eq!(placed, Some(r(40.0, 0.0, 30.0, 30.0)));
    }

    #[test]
    fn test_fit_full_cover() {
        let view = r(0.0, 0.0, 100.0, 100.0);
        let anchors = [r(-10.0, -10.0, 200.0, 200.0)];
        assert_eq!(fit(&view, Size::new(1.0, 1.0), &anchors), None);
    }

    #[test]
    fn test_touching_anchor_does_not_split() {
        let view = r(0.0, 0.0, 100.0, 100.0);
        let regions = free_regions(&view, &[r(100.0, 0.0, 50.0, 50.0)]);
        assert_eq!(regions, vec![view]);
    }

    #[test]
    fn test_free_regions_center_hole() {
        let regions = free_regions(&r(0.0, 0.0, 100.0, 100.0), &[r(40.0, 40.0, 20.0, 20.0)]);
        assert_eq!(
            regions,
            vec![
                r(0.0, 0.0, 100.0, 40.0),
                r(0.0, 60.0, 100.0, 40.0),
                r(0.0, 0.0, 40.0, 100.0),
                r(60.0, 0.0, 40.0, 100.0),
            ]
        );
    }

    #[test]
    fn test_placement_avoids_anchors() {
        let view = r(0.0, 0.0, 300.0, 300.0);
        let anchors = [
            r(0.0, 0.0, 100.0, 100.0),
            r(120.0, 10.0, 60.0, 200.0),
            r(10.0, 150.0, 80.0, 80.0),
        ];
        let placed = fit(&view, Size::new(40.0, 40.0), &anchors).unwrap();
        assert!(placed.is_contained_in(&view));
        for anchor in &anchors {
            assert!(placed.intersection(anchor).is_none(), "{placed:?} overlaps {anchor:?}");
        }
    }

    #[test]
    fn test_walk_to_fit_uses_view_first() {
        let placed = walk_to_fit(&r(0.0, 0.0, 100.0, 100.0), Size::new(10.0, 10.0), &[]);
        assert_eq!(placed, r(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_walk_to_fit_walks_right() {
        let view = r(0.0, 0.0, 100.0, 100.0);
        let anchors = [r(0.0, 0.0, 150.0, 100.0)];
        let placed = walk_to_fit(&view, Size::new(20.0, 20.0), &anchors);
        assert_eq!(placed, r(150.0, 0.0, 20.0, 20.0));
    }

    #[test]
    fn test_walk_to_fit_oversize_goes_right_of_anchors() {
        let view = r(0.0, 0.0, 100.0, 100.0);
        let anchors = [r(0.0, 0.0, 50.0, 50.0), r(60.0, 20.0, 70.0, 10.0)];
        let placed = walk_to_fit(&view, Size::new(40.0, 400.0), &anchors);
        assert_eq!(placed, r(130.0, 0.0, 40.0, 400.0));
    }
}
