//! Tests for connected component extraction.

use super::*;

const NO_LIMITS: ComponentLimits = ComponentLimits {
    min_area: 1,
    min_dimension: 1,
};

fn fill_rect(mask: &mut BitBuffer2, rect: Rect) {
    for y in rect.y..rect.bottom() {
        for x in rect.x..rect.right() {
            mask.set_xy(x, y, true);
        }
    }
}

#[test]
fn test_empty_mask_has_no_components() {
    let mask = BitBuffer2::new_default(50, 50);
    let components = find_components(&mask, NO_LIMITS);
    assert!(components.kept.is_empty());
    assert_eq!(components.discarded, 0);
}

#[test]
fn test_single_rectangle() {
    let mut mask = BitBuffer2::new_default(100, 80);
    fill_rect(&mut mask, Rect::new(10, 20, 30, 25));

    let components = find_components(&mask, NO_LIMITS);

    assert_eq!(
        components.kept,
        vec![Component {
            rect: Rect::new(10, 20, 30, 25),
            area: 750,
        }]
    );
}

#[test]
fn test_diagonal_pixels_are_connected() {
    let mut mask = BitBuffer2::new_default(10, 10);
    for i in 0..6 {
        mask.set_xy(2 + i, 1 + i, true);
    }

    let components = find_components(&mask, NO_LIMITS);

    assert_eq!(components.kept.len(), 1);
    assert_eq!(components.kept[0].rect, Rect::new(2, 1, 6, 6));
    assert_eq!(components.kept[0].area, 6);
}

#[test]
fn test_separate_components_in_raster_order() {
    let mut mask = BitBuffer2::new_default(200, 100);
    fill_rect(&mut mask, Rect::new(150, 5, 10, 10));
    fill_rect(&mut mask, Rect::new(5, 50, 10, 10));
    fill_rect(&mut mask, Rect::new(70, 2, 10, 10));

    let components = find_components(&mask, NO_LIMITS);
    let rects: Vec<Rect> = components.kept.iter().map(|c| c.rect).collect();

    assert_eq!(
        rects,
        vec![
            Rect::new(70, 2, 10, 10),
            Rect::new(150, 5, 10, 10),
            Rect::new(5, 50, 10, 10),
        ]
    );
}

#[test]
fn test_ring_is_one_component_with_hollow_area() {
    let mut mask = BitBuffer2::new_default(40, 40);
    fill_rect(&mut mask, Rect::new(5, 5, 30, 30));
    for y in 10..30 {
        for x in 10..30 {
            mask.set_xy(x, y, false);
        }
    }

    let components = find_components(&mask, NO_LIMITS);

    assert_eq!(components.kept.len(), 1);
    assert_eq!(components.kept[0].rect, Rect::new(5, 5, 30, 30));
    assert_eq!(components.kept[0].area, 900 - 400);
}

#[test]
fn test_component_spanning_word_boundary() {
    let mut mask = BitBuffer2::new_default(150, 20);
    fill_rect(&mut mask, Rect::new(60, 3, 10, 5));

    let components = find_components(&mask, NO_LIMITS);

    assert_eq!(components.kept.len(), 1);
    assert_eq!(components.kept[0].rect, Rect::new(60, 3, 10, 5));
    assert_eq!(components.kept[0].area, 50);
}

#[test]
fn test_size_limits() {
    let limits = ComponentLimits {
        min_area: 500,
        min_dimension: 15,
    };
    let mut mask = BitBuffer2::new_default(300, 300);
    // 40x40 = 1600 px: kept
    fill_rect(&mut mask, Rect::new(10, 10, 40, 40));
    // 100x10 = 1000 px but only 10 tall: dropped
    fill_rect(&mut mask, Rect::new(100, 10, 100, 10));
    // 20x20 = 400 px: dropped by area
    fill_rect(&mut mask, Rect::new(10, 100, 20, 20));
    // 15x34 = 510 px: kept, exactly at the dimension limit
    fill_rect(&mut mask, Rect::new(100, 100, 15, 34));

    let components = find_components(&mask, limits);
    let rects: Vec<Rect> = components.kept.iter().map(|c| c.rect).collect();

    assert_eq!(
        rects,
        vec![Rect::new(10, 10, 40, 40), Rect::new(100, 100, 15, 34)]
    );
    assert_eq!(components.discarded, 2);
}

#[test]
fn test_large_component_does_not_overflow_stack() {
    let mask = BitBuffer2::new_filled(1000, 1000, true);
    let components = find_components(&mask, NO_LIMITS);
    assert_eq!(components.kept.len(), 1);
    assert_eq!(components.kept[0].area, 1_000_000);
    assert_eq!(components.kept[0].rect, Rect::full(1000, 1000));
}
