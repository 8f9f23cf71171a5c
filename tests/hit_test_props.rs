use gridlock::input::{resolve, Dispatch};
use gridlock::{
    cell_origin, default_cell_centre, default_grid, Button, GridButton, HitTestDispatcher,
    InputEvent, PointerButton, Vec2, Viewport, CELL_SIZE, GRID_COLS, GRID_ROWS, LOGICAL_SIZE,
};
use proptest::prelude::*;

fn contains(origin: Vec2, spot: Vec2) -> bool {
    spot.x >= origin.x
        && spot.x < origin.x + CELL_SIZE
        && spot.y >= origin.y
        && spot.y < origin.y + CELL_SIZE
}

#[test]
fn grid_is_row_major_and_centred() {
    let first = cell_origin(0, GRID_COLS, GRID_ROWS, CELL_SIZE);
    let second = cell_origin(1, GRID_COLS, GRID_ROWS, CELL_SIZE);
    let fourth = cell_origin(3, GRID_COLS, GRID_ROWS, CELL_SIZE);
    assert_eq!(second.y, first.y);
    assert!(second.x > first.x);
    assert_eq!(fourth.x, first.x);
    assert!(fourth.y > first.y);

    let last = cell_origin(8, GRID_COLS, GRID_ROWS, CELL_SIZE);
    let left_margin = first.x;
    let right_margin = LOGICAL_SIZE.x - (last.x + CELL_SIZE);
    assert!((left_margin - right_margin).abs() <= CELL_SIZE);
}

#[test]
fn edges_are_half_open() {
    let button = GridButton::new(Vec2::new(10.0, 20.0), Vec2::splat(16.0));
    assert!(button.hit_test(Vec2::new(10.0, 20.0)));
    assert!(button.hit_test(Vec2::new(25.9, 35.9)));
    assert!(!button.hit_test(Vec2::new(26.0, 20.0)));
    assert!(!button.hit_test(Vec2::new(10.0, 36.0)));
    assert!(!button.hit_test(Vec2::new(9.9, 25.0)));
}

#[test]
fn gaps_between_cells_resolve_to_nothing() {
    let grid = default_grid();
    let right_edge = cell_origin(0, GRID_COLS, GRID_ROWS, CELL_SIZE).x + CELL_SIZE;
    let y = default_cell_centre(0).y;
    assert_eq!(resolve(&grid, Vec2::new(right_edge + 1.0, y)), None);
    assert_eq!(resolve(&grid, Vec2::new(0.0, 0.0)), None);
    for i in 0..9 {
        assert_eq!(resolve(&grid, default_cell_centre(i)), Some(i));
    }
}

#[test]
fn resize_scales_pointer_positions() {
    let mut grid = default_grid();
    let mut dispatcher = HitTestDispatcher::default();
    dispatcher.dispatch(
        &mut grid,
        InputEvent::Resize {
            width: LOGICAL_SIZE.x * 4.0,
            height: LOGICAL_SIZE.y * 3.0,
        },
    );
    assert_eq!(dispatcher.viewport().scale(), Vec2::new(4.0, 3.0));

    let centre = default_cell_centre(5);
    let physical = Vec2::new(centre.x * 4.0, centre.y * 3.0);
    let hit = dispatcher.dispatch(
        &mut grid,
        InputEvent::Press {
            x: physical.x,
            y: physical.y,
            button: PointerButton::Primary,
        },
    );
    assert_eq!(hit, Dispatch::Commit(5));

    // The unscaled position now lands outside the grid.
    let miss = dispatcher.dispatch(
        &mut grid,
        InputEvent::Press {
            x: centre.x,
            y: centre.y,
            button: PointerButton::Primary,
        },
    );
    assert_eq!(miss, Dispatch::None);
}

#[test]
fn degenerate_resize_is_ignored() {
    let mut viewport = Viewport::default();
    viewport.resize(0.0, 100.0);
    assert_eq!(viewport.scale(), Vec2::splat(1.0));
    viewport.resize(640.0, 360.0);
    assert_eq!(viewport.to_logical(Vec2::new(640.0, 360.0)), LOGICAL_SIZE);
    assert_eq!(viewport.to_physical(LOGICAL_SIZE), Vec2::new(640.0, 360.0));
}

#[test]
fn secondary_press_does_not_commit() {
    let mut grid = default_grid();
    let mut dispatcher = HitTestDispatcher::default();
    let c = default_cell_centre(0);
    let out = dispatcher.dispatch(
        &mut grid,
        InputEvent::Press {
            x: c.x,
            y: c.y,
            button: PointerButton::Secondary,
        },
    );
    assert_eq!(out, Dispatch::None);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn hover_matches_containing_cells(
        moves in proptest::collection::vec((0.0f32..640.0, 0.0f32..360.0), 1..8),
        width in 160.0f32..1280.0,
        height in 90.0f32..720.0,
    ) {
        let mut grid = default_grid();
        let mut dispatcher = HitTestDispatcher::default();
        dispatcher.dispatch(&mut grid, InputEvent::Resize { width, height });
        for (x, y) in moves {
            let out = dispatcher.dispatch(&mut grid, InputEvent::Motion { x, y });
            let Dispatch::Moved(spot) = out else {
                return Err(TestCaseError::fail("motion did not report a position"));
            };
            prop_assert_eq!(spot, dispatcher.viewport().to_logical(Vec2::new(x, y)));
            for (i, button) in grid.iter().enumerate() {
                let expected = contains(cell_origin(i, GRID_COLS, GRID_ROWS, CELL_SIZE), spot);
                prop_assert_eq!(button.is_hovered(), expected, "cell {}", i);
            }
            prop_assert!(grid.iter().filter(|b| b.is_hovered()).count() <= 1);
        }
    }
}
