use snake_client::renderer::glyphs;
use snake_client::renderer::{
    PixelCanvas, Rect, RecordingSurface, Scene, Surface, SurfaceOp, SurfaceStyle, DEFAULT_PANEL_HEIGHT,
};

fn recording(w: u16, h: u16) -> Scene<RecordingSurface> {
    let mut scene: Scene<RecordingSurface> = Scene::setup(w, h, DEFAULT_PANEL_HEIGHT, SurfaceStyle::default()).unwrap();
    scene.surface_mut().take_ops();
    scene
}

fn canvas(w: u16, h: u16) -> Scene<PixelCanvas> {
    Scene::setup(w, h, DEFAULT_PANEL_HEIGHT, SurfaceStyle::default()).unwrap()
}

fn lit_in(canvas: &PixelCanvas, area: Rect) -> Vec<(i32, i32)> {
    let mut lit = Vec::new();
    for y in area.y..area.bottom() {
        for x in area.x..area.right() {
            if canvas.is_lit(x, y) {
                lit.push((x, y));
            }
        }
    }
    lit
}

#[test]
fn setup_then_interior_sprite() {
    let mut scene = recording(10, 10);
    let field = *scene.field();
    assert_eq!((field.x_max, field.y_max), (20, 20));
    assert_eq!((field.x_offset, field.y_offset), (1, 9));

    scene.field_sprite_4x2(0b0000_1111, 0, 5).unwrap();

    assert_eq!(scene.surface().clears(), vec![Rect::new(1, 14, 4, 2)]);
    assert_eq!(scene.surface().fills(), vec![(1, 14), (2, 14), (3, 14), (4, 14)]);
}

#[test]
fn wide_sprite_at_right_edge_clears_both_halves() {
    let mut scene = recording(10, 10);
    scene.field_sprite_8x4(u32::MAX, 19, 6).unwrap();

    assert_eq!(
        scene.surface().clears(),
        vec![Rect::new(20, 15, 1, 4), Rect::new(1, 15, 7, 4)]
    );
    let fills = scene.surface().fills();
    assert_eq!(fills.len(), 32);
    let field = scene.field().bounds();
    assert!(fills.iter().all(|&(x, y)| field.contains(x, y)));
    let mut columns: Vec<i32> = fills.iter().map(|&(x, _)| x).collect();
    columns.sort_unstable();
    columns.dedup();
    assert_eq!(columns, vec![1, 2, 3, 4, 5, 6, 7, 20]);
}

#[test]
fn corner_crossing_clears_four_pieces() {
    let mut scene = recording(10, 10);
    scene.field_sprite_4x2(0xFF, 19, 19).unwrap();

    let clears = scene.surface().clears();
    assert_eq!(clears.len(), 4);
    for r in [
        Rect::new(20, 28, 1, 1),
        Rect::new(1, 28, 3, 1),
        Rect::new(20, 9, 1, 1),
        Rect::new(1, 9, 3, 1),
    ] {
        assert!(clears.contains(&r), "missing {r:?}");
    }
    assert_eq!(scene.surface().fills().len(), 8);
}

#[test]
fn moving_a_wrapped_sprite_leaves_no_ghost() {
    let mut scene = canvas(10, 10);
    let field = scene.field().bounds();

    scene.field_sprite_8x4(u32::MAX, 19, 6).unwrap();
    assert_eq!(lit_in(scene.surface(), field).len(), 32);

    // a blank sprite at the same spot only clears
    scene.field_sprite_8x4(0, 19, 6).unwrap();
    assert!(lit_in(scene.surface(), field).is_empty());
}

#[test]
fn field_clears_never_touch_the_frame() {
    let mut scene = canvas(10, 10);
    let before = scene.surface().lit_count();

    scene.field_sprite_8x4(u32::MAX, 19, 19).unwrap();
    scene.field_sprite_8x4(0, 19, 19).unwrap();
    scene.clear_field();

    assert_eq!(scene.surface().lit_count(), before);
    let config = *scene.surface().config();
    assert!(scene.surface().is_lit(0, DEFAULT_PANEL_HEIGHT));
    assert!(scene.surface().is_lit(config.width - 1, config.height - 1));
}

#[test]
fn panel_clears_never_touch_the_field() {
    assert!(Scene::<PixelCanvas>::setup(10, 10, 0, SurfaceStyle::default()).is_err());

    let mut scene = canvas(10, 10);
    scene.field_sprite_4x2(0xFF, 0, 0).unwrap();
    let field = scene.field().bounds();
    let lit = lit_in(scene.surface(), field);
    assert_eq!(lit.len(), 8);

    for i in 0..scene.panel().width {
        scene.clear_panel_block(i).unwrap();
    }
    assert_eq!(lit_in(scene.surface(), field), lit);
}

#[test]
fn panel_indices_from_either_edge_agree() {
    let width = recording(10, 10).panel().width;
    for i in 0..width {
        let mut left = recording(10, 10);
        let mut right = recording(10, 10);
        left.panel_sprite_3x5(0x7FFF, i).unwrap();
        right.panel_sprite_3x5(0x7FFF, i - width).unwrap();
        assert_eq!(left.surface().ops(), right.surface().ops());
    }
    let mut scene = recording(10, 10);
    assert!(scene.panel_sprite_3x5(1, width).is_err());
    assert!(scene.panel_sprite_3x5(1, -width - 1).is_err());
    assert!(scene.surface().ops().is_empty());
}

#[test]
fn panel_block_clear_is_exact() {
    let mut scene = recording(10, 10);
    scene.clear_panel_block(-1).unwrap();
    let (x, y) = scene.panel().block_to_pixel(-1).unwrap();
    assert_eq!(scene.surface().ops(), &[SurfaceOp::Clear(Rect::new(x, y, 3, 5))]);
}

#[test]
fn numbers_render_as_digit_blocks() {
    let mut by_number = recording(10, 10);
    by_number.draw_number(1907, 2, 1).unwrap();

    let mut by_digit = recording(10, 10);
    by_digit.panel_sprite(glyphs::digit(0).unwrap(), 1).unwrap();
    by_digit.panel_sprite(glyphs::digit(7).unwrap(), 2).unwrap();

    assert_eq!(by_number.surface().ops(), by_digit.surface().ops());
}
