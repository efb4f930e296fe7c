use super::*;

fn alpha_at(b: &PixelBuffer, x: i32, y: i32) -> u8 {
    b.pixel(x, y).map(|c| c.a).unwrap_or(0)
}

#[test]
fn zero_radius_rounded_rect_is_exact_rectangle() {
    let mut b = PixelBuffer::new(12, 10);
    let c = Rgba8::new(9, 8, 7, 255);
    fill_rounded_rect(&mut b, 2, 3, 9, 8, 0, c);
    for y in 0..10 {
        for x in 0..12 {
            let inside = (2..9).contains(&x) && (3..8).contains(&y);
            let want = if inside { c } else { Rgba8::TRANSPARENT };
            assert_eq!(b.pixel(x, y), Some(want), "({x},{y})");
        }
    }
}

#[test]
fn rounded_rect_cuts_corners_but_fills_bands() {
    let mut b = PixelBuffer::new(20, 20);
    fill_rounded_rect(&mut b, 0, 0, 20, 20, 6, Rgba8::WHITE);
    assert_eq!(alpha_at(&b, 0, 0), 0);
    assert_eq!(alpha_at(&b, 19, 19), 0);
    assert_eq!(alpha_at(&b, 0, 10), 255);
    assert_eq!(alpha_at(&b, 10, 0), 255);
    assert_eq!(alpha_at(&b, 10, 10), 255);
    // On the corner circle's diagonal, just inside the radius.
    assert_eq!(alpha_at(&b, 2, 2), 255);
}

#[test]
fn rounded_rect_is_clipped_silently() {
    let mut b = PixelBuffer::new(4, 4);
    fill_rounded_rect(&mut b, -50, -50, 50, 50, 3, Rgba8::WHITE);
    assert!(b.as_bytes().chunks_exact(4).all(|px| px[3] == 255));
    fill_rounded_rect(&mut b, 10, 10, 20, 20, 3, Rgba8::BLACK);
    assert!(b.as_bytes().chunks_exact(4).all(|px| px == [255, 255, 255, 255]));
}

#[test]
fn blend_opaque_source_replaces_destination() {
    let mut b = PixelBuffer::new(1, 1);
    b.put_pixel(0, 0, Rgba8::new(1, 2, 3, 200));
    blend_pixel(&mut b, 0, 0, Rgba8::new(250, 0, 10, 255));
    assert_eq!(b.pixel(0, 0), Some(Rgba8::new(250, 0, 10, 255)));
}

#[test]
fn blend_onto_transparent_keeps_source() {
    let mut b = PixelBuffer::new(1, 1);
    blend_pixel(&mut b, 0, 0, Rgba8::new(10, 20, 30, 100));
    assert_eq!(b.pixel(0, 0), Some(Rgba8::new(10, 20, 30, 100)));
}

#[test]
fn blend_half_black_over_white() {
    let mut b = PixelBuffer::new(1, 1);
    b.fill(Rgba8::WHITE);
    blend_pixel(&mut b, 0, 0, Rgba8::new(0, 0, 0, 128));
    assert_eq!(b.pixel(0, 0), Some(Rgba8::new(127, 127, 127, 255)));
}

#[test]
fn blend_zero_alpha_result_resets_to_transparent_black() {
    let mut b = PixelBuffer::new(1, 1);
    b.put_pixel(0, 0, Rgba8::new(40, 50, 60, 0));
    blend_pixel(&mut b, 0, 0, Rgba8::new(255, 255, 255, 0));
    assert_eq!(b.pixel(0, 0), Some(Rgba8::TRANSPARENT));
}

#[test]
fn blend_outside_buffer_is_noop() {
    let mut b = PixelBuffer::new(2, 2);
    blend_pixel(&mut b, -1, 0, Rgba8::WHITE);
    blend_pixel(&mut b, 0, 2, Rgba8::WHITE);
    assert!(b.as_bytes().iter().all(|&v| v == 0));
}

#[test]
fn shadow_layers_darken_towards_the_inside() {
    let mut b = PixelBuffer::new(100, 100);
    draw_shadow(&mut b, 40, 40, 60, 60, 2, 3, 5, 4);
    // Innermost layer (i = 1) covers the offset rectangle center.
    let center = b.pixel(53, 55).unwrap();
    assert_eq!(center, Rgba8::new(0, 0, 0, 12));
    // Between the i = 2 and i = 3 rings only the i = 3 layer applies.
    assert_eq!(alpha_at(&b, 53, 55 - 10 - 10), 4);
    // Far outside every layer.
    assert_eq!(b.pixel(0, 0), Some(Rgba8::TRANSPARENT));
}

#[test]
fn close_button_draws_red_disc_with_white_cross() {
    let mut b = PixelBuffer::new(40, 40);
    draw_close_button(&mut b, 20, 20, 16);
    let center = b.pixel(20, 20).unwrap();
    assert_eq!(center.a, 255);
    assert!(center.g > 200 && center.b > 200);
    assert_eq!(b.pixel(20, 4), Some(CLOSE_BUTTON_FILL));
    assert_eq!(b.pixel(36, 36), Some(Rgba8::TRANSPARENT));
}

#[test]
fn circle_covers_center_and_spares_far_pixels() {
    let mut b = PixelBuffer::new(10, 10);
    fill_circle(&mut b, 5.0, 5.0, 2.0, Rgba8::new(255, 0, 0, 200));
    assert_eq!(b.pixel(5, 5), Some(Rgba8::new(255, 0, 0, 200)));
    assert_eq!(b.pixel(4, 4), Some(Rgba8::new(255, 0, 0, 200)));
    assert_eq!(b.pixel(0, 0), Some(Rgba8::TRANSPARENT));
    assert_eq!(b.pixel(8, 5), Some(Rgba8::TRANSPARENT));

    fill_circle(&mut b, -100.0, -100.0, 3.0, Rgba8::WHITE);
    fill_circle(&mut b, 5.0, 5.0, 0.0, Rgba8::WHITE);
    assert_eq!(b.pixel(5, 5), Some(Rgba8::new(255, 0, 0, 200)));
}
