use super::*;

fn solid(w: u32, h: u32, c: Rgba8) -> PixelBuffer {
    let mut b = PixelBuffer::new(w, h);
    b.fill(c);
    b
}

#[test]
fn unscaled_draw_copies_opaque_texels() {
    let red = Rgba8::new(255, 0, 0, 255);
    let src = solid(2, 2, red);
    let mut dst = PixelBuffer::new(4, 4);
    draw_image(&mut dst, &src, &DrawParams::at(1.0, 1.0));
    assert_eq!(dst.pixel(1, 1), Some(red));
    assert_eq!(dst.pixel(2, 2), Some(red));
    assert_eq!(dst.pixel(0, 0), Some(Rgba8::TRANSPARENT));
    assert_eq!(dst.pixel(3, 3), Some(Rgba8::TRANSPARENT));
}

#[test]
fn tint_and_opacity_modulate_the_source() {
    let src = solid(1, 1, Rgba8::WHITE);
    let mut dst = PixelBuffer::new(1, 1);
    let params = DrawParams {
        tint: RgbF::new(1.0, 0.0, 0.5),
        opacity: 0.5,
        ..DrawParams::at(0.0, 0.0)
    };
    draw_image(&mut dst, &src, &params);
    assert_eq!(dst.pixel(0, 0), Some(Rgba8::new(255, 0, 128, 128)));
}

#[test]
fn zero_opacity_or_scale_draws_nothing() {
    let src = solid(2, 2, Rgba8::WHITE);
    let mut dst = PixelBuffer::new(2, 2);
    let mut params = DrawParams::at(0.0, 0.0);
    params.opacity = 0.0;
    draw_image(&mut dst, &src, &params);
    params.opacity = 1.0;
    params.scale = 0.0;
    draw_image(&mut dst, &src, &params);
    assert!(dst.as_bytes().iter().all(|&v| v == 0));
}

#[test]
fn scaled_draw_covers_the_scaled_footprint() {
    let src = solid(1, 1, Rgba8::WHITE);
    let mut dst = PixelBuffer::new(4, 4);
    let params = DrawParams {
        scale: 2.0,
        ..DrawParams::at(0.0, 0.0)
    };
    draw_image(&mut dst, &src, &params);
    assert!(dst.pixel(0, 0).unwrap().a > 0);
    assert!(dst.pixel(1, 1).unwrap().a > 0);
    assert_eq!(dst.pixel(2, 2), Some(Rgba8::TRANSPARENT));
}

#[test]
fn draw_clips_partially_offscreen_images() {
    let red = Rgba8::new(255, 0, 0, 255);
    let blue = Rgba8::new(0, 0, 255, 255);
    let src = solid(4, 4, red);

    let mut dst = solid(4, 4, blue);
    draw_image(&mut dst, &src, &DrawParams::at(-2.0, -2.0));
    assert_eq!(dst.pixel(0, 0), Some(red));
    assert_eq!(dst.pixel(1, 1), Some(red));
    assert_eq!(dst.pixel(2, 1), Some(blue));
    assert_eq!(dst.pixel(1, 2), Some(blue));
    assert_eq!(dst.pixel(3, 3), Some(blue));

    let mut dst = solid(4, 4, blue);
    draw_image(&mut dst, &src, &DrawParams::at(3.0, 3.0));
    assert_eq!(dst.pixel(3, 3), Some(red));
    assert_eq!(dst.pixel(2, 3), Some(blue));
    assert_eq!(dst.pixel(3, 2), Some(blue));

    let mut dst = solid(4, 4, blue);
    draw_image(&mut dst, &src, &DrawParams::at(10.0, -10.0));
    assert_eq!(dst, solid(4, 4, blue));
}

#[test]
fn background_is_stretched_dimmed_and_opaque() {
    let mut bg = PixelBuffer::new(2, 2);
    bg.put_pixel(0, 0, Rgba8::new(200, 100, 50, 255));
    bg.put_pixel(1, 1, Rgba8::new(10, 20, 30, 0));
    let mut dst = PixelBuffer::new(4, 4);
    draw_background(&mut dst, &bg, 0.5);
    assert_eq!(dst.pixel(0, 0), Some(Rgba8::new(100, 50, 25, 255)));
    assert_eq!(dst.pixel(1, 1), Some(Rgba8::new(100, 50, 25, 255)));
    assert_eq!(dst.pixel(3, 3), Some(Rgba8::new(5, 10, 15, 255)));
}

#[test]
fn empty_background_fills_black() {
    let mut dst = PixelBuffer::new(2, 2);
    draw_background(&mut dst, &PixelBuffer::new(0, 0), 0.6);
    assert!(dst.as_bytes().chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}
