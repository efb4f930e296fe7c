use super::*;

fn bitmaps() -> (Arc<PixelBuffer>, Arc<PixelBuffer>) {
    let mut card = PixelBuffer::new(4, 4);
    card.fill(Rgba8::WHITE);
    (Arc::new(card), Arc::new(PixelBuffer::new(1, 1)))
}

fn popup(max_age: f64) -> Popup {
    let (card, text) = bitmaps();
    Popup::new(Point::new(10.0, 10.0), 1.0, Rgba8::WHITE, max_age, card, text)
}

#[test]
fn opacity_holds_base_until_fade_start() {
    assert_eq!(fade_opacity(0.0, 10.0), BASE_OPACITY);
    assert_eq!(fade_opacity(5.0, 10.0), BASE_OPACITY);
    assert_eq!(fade_opacity(7.0, 10.0), BASE_OPACITY);
}

#[test]
fn opacity_ramps_linearly_to_zero() {
    assert!((fade_opacity(8.5, 10.0) - BASE_OPACITY / 2.0).abs() < 1e-6);
    assert!((fade_opacity(9.4, 10.0) - BASE_OPACITY * 0.2).abs() < 1e-6);
    assert!(fade_opacity(10.0, 10.0).abs() < 1e-6);
    assert_eq!(fade_opacity(12.0, 10.0), 0.0);
}

#[test]
fn aging_fades_and_expires() {
    let mut p = popup(1.0);
    assert!(p.age(0.5));
    assert_eq!(p.opacity, BASE_OPACITY);
    assert!(p.age(0.35));
    assert!((p.opacity - BASE_OPACITY / 2.0).abs() < 1e-5);
    assert!(!p.age(0.2));
}

#[test]
fn text_color_contrasts_with_tint() {
    let (card, text) = bitmaps();
    let dark = Popup::new(
        Point::ZERO,
        1.0,
        Rgba8::new(40, 20, 60, 255),
        1.0,
        card.clone(),
        text.clone(),
    );
    assert!(dark.text_color.lightness() > dark.tint.lightness());
    let light = Popup::new(Point::ZERO, 1.0, Rgba8::new(240, 230, 200, 255), 1.0, card, text);
    assert!(light.text_color.lightness() < light.tint.lightness());
}

#[test]
fn expansion_scales_offset_from_center() {
    let mut p = popup(1.0);
    p.pos = Point::new(110.0, 50.0);
    p.expand_from(Point::new(100.0, 50.0), 2.0, 1.5);
    assert_eq!(p.pos, Point::new(120.0, 50.0));
    assert_eq!(p.zoom, 1.5);
}

#[test]
fn draw_centres_scaled_card_on_position() {
    let mut p = popup(1.0);
    p.opacity = 1.0;
    p.zoom = 2.0;
    p.tint = RgbF::new(1.0, 0.0, 0.0);
    let mut surface = PixelBuffer::new(20, 20);
    p.draw(&mut surface);

    // Card spans [6, 14) on both axes; edge pixels are softened by bilinear sampling.
    assert_eq!(surface.pixel(7, 7), Some(Rgba8::new(255, 0, 0, 255)));
    assert_eq!(surface.pixel(12, 12), Some(Rgba8::new(255, 0, 0, 255)));
    assert!(surface.pixel(6, 6).is_some_and(|c| c.a > 0 && c.a < 255));
    assert_eq!(surface.pixel(10, 10), Some(Rgba8::new(255, 0, 0, 255)));
    assert_eq!(surface.pixel(4, 10), Some(Rgba8::TRANSPARENT));
    assert_eq!(surface.pixel(15, 10), Some(Rgba8::TRANSPARENT));
}

#[test]
fn invisible_popup_draws_nothing() {
    let mut p = popup(1.0);
    p.opacity = 0.0;
    let mut surface = PixelBuffer::new(20, 20);
    p.draw(&mut surface);
    assert!(surface.as_bytes().iter().all(|&b| b == 0));
}
