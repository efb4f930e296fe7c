use std::f64::consts::TAU;

use super::*;
use crate::foundation::color::RgbF;
use crate::foundation::core::Rgba8;
use crate::popups::choreography::heart_scale;

const DT: f64 = 1.0 / 60.0;

fn assets() -> CardAssets {
    let mut card = PixelBuffer::new(4, 4);
    card.fill(Rgba8::WHITE);
    CardAssets::new(card, vec![PixelBuffer::new(1, 1), PixelBuffer::new(2, 1)]).unwrap()
}

fn engine(w: u32, h: u32) -> PopupEngine {
    PopupEngine::new(Canvas::new(w, h).unwrap(), assets(), Some(11))
}

fn run_until_expanding(e: &mut PopupEngine) -> usize {
    let mut ticks = 0;
    while e.choreography().phase() == Phase::Tracing {
        e.update(DT);
        ticks += 1;
        assert!(ticks < 10_000);
    }
    ticks
}

#[test]
fn nine_ticks_emit_exactly_one_heart_at_curve_start() {
    let mut e = engine(1920, 1080);
    for _ in 0..9 {
        e.update(DT);
    }
    assert_eq!(e.hearts().len(), 1);
    let s = heart_scale(e.canvas);
    let p = &e.hearts()[0];
    assert!((p.pos.x - 960.0).abs() < 1e-9);
    assert!((p.pos.y - (540.0 - 5.0 * s)).abs() < 1e-9);
    assert_eq!(p.zoom, HEART_ZOOM);
    assert_eq!(p.max_age, HEART_MAX_AGE);
    assert_eq!(p.opacity, 0.9);

    e.update(DT);
    assert_eq!(e.hearts().len(), 2);
}

#[test]
fn tracing_lays_out_the_whole_curve() {
    let mut e = engine(1920, 1080);
    let ticks = run_until_expanding(&mut e);
    // Each emission advances the curve by 3 * dt = 0.05.
    let emissions = (TAU / (DT * 3.0)).ceil() as usize;
    assert_eq!(e.hearts().len(), emissions);
    assert_eq!(ticks, (emissions - 1) * 9 + 1);
    assert_eq!(e.randoms().len(), 0);
}

#[test]
fn hearts_spread_from_center_once_expanding() {
    let mut e = engine(1920, 1080);
    run_until_expanding(&mut e);
    let center = e.canvas.center();
    let before = e.hearts()[0].clone();
    e.update(DT);
    let after = &e.hearts()[0];
    let d0 = before.pos - center;
    let d1 = after.pos - center;
    assert!((d1.x - d0.x * 1.005).abs() < 1e-9);
    assert!((d1.y - d0.y * 1.005).abs() < 1e-9);
    assert!((after.zoom - before.zoom * 1.002).abs() < 1e-12);
}

#[test]
fn heart_set_is_cleared_after_cutoff() {
    let mut e = engine(800, 600);
    run_until_expanding(&mut e);
    while !e.choreography().past_cutoff() {
        e.update(DT);
        assert!(!e.hearts().is_empty());
    }
    e.update(DT);
    assert!(e.hearts().is_empty());
    let t = e.choreography().heart_time();
    e.update(DT);
    assert!(e.hearts().is_empty());
    assert!(e.choreography().heart_time() > t);
}

#[test]
fn random_popups_appear_while_expanding() {
    let mut e = engine(800, 600);
    run_until_expanding(&mut e);
    for _ in 0..200 {
        e.update(DT);
    }
    assert!(e.randoms().len() > 20);
    for p in e.randoms() {
        assert!(PALETTE.iter().any(|c| RgbF::from_rgba8(*c) == p.tint));
        assert!(p.zoom >= RANDOM_ZOOM);
    }
}

#[test]
fn shuttle_popups_start_central_and_go_first() {
    let mut e = engine(1200, 600);
    e.spawn_random(false);
    e.spawn_random(true);
    let first = e.randoms().next().unwrap();
    assert!((500.0..=700.0).contains(&first.pos.x));
    assert!((250.0..=350.0).contains(&first.pos.y));
    assert!((6.0..22.0).contains(&first.max_age));
    let last = e.randoms().last().unwrap();
    assert!((4.0..14.0).contains(&last.max_age));
    assert_eq!(last.zoom, RANDOM_ZOOM);
}

#[test]
fn random_popups_drift_outwards_and_expire() {
    let mut e = engine(1000, 1000);
    run_until_expanding(&mut e);
    let center = e.canvas.center();
    let mut p = e.hearts()[0].clone();
    p.pos = center + crate::foundation::core::Vec2::new(100.0, 0.0);
    p.zoom = RANDOM_ZOOM;
    p.max_age = 0.5;
    e.randoms.push_back(p);

    e.update(DT);
    let ours = e.randoms.back().unwrap();
    assert!((ours.pos.x - (center.x + 100.0 * 1.0045)).abs() < 1e-9);
    assert!((ours.zoom - RANDOM_ZOOM * 1.002).abs() < 1e-12);
    assert!((ours.life - DT).abs() < 1e-12);

    for _ in 0..40 {
        e.update(DT);
    }
    assert!(e.randoms().all(|p| p.max_age > 0.5));
}

#[test]
fn hearts_draw_above_random_popups() {
    let mut e = engine(20, 20);
    let card = Arc::clone(e.assets.card());
    let text = Arc::clone(&e.assets.texts()[0]);
    let mut below = Popup::new(
        Point::new(10.0, 10.0),
        1.0,
        Rgba8::new(0, 0, 255, 255),
        5.0,
        Arc::clone(&card),
        Arc::clone(&text),
    );
    below.opacity = 1.0;
    let mut above = Popup::new(
        Point::new(10.0, 10.0),
        1.0,
        Rgba8::new(255, 0, 0, 255),
        HEART_MAX_AGE,
        card,
        text,
    );
    above.opacity = 1.0;
    e.hearts.push(above);
    e.randoms.push_back(below);

    let mut surface = PixelBuffer::new(20, 20);
    e.draw(&mut surface);
    assert_eq!(surface.pixel(9, 9), Some(Rgba8::new(255, 0, 0, 255)));
}
