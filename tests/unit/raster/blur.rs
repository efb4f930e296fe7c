use super::*;
use crate::foundation::core::Rgba8;

#[test]
fn radius_0_is_identity() {
    let src = PixelBuffer::from_raw(1, 2, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
    assert_eq!(gaussian_blur(&src, 0, 1.0).unwrap(), src);
}

#[test]
fn constant_image_is_unchanged() {
    let mut src = PixelBuffer::new(4, 3);
    src.fill(Rgba8::new(10, 20, 30, 255));
    assert_eq!(gaussian_blur(&src, 3, 2.0).unwrap(), src);
}

#[test]
fn rejects_non_positive_sigma() {
    let src = PixelBuffer::new(2, 2);
    assert!(gaussian_blur(&src, 2, 0.0).is_err());
    assert!(gaussian_blur(&src, 2, f32::NAN).is_err());
}

#[test]
fn spreads_alpha_from_a_single_pixel() {
    let mut src = PixelBuffer::new(5, 5);
    src.put_pixel(2, 2, Rgba8::new(0, 0, 0, 255));

    let out = gaussian_blur(&src, 2, 1.2).unwrap();

    let nonzero = out.as_bytes().chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);
    let sum_a: u32 = out.as_bytes().chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 6);
}

#[test]
fn transparent_neighbours_do_not_darken_color() {
    let mut src = PixelBuffer::new(3, 1);
    src.put_pixel(1, 0, Rgba8::new(255, 255, 255, 255));
    let out = gaussian_blur(&src, 1, 1.0).unwrap();
    let edge = out.pixel(0, 0).unwrap();
    assert!(edge.a > 0);
    assert!(edge.r >= 250, "{edge:?}");
}

#[test]
fn kernel_sums_to_one_in_q16() {
    let k = gaussian_kernel_q16(5, 2.5).unwrap();
    assert_eq!(k.len(), 11);
    assert_eq!(k.iter().map(|&w| u64::from(w)).sum::<u64>(), 65536);
}
