use super::*;

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src), src);
}

#[test]
fn over_dst_transparent_returns_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src), src);
}

fn canvas(w: u32, h: u32, rgba: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(w, h, image::Rgba(rgba))
}

#[test]
fn binary_paste_copies_only_nonzero_alpha() {
    let mut dst = canvas(4, 4, [1, 2, 3, 255]);
    let mut src = canvas(2, 2, [200, 100, 50, 128]);
    src.put_pixel(1, 1, image::Rgba([9, 9, 9, 0]));

    paste(&mut dst, &src, (1, 1), CompositeMode::Binary);
    assert_eq!(dst.get_pixel(1, 1).0, [200, 100, 50, 128]);
    assert_eq!(dst.get_pixel(2, 2).0, [1, 2, 3, 255]);
    assert_eq!(dst.get_pixel(0, 0).0, [1, 2, 3, 255]);
}

#[test]
fn alpha_paste_blends_half_transparent_pixels() {
    let mut dst = canvas(1, 1, [0, 0, 0, 255]);
    let src = canvas(1, 1, [255, 255, 255, 128]);
    paste(&mut dst, &src, (0, 0), CompositeMode::Alpha);
    let px = dst.get_pixel(0, 0).0;
    assert_eq!(px[3], 255);
    assert_eq!(px[0], 128);
}

#[test]
fn alpha_paste_of_opaque_pixels_replaces() {
    let mut dst = canvas(3, 3, [5, 5, 5, 255]);
    let src = canvas(1, 1, [77, 88, 99, 255]);
    paste(&mut dst, &src, (2, 0), CompositeMode::Alpha);
    assert_eq!(dst.get_pixel(2, 0).0, [77, 88, 99, 255]);
}

#[test]
fn paste_clips_to_destination() {
    let mut dst = canvas(3, 3, [0, 0, 0, 0]);
    let src = canvas(3, 3, [50, 50, 50, 255]);
    paste(&mut dst, &src, (-2, 2), CompositeMode::Binary);
    assert_eq!(dst.get_pixel(0, 2).0, [50, 50, 50, 255]);
    assert_eq!(dst.get_pixel(1, 2).0, [0, 0, 0, 0]);
    assert_eq!(dst.get_pixel(0, 1).0, [0, 0, 0, 0]);

    paste(&mut dst, &src, (10, 10), CompositeMode::Alpha);
}

#[test]
fn last_paste_wins() {
    let mut dst = canvas(2, 1, [0, 0, 0, 0]);
    paste(&mut dst, &canvas(2, 1, [1, 1, 1, 255]), (0, 0), CompositeMode::Alpha);
    paste(&mut dst, &canvas(1, 1, [2, 2, 2, 255]), (1, 0), CompositeMode::Alpha);
    assert_eq!(dst.get_pixel(0, 0).0, [1, 1, 1, 255]);
    assert_eq!(dst.get_pixel(1, 0).0, [2, 2, 2, 255]);
}
