use super::*;

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [0, 0, 0, 0];
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

#[test]
fn over_half_alpha_blends() {
    let dst = [0, 0, 255, 255];
    let src = premul_rgba8(255, 0, 0, 128);
    let out = over(dst, src);
    assert_eq!(out[3], 255);
    assert_eq!(out[0], 128);
    assert_eq!(out[2], 127);
}

#[test]
fn over_in_place_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4]).is_err());
    assert!(over_in_place(&mut dst, &[255u8; 8]).is_ok());
    assert_eq!(dst, vec![255u8; 8]);
}

#[test]
fn premul_white_is_identity_when_opaque() {
    assert_eq!(premul_rgba8(255, 255, 255, 255), [255, 255, 255, 255]);
    assert_eq!(premul_rgba8(255, 255, 255, 0), [0, 0, 0, 0]);
}
