//! Registry quantization tests beyond the unit coverage: exhaustive operand
//! round-trips and property checks over the whole channel domain.

use chroma_spec::registry::{quant, IMM_MAX, IMM_MIN};
use chroma_spec::{Hsv, OpKind, Rgb, MEMORY_CELLS, NUM_REGISTERS};
use proptest::prelude::*;

// ============================================================================
// Exhaustive Round-Trips
// ============================================================================

#[test]
fn test_every_register_roundtrips() {
    for i in 0..NUM_REGISTERS as u8 {
        let ch = quant::index16_channel(i).expect("valid index");
        assert_eq!(quant::index16(ch), i);
    }
}

#[test]
fn test_every_address_roundtrips() {
    for addr in 0..MEMORY_CELLS as u16 {
        let (s, v) = quant::address_channels(addr).expect("valid address");
        assert_eq!(quant::address(s, v).unwrap(), addr);
    }
}

#[test]
fn test_every_immediate_roundtrips() {
    for imm in IMM_MIN..=IMM_MAX {
        let (s, v) = quant::immediate_channels(imm).expect("valid immediate");
        assert_eq!(quant::immediate(s, v), imm);
    }
}

#[test]
fn test_immediate_decode_covers_declared_range_exactly() {
    // The channel domain maps onto [IMM_MIN, IMM_MAX] and nothing else.
    let mut lo = i32::MAX;
    let mut hi = i32::MIN;
    for s in 0..=100u8 {
        for v in 0..=100u8 {
            let imm = quant::immediate(s, v);
            lo = lo.min(imm);
            hi = hi.max(imm);
        }
    }
    assert_eq!(lo, IMM_MIN);
    assert_eq!(hi, IMM_MAX);
}

// ============================================================================
// Classification Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_classify_total_below_360(hue in 0u16..360) {
        prop_assert!(OpKind::classify(hue).is_some());
    }

    #[test]
    fn prop_classify_rejects_above_360(hue in 360u16..) {
        prop_assert!(OpKind::classify(hue).is_none());
    }

    #[test]
    fn prop_index16_never_escapes(ch in 0u8..=100) {
        prop_assert!((quant::index16(ch) as usize) < NUM_REGISTERS);
    }

    #[test]
    fn prop_address_decode_is_checked(s in 0u8..=100, v in 0u8..=100) {
        let raw = s as u16 * 101 + v as u16;
        match quant::address(s, v) {
            Ok(addr) => prop_assert!((addr as usize) < MEMORY_CELLS),
            Err(_) => prop_assert!(raw as usize >= MEMORY_CELLS),
        }
    }

    #[test]
    fn prop_rgb_conversion_in_range(r: u8, g: u8, b: u8) {
        let hsv = Hsv::from(Rgb::new(r, g, b));
        prop_assert!(hsv.validate().is_ok());
    }
}
