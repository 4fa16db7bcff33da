use super::Word;

const TWO_POW_256: &str =
    "115792089237316195423570985008687907853269984665640564039457584007913129639936";
const U256_MAX: &str =
    "115792089237316195423570985008687907853269984665640564039457584007913129639935";
const I256_MIN: &str =
    "-57896044618658097711785492504343953926634992332820282019728792003956564819968";

#[test]
fn minimal_big_endian() {
    assert!(Word::ZERO.minimal_be().is_empty());
    assert_eq!(Word::from_u128(1).minimal_be(), [0x01]);
    assert_eq!(Word::from_u128(0x0100).minimal_be(), [0x01, 0x00]);
    assert_eq!(Word::MAX.minimal_be(), [0xff; 32]);
}

#[test]
fn bit_length() {
    assert_eq!(Word::ZERO.bit_len(), 0);
    assert_eq!(Word::from_u128(1).bit_len(), 1);
    assert_eq!(Word::from_u128(255).bit_len(), 8);
    assert_eq!(Word::from_u128(256).bit_len(), 9);
    assert_eq!(Word::MAX.bit_len(), 256);
}

#[test]
fn unsigned_range() {
    assert!(Word::from_u128(255).fits_unsigned(8));
    assert!(!Word::from_u128(256).fits_unsigned(8));
    assert!(Word::from_u128(u128::MAX).fits_unsigned(128));
    assert!(!Word::MAX.fits_unsigned(128));
    assert!(Word::MAX.fits_unsigned(256));
}

#[test]
fn signed_range() {
    assert!(Word::from_i128(127).fits_signed(8));
    assert!(!Word::from_i128(128).fits_signed(8));
    assert!(Word::from_i128(-128).fits_signed(8));
    assert!(!Word::from_i128(-129).fits_signed(8));
    assert!(Word::from_i128(i128::MIN).fits_signed(128));
    assert!(!Word::from_i128(i128::MIN).fits_signed(64));
}

#[test]
fn zigzag_interleaves_signs() {
    let cases = [(0, 0), (-1, 1), (1, 2), (-2, 3), (2, 4)];
    for (signed, zigzagged) in cases {
        let word = Word::from_i128(signed);
        assert_eq!(word.zigzag(), Word::from_u128(zigzagged), "zigzag({signed})");
        assert_eq!(word.zigzag().unzigzag(), word, "unzigzag({zigzagged})");
    }
}

#[test]
fn zigzag_extremes() {
    let min = Word::from_i128(i32::MIN as i128);
    assert_eq!(min.zigzag(), Word::from_u128(u32::MAX as u128));

    let i256_min = Word::parse_signed(I256_MIN).unwrap();
    assert_eq!(i256_min.zigzag(), Word::MAX);
    assert_eq!(Word::MAX.unzigzag(), i256_min);
}

#[test]
fn parse_unsigned_literals() {
    assert_eq!(Word::parse_unsigned("0"), Some(Word::ZERO));
    assert_eq!(Word::parse_unsigned("1234"), Some(Word::from_u128(1234)));
    assert_eq!(Word::parse_unsigned("0xff"), Some(Word::from_u128(255)));
    assert_eq!(Word::parse_unsigned("0XFF"), Some(Word::from_u128(255)));
    assert_eq!(Word::parse_unsigned(U256_MAX), Some(Word::MAX));

    assert_eq!(Word::parse_unsigned(""), None);
    assert_eq!(Word::parse_unsigned("0x"), None);
    assert_eq!(Word::parse_unsigned("12a"), None);
    assert_eq!(Word::parse_unsigned("-1"), None);
    assert_eq!(Word::parse_unsigned(TWO_POW_256), None);
}

#[test]
fn parse_signed_literals() {
    assert_eq!(Word::parse_signed("-5"), Some(Word::from_i128(-5)));
    assert_eq!(Word::parse_signed("5"), Some(Word::from_i128(5)));
    assert_eq!(Word::parse_signed("-0"), Some(Word::ZERO));

    let min = Word::parse_signed(I256_MIN).unwrap();
    assert!(min.is_negative());
    assert_eq!(min.to_signed_string(), I256_MIN);

    // 2^255 does not fit
    assert_eq!(Word::parse_signed(&I256_MIN[1..]), None);
    assert_eq!(Word::parse_signed("--1"), None);
}

#[test]
fn decimal_rendering() {
    assert_eq!(Word::ZERO.to_unsigned_string(), "0");
    assert_eq!(Word::from_u128(9876543210).to_unsigned_string(), "9876543210");
    assert_eq!(Word::MAX.to_unsigned_string(), U256_MAX);
    assert_eq!(Word::MAX.to_signed_string(), "-1");
    assert_eq!(Word::from_i128(-42).to_signed_string(), "-42");
}

#[test]
fn narrowing() {
    assert_eq!(Word::from_u128(u64::MAX as u128).to_u64(), Some(u64::MAX));
    assert_eq!(Word::from_u128(u64::MAX as u128 + 1).to_u64(), None);
    assert_eq!(Word::from_i128(i64::MIN as i128).to_i64(), Some(i64::MIN));
    assert_eq!(Word::from_i128(-1).to_i64(), Some(-1));
    assert_eq!(Word::from_i128(i64::MAX as i128 + 1).to_i64(), None);
}

#[test]
fn from_be_slice_limits() {
    assert_eq!(Word::from_be_slice(&[0x01, 0x00]), Some(Word::from_u128(256)));
    assert_eq!(Word::from_be_slice(&[0xff; 32]), Some(Word::MAX));
    assert_eq!(Word::from_be_slice(&[0x01; 33]), None);
}
