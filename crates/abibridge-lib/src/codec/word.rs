//! 256-bit integer word.
//!
//! Stored big-endian. Signed values use two's complement over the full
//! 256 bits; on the wire they are zigzag-mapped so small magnitudes of
//! either sign stay short.

use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Word([u8; 32]);

impl Word {
    pub const ZERO: Self = Self([0; 32]);
    pub const MAX: Self = Self([0xff; 32]);

    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn to_be_bytes(self) -> [u8; 32] {
        self.0
    }

    /// Big-endian bytes of at most 32 bytes, zero-extended.
    pub fn from_be_slice(bytes: &[u8]) -> Option<Self> {
        if bytes.len() > 32 {
            return None;
        }
        let mut word = [0; 32];
        word[32 - bytes.len()..].copy_from_slice(bytes);
        Some(Self(word))
    }

    pub fn from_u128(v: u128) -> Self {
        let mut word = [0; 32];
        word[16..].copy_from_slice(&v.to_be_bytes());
        Self(word)
    }

    /// Sign-extended two's complement.
    pub fn from_i128(v: i128) -> Self {
        let mut word = if v < 0 { [0xff; 32] } else { [0; 32] };
        word[16..].copy_from_slice(&v.to_be_bytes());
        Self(word)
    }

    /// Big-endian bytes without leading zeros. Zero is empty.
    pub fn minimal_be(&self) -> &[u8] {
        let skip = self.0.iter().take_while(|&&b| b == 0).count();
        &self.0[skip..]
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0; 32]
    }

    pub fn is_negative(&self) -> bool {
        self.0[0] & 0x80 != 0
    }

    pub fn bit_len(&self) -> u32 {
        match self.0.iter().position(|&b| b != 0) {
            Some(i) => (32 - i as u32) * 8 - self.0[i].leading_zeros(),
            None => 0,
        }
    }

    pub fn fits_unsigned(&self, bits: u16) -> bool {
        self.bit_len() <= bits as u32
    }

    pub fn fits_signed(&self, bits: u16) -> bool {
        let magnitude = if self.is_negative() { !*self } else { *self };
        magnitude.bit_len() < bits as u32
    }

    pub fn wrapping_neg(self) -> Self {
        let mut neg = !self;
        neg.add_small(1);
        neg
    }

    fn shl1(self) -> Self {
        let mut out = [0; 32];
        let mut carry = 0;
        for i in (0..32).rev() {
            out[i] = (self.0[i] << 1) | carry;
            carry = self.0[i] >> 7;
        }
        Self(out)
    }

    fn shr1(self) -> Self {
        let mut out = [0; 32];
        let mut carry = 0;
        for i in 0..32 {
            out[i] = (self.0[i] >> 1) | carry;
            carry = self.0[i] << 7;
        }
        Self(out)
    }

    /// `(x << 1) ^ (x >> 255)` with an arithmetic right shift.
    pub fn zigzag(self) -> Self {
        if self.is_negative() {
            !self.shl1()
        } else {
            self.shl1()
        }
    }

    pub fn unzigzag(self) -> Self {
        let half = self.shr1();
        if self.0[31] & 1 == 1 { !half } else { half }
    }

    /// Returns `true` on overflow.
    fn add_small(&mut self, v: u8) -> bool {
        let mut carry = v as u16;
        for byte in self.0.iter_mut().rev() {
            if carry == 0 {
                break;
            }
            let sum = *byte as u16 + carry;
            *byte = sum as u8;
            carry = sum >> 8;
        }
        carry != 0
    }

    /// Returns `true` on overflow.
    fn mul_small(&mut self, v: u8) -> bool {
        let mut carry = 0u16;
        for byte in self.0.iter_mut().rev() {
            let product = *byte as u16 * v as u16 + carry;
            *byte = product as u8;
            carry = product >> 8;
        }
        carry != 0
    }

    fn div_rem_small(&mut self, v: u8) -> u8 {
        let mut rem = 0u16;
        for byte in self.0.iter_mut() {
            let cur = (rem << 8) | *byte as u16;
            *byte = (cur / v as u16) as u8;
            rem = cur % v as u16;
        }
        rem as u8
    }

    /// Parse an unsigned decimal or `0x`-prefixed hex literal.
    pub fn parse_unsigned(s: &str) -> Option<Self> {
        if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            return Self::parse_radix(hex, 16);
        }
        Self::parse_radix(s, 10)
    }

    /// Parse a decimal literal with an optional leading `-`.
    pub fn parse_signed(s: &str) -> Option<Self> {
        match s.strip_prefix('-') {
            Some(magnitude) => {
                let magnitude = Self::parse_radix(magnitude, 10)?;
                let value = magnitude.wrapping_neg();
                (value.is_negative() || value.is_zero()).then_some(value)
            }
            None => {
                let value = Self::parse_radix(s, 10)?;
                (!value.is_negative()).then_some(value)
            }
        }
    }

    fn parse_radix(digits: &str, radix: u8) -> Option<Self> {
        if digits.is_empty() {
            return None;
        }
        let mut word = Self::ZERO;
        for c in digits.chars() {
            let digit = c.to_digit(radix as u32)? as u8;
            if word.mul_small(radix) || word.add_small(digit) {
                return None;
            }
        }
        Some(word)
    }

    /// Decimal rendering, reading the word as unsigned.
    pub fn to_unsigned_string(&self) -> String {
        if self.is_zero() {
            return "0".to_string();
        }
        let mut word = *self;
        let mut digits = Vec::new();
        while !word.is_zero() {
            digits.push(b'0' + word.div_rem_small(10));
        }
        digits.iter().rev().map(|&d| d as char).collect()
    }

    /// Decimal rendering, reading the word as two's complement.
    pub fn to_signed_string(&self) -> String {
        if self.is_negative() {
            format!("-{}", self.wrapping_neg().to_unsigned_string())
        } else {
            self.to_unsigned_string()
        }
    }

    /// The low 64 bits, if nothing above them is set.
    pub fn to_u64(&self) -> Option<u64> {
        if self.bit_len() > 64 {
            return None;
        }
        let mut low = [0; 8];
        low.copy_from_slice(&self.0[24..]);
        Some(u64::from_be_bytes(low))
    }

    /// The value as `i64`, reading the word as two's complement.
    pub fn to_i64(&self) -> Option<i64> {
        if !self.fits_signed(64) {
            return None;
        }
        let mut low = [0; 8];
        low.copy_from_slice(&self.0[24..]);
        Some(i64::from_be_bytes(low))
    }
}

impl std::ops::Not for Word {
    type Output = Self;

    fn not(self) -> Self {
        let mut out = self.0;
        for byte in &mut out {
            *byte = !*byte;
        }
        Self(out)
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word(0x{})", hex::encode(self.minimal_be()))
    }
}
