//! Digit decomposition of integer keys, shared by both tries.
//!
//! A key is decomposed by repeated modulo/divide and then reversed, so the
//! result is most-significant-digit-first. The tries rely on that order:
//! exploring digits from most significant to least is what makes digit-wise
//! min/max descent agree with numeric key order.

use smallvec::SmallVec;

/// Digits never exceed 64 for a `u64` key (radix 2); 16 inline slots cover
/// every realistic radix without heap spill.
pub(crate) type Digits = SmallVec<[u64; 16]>;

/// Exactly `height` digits of `key` in base `radix`, most significant first,
/// zero-padded. Keys with more than `height` digits alias: the high digits
/// are simply discarded by the repeated divide.
pub(crate) fn fixed(key: u64, radix: u64, height: usize) -> Digits {
    let mut digits = Digits::with_capacity(height);
    let mut k = key;
    for _ in 0..height {
        digits.push(k % radix);
        k /= radix;
    }
    digits.reverse();
    digits
}

/// Digits of `key` in base `radix`, most significant first, no padding.
/// Key 0 decomposes to the empty sequence.
pub(crate) fn adaptive(key: u64, radix: u64) -> Digits {
    let mut digits = Digits::new();
    let mut k = key;
    while k > 0 {
        digits.push(k % radix);
        k /= radix;
    }
    digits.reverse();
    digits
}
