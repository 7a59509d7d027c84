//! Register images
//!
//! A register image is the complete, ordered list of words a clock chip must
//! receive to reach one configuration. The words are opaque here: they come
//! out of an external configuration tool and are written in array order.
//! Each chip family gets its own fixed-length type so that an image of the
//! wrong length cannot reach a bus transaction.

use core::fmt;
use core::ops::Index;

use crate::error::{Error, Result};

/// Number of register words in an LMK04208 image
pub const LMK04208_REG_COUNT: usize = 26;

/// Number of register words in an LMX2594 image
pub const LMX2594_REG_COUNT: usize = 113;

struct HexWord(u32);

impl fmt::Debug for HexWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

macro_rules! register_image {
    ($(#[$meta:meta])* $name:ident, $count:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq)]
        pub struct $name([u32; $count]);

        impl $name {
            /// Number of words in this image
            pub const LEN: usize = $count;

            /// Create an image from a word array of the exact length
            pub const fn new(words: [u32; $count]) -> Self {
                Self(words)
            }

            /// Get the words in write order
            pub fn words(&self) -> &[u32; $count] {
                &self.0
            }

            /// Iterate over the words in write order
            pub fn iter(&self) -> core::slice::Iter<'_, u32> {
                self.0.iter()
            }
        }

        impl From<[u32; $count]> for $name {
            fn from(words: [u32; $count]) -> Self {
                Self(words)
            }
        }

        impl TryFrom<&[u32]> for $name {
            type Error = Error;

            fn try_from(words: &[u32]) -> Result<Self> {
                let words: [u32; $count] =
                    words
                        .try_into()
                        .map_err(|_| Error::RegisterCountMismatch {
                            expected: $count,
                            found: words.len(),
                        })?;
                Ok(Self(words))
            }
        }

        impl Index<usize> for $name {
            type Output = u32;

            fn index(&self, index: usize) -> &u32 {
                &self.0[index]
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a u32;
            type IntoIter = core::slice::Iter<'a, u32>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(stringify!($name))?;
                f.debug_list()
                    .entries(self.0.iter().map(|&w| HexWord(w)))
                    .finish()
            }
        }
    };
}

register_image!(
    /// LMK04208 jitter cleaner register image (26 words)
    ///
    /// Each word is a full 32-bit MICROWIRE frame, register address included.
    Lmk04208Regs,
    LMK04208_REG_COUNT
);

register_image!(
    /// LMX2594 wideband synthesizer register image (113 words)
    ///
    /// Each word carries a 24-bit frame (`[R/W][7-bit address][16-bit data]`)
    /// in its low bits. Images exported from TICS Pro list R112 first and R0
    /// last, which is also the order they are written in.
    Lmx2594Regs,
    LMX2594_REG_COUNT
);

impl Lmx2594Regs {
    /// The R0 word, rewritten at the end of programming to rerun VCO calibration
    pub fn r0(&self) -> u32 {
        self.0[LMX2594_REG_COUNT - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ascending<const N: usize>() -> [u32; N] {
        let mut words = [0u32; N];
        for (i, w) in words.iter_mut().enumerate() {
            *w = i as u32;
        }
        words
    }

    #[test]
    fn test_try_from_exact_length() {
        let words = ascending::<LMK04208_REG_COUNT>();
        let regs = Lmk04208Regs::try_from(&words[..]).unwrap();
        assert_eq!(regs.words(), &words);
        assert_eq!(regs[25], 25);
    }

    #[test]
    fn test_try_from_wrong_length() {
        let words = ascending::<LMX2594_REG_COUNT>();

        assert_eq!(
            Lmx2594Regs::try_from(&words[..112]),
            Err(Error::RegisterCountMismatch {
                expected: 113,
                found: 112
            })
        );
        assert_eq!(
            Lmk04208Regs::try_from(&words[..]),
            Err(Error::RegisterCountMismatch {
                expected: 26,
                found: 113
            })
        );
        let empty: &[u32] = &[];
        assert_eq!(
            Lmk04208Regs::try_from(empty),
            Err(Error::RegisterCountMismatch {
                expected: 26,
                found: 0
            })
        );
    }

    #[test]
    fn test_r0_is_last_word() {
        let mut words = [0u32; LMX2594_REG_COUNT];
        words[0] = 0x70_0000;
        words[112] = 0x00_241C;
        let regs = Lmx2594Regs::new(words);
        assert_eq!(regs.r0(), 0x00_241C);
    }

    #[test]
    fn test_iter_preserves_order() {
        let regs = Lmx2594Regs::from(ascending::<LMX2594_REG_COUNT>());
        assert!(regs.iter().zip(0u32..).all(|(&w, i)| w == i));
        assert_eq!((&regs).into_iter().count(), Lmx2594Regs::LEN);
    }
}
