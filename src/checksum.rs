/// Calculates the 8-bit checksum trailing every MH-Z19 frame.
///
/// The sensor negates the 8-bit sum of bytes 1..=7 and adds one, i.e. the
/// checksum is the two's complement of the payload sum.
pub struct Checksum {
    sum: u8,
}

impl Checksum {
    /// Creates a new `Checksum` instance, initialized to 0.
    #[inline]
    pub fn new() -> Checksum {
        Checksum { sum: 0 }
    }

    /// Includes a slice of bytes in the checksum calculation.
    ///
    /// # Arguments
    ///
    /// * `data` - The byte slice to add into the running sum.
    #[inline]
    pub fn push_slice(&mut self, data: &[u8]) {
        for d in data {
            self.sum = self.sum.wrapping_add(*d);
        }
    }

    /// Returns the calculated checksum value.
    #[inline]
    pub fn checksum(&self) -> u8 {
        (!self.sum).wrapping_add(1)
    }
}
