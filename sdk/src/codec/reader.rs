//! Bounds-checked little-endian cursor over a byte slice.

use super::CodecError;

/// A cursor-based reader for catbuffer bytes.
///
/// Every read checks the remaining length first and returns
/// [`CodecError::TruncatedInput`] instead of panicking.
#[derive(Debug, Clone)]
pub struct CatReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> CatReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Fails with `TruncatedInput` unless `n` more bytes are available.
    pub fn ensure(&self, n: usize) -> Result<(), CodecError> {
        if n > self.remaining() {
            return Err(CodecError::TruncatedInput {
                needed: n,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        self.ensure(n)?;
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        super::fixed_bytes(self.read_bytes(N)?)
    }

    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8, CodecError> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16, CodecError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_i16(&mut self) -> Result<i16, CodecError> {
        Ok(i16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32, CodecError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64, CodecError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Splits off the next `n` bytes as an independent reader.
    ///
    /// Used to confine a nested entity to its declared size, so a body can
    /// never read into its neighbour.
    pub fn sub_reader(&mut self, n: usize) -> Result<CatReader<'a>, CodecError> {
        Ok(CatReader::new(self.read_bytes(n)?))
    }

    /// Consumes and returns everything left.
    pub fn read_rest(&mut self) -> &'a [u8] {
        let slice = &self.data[self.pos..];
        self.pos = self.data.len();
        slice
    }

    /// Fails with `TrailingBytes` if anything is left unread.
    pub fn finish(&self) -> Result<(), CodecError> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(CodecError::TrailingBytes(n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0xFF];
        let mut r = CatReader::new(&data);
        assert_eq!(r.read_u16().unwrap(), 0x0201);
        assert_eq!(r.read_u32().unwrap(), 0x0605_0403);
        assert_eq!(r.read_u16().unwrap(), 0x0807);
        assert_eq!(r.read_i8().unwrap(), -1);
        assert!(r.is_empty());
    }

    #[test]
    fn short_read_is_truncated_input() {
        let mut r = CatReader::new(&[1, 2, 3]);
        assert_eq!(
            r.read_u64(),
            Err(CodecError::TruncatedInput { needed: 8, remaining: 3 })
        );
        // A failed read consumes nothing.
        assert_eq!(r.remaining(), 3);
    }

    #[test]
    fn sub_reader_is_confined() {
        let data = [1u8, 2, 3, 4, 5];
        let mut r = CatReader::new(&data);
        let mut inner = r.sub_reader(2).unwrap();
        assert_eq!(inner.read_u16().unwrap(), 0x0201);
        assert!(inner.read_u8().is_err());
        assert_eq!(r.read_rest(), &[3, 4, 5]);
    }

    #[test]
    fn finish_reports_trailing_bytes() {
        let mut r = CatReader::new(&[0u8; 6]);
        r.read_u32().unwrap();
        assert_eq!(r.finish(), Err(CodecError::TrailingBytes(2)));
    }

    #[test]
    fn signed_i16_roundtrip() {
        let bytes = (-300i16).to_le_bytes();
        assert_eq!(CatReader::new(&bytes).read_i16().unwrap(), -300);
    }
}
