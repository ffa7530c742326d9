//! Run-length encoding of a sample buffer into fixed-size packets.
//!
//! Each packet is 3 bytes: the sample value, then the run length as a
//! little-endian `u16`. Runs longer than [`MAX_RUN`] are split into
//! consecutive packets of the same value. The stream carries no packet
//! count and no end marker.

use std::io::Write;

use enough::Stop;

use crate::error::RleError;

/// Longest run a single packet can describe.
pub const MAX_RUN: u16 = u16::MAX;

/// Packets encoded between cancellation checks.
const PACKETS_PER_CHECK: usize = 4096;

/// One run of equal samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RlePacket {
    pub value: u8,
    /// Always in `1..=MAX_RUN`.
    pub count: u16,
}

impl RlePacket {
    /// Serialized size in bytes.
    pub const SIZE: usize = 3;

    pub fn to_bytes(self) -> [u8; Self::SIZE] {
        let [lo, hi] = self.count.to_le_bytes();
        [self.value, lo, hi]
    }
}

/// Iterator over the packets of a sample buffer.
///
/// Greedy: each packet covers the longest run at the cursor, capped at
/// [`MAX_RUN`].
#[derive(Clone, Debug)]
pub struct Runs<'a> {
    samples: &'a [u8],
}

/// Split `samples` into packets.
pub fn runs(samples: &[u8]) -> Runs<'_> {
    Runs { samples }
}

impl Iterator for Runs<'_> {
    type Item = RlePacket;

    fn next(&mut self) -> Option<RlePacket> {
        let (&value, _) = self.samples.split_first()?;
        let window = &self.samples[..self.samples.len().min(usize::from(MAX_RUN))];
        let count = window.iter().take_while(|&&s| s == value).count();
        self.samples = &self.samples[count..];
        Some(RlePacket {
            value,
            // window.len() <= MAX_RUN
            count: count as u16,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.samples.len();
        (len.div_ceil(usize::from(MAX_RUN)), Some(len))
    }
}

impl core::iter::FusedIterator for Runs<'_> {}

/// Counts from one call to [`write_packets`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PacketStats {
    pub packets: usize,
    pub samples: usize,
}

/// Encode `samples` and write each packet as it is produced.
pub fn write_packets<W: Write>(
    samples: &[u8],
    out: &mut W,
    stop: &dyn Stop,
) -> Result<PacketStats, RleError> {
    let mut stats = PacketStats::default();
    for packet in runs(samples) {
        if stats.packets % PACKETS_PER_CHECK == 0 {
            stop.check()?;
        }
        out.write_all(&packet.to_bytes())?;
        stats.packets += 1;
        stats.samples += usize::from(packet.count);
    }
    log::debug!(
        "encoded {} samples into {} packets",
        stats.samples,
        stats.packets
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use enough::Unstoppable;

    use super::*;

    fn packets(samples: &[u8]) -> Vec<(u8, u16)> {
        runs(samples).map(|p| (p.value, p.count)).collect()
    }

    #[test]
    fn empty_buffer_has_no_packets() {
        assert!(packets(&[]).is_empty());
    }

    #[test]
    fn groups_equal_neighbours() {
        assert_eq!(packets(&[10, 10, 10, 20]), [(10, 3), (20, 1)]);
        assert_eq!(packets(&[1, 2, 1, 2]), [(1, 1), (2, 1), (1, 1), (2, 1)]);
        assert_eq!(packets(&[5, 5, 5]), [(5, 3)]);
    }

    #[test]
    fn splits_at_max_run() {
        let samples = vec![7u8; 70_000];
        assert_eq!(packets(&samples), [(7, 65_535), (7, 4_465)]);

        let exact = vec![0u8; 65_535];
        assert_eq!(packets(&exact), [(0, 65_535)]);

        let one_over = vec![0u8; 65_536];
        assert_eq!(packets(&one_over), [(0, 65_535), (0, 1)]);
    }

    #[test]
    fn split_run_followed_by_new_value() {
        let mut samples = vec![3u8; 65_537];
        samples.push(4);
        assert_eq!(packets(&samples), [(3, 65_535), (3, 2), (4, 1)]);
    }

    #[test]
    fn count_is_little_endian() {
        let packet = RlePacket {
            value: 0xAB,
            count: 0x0102,
        };
        assert_eq!(packet.to_bytes(), [0xAB, 0x02, 0x01]);
    }

    #[test]
    fn write_packets_streams_bytes() {
        let mut out: Vec<u8> = Vec::new();
        let stats = write_packets(&[10, 10, 10, 20], &mut out, &Unstoppable).unwrap();
        assert_eq!(stats, PacketStats { packets: 2, samples: 4 });
        assert_eq!(out, [10, 3, 0, 20, 1, 0]);
    }
}
