//! Byte-level scanning primitives for the `.swproj` format.
//!
//! The format has no reliable schema, so structures are located by marker
//! search and decoded by a tolerant state machine:
//!
//! ```text
//!            ┌──────────── record emitted ◄──────────────┐
//!            ▼                                           │
//!        SeekNul ──► DecodeKey ──► DecodeLength ──► DecodeValue
//!          │  ▲          │              │
//!          │  └─ Resync ◄┴──────────────┘   (skip one byte)
//!          ▼
//!        Done (cursor reached the boundary, or no room for a length)
//! ```
//!
//! Resynchronization is internal recovery, never an error: a candidate key
//! that is too short or unprintable, a NUL too far away, or an implausible
//! value length all advance the cursor by one byte and retry.

/// Bytes searched for a key-terminating NUL.
pub const NUL_LOOKAHEAD: usize = 100;

/// Maximum distance from the cursor to the NUL for a plausible key.
pub const MAX_KEY_SPAN: usize = 50;

/// Value lengths above this are treated as spurious.
pub const MAX_VALUE_LEN: usize = 200;

/// Keys shorter than this are treated as noise.
pub const MIN_KEY_LEN: usize = 2;

/// Offset of the first occurrence of `needle` in `haystack`.
pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Offsets of every occurrence of `needle`, overlapping matches included.
pub fn find_all(haystack: &[u8], needle: &[u8]) -> Vec<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return Vec::new();
    }
    haystack
        .windows(needle.len())
        .enumerate()
        .filter(|(_, w)| *w == needle)
        .map(|(i, _)| i)
        .collect()
}

/// First boundary strictly after `pos`, or the buffer length.
pub fn next_boundary(boundaries: &[usize], pos: usize, len: usize) -> usize {
    let idx = boundaries.partition_point(|&b| b <= pos);
    boundaries.get(idx).copied().unwrap_or(len).min(len)
}

/// Decode bytes as ASCII, replacing anything above 0x7F with U+FFFD.
pub fn decode_ascii(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if b.is_ascii() { b as char } else { char::REPLACEMENT_CHARACTER })
        .collect()
}

/// Printable after ASCII decoding: control bytes are not, replaced bytes are.
fn is_printable(b: u8) -> bool {
    !(b < 0x20 || b == 0x7F)
}

fn read_u32_le(data: &[u8], pos: usize) -> Option<u32> {
    let bytes = data.get(pos..pos.checked_add(4)?)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// One decoded `key\0 len value` record, borrowed from the scanned buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    /// Key bytes, printable, at least [`MIN_KEY_LEN`] long.
    pub key: &'a [u8],
    /// Value bytes; shorter than declared if the buffer ended early.
    pub value: &'a [u8],
}

impl Record<'_> {
    /// Key as text.
    pub fn key_str(&self) -> String {
        decode_ascii(self.key)
    }

    /// Value as text.
    pub fn value_str(&self) -> String {
        decode_ascii(self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    SeekNul,
    DecodeKey { nul: usize },
    DecodeLength { nul: usize },
    DecodeValue { nul: usize, len: usize },
    Resync,
    Done,
}

/// Iterator over the metadata records between an anchor and the next boundary.
///
/// The cursor starts at the anchor itself, so the first record is normally the
/// anchor's own `ChannelDelayMs` entry. Key lookahead and value reads may cross
/// `end`; only the cursor position is bounded by it.
#[derive(Debug, Clone)]
pub struct MetadataScanner<'a> {
    data: &'a [u8],
    cursor: usize,
    end: usize,
    state: State,
    resyncs: usize,
}

impl<'a> MetadataScanner<'a> {
    /// Scan `data` from `start` until the cursor reaches `end`.
    pub fn new(data: &'a [u8], start: usize, end: usize) -> Self {
        Self {
            data,
            cursor: start,
            end: end.min(data.len()),
            state: State::SeekNul,
            resyncs: 0,
        }
    }

    /// Current cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of single-byte resynchronizations performed so far.
    pub fn resyncs(&self) -> usize {
        self.resyncs
    }

    /// Advance the machine by one transition, possibly emitting a record.
    fn step(&mut self) -> Option<Record<'a>> {
        match self.state {
            State::SeekNul => {
                if self.cursor >= self.end {
                    self.state = State::Done;
                    return None;
                }
                let window_end = (self.cursor + NUL_LOOKAHEAD).min(self.data.len());
                self.state = match self.data[self.cursor..window_end]
                    .iter()
                    .position(|&b| b == 0)
                {
                    Some(dist) if dist <= MAX_KEY_SPAN => State::DecodeKey {
                        nul: self.cursor + dist,
                    },
                    _ => State::Resync,
                };
            }
            State::DecodeKey { nul } => {
                let key = &self.data[self.cursor..nul];
                self.state = if key.len() < MIN_KEY_LEN || !key.iter().all(|&b| is_printable(b)) {
                    State::Resync
                } else {
                    State::DecodeLength { nul }
                };
            }
            State::DecodeLength { nul } => {
                self.state = match read_u32_le(self.data, nul + 1) {
                    None => State::Done,
                    Some(len) if len as usize > MAX_VALUE_LEN => State::Resync,
                    Some(len) => State::DecodeValue {
                        nul,
                        len: len as usize,
                    },
                };
            }
            State::DecodeValue { nul, len } => {
                let value_start = nul + 5;
                let value_end = (value_start + len).min(self.data.len());
                let record = Record {
                    key: &self.data[self.cursor..nul],
                    value: &self.data[value_start.min(value_end)..value_end],
                };
                self.cursor = value_start + len;
                self.state = State::SeekNul;
                return Some(record);
            }
            State::Resync => {
                tracing::trace!(cursor = self.cursor, "metadata resync");
                self.cursor += 1;
                self.resyncs += 1;
                self.state = State::SeekNul;
            }
            State::Done => {}
        }
        None
    }
}

impl<'a> Iterator for MetadataScanner<'a> {
    type Item = Record<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.state != State::Done {
            if let Some(record) = self.step() {
                return Some(record);
            }
        }
        None
    }
}

/// The closed set of metadata keys the assembler reads.
///
/// Values are kept raw; the last record for a key wins. Interpretation
/// (integer index, float delay) happens at assembly so that a malformed
/// earlier value overwritten by a later one is harmless.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelMetadata {
    /// `ChannelName`
    pub name: Option<String>,
    /// `ChannelIndex`
    pub index: Option<String>,
    /// `ChannelGroup`
    pub group: Option<String>,
    /// `ChannelDelayMs`
    pub delay_ms: Option<String>,
}

impl ChannelMetadata {
    /// Run a [`MetadataScanner`] and collect the recognized keys.
    pub fn scan(data: &[u8], start: usize, end: usize) -> Self {
        let mut meta = Self::default();
        let mut scanner = MetadataScanner::new(data, start, end);
        for record in scanner.by_ref() {
            meta.absorb(record);
        }
        tracing::trace!(
            start,
            end,
            resyncs = scanner.resyncs(),
            "metadata run scanned"
        );
        meta
    }

    /// Record one key/value pair; unrecognized keys are ignored.
    pub fn absorb(&mut self, record: Record<'_>) {
        let slot = match record.key {
            b"ChannelName" => &mut self.name,
            b"ChannelIndex" => &mut self.index,
            b"ChannelGroup" => &mut self.group,
            b"ChannelDelayMs" => &mut self.delay_ms,
            _ => return,
        };
        *slot = Some(record.value_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(key: &str, value: &str) -> Vec<u8> {
        let mut out = key.as_bytes().to_vec();
        out.push(0);
        out.extend_from_slice(&(value.len() as u32).to_le_bytes());
        out.extend_from_slice(value.as_bytes());
        out
    }

    #[test]
    fn find_all_includes_overlaps() {
        assert_eq!(find_all(b"aaaa", b"aa"), vec![0, 1, 2]);
        assert_eq!(find_all(b"abc", b"abcd"), Vec::<usize>::new());
        assert_eq!(find(b"xx</P>", b"</P>"), Some(2));
    }

    #[test]
    fn next_boundary_is_strictly_after() {
        let boundaries = [10, 20, 30];
        assert_eq!(next_boundary(&boundaries, 10, 100), 20);
        assert_eq!(next_boundary(&boundaries, 5, 100), 10);
        assert_eq!(next_boundary(&boundaries, 30, 100), 100);
        assert_eq!(next_boundary(&boundaries, 25, 28), 28);
    }

    #[test]
    fn decodes_consecutive_records() {
        let mut data = record("ChannelDelayMs", "0.125");
        data.extend(record("ChannelName", "FL"));
        let records: Vec<_> = MetadataScanner::new(&data, 0, data.len()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].key, b"ChannelDelayMs");
        assert_eq!(records[0].value, b"0.125");
        assert_eq!(records[1].key_str(), "ChannelName");
        assert_eq!(records[1].value_str(), "FL");
    }

    #[test]
    fn resyncs_over_garbage_prefix() {
        let mut data = vec![0x01, 0x02, 0x03];
        data.extend(record("ChannelName", "FR"));
        let mut scanner = MetadataScanner::new(&data, 0, data.len());
        let first = scanner.next().unwrap();
        assert_eq!(first.key, b"ChannelName");
        assert_eq!(first.value, b"FR");
        assert_eq!(scanner.resyncs(), 3);
    }

    #[test]
    fn short_key_is_skipped() {
        // "A" is a one-character key, then an empty one at the NUL itself.
        let mut data = b"A\0".to_vec();
        data.extend(record("ChannelGroup", "Main"));
        let records: Vec<_> = MetadataScanner::new(&data, 0, data.len()).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value_str(), "Main");
    }

    #[test]
    fn implausible_length_triggers_resync() {
        let mut data = b"Key".to_vec();
        data.push(0);
        data.extend_from_slice(&500u32.to_le_bytes());
        let mut scanner = MetadataScanner::new(&data, 0, data.len());
        assert!(scanner.next().is_none());
        assert!(scanner.resyncs() > 0);
    }

    #[test]
    fn far_nul_triggers_resync() {
        let mut data = vec![b'x'; 60];
        data.push(0);
        let mut scanner = MetadataScanner::new(&data, 0, 1);
        assert!(scanner.next().is_none());
        assert_eq!(scanner.resyncs(), 1);
        assert_eq!(scanner.cursor(), 1);
    }

    #[test]
    fn stops_when_length_does_not_fit() {
        let data = b"ChannelName\0\x02\x00".to_vec();
        let mut scanner = MetadataScanner::new(&data, 0, data.len());
        assert!(scanner.next().is_none());
        assert_eq!(scanner.resyncs(), 0);
    }

    #[test]
    fn value_may_be_cut_by_buffer_end() {
        let mut data = b"ChannelName\0".to_vec();
        data.extend_from_slice(&10u32.to_le_bytes());
        data.extend_from_slice(b"Left");
        let records: Vec<_> = MetadataScanner::new(&data, 0, data.len()).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value, b"Left");
    }

    #[test]
    fn cursor_never_passes_end_before_next_record() {
        let mut data = record("ChannelName", "FL");
        let end = data.len();
        data.extend(record("ChannelIndex", "3"));
        let records: Vec<_> = MetadataScanner::new(&data, 0, end).collect();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn metadata_keeps_last_value_and_ignores_unknown_keys() {
        let mut data = record("ChannelDelayMs", "-0");
        data.extend(record("ChannelIndex", "x"));
        data.extend(record("SomethingElse", "1"));
        data.extend(record("ChannelIndex", "4"));
        let meta = ChannelMetadata::scan(&data, 0, data.len());
        assert_eq!(meta.delay_ms.as_deref(), Some("-0"));
        assert_eq!(meta.index.as_deref(), Some("4"));
        assert_eq!(meta.name, None);
        assert_eq!(meta.group, None);
    }

    #[test]
    fn non_ascii_bytes_decode_to_replacement() {
        assert_eq!(decode_ascii(b"F\xE9L"), "F\u{FFFD}L");
    }
}
