use std::collections::HashSet;
use std::io::Read;

use afs_cas::CasWriter;
use tracing::{debug, info};

use crate::error::RecorderResult;
use crate::stream::decode_next;

/// Writes every item of a recorder stream into a content store.
pub struct Recorder<W, R> {
    cas: W,
    reader: R,
}

impl<W: CasWriter, R: Read> Recorder<W, R> {
    pub fn new(cas: W, reader: R) -> Self {
        Self { cas, reader }
    }

    /// Consume the whole stream, writing each payload under its integrity
    /// string. Returns the number of items written.
    ///
    /// The first store error aborts the consume and is returned without
    /// reading the rest of the failed payload.
    pub fn consume(&mut self) -> RecorderResult<u64> {
        self.consume_skipping_existing(&HashSet::new())
    }

    /// Like [`consume`](Self::consume), but payloads whose integrity string is
    /// in `known` are discarded instead of written.
    pub fn consume_skipping_existing(&mut self, known: &HashSet<String>) -> RecorderResult<u64> {
        let mut written = 0u64;
        let mut skipped = 0u64;
        while let Some((integrity, mut payload)) = decode_next(&mut self.reader)? {
            let sri = integrity.to_string();
            if known.contains(&sri) {
                debug!(sri = %sri, size = payload.len(), "content already present");
                payload.close()?;
                skipped += 1;
                continue;
            }
            if let Err(e) = self.cas.write(&sri, &mut payload) {
                payload.abandon();
                return Err(e.into());
            }
            // The store may stop reading before the end of the record.
            payload.close()?;
            written += 1;
        }
        info!(written, skipped, "consume complete");
        Ok(written)
    }

    pub fn into_inner(self) -> (W, R) {
        (self.cas, self.reader)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor};

    use afs_cas::{CasConfig, CasError, CasReader, InMemoryCas};
    use afs_sri::{Algorithm, Integrity};

    use super::*;
    use crate::error::RecorderError;
    use crate::stream::{encode, encode_bytes};

    fn sri_of(data: &[u8]) -> Integrity {
        Integrity::from_bytes(Algorithm::Sha256, data)
    }

    fn stream_of(items: &[&[u8]]) -> Cursor<Vec<u8>> {
        let mut buf = Vec::new();
        for data in items {
            encode_bytes(&mut buf, &sri_of(data), data).unwrap();
        }
        Cursor::new(buf)
    }

    fn read_all(store: &InMemoryCas, sri: &str) -> Vec<u8> {
        let mut out = Vec::new();
        store.open(sri).unwrap().read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn consume_writes_every_item() {
        let store = InMemoryCas::new();
        let items: [&[u8]; 3] = [b"one", b"two", b"three"];
        let written = Recorder::new(&store, stream_of(&items)).consume().unwrap();
        assert_eq!(written, 3);
        for data in items {
            assert_eq!(read_all(&store, &sri_of(data).to_string()), data);
        }
    }

    #[test]
    fn consume_empty_stream() {
        let store = InMemoryCas::new();
        assert_eq!(Recorder::new(&store, io::empty()).consume().unwrap(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn store_failure_aborts() {
        let store = InMemoryCas::new();
        let mut buf = stream_of(&[b"good"]).into_inner();
        // Second item lies about its integrity.
        encode(&mut buf, &sri_of(b"claimed"), 6, &mut &b"actual"[..]).unwrap();
        buf.extend(stream_of(&[b"never reached"]).into_inner());

        let err = Recorder::new(&store, Cursor::new(buf)).consume().unwrap_err();
        assert!(matches!(err, RecorderError::Cas(CasError::IntegrityMismatch { .. })));
        assert_eq!(store.len(), 1);
        assert!(store.contains(&sri_of(b"good").to_string()));
        assert!(!store.contains(&sri_of(b"never reached").to_string()));
    }

    #[test]
    fn read_only_store_fails_on_first_item() {
        let store = InMemoryCas::with_config(CasConfig {
            read_only: true,
            ..CasConfig::default()
        });
        let stream = stream_of(&[b"payload bytes", b"x"]);
        let first_end = stream.get_ref().len() as u64 - stream_of(&[b"x"]).get_ref().len() as u64;
        let mut recorder = Recorder::new(&store, stream);
        let err = recorder.consume().unwrap_err();
        assert!(matches!(err, RecorderError::Cas(CasError::ReadOnly)));

        // The rejected payload is left unread.
        let (_, reader) = recorder.into_inner();
        assert_eq!(reader.position(), first_end - 13);
    }

    #[test]
    fn protocol_errors_surface() {
        let store = InMemoryCas::new();
        let mut buf = stream_of(&[b"ok"]).into_inner();
        buf.extend_from_slice(&[0x01, 0x00]);
        let err = Recorder::new(&store, Cursor::new(buf)).consume().unwrap_err();
        assert!(matches!(err, RecorderError::TruncatedHeader { got: 2 }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn known_items_are_skipped_and_drained() {
        let store = InMemoryCas::new();
        let known: HashSet<String> = [sri_of(b"already there").to_string()].into();
        let mut recorder = Recorder::new(&store, stream_of(&[b"new", b"already there", b"also new"]));

        assert_eq!(recorder.consume_skipping_existing(&known).unwrap(), 2);
        assert_eq!(store.len(), 2);
        assert!(!store.contains(&sri_of(b"already there").to_string()));
        assert_eq!(read_all(&store, &sri_of(b"also new").to_string()), b"also new");

        let (_, reader) = recorder.into_inner();
        assert_eq!(reader.position(), reader.get_ref().len() as u64);
    }
}
