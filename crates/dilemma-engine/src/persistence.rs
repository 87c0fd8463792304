//! Snapshot encoding for the session store
//!
//! A snapshot is a JSON object mapping each opponent to their session.
//! Sessions round-trip field for field.

use std::collections::BTreeMap;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::error::PersistError;
use crate::session::Session;

pub type Snapshot = BTreeMap<String, Session>;

pub fn write_snapshot<W: Write>(snapshot: &Snapshot, mut writer: W) -> Result<(), PersistError> {
    serde_json::to_writer(&mut writer, snapshot)?;
    writer.flush()?;
    Ok(())
}

/// Parse a snapshot. An empty source is an empty snapshot.
pub fn read_snapshot<R: Read>(mut reader: R) -> Result<Snapshot, PersistError> {
    let mut raw = String::new();
    reader.read_to_string(&mut raw)?;
    if raw.trim().is_empty() {
        return Ok(Snapshot::new());
    }

    let snapshot: Snapshot = serde_json::from_str(&raw)?;
    if let Some((key, session)) = snapshot.iter().find(|(k, s)| **k != s.opponent) {
        return Err(PersistError::KeyMismatch {
            key: key.clone(),
            opponent: session.opponent.clone(),
        });
    }
    Ok(snapshot)
}

/// Write next to `path` and rename over it, so readers never see a torn file.
pub fn write_snapshot_to_path(snapshot: &Snapshot, path: &Path) -> Result<(), PersistError> {
    let staging = staging_path(path);
    let file = fs::File::create(&staging)?;
    write_snapshot(snapshot, std::io::BufWriter::new(file))?;
    fs::rename(&staging, path)?;
    Ok(())
}

pub fn read_snapshot_from_path(path: &Path) -> Result<Snapshot, PersistError> {
    let file = fs::File::open(path)?;
    read_snapshot(std::io::BufReader::new(file))
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Points;
    use crate::strategy::Move;

    fn sample() -> Snapshot {
        let mut alice = Session::new("alice", 1_000);
        alice.record(Move::Cooperate, Move::Defect, Points::new(0, 5), 1_010);
        alice.record(Move::Defect, Move::Cooperate, Points::new(5, 0), 1_020);

        let bob = Session::new("bob", 2_000);

        Snapshot::from([("alice".to_string(), alice), ("bob".to_string(), bob)])
    }

    #[test]
    fn test_round_trip() {
        let snapshot = sample();
        let mut buf = Vec::new();
        write_snapshot(&snapshot, &mut buf).unwrap();

        assert_eq!(read_snapshot(buf.as_slice()).unwrap(), snapshot);
    }

    #[test]
    fn test_empty_source_is_empty_snapshot() {
        assert!(read_snapshot(&b""[..]).unwrap().is_empty());
        assert!(read_snapshot(&b"  \n"[..]).unwrap().is_empty());
        assert!(read_snapshot(&b"{}"[..]).unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_snapshot() {
        let err = read_snapshot(&b"{\"alice\": {\"user\": \"alice\"}"[..]).unwrap_err();
        assert!(matches!(err, PersistError::Serialization(_)));
    }

    #[test]
    fn test_key_mismatch() {
        let json = serde_json::json!({
            "alice": {
                "user": "mallory",
                "start_time": 0,
                "last_time": 0,
                "moves": [],
                "total_points": [0, 0],
                "last_points": [0, 0],
            }
        });
        let err = read_snapshot(json.to_string().as_bytes()).unwrap_err();
        assert!(matches!(err, PersistError::KeyMismatch { key, opponent } if key == "alice" && opponent == "mallory"));
    }

    #[test]
    fn test_path_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("active_games.json");

        write_snapshot_to_path(&sample(), &path).unwrap();
        assert!(!staging_path(&path).exists());
        assert_eq!(read_snapshot_from_path(&path).unwrap(), sample());
    }

    #[test]
    fn test_missing_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_snapshot_from_path(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, PersistError::Io(e) if e.kind() == std::io::ErrorKind::NotFound));
    }
}
