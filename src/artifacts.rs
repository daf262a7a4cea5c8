//! Published artifacts: `root.json` and `proofs.json`.
//!
//! Shapes (kept byte-compatible with the JS tooling these files replace):
//!
//! ```text
//! root.json   "3f1c...e9"                       JSON string, hex, no 0x prefix
//! proofs.json { "0xabc...": ["0x12..", ...] }   lower-cased member -> sibling hex
//! ```
//!
//! Writes go through a temp file + rename so a crashed run never leaves a
//! half-written artifact next to a valid one.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::identity;
use crate::merkle::{Proof, Root};
use crate::whitelist::WhitelistResult;

pub const ROOT_FILE: &str = "root.json";
pub const PROOFS_FILE: &str = "proofs.json";

/// Lower-cased member → proof, as stored in `proofs.json`.
pub type ProofMap = BTreeMap<String, Proof>;

/// Paths of a written artifact pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub root: PathBuf,
    pub proofs: PathBuf,
}

/* ------------------------------- Encoding ------------------------------- */

/// `root.json` body.
pub fn encode_root(root: &Root) -> Result<String> {
    Ok(serde_json::to_string(&root.to_hex())?)
}

/// `proofs.json` body.
pub fn encode_proofs(proofs: &ProofMap) -> Result<String> {
    Ok(serde_json::to_string(proofs)?)
}

/// Parse a `root.json` body (prefix optional).
pub fn decode_root(body: &str) -> Result<Root> {
    let s: String = serde_json::from_str(body)?;
    s.parse()
}

/// Parse a `proofs.json` body. Keys are lower-cased on the way in.
pub fn decode_proofs(body: &str) -> Result<ProofMap> {
    let raw: BTreeMap<String, Proof> = serde_json::from_str(body)?;
    Ok(raw
        .into_iter()
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v))
        .collect())
}

/// Proof for `member` in a loaded `proofs.json`, accepting any spelling.
///
/// Tries the lower-cased string first, then compares canonical encodings so
/// `0xaa` finds a key published as `0x00…aa` and the other way round. Keys
/// that are not valid identities are skipped.
pub fn find_proof<'a>(proofs: &'a ProofMap, member: &str) -> Option<&'a Proof> {
    if let Some(p) = proofs.get(&member.trim().to_ascii_lowercase()) {
        return Some(p);
    }
    let wanted = identity::normalize(member).ok()?;
    proofs
        .iter()
        .find(|(key, _)| identity::normalize(key).map_or(false, |enc| enc == wanted))
        .map(|(_, p)| p)
}

/* -------------------------------- Files -------------------------------- */

/// Write `root.json` and `proofs.json` into `dir` (created if missing).
pub fn write_artifacts(dir: &Path, result: &WhitelistResult) -> Result<ArtifactPaths> {
    fs::create_dir_all(dir)?;
    let paths = ArtifactPaths {
        root: dir.join(ROOT_FILE),
        proofs: dir.join(PROOFS_FILE),
    };
    write_file_atomic(&paths.root, &encode_root(&result.root())?)?;
    write_file_atomic(&paths.proofs, &encode_proofs(result.proofs())?)?;
    info!(
        root = %result.root(),
        members = result.len(),
        dir = %dir.display(),
        "artifacts written"
    );
    Ok(paths)
}

pub fn load_root(path: &Path) -> Result<Root> {
    decode_root(&fs::read_to_string(path)?)
}

pub fn load_proofs(path: &Path) -> Result<ProofMap> {
    decode_proofs(&fs::read_to_string(path)?)
}

/// Write `contents` to `path` via a sibling `.tmp` file and a rename.
pub fn write_file_atomic(path: &Path, contents: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| Error::InvalidArtifact(format!("not a file path: {}", path.display())))?;
    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    let written = File::create(&tmp)
        .and_then(|mut f| {
            f.write_all(contents.as_bytes())?;
            f.sync_all()
        })
        .and_then(|()| fs::rename(&tmp, path));

    if let Err(e) = written {
        // The write error is reported, not the cleanup one.
        if let Err(rm) = fs::remove_file(&tmp) {
            if rm.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %tmp.display(), error = %rm, "failed to remove temp file");
            }
        }
        return Err(e.into());
    }
    Ok(())
}
