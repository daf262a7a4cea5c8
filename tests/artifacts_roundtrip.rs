mod common;

use std::fs;

use allowlist_merkle::artifacts::{self, PROOFS_FILE, ROOT_FILE};
use allowlist_merkle::source::{FileMembers, MemberSource};
use allowlist_merkle::{build_whitelist, verify_proof};
use common::{random_addresses, rng_from_env};

#[test]
fn written_artifacts_load_back() {
    let mut rng = rng_from_env();
    let members = random_addresses(21, &mut rng);
    let wl = build_whitelist(&members).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested").join("out");
    let paths = artifacts::write_artifacts(&out, &wl).unwrap();
    assert_eq!(paths.root, out.join(ROOT_FILE));
    assert_eq!(paths.proofs, out.join(PROOFS_FILE));

    let root = artifacts::load_root(&paths.root).unwrap();
    assert_eq!(root, wl.root());

    let proofs = artifacts::load_proofs(&paths.proofs).unwrap();
    assert_eq!(&proofs, wl.proofs());
    for m in &members {
        let proof = &proofs[&m.to_ascii_lowercase()];
        assert!(verify_proof(m, proof, &root));
    }
}

#[test]
fn artifact_shapes_match_published_format() {
    let members = [
        "0x0101010101010101010101010101010101010101",
        "0x0202020202020202020202020202020202020202",
    ];
    let wl = build_whitelist(&members).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let paths = artifacts::write_artifacts(dir.path(), &wl).unwrap();

    let root_body: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&paths.root).unwrap()).unwrap();
    let root_hex = root_body.as_str().unwrap();
    assert_eq!(root_hex.len(), 64);
    assert!(!root_hex.starts_with("0x"));

    let proofs_body: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&paths.proofs).unwrap()).unwrap();
    let obj = proofs_body.as_object().unwrap();
    assert_eq!(obj.len(), 2);
    for m in members {
        let siblings = obj[m].as_array().unwrap();
        assert_eq!(siblings.len(), 1);
        let s = siblings[0].as_str().unwrap();
        assert!(s.starts_with("0x"));
        assert_eq!(s.len(), 66);
    }
}

#[test]
fn member_file_feeds_a_build() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("members.txt");
    fs::write(
        &path,
        "# holders snapshot\n\n  0x0101010101010101010101010101010101010101  \n0x0202020202020202020202020202020202020202\n",
    )
    .unwrap();

    let members = FileMembers::new(&path).fetch().unwrap();
    assert_eq!(members.len(), 2);

    let from_file = build_whitelist(&members).unwrap();
    let direct = build_whitelist(&[
        "0x0101010101010101010101010101010101010101",
        "0x0202020202020202020202020202020202020202",
    ])
    .unwrap();
    assert_eq!(from_file.root(), direct.root());
}

#[test]
fn corrupt_proofs_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(PROOFS_FILE);
    fs::write(&path, "{\"0xaa\": [\"0x1234\"]}").unwrap();
    assert!(artifacts::load_proofs(&path).is_err());

    let missing = dir.path().join("nope.json");
    let err = artifacts::load_root(&missing).unwrap_err();
    assert!(matches!(err, allowlist_merkle::Error::Io(_)));
}
