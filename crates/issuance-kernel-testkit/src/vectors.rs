//! Resolution vectors for cross-implementation verification.
//!
//! Each vector names a list id, a probe address and the expected membership.
//! Ids and probes are templates over the fixture parties (`{alice}`, `{bob}`,
//! `{charlie}`); the fixture stores `x = [alice, bob]` before evaluation.

use serde::Serialize;

use crate::fixtures::{TestFixture, ALICE_SEED, BOB_SEED, CHARLIE_SEED};

/// A resolution vector.
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// List id template.
    pub list_id: &'static str,
    /// Probe address template.
    pub probe: &'static str,
    /// Expected membership.
    pub expected: bool,
}

const fn vector(
    name: &'static str,
    list_id: &'static str,
    probe: &'static str,
    expected: bool,
) -> ResolutionVector {
    ResolutionVector {
        name,
        list_id,
        probe,
        expected,
    }
}

/// Get all resolution vectors.
pub fn all_vectors() -> Vec<ResolutionVector> {
    vec![
        vector("stored member", "x", "{alice}", true),
        vector("stored non-member", "x", "{charlie}", false),
        vector("inverted stored", "!x", "{alice}", false),
        vector("parenthesized inversion", "!(x)", "{alice}", false),
        vector("double inversion", "!(!(x))", "{alice}", true),
        vector("inverted non-member", "!(x)", "{charlie}", true),
        vector("all", "All", "{charlie}", true),
        vector("all with mint", "AllWithMint", "Mint", true),
        vector("none", "None", "{alice}", false),
        vector("inverted all", "!(All)", "{alice}", false),
        vector("mint is mint", "Mint", "Mint", true),
        vector("mint excludes others", "Mint", "{alice}", false),
        vector("all without mint, mint", "AllWithoutMint", "Mint", false),
        vector("all without mint, alice", "AllWithoutMint", "{alice}", true),
        vector("all without mint and alice", "AllWithoutMint:{alice}", "Mint", false),
        vector("all without alice:bob", "AllWithout{alice}:{bob}", "{bob}", false),
        vector("all without alice:bob, charlie", "AllWithout{alice}:{bob}", "{charlie}", true),
        vector("inline member", "{alice}:{bob}", "{alice}", true),
        vector("inline non-member", "{alice}:{bob}", "{charlie}", false),
        vector("single inline", "{charlie}", "{charlie}", true),
        vector("inverted inline", "!{alice}:{bob}", "{charlie}", true),
    ]
}

/// Evaluate every vector against a fresh fixture.
///
/// Returns `(name, matches, detail)` per vector; `detail` is the observed
/// membership or the error.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    let fixture = TestFixture::new();
    let stored = fixture.create_whitelist("x", &[fixture.alice.as_str(), fixture.bob.as_str()]);

    all_vectors()
        .iter()
        .map(|v| {
            let outcome = stored.as_ref().map_err(ToString::to_string).and_then(|_| {
                fixture
                    .keeper
                    .check_addresses(&fixture.render(v.list_id), &fixture.render(v.probe))
                    .map_err(|e| e.to_string())
            });
            match outcome {
                Ok(member) => (v.name.to_string(), member == v.expected, member.to_string()),
                Err(e) => (v.name.to_string(), false, e),
            }
        })
        .collect()
}

/// The vectors with their party seeds, as JSON.
pub fn vectors_json() -> serde_json::Result<String> {
    let parties = serde_json::json!({
        "alice_seed": hex::encode(ALICE_SEED),
        "bob_seed": hex::encode(BOB_SEED),
        "charlie_seed": hex::encode(CHARLIE_SEED),
    });
    serde_json::to_string_pretty(&serde_json::json!({
        "parties": parties,
        "stored": { "x": ["{alice}", "{bob}"] },
        "vectors": all_vectors(),
    }))
}
