//! Helpers shared by the unit test suites of `chroma-core`.

use std::collections::BTreeSet;

use chroma_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::{Kmer, MphfOracle, MphfOracleBuilder};

/// Proptest configuration honouring `PROGTEST_CASES` and `CHROMA_PBT_FORK`.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Parses a k-mer literal.
pub(crate) fn kmer(text: &str) -> Kmer {
    text.parse().expect("test k-mer must parse")
}

/// Oracle over the given k-mer literals, all with color 0.
pub(crate) fn oracle_from(k: usize, kmers: &[&str]) -> MphfOracle {
    let mut builder = MphfOracleBuilder::new(k).expect("k is valid");
    for text in kmers {
        builder.insert(kmer(text), 0).expect("insert must succeed");
    }
    builder.build()
}

/// Oracle over already-canonical packed keys, all with color 0.
pub(crate) fn oracle_from_keys(k: usize, keys: &BTreeSet<u64>) -> MphfOracle {
    let mut builder = MphfOracleBuilder::new(k).expect("k is valid");
    for &key in keys {
        builder.insert_key(key, 0).expect("key fits");
    }
    builder.build()
}
