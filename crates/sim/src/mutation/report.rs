//! Human-readable mutation profile report.
//!
//! One line per site with position, alphabet, entropy, max entropy and the
//! cumulative table. Meant for people, not for round-trip parsing.

use super::MutationProfile;
use std::io::{self, Write};

/// Write the profile report. `indel_fraction` is only quoted in the note line.
pub fn write_profile_report<W: Write>(
    profile: &MutationProfile,
    indel_fraction: f64,
    mut out: W,
) -> io::Result<()> {
    writeln!(
        out,
        "Note: at each position, an indel occurs with probability {:.2}%.",
        indel_fraction * 100.0
    )?;
    writeln!(
        out,
        "Pos\tSNP\tEntropy\tMaxEntropy\tCumulative Expected Frequency"
    )?;
    for site in profile.sites() {
        let alleles: String = site.alleles().iter().map(|n| n.to_char()).collect();
        let table = site
            .frequencies()
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let e = site.entropy();
        writeln!(
            out,
            "{}\t{}\t{:.4}\t{:.4}\t{}",
            site.position(),
            alleles,
            e.observed,
            e.max,
            table
        )?;
    }
    out.flush()
}
