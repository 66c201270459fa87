//! Writers for per-sample selection results.
//!
//! | Outcome | File | Mode | Header |
//! |---------|------|------|--------|
//! | Selected | `<basename>_refs.tsv` | append | none |
//! | Failed | `<basename>_failed_assembly.tsv` | truncate | 11 columns |

pub mod tsv;
