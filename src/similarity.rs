//! Nearest-neighbour lookups used to annotate decoded cards.

use crate::card::Card;

/// An index over a reference corpus. Results are ranked `(distance, name)`
/// pairs, closest first.
pub trait Similarity {
    fn nearest_card(&self, card: &Card) -> Vec<(f64, String)>;

    fn nearest_name(&self, name: &str) -> Vec<(f64, String)>;
}
