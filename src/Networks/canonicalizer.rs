//! # Reaction Canonicalizer
//!
//! Fuses duplicate reactions of a model. Two reactions are duplicates when they have the
//! same reactant multiset and the same product multiset (`A + B -> C` and `B + A -> C`);
//! their rate constants are summed. Self-reactions (reactants equal to products) are no
//! state change and are dropped.
//!
//! After fusion the reactions are written back in a canonical form and renumbered
//! `k0, k1, ...` in order of first appearance:
//! ```text
//! S1+S2->S2; k4*S1*S2
//! k4 = 15.50936673547638
//! ```
use super::antimony_model::{ParsedModel, ReactionEntry};
use super::errors::NetworkError;
use super::reaction_parser::{SPECIES_SEPARATOR, parse_reaction};
use log::{debug, info};
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

static RATE_CONSTANT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*=\s*([^;\s]+)\s*;?\s*$")
        .expect("rate constant regex is valid")
});

/// species of one reaction side, order-insensitive (kept sorted)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpeciesMultiset(Vec<String>);

impl SpeciesMultiset {
    pub fn new(mut species: Vec<String>) -> Self {
        species.sort();
        Self(species)
    }
    pub fn members(&self) -> &[String] {
        &self.0
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// identity of a reaction for fusion: reactants and products, never the rate constant
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReactionKey {
    pub reactants: SpeciesMultiset,
    pub products: SpeciesMultiset,
}

impl ReactionKey {
    pub fn from_line(line: &str) -> Result<Self, NetworkError> {
        let parsed = parse_reaction(line)?;
        Ok(Self {
            reactants: SpeciesMultiset::new(parsed.reactants),
            products: SpeciesMultiset::new(parsed.products),
        })
    }
    pub fn is_self_reaction(&self) -> bool {
        self.reactants == self.products
    }
}

impl fmt::Display for ReactionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = SPECIES_SEPARATOR.to_string();
        write!(
            f,
            "{}->{}",
            self.reactants.members().join(&sep),
            self.products.members().join(&sep)
        )
    }
}

/// value of a `k3 = 4.76` line
pub fn parse_rate_constant(line: &str) -> Result<f64, NetworkError> {
    let malformed = || NetworkError::MalformedRateConstant {
        line: line.to_string(),
    };
    let caps = RATE_CONSTANT_RE.captures(line).ok_or_else(malformed)?;
    caps[2].parse::<f64>().map_err(|_| malformed())
}

/// distinct reactions in first-appearance order with their summed rate constants
#[derive(Debug, Clone, Default)]
pub struct ReactionIndex {
    entries: Vec<(ReactionKey, f64)>,
    positions: HashMap<ReactionKey, usize>,
    /// original lines merged into an earlier reaction
    pub fused_away: Vec<String>,
    /// original lines dropped as self-reactions
    pub self_reactions: Vec<String>,
}

impl ReactionIndex {
    pub fn new() -> Self {
        Self::default()
    }
    /// insert a reaction or add its rate constant to an existing identical one.
    /// Returns false if the reaction was fused or dropped
    pub fn add(&mut self, key: ReactionKey, rate_constant: f64, line: &str) -> bool {
        if key.is_self_reaction() {
            debug!("self-reaction '{}' dropped", line);
            self.self_reactions.push(line.to_string());
            return false;
        }
        match self.positions.get(&key) {
            Some(&pos) => {
                self.entries[pos].1 += rate_constant;
                info!("reaction '{}' fused into '{}'", line, key);
                self.fused_away.push(line.to_string());
                false
            }
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, rate_constant));
                true
            }
        }
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn get(&self, key: &ReactionKey) -> Option<f64> {
        self.positions.get(key).map(|&pos| self.entries[pos].1)
    }
    pub fn iter(&self) -> impl Iterator<Item = &(ReactionKey, f64)> {
        self.entries.iter()
    }
    pub fn keys(&self) -> Vec<ReactionKey> {
        self.entries.iter().map(|(key, _)| key.clone()).collect()
    }
}

/// index of the reactions of paired reaction / rate constant lines
pub fn build_reaction_index(entries: &[ReactionEntry]) -> Result<ReactionIndex, NetworkError> {
    let mut index = ReactionIndex::new();
    for entry in entries {
        let key = ReactionKey::from_line(&entry.reaction)?;
        let k = parse_rate_constant(&entry.rate_constant)?;
        index.add(key, k, &entry.reaction);
    }
    Ok(index)
}

/// canonical reaction line and rate constant line for each entry, renumbered from k0
pub fn serialize(index: &ReactionIndex) -> Vec<ReactionEntry> {
    let sep = SPECIES_SEPARATOR.to_string();
    index
        .iter()
        .enumerate()
        .map(|(i, (key, k))| {
            let reactants = key.reactants.members();
            let reaction = format!(
                "{}->{}; k{}*{}",
                reactants.join(&sep),
                key.products.members().join(&sep),
                i,
                reactants.join("*")
            );
            ReactionEntry {
                reaction,
                rate_constant: format!("k{} = {}", i, k),
            }
        })
        .collect()
}

/// fuse duplicate reactions and renumber rate constants. Species and initial conditions
/// are kept as they are; the model is reassembled in partition order
pub fn canonicalize(model: &ParsedModel) -> Result<ParsedModel, NetworkError> {
    let index = build_reaction_index(&model.reactions)?;
    info!(
        "canonicalized {} reactions into {} ({} fused, {} self-reactions dropped)",
        model.reactions.len(),
        index.len(),
        index.fused_away.len(),
        index.self_reactions.len()
    );
    let mut canonical = model.with_reactions(serialize(&index));
    canonical.fused_reactions.extend(index.fused_away);
    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Networks::antimony_model::{RawModel, initialize};
    use approx::assert_relative_eq;

    fn entries(pairs: &[(&str, &str)]) -> Vec<ReactionEntry> {
        pairs
            .iter()
            .map(|(r, k)| ReactionEntry::new(r, k))
            .collect()
    }

    #[test]
    fn test_parse_rate_constant() {
        assert_relative_eq!(parse_rate_constant("k0 = 7.314829248542936").unwrap(), 7.314829248542936);
        assert_relative_eq!(parse_rate_constant("k12=48.7").unwrap(), 48.7);
        assert_relative_eq!(parse_rate_constant("k1 = 1e-3;").unwrap(), 1e-3);
        assert!(matches!(
            parse_rate_constant("k1 = fast"),
            Err(NetworkError::MalformedRateConstant { .. })
        ));
        assert!(parse_rate_constant("k1").is_err());
    }

    #[test]
    fn test_duplicates_are_fused() {
        let index = build_reaction_index(&entries(&[
            ("A -> B; k0*A", "k0 = 1.5"),
            ("A -> B; k1*A", "k1 = 2.0"),
        ]))
        .unwrap();
        assert_eq!(index.len(), 1);
        let key = ReactionKey::from_line("A->B").unwrap();
        assert_relative_eq!(index.get(&key).unwrap(), 3.5);
        assert_eq!(index.fused_away, vec!["A -> B; k1*A"]);
        let serialized = serialize(&index);
        assert_eq!(serialized, vec![ReactionEntry::new("A->B; k0*A", "k0 = 3.5")]);
    }

    #[test]
    fn test_reordered_species_fuse() {
        let index = build_reaction_index(&entries(&[
            ("S0 -> S1+S0; k1*S0", "k1 = 1"),
            ("S0 -> S0+S1; k12*S0", "k12 = 2"),
            ("S2 + S1 -> S2; k5*S2*S1", "k5 = 3"),
            ("S1 + S2 -> S2; k6*S1*S2", "k6 = 4"),
        ]))
        .unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.fused_away.len(), 2);
    }

    #[test]
    fn test_fusion_is_order_independent() {
        let a = ("A + B -> C; k0*A*B", "k0 = 0.1");
        let b = ("B + A -> C; k1*B*A", "k1 = 0.7");
        let forward = build_reaction_index(&entries(&[a, b])).unwrap();
        let backward = build_reaction_index(&entries(&[b, a])).unwrap();
        let key = ReactionKey::from_line("A+B->C").unwrap();
        assert_relative_eq!(forward.get(&key).unwrap(), backward.get(&key).unwrap());
        assert_relative_eq!(forward.get(&key).unwrap(), 0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_self_reactions_never_serialized() {
        let index = build_reaction_index(&entries(&[
            ("A + B -> B + A; k0*A*B", "k0 = 1"),
            ("C -> C; k1*C", "k1 = 1"),
            ("C -> C + C; k2*C", "k2 = 1"),
        ]))
        .unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.self_reactions.len(), 2);
        let serialized = serialize(&index);
        assert_eq!(serialized.len(), 1);
        assert_eq!(serialized[0].reaction, "C->C+C; k0*C");
    }

    #[test]
    fn test_serialization_round_trip() {
        let original = entries(&[
            ("S2 -> S0; k0*S2", "k0 = 7.314829248542936"),
            ("S2 + S1 -> S2; k5*S2*S1", "k5 = 15.50936673547638"),
            ("S1 + S1 -> S0 + S1; k11*S1*S1", "k11 = 7.20304738000393"),
            ("S2 -> S0; k4*S2", "k4 = 11.830987147018757"),
        ]);
        let index = build_reaction_index(&original).unwrap();
        let reparsed = build_reaction_index(&serialize(&index)).unwrap();
        assert_eq!(index.keys(), reparsed.keys());
        for (key, k) in index.iter() {
            assert_relative_eq!(*k, reparsed.get(key).unwrap(), max_relative = 1e-12);
        }
        assert!(reparsed.fused_away.is_empty());
    }

    #[test]
    fn test_canonicalize_keeps_other_partitions() {
        let text = "var A\nvar B\nA -> B; k0*A\nA -> B; k1*A\nk0 = 1\nk1 = 2\nA = 1\nB = 0";
        let model = initialize(&RawModel::new(text)).unwrap();
        let canonical = canonicalize(&model).unwrap();
        assert_eq!(canonical.to_text(), "var A\nvar B\nA->B; k0*A\nk0 = 3\nA = 1\nB = 0");
        assert_eq!(canonical.fused_reactions, vec!["A -> B; k1*A"]);
        assert_eq!(canonical.species, model.species);
    }
}
