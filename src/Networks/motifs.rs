//! Syntactic detection of two dynamical motifs, autocatalysis and degradation.
//! No simulation is involved: both are decided from the species lists alone.
//!
//! Degradation is only recognized for bi-uni reactions (`A + B -> A`). A uni-uni
//! reaction may behave as a loss of its reactant, but it is not counted.
use super::errors::NetworkError;
use super::reaction_parser::{ParsedReaction, ReactionShape, parse_reaction};

impl ParsedReaction {
    /// reactants and products are the same list, or the reversed list for two members
    /// (`A + B -> B + A`): a relabeling, not a state change
    pub fn is_reversible_pair(&self) -> bool {
        let (r, p) = (&self.reactants, &self.products);
        if r.len() != p.len() {
            return false;
        }
        if r == p {
            return true;
        }
        r.len() == 2 && r[1] == p[0] && r[0] == p[1]
    }

    pub fn is_autocatalytic(&self) -> bool {
        let (r, p) = (&self.reactants, &self.products);
        match self.shape {
            ReactionShape::UniUni | ReactionShape::BiUni => false,
            // X -> X + X
            ReactionShape::UniBi => p.contains(&r[0]) && p[0] == p[1],
            ReactionShape::BiBi => {
                !self.is_reversible_pair()
                    && p[0] == p[1]
                    && (p.contains(&r[0]) || p.contains(&r[1]))
            }
        }
    }

    /// bi-uni reaction whose product is one of the reactants
    pub fn is_degradation(&self) -> bool {
        self.shape == ReactionShape::BiUni && self.reactants.contains(&self.products[0])
    }
}

pub fn is_reversible_pair(line: &str) -> Result<bool, NetworkError> {
    Ok(parse_reaction(line)?.is_reversible_pair())
}

pub fn is_autocatalytic(line: &str) -> Result<bool, NetworkError> {
    Ok(parse_reaction(line)?.is_autocatalytic())
}

pub fn is_degradation(line: &str) -> Result<bool, NetworkError> {
    Ok(parse_reaction(line)?.is_degradation())
}
