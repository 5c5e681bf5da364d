//! # Reaction Parser
//!
//! Splits one reaction line of the form `REACTANT[+REACTANT]->PRODUCT[+PRODUCT][;RATE_LAW]`
//! into its reactant and product species and the shape of the reaction
//! (uni/bi reactants × uni/bi products). Whitespace is not significant.
//!
//! ```
//! use OsciNet::Networks::reaction_parser::{parse_shape, parse_species, ReactionShape};
//! let line = "S2 + S1 -> S2; k5*S2*S1";
//! assert_eq!(parse_shape(line).unwrap(), ReactionShape::BiUni);
//! let (reactants, products) = parse_species(line).unwrap();
//! assert_eq!(reactants, vec!["S2", "S1"]);
//! assert_eq!(products, vec!["S2"]);
//! ```
use super::errors::NetworkError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const REACTION_ARROW: &str = "->";
pub const RATE_LAW_DELIMITER: char = ';';
pub const SPECIES_SEPARATOR: char = '+';

/// number of reactants × number of products
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReactionShape {
    #[serde(rename = "uni-uni")]
    UniUni,
    #[serde(rename = "uni-bi")]
    UniBi,
    #[serde(rename = "bi-uni")]
    BiUni,
    #[serde(rename = "bi-bi")]
    BiBi,
}

impl ReactionShape {
    pub const ALL: [ReactionShape; 4] = [
        ReactionShape::UniUni,
        ReactionShape::UniBi,
        ReactionShape::BiUni,
        ReactionShape::BiBi,
    ];

    pub fn from_sides(bi_reactants: bool, bi_products: bool) -> Self {
        match (bi_reactants, bi_products) {
            (false, false) => ReactionShape::UniUni,
            (false, true) => ReactionShape::UniBi,
            (true, false) => ReactionShape::BiUni,
            (true, true) => ReactionShape::BiBi,
        }
    }
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionShape::UniUni => "uni-uni",
            ReactionShape::UniBi => "uni-bi",
            ReactionShape::BiUni => "bi-uni",
            ReactionShape::BiBi => "bi-bi",
        }
    }
    pub fn is_bi_reactant(&self) -> bool {
        matches!(self, ReactionShape::BiUni | ReactionShape::BiBi)
    }
    pub fn is_bi_product(&self) -> bool {
        matches!(self, ReactionShape::UniBi | ReactionShape::BiBi)
    }
}

impl fmt::Display for ReactionShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// reactants and products of one reaction line in the order they were written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReaction {
    pub reactants: Vec<String>,
    pub products: Vec<String>,
    pub shape: ReactionShape,
}

/// whitespace-free reactant side and product side (rate law cut off)
fn split_sides(line: &str) -> Result<(String, String), NetworkError> {
    let stripped: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    let (reactants, rest) = stripped
        .split_once(REACTION_ARROW)
        .ok_or_else(|| NetworkError::malformed(line, "no reaction arrow"))?;
    let products = rest.split(RATE_LAW_DELIMITER).next().unwrap_or("");
    if products.contains(REACTION_ARROW) {
        return Err(NetworkError::malformed(line, "more than one reaction arrow"));
    }
    Ok((reactants.to_string(), products.to_string()))
}

/// one or two species of a reaction side
fn split_members(side: &str, line: &str, side_name: &str) -> Result<Vec<String>, NetworkError> {
    if side.is_empty() {
        return Err(NetworkError::malformed(line, &format!("empty {} side", side_name)));
    }
    let members: Vec<String> = side.split(SPECIES_SEPARATOR).map(|s| s.to_string()).collect();
    if members.len() > 2 {
        return Err(NetworkError::malformed(
            line,
            &format!("more than two {}", side_name),
        ));
    }
    if members.iter().any(|m| m.is_empty()) {
        return Err(NetworkError::malformed(
            line,
            &format!("empty species name among {}", side_name),
        ));
    }
    Ok(members)
}

/// shape of a reaction line. Fails if the line has no reaction arrow, so callers filter
/// non-reaction lines beforehand
pub fn parse_shape(line: &str) -> Result<ReactionShape, NetworkError> {
    Ok(parse_reaction(line)?.shape)
}

/// ordered lists of reactants and products
pub fn parse_species(line: &str) -> Result<(Vec<String>, Vec<String>), NetworkError> {
    let parsed = parse_reaction(line)?;
    Ok((parsed.reactants, parsed.products))
}

/// reactants, products and shape at once
pub fn parse_reaction(line: &str) -> Result<ParsedReaction, NetworkError> {
    let (reactant_side, product_side) = split_sides(line)?;
    let reactants = split_members(&reactant_side, line, "reactants")?;
    let products = split_members(&product_side, line, "products")?;
    let shape = ReactionShape::from_sides(reactants.len() == 2, products.len() == 2);
    Ok(ParsedReaction {
        reactants,
        products,
        shape,
    })
}

/// true for lines the reaction-level tools look at: not a comment and containing the arrow
pub fn is_reaction_line(line: &str, comment_marker: &str) -> bool {
    line.contains(REACTION_ARROW) && !line.starts_with(comment_marker)
}
