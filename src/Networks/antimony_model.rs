//! # Antimony-like model text
//!
//! A model is a newline separated list of lines of four kinds:
//! - species declarations, `var S0` (floating) or `ext S3` (boundary)
//! - reactions, `S2 + S1 -> S2; k5*S2*S1`
//! - rate constants, `k5 = 15.5`
//! - initial conditions, `S0 = 1.0`
//!
//! Comment lines (`#...`) and blank lines are discarded. The reaction at position i is
//! governed by the rate constant line at position i; this pairing is positional and is
//! kept by storing both lines in one [`ReactionEntry`].
//!
//! Construction has two explicit steps: [`RawModel::new`] only stores the text,
//! [`initialize`] partitions it into an immutable [`ParsedModel`].
use super::errors::NetworkError;
use super::reaction_parser::is_reaction_line;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// prefixes that tell the kinds of model lines apart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSyntax {
    pub comment_marker: String,
    pub floating_species_prefix: String,
    pub boundary_species_prefix: String,
    pub rate_constant_prefix: String,
    pub initial_condition_prefix: String,
}

impl Default for ModelSyntax {
    fn default() -> Self {
        Self {
            comment_marker: "#".to_string(),
            floating_species_prefix: "var".to_string(),
            boundary_species_prefix: "ext".to_string(),
            rate_constant_prefix: "k".to_string(),
            initial_condition_prefix: "S".to_string(),
        }
    }
}

/// a reaction line together with the rate constant line that governs it
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionEntry {
    pub reaction: String,
    pub rate_constant: String,
}

impl ReactionEntry {
    pub fn new(reaction: &str, rate_constant: &str) -> Self {
        Self {
            reaction: reaction.to_string(),
            rate_constant: rate_constant.to_string(),
        }
    }
}

/// model text as it was received
#[derive(Debug, Clone)]
pub struct RawModel {
    pub text: String,
    pub syntax: ModelSyntax,
}

impl RawModel {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            syntax: ModelSyntax::default(),
        }
    }
    pub fn with_syntax(text: &str, syntax: ModelSyntax) -> Self {
        Self {
            text: text.to_string(),
            syntax,
        }
    }
}

/// model partitioned into species, reactions (paired with rate constants) and initial conditions
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedModel {
    pub species: Vec<String>,
    pub reactions: Vec<ReactionEntry>,
    pub initial_conditions: Vec<String>,
    /// lines that fit none of the partitions; not carried into the reassembled text
    pub unclassified: Vec<String>,
    pub n_floating_species: usize,
    pub n_species: usize,
    /// reaction lines merged into an earlier identical reaction during canonicalization
    pub fused_reactions: Vec<String>,
    /// reaction lines found unnecessary for oscillation during pruning
    pub removed_reactions: Vec<String>,
    pub syntax: ModelSyntax,
}

/// split the raw text into partitions. Fails if the number of rate constant lines differs
/// from the number of reactions
pub fn initialize(raw: &RawModel) -> Result<ParsedModel, NetworkError> {
    let syntax = &raw.syntax;
    let mut species = Vec::new();
    let mut reaction_lines = Vec::new();
    let mut rate_constant_lines = Vec::new();
    let mut initial_conditions = Vec::new();
    let mut unclassified = Vec::new();
    let mut n_floating_species = 0;
    let mut n_species = 0;
    for line in raw.text.lines() {
        if line.is_empty() || line.starts_with(&syntax.comment_marker) {
            continue;
        }
        if is_reaction_line(line, &syntax.comment_marker) {
            reaction_lines.push(line.to_string());
        } else if line.starts_with(&syntax.floating_species_prefix) {
            n_floating_species += 1;
            n_species += 1;
            species.push(line.to_string());
        } else if line.starts_with(&syntax.boundary_species_prefix) {
            n_species += 1;
            species.push(line.to_string());
        } else if line.starts_with(&syntax.rate_constant_prefix) && line.contains('=') {
            rate_constant_lines.push(line.to_string());
        } else if line.starts_with(&syntax.initial_condition_prefix) && line.contains('=') {
            initial_conditions.push(line.to_string());
        } else {
            warn!("line '{}' fits no model partition and is dropped", line);
            unclassified.push(line.to_string());
        }
    }
    let reactions = pair_reactions(reaction_lines, rate_constant_lines)?;
    debug!(
        "model initialized: {} species, {} reactions, {} initial conditions",
        n_species,
        reactions.len(),
        initial_conditions.len()
    );
    Ok(ParsedModel {
        species,
        reactions,
        initial_conditions,
        unclassified,
        n_floating_species,
        n_species,
        fused_reactions: Vec::new(),
        removed_reactions: Vec::new(),
        syntax: syntax.clone(),
    })
}

/// zip reaction lines with rate constant lines position by position
pub fn pair_reactions(
    reactions: Vec<String>,
    rate_constants: Vec<String>,
) -> Result<Vec<ReactionEntry>, NetworkError> {
    if reactions.len() != rate_constants.len() {
        return Err(NetworkError::RateConstantMismatch {
            reactions: reactions.len(),
            rate_constants: rate_constants.len(),
        });
    }
    Ok(reactions
        .into_iter()
        .zip(rate_constants)
        .map(|(reaction, rate_constant)| ReactionEntry {
            reaction,
            rate_constant,
        })
        .collect())
}

/// join lines with newlines, skipping a leading empty line
pub fn join_model_lines(lines: &[String]) -> String {
    let lines = match lines.first() {
        Some(first) if first.is_empty() => &lines[1..],
        _ => lines,
    };
    lines.join("\n")
}

impl ParsedModel {
    pub fn reaction_lines(&self) -> Vec<String> {
        self.reactions.iter().map(|e| e.reaction.clone()).collect()
    }
    pub fn rate_constant_lines(&self) -> Vec<String> {
        self.reactions.iter().map(|e| e.rate_constant.clone()).collect()
    }
    /// all lines in partition order: species, reactions, rate constants, initial conditions
    pub fn lines(&self) -> Vec<String> {
        self.lines_with_disabled_reaction(None)
    }
    /// same as [`ParsedModel::lines`] with the reaction at `position` commented out
    pub fn lines_with_disabled_reaction(&self, position: Option<usize>) -> Vec<String> {
        let mut lines = self.species.clone();
        for (i, entry) in self.reactions.iter().enumerate() {
            if Some(i) == position {
                lines.push(format!("{}{}", self.syntax.comment_marker, entry.reaction));
            } else {
                lines.push(entry.reaction.clone());
            }
        }
        lines.extend(self.rate_constant_lines());
        lines.extend(self.initial_conditions.iter().cloned());
        lines
    }
    pub fn to_text(&self) -> String {
        join_model_lines(&self.lines())
    }
    /// a copy of the model with its reactions replaced
    pub fn with_reactions(&self, reactions: Vec<ReactionEntry>) -> ParsedModel {
        ParsedModel {
            reactions,
            ..self.clone()
        }
    }
}
