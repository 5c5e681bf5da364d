/// error type shared by all reaction network tools
pub mod errors;
/// Splits a reaction line `S2 + S1 -> S2; k5*S2*S1` into reactants, products and shape
/// (uni-uni, uni-bi, bi-uni, bi-bi)
///
/// # Examples
/// ```
/// use OsciNet::Networks::reaction_parser::{parse_reaction, ReactionShape};
/// let reaction = parse_reaction("S2 + S0 -> S1 + S2; k10*S2*S0").unwrap();
/// assert_eq!(reaction.shape, ReactionShape::BiBi);
/// assert!(!reaction.is_autocatalytic());
/// ```
pub mod reaction_parser;
/// autocatalysis and degradation motifs decided from the species of a reaction
pub mod motifs;
/// Counts reaction shapes and motifs of a model and the portion of all reactions each
/// group makes up. Batch runs over the model store write the counts back to every model
/// and produce a table (CSV or pretty printed).
pub mod reaction_counter;
/// Antimony-like model text: species, reactions paired with their rate constants,
/// initial conditions
pub mod antimony_model;
/// Fusion of duplicate reactions (same reactants and products) by summing their rate
/// constants, and renumbering of the rate constants
///
/// # Examples
/// ```
/// use OsciNet::Networks::antimony_model::{initialize, RawModel};
/// use OsciNet::Networks::canonicalizer::canonicalize;
/// let model = initialize(&RawModel::new("A -> B; k0*A\nA -> B; k1*A\nk0 = 1\nk1 = 2")).unwrap();
/// let canonical = canonicalize(&model).unwrap();
/// assert_eq!(canonical.to_text(), "A->B; k0*A\nk0 = 3");
/// ```
pub mod canonicalizer;
/// the question pruning asks about a candidate model: damped, divergent, or still oscillating
pub mod oracle;
/// Removes reactions one at a time as long as the oracle confirms that the model keeps
/// oscillating
pub mod pruner;
/// store of model records: query by criteria, update fields of one record
pub mod model_store;

#[cfg(test)]
mod network_tests;
