//! # Network Pruner
//!
//! Greedy removal of reactions that the oscillation does not need. Reactions are visited
//! once, left to right, in the order of the (canonicalized) model:
//! 1. the reaction is commented out and the model text is given to the oracle
//! 2. if the oracle reports neither damping nor divergence, the reaction and its rate
//!    constant are deleted for good
//! 3. otherwise the reaction is restored unchanged
//!
//! Earlier decisions are never revisited, so the result depends on the visiting order
//! and is not guaranteed to have the fewest possible reactions. An oracle failure aborts
//! the run; a partially pruned model is never returned.
use super::antimony_model::{ModelSyntax, ParsedModel, RawModel, initialize, join_model_lines};
use super::canonicalizer::canonicalize;
use super::errors::NetworkError;
use super::model_store::ModelStore;
use super::oracle::DampingOracle;
use log::{error, info};
use serde_json::{Map, Value, json};

/// outcome of one pruning run
#[derive(Debug, Clone)]
pub struct PruningReport {
    pub model: ParsedModel,
    pub removed: Vec<String>,
    pub oracle_calls: usize,
}

/// visit every reaction of the model once and delete those the oracle does not need
pub fn prune<O: DampingOracle>(
    model: &ParsedModel,
    oracle: &mut O,
) -> Result<PruningReport, NetworkError> {
    let snapshot = model.reactions.clone();
    let mut working = model.clone();
    let mut removed = Vec::new();
    let mut oracle_calls = 0;
    for (original_position, entry) in snapshot.iter().enumerate() {
        // every earlier deletion shifts the remaining reactions one place to the left
        let position = original_position - removed.len();
        let candidate = working.lines_with_disabled_reaction(Some(position));
        let text = join_model_lines(&candidate);
        oracle_calls += 1;
        let verdict = oracle.is_damped(&text).map_err(|e| {
            error!("oracle failed on reaction '{}': {}", entry.reaction, e);
            e
        })?;
        if verdict.sustains_oscillation() {
            info!("reaction '{}' is not needed, removed", entry.reaction);
            working.reactions.remove(position);
            removed.push(entry.reaction.clone());
        } else {
            info!(
                "reaction '{}' is needed (damped: {}, to infinity: {})",
                entry.reaction, verdict.damped, verdict.to_infinity
            );
        }
    }
    working.removed_reactions.extend(removed.iter().cloned());
    info!(
        "pruning kept {} of {} reactions after {} oracle calls",
        working.reactions.len(),
        snapshot.len(),
        oracle_calls
    );
    Ok(PruningReport {
        model: working,
        removed,
        oracle_calls,
    })
}

/// initialize, fuse duplicate reactions, then prune
pub fn simplify_model<O: DampingOracle>(
    raw: &RawModel,
    oracle: &mut O,
) -> Result<PruningReport, NetworkError> {
    let model = initialize(raw)?;
    let canonical = canonicalize(&model)?;
    prune(&canonical, oracle)
}

/// models that were simplified and models whose simplification failed
#[derive(Debug, Default)]
pub struct SimplificationSummary {
    pub simplified: Vec<String>,
    pub failed: Vec<(String, NetworkError)>,
}

/// simplify every model matching the criteria and store the reduced text as `reducedModel`.
/// A model whose run fails is reported and left untouched in the store
pub fn simplify_all_models<S: ModelStore, O: DampingOracle>(
    store: &mut S,
    criteria: &Value,
    syntax: &ModelSyntax,
    oracle: &mut O,
) -> Result<SimplificationSummary, NetworkError> {
    let mut summary = SimplificationSummary::default();
    for record in store.query(criteria)? {
        let raw = RawModel::with_syntax(&record.model, syntax.clone());
        match simplify_model(&raw, oracle) {
            Ok(report) => {
                let mut fields = Map::new();
                fields.insert("reducedModel".to_string(), json!(report.model.to_text()));
                fields.insert("reactionsPruned".to_string(), json!(true));
                fields.insert("removedReactions".to_string(), json!(report.removed));
                fields.insert(
                    "fusedReactions".to_string(),
                    json!(report.model.fused_reactions),
                );
                store.update(&record.id, fields)?;
                summary.simplified.push(record.id);
            }
            Err(e) => {
                error!("model '{}' could not be simplified: {}", record.id, e);
                summary.failed.push((record.id, e));
            }
        }
    }
    Ok(summary)
}
