/////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS ON A REAL EVOLVED OSCILLATOR
/////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use crate::Networks::antimony_model::{ModelSyntax, RawModel, initialize};
    use crate::Networks::canonicalizer::{ReactionKey, build_reaction_index, canonicalize, serialize};
    use crate::Networks::errors::NetworkError;
    use crate::Networks::model_store::{InMemoryStore, JsonModelStore, ModelRecord, ModelStore};
    use crate::Networks::oracle::{DampingVerdict, Oracle, ReplayOracle};
    use crate::Networks::pruner::{prune, simplify_model};
    use crate::Networks::reaction_counter::{count, count_all_reactions};
    use crate::Networks::reaction_parser::{ReactionShape, parse_reaction};
    use approx::assert_relative_eq;
    use serde_json::json;
    use std::fs;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const OSCILLATOR: &str = "var S0
var S1
var S2
S2 -> S0; k0*S2
S0 -> S1+S0; k1*S0
S1 -> S0+S1; k2*S1
S1 -> S0+S2; k3*S1
S2 -> S0; k4*S2
S2 + S1 -> S2; k5*S2*S1
S0 -> S1+S0; k6*S0
S2 -> S1+S1; k7*S2
S2 -> S2+S2; k8*S2
S1 -> S0; k9*S1
S2 + S0 -> S1 + S2; k10*S2*S0
S1 + S1 -> S0 + S1; k11*S1*S1
S0 -> S0+S1; k12*S0
k0 = 7.314829248542936
k1 = 35.95227823979854
k2 = 41.54190920864631
k3 = 4.7667514994980555
k4 = 11.830987147018757
k5 = 15.50936673547638
k6 = 5.400180372157445
k7 = 8.171034267002623
k8 = 15.252690388653708
k9 = 7.202857436875558
k10 = 13.147047088765943
k11 = 7.20304738000393
k12 = 48.71489357141781
S0 = 1.0
S1 = 5.0
S2 = 9.0";

    #[test]
    fn test_oscillator_counts() {
        let counts = count(OSCILLATOR).unwrap();
        assert_eq!(counts.total, 13);
        assert_eq!(counts.uni_uni, 3);
        assert_eq!(counts.uni_bi, 7);
        assert_eq!(counts.bi_uni, 1);
        assert_eq!(counts.bi_bi, 2);
        assert_eq!(
            counts.uni_uni + counts.uni_bi + counts.bi_uni + counts.bi_bi,
            counts.total
        );
        // S2 + S1 -> S2
        assert_eq!(counts.degradation, 1);
        // S2 -> S2+S2, no bi-bi reaction duplicates a product
        assert_eq!(counts.autocatalysis, 1);
        let portions = counts.portions().unwrap();
        assert_relative_eq!(portions.uni_bi, 7.0 / 13.0);
        assert_relative_eq!(portions.degradation, 1.0 / 13.0);
    }

    #[test]
    fn test_oscillator_single_reactions() {
        let degradation = parse_reaction("S2 + S1 -> S2; k5*S2*S1").unwrap();
        assert_eq!(degradation.shape, ReactionShape::BiUni);
        assert!(degradation.is_degradation());
        let bi_bi = parse_reaction("S2 + S0 -> S1 + S2; k10*S2*S0").unwrap();
        assert_eq!(bi_bi.shape, ReactionShape::BiBi);
        assert!(!bi_bi.is_autocatalytic());
        assert!(!bi_bi.is_reversible_pair());
    }

    #[test]
    fn test_oscillator_canonical_form() {
        let model = initialize(&RawModel::new(OSCILLATOR)).unwrap();
        assert_eq!(model.n_floating_species, 3);
        assert_eq!(model.reactions.len(), 13);
        let canonical = canonicalize(&model).unwrap();
        assert_eq!(
            canonical.reaction_lines(),
            vec![
                "S2->S0; k0*S2",
                "S0->S0+S1; k1*S0",
                "S1->S0+S1; k2*S1",
                "S1->S0+S2; k3*S1",
                "S1+S2->S2; k4*S1*S2",
                "S2->S1+S1; k5*S2",
                "S2->S2+S2; k6*S2",
                "S1->S0; k7*S1",
                "S0+S2->S1+S2; k8*S0*S2",
                "S1+S1->S0+S1; k9*S1*S1",
            ]
        );
        assert_eq!(
            canonical.fused_reactions,
            vec!["S2 -> S0; k4*S2", "S0 -> S1+S0; k6*S0", "S0 -> S0+S1; k12*S0"]
        );
        let index = build_reaction_index(&canonical.reactions).unwrap();
        let fused = index.get(&ReactionKey::from_line("S2 -> S0").unwrap()).unwrap();
        assert_relative_eq!(fused, 7.314829248542936 + 11.830987147018757);
        let tripled = index.get(&ReactionKey::from_line("S0 -> S0 + S1").unwrap()).unwrap();
        assert_relative_eq!(
            tripled,
            35.95227823979854 + 5.400180372157445 + 48.71489357141781,
            max_relative = 1e-12
        );
        // species and initial conditions are untouched, rate constants follow the reactions
        let text = canonical.to_text();
        assert!(text.starts_with("var S0\nvar S1\nvar S2\nS2->S0; k0*S2"));
        assert!(text.ends_with("k9 = 7.20304738000393\nS0 = 1.0\nS1 = 5.0\nS2 = 9.0"));
    }

    #[test]
    fn test_canonical_model_counts_are_consistent() {
        let model = initialize(&RawModel::new(OSCILLATOR)).unwrap();
        let canonical = canonicalize(&model).unwrap();
        let counts = count(&canonical.to_text()).unwrap();
        assert_eq!(counts.total, 10);
        assert_eq!(counts.degradation, 1);
        assert_eq!(counts.autocatalysis, 1);
        // a canonical model is a fixed point of canonicalization
        let again = canonicalize(&initialize(&RawModel::new(&canonical.to_text())).unwrap()).unwrap();
        assert_eq!(again.reactions, canonical.reactions);
        assert_eq!(
            build_reaction_index(&serialize(&build_reaction_index(&model.reactions).unwrap()))
                .unwrap()
                .keys(),
            build_reaction_index(&model.reactions).unwrap().keys()
        );
    }

    #[test]
    fn test_oscillator_pruning_with_recorded_verdicts() {
        let model = canonicalize(&initialize(&RawModel::new(OSCILLATOR)).unwrap()).unwrap();
        // every other reaction turns out to be unnecessary
        let verdicts: Vec<DampingVerdict> = (0..10)
            .map(|i| DampingVerdict::new(i % 2 == 0, false))
            .collect();
        let mut oracle = Oracle::from(ReplayOracle::new(verdicts));
        let report = prune(&model, &mut oracle).unwrap();
        assert_eq!(report.oracle_calls, 10);
        assert_eq!(report.model.reactions.len(), 5);
        assert_eq!(report.model.rate_constant_lines().len(), 5);
        assert_eq!(
            report.removed,
            vec![
                "S0->S0+S1; k1*S0",
                "S1->S0+S2; k3*S1",
                "S2->S1+S1; k5*S2",
                "S1->S0; k7*S1",
                "S1+S1->S0+S1; k9*S1*S1",
            ]
        );
        assert_eq!(report.model.species, model.species);
        assert_eq!(report.model.initial_conditions, model.initial_conditions);
    }

    #[test]
    fn test_simplify_fails_as_a_whole() {
        let mut oracle = ReplayOracle::new(vec![DampingVerdict::new(false, false); 3]);
        let result = simplify_model(&RawModel::new(OSCILLATOR), &mut oracle);
        assert!(matches!(result, Err(NetworkError::Oracle(_))));
    }

    #[test]
    fn test_store_round_trip() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let records = vec![ModelRecord::new("osc", OSCILLATOR)];
        write!(temp_file, "{}", serde_json::to_string(&records).unwrap()).unwrap();
        let mut store = JsonModelStore::open(temp_file.path()).unwrap();
        let batch = count_all_reactions(&mut store, &json!({"ID": "osc"}), &ModelSyntax::default()).unwrap();
        assert_eq!(batch.totals, vec![13]);
        assert_eq!(batch.has_autocatalytic_reaction, vec![0]);

        let stored: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(temp_file.path()).unwrap()).unwrap();
        assert_eq!(stored[0]["reactionsCounted"], json!(true));
        assert_eq!(stored[0]["reactionCounts"]["total"], json!(13));

        let mut memory = InMemoryStore::new();
        memory.insert(ModelRecord::new("osc", OSCILLATOR));
        assert_eq!(memory.query(&json!({"reactionsCounted": true})).unwrap().len(), 0);
    }
}
