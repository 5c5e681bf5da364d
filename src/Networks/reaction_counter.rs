//! # Reaction Counter
//!
//! ## Purpose
//! Statistics of reaction shapes and motifs over whole models: how many reactions are
//! uni-uni, uni-bi, bi-uni, bi-bi, how many are autocatalytic or degradation reactions,
//! and which portion of all reactions each group makes up.
//!
//! ## Main Data Structures
//! - `ReactionCounts`: counts of one model, portions derived on demand
//! - `Portions`: count / total for every non-total key, only defined for total > 0
//! - `BatchCounts`: per-model results of a batch run as parallel columns keyed by model id
//!
//! ## Usage
//! ```
//! use OsciNet::Networks::reaction_counter::count;
//! let counts = count("var S0\nS0 -> S0 + S0; k0*S0\nS0 -> S1; k1*S0\nk0 = 1\nk1 = 1").unwrap();
//! assert_eq!(counts.total, 2);
//! assert_eq!(counts.autocatalysis, 1);
//! let portions = counts.portions().unwrap();
//! assert_eq!(portions.autocatalysis, 0.5);
//! ```
use super::antimony_model::ModelSyntax;
use super::errors::NetworkError;
use super::model_store::{ModelRecord, ModelStore};
use super::reaction_parser::{ReactionShape, is_reaction_line, parse_reaction};
use csv::{Terminator, Writer, WriterBuilder};
use log::{info, warn};
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::io;
use std::path::Path;

/// counts of reaction shapes and motifs of one model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionCounts {
    #[serde(rename = "uni-uni")]
    pub uni_uni: usize,
    #[serde(rename = "uni-bi")]
    pub uni_bi: usize,
    #[serde(rename = "bi-uni")]
    pub bi_uni: usize,
    #[serde(rename = "bi-bi")]
    pub bi_bi: usize,
    pub degradation: usize,
    pub autocatalysis: usize,
    pub total: usize,
}

/// every count except `total` divided by `total`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Portions {
    #[serde(rename = "uni-uni portion")]
    pub uni_uni: f64,
    #[serde(rename = "uni-bi portion")]
    pub uni_bi: f64,
    #[serde(rename = "bi-uni portion")]
    pub bi_uni: f64,
    #[serde(rename = "bi-bi portion")]
    pub bi_bi: f64,
    #[serde(rename = "degradation portion")]
    pub degradation: f64,
    #[serde(rename = "autocatalysis portion")]
    pub autocatalysis: f64,
}

impl ReactionCounts {
    pub fn shape_count(&self, shape: ReactionShape) -> usize {
        match shape {
            ReactionShape::UniUni => self.uni_uni,
            ReactionShape::UniBi => self.uni_bi,
            ReactionShape::BiUni => self.bi_uni,
            ReactionShape::BiBi => self.bi_bi,
        }
    }
    fn add_shape(&mut self, shape: ReactionShape) {
        match shape {
            ReactionShape::UniUni => self.uni_uni += 1,
            ReactionShape::UniBi => self.uni_bi += 1,
            ReactionShape::BiUni => self.bi_uni += 1,
            ReactionShape::BiBi => self.bi_bi += 1,
        }
    }
    /// fails with `NoReactions` when the model had no reactions
    pub fn portions(&self) -> Result<Portions, NetworkError> {
        if self.total == 0 {
            return Err(NetworkError::NoReactions);
        }
        let total = self.total as f64;
        Ok(Portions {
            uni_uni: self.uni_uni as f64 / total,
            uni_bi: self.uni_bi as f64 / total,
            bi_uni: self.bi_uni as f64 / total,
            bi_bi: self.bi_bi as f64 / total,
            degradation: self.degradation as f64 / total,
            autocatalysis: self.autocatalysis as f64 / total,
        })
    }
    /// counts and portions in one JSON object, as stored next to the model
    pub fn to_record(&self) -> Result<Value, NetworkError> {
        let mut record = match serde_json::to_value(self)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        if let Value::Object(portions) = serde_json::to_value(self.portions()?)? {
            record.extend(portions);
        }
        Ok(Value::Object(record))
    }
}

/// count reactions of a model text written with the default [`ModelSyntax`]
pub fn count(model_text: &str) -> Result<ReactionCounts, NetworkError> {
    count_with_syntax(model_text, &ModelSyntax::default())
}

/// count reactions of a model text. Comment lines and lines without the reaction arrow are
/// skipped; a reaction line that cannot be parsed is an error
pub fn count_with_syntax(
    model_text: &str,
    syntax: &ModelSyntax,
) -> Result<ReactionCounts, NetworkError> {
    let mut counts = ReactionCounts::default();
    for line in model_text.lines() {
        if !is_reaction_line(line, &syntax.comment_marker) {
            continue;
        }
        let reaction = parse_reaction(line)?;
        counts.total += 1;
        counts.add_shape(reaction.shape);
        if reaction.is_autocatalytic() {
            counts.autocatalysis += 1;
        }
        if reaction.is_degradation() {
            counts.degradation += 1;
        }
    }
    Ok(counts)
}

/// results of a batch run, one column per quantity, rows ordered as the input models
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchCounts {
    pub ids: Vec<String>,
    pub totals: Vec<usize>,
    pub uni_uni_portions: Vec<f64>,
    pub uni_bi_portions: Vec<f64>,
    pub bi_uni_portions: Vec<f64>,
    pub bi_bi_portions: Vec<f64>,
    pub degradation_portions: Vec<f64>,
    pub autocatalysis_portions: Vec<f64>,
    /// 1 when the model has NO autocatalytic reaction (autocatalysis count == 0),
    /// despite the name. Kept as downstream reports expect it
    pub has_autocatalytic_reaction: Vec<u8>,
}

impl BatchCounts {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn len(&self) -> usize {
        self.ids.len()
    }
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
    pub fn push(&mut self, id: &str, counts: &ReactionCounts) -> Result<(), NetworkError> {
        let portions = counts.portions()?;
        self.ids.push(id.to_string());
        self.totals.push(counts.total);
        self.uni_uni_portions.push(portions.uni_uni);
        self.uni_bi_portions.push(portions.uni_bi);
        self.bi_uni_portions.push(portions.bi_uni);
        self.bi_bi_portions.push(portions.bi_bi);
        self.degradation_portions.push(portions.degradation);
        self.autocatalysis_portions.push(portions.autocatalysis);
        self.has_autocatalytic_reaction
            .push(u8::from(counts.autocatalysis == 0));
        Ok(())
    }

    const HEADER: [&'static str; 9] = [
        "ID",
        "Autocatalysis Present",
        "Portion Degradation",
        "Portion Autocatalysis",
        "Portion Uni-Uni",
        "Portion Uni-Bi",
        "Portion Bi-Uni",
        "Portion Bi-Bi",
        "Total Reactions",
    ];

    fn row(&self, i: usize) -> Vec<String> {
        vec![
            self.ids[i].clone(),
            self.has_autocatalytic_reaction[i].to_string(),
            self.degradation_portions[i].to_string(),
            self.autocatalysis_portions[i].to_string(),
            self.uni_uni_portions[i].to_string(),
            self.uni_bi_portions[i].to_string(),
            self.bi_uni_portions[i].to_string(),
            self.bi_bi_portions[i].to_string(),
            self.totals[i].to_string(),
        ]
    }

    fn csv_writer() -> WriterBuilder {
        let mut builder = WriterBuilder::new();
        builder.terminator(Terminator::Any(b'\n'));
        builder
    }

    fn write_rows<W: io::Write>(&self, wtr: &mut Writer<W>) -> Result<(), NetworkError> {
        wtr.write_record(Self::HEADER)?;
        for i in 0..self.len() {
            wtr.write_record(self.row(i))?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// the batch as comma separated text with a header line
    pub fn to_csv(&self) -> Result<String, NetworkError> {
        let mut wtr = Self::csv_writer().from_writer(Vec::new());
        self.write_rows(&mut wtr)?;
        let bytes = wtr.into_inner().map_err(|e| NetworkError::Io(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    pub fn write_counts_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), NetworkError> {
        let mut wtr = Self::csv_writer().from_path(&path)?;
        self.write_rows(&mut wtr)?;
        info!(
            "reaction counts of {} models written to {}",
            self.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    pub fn pretty_print(&self) {
        let mut table = Table::new();
        table.add_row(Row::new(Self::HEADER.iter().map(|h| Cell::new(h)).collect()));
        for i in 0..self.len() {
            table.add_row(Row::new(self.row(i).iter().map(|f| Cell::new(f)).collect()));
        }
        table.printstd();
    }
}

/// count every model, write the counts back to the store and collect them into a batch.
/// A model without reactions aborts the batch
pub fn count_batch<S: ModelStore>(
    store: &mut S,
    models: &[ModelRecord],
    syntax: &ModelSyntax,
) -> Result<BatchCounts, NetworkError> {
    let mut batch = BatchCounts::new();
    for model in models {
        let counts = count_with_syntax(&model.model, syntax).map_err(|e| e.in_model(&model.id))?;
        let record = counts.to_record().map_err(|e| e.in_model(&model.id))?;
        let mut fields = Map::new();
        fields.insert("reactionCounts".to_string(), record);
        fields.insert("reactionsCounted".to_string(), json!(true));
        store.update(&model.id, fields)?;
        batch.push(&model.id, &counts)?;
    }
    info!("counted reactions of {} models", batch.len());
    Ok(batch)
}

/// query the store and count all matching models
pub fn count_all_reactions<S: ModelStore>(
    store: &mut S,
    criteria: &Value,
    syntax: &ModelSyntax,
) -> Result<BatchCounts, NetworkError> {
    let models = store.query(criteria)?;
    if models.is_empty() {
        warn!("no models match {}", criteria);
    }
    count_batch(store, &models, syntax)
}
